// SPDX-License-Identifier: MIT
//! Tests for the status endpoint server.
//! Spins up the axum router on a random port and exercises it over real HTTP.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use reqwest::{Method, StatusCode};
use serde_json::Value;

use uxprobe::config::{ProbeConfig, ENV_API_KEY, ENV_ENVIRONMENT, ENV_REGION};
use uxprobe::rest::build_router;
use uxprobe::AppContext;

const SECRET: &str = "sk-live-very-secret-value";

/// Bind the status router on port 0 and return its base URL.
async fn spawn_status_server(config: ProbeConfig) -> String {
    let ctx = Arc::new(AppContext::new(config));
    let router = build_router(ctx);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

fn config_from(vars: &[(&str, &str)]) -> ProbeConfig {
    let map: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    ProbeConfig::from_lookup(move |name| map.get(name).cloned())
}

#[tokio::test]
async fn health_returns_healthy_with_fresh_timestamp() {
    let base = spawn_status_server(ProbeConfig::default()).await;
    let before = Utc::now();

    let resp = reqwest::get(format!("{base}/api/health")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "uxprobe");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));

    let ts: DateTime<Utc> = body["timestamp"]
        .as_str()
        .expect("timestamp present")
        .parse()
        .expect("timestamp is RFC 3339");
    assert!(ts >= before, "timestamp {ts} earlier than request time {before}");
}

#[tokio::test]
async fn non_get_methods_are_405_with_json_body() {
    let base = spawn_status_server(ProbeConfig::default()).await;
    let client = reqwest::Client::new();

    for route in ["/api/health", "/api/diagnostics"] {
        for method in [Method::POST, Method::PUT, Method::DELETE, Method::PATCH] {
            let resp = client
                .request(method.clone(), format!("{base}{route}"))
                .send()
                .await
                .unwrap();
            assert_eq!(
                resp.status(),
                StatusCode::METHOD_NOT_ALLOWED,
                "{method} {route}"
            );
            let body: Value = resp.json().await.unwrap();
            assert_eq!(body["error"], "Method not allowed", "{method} {route}");
        }
    }
}

#[tokio::test]
async fn diagnostics_reports_key_presence_without_the_value() {
    let config = config_from(&[
        (ENV_API_KEY, SECRET),
        (ENV_ENVIRONMENT, "production"),
        (ENV_REGION, "iad1"),
    ]);
    let base = spawn_status_server(config).await;

    let resp = reqwest::get(format!("{base}/api/diagnostics")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let text = resp.text().await.unwrap();
    assert!(
        !text.contains(SECRET),
        "diagnostics body must never contain the secret"
    );

    let body: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(body["ok"], true);
    assert_eq!(body["hasKey"], true);
    assert_eq!(body["keyStatus"], "configured");
    assert_eq!(body["environment"], "production");
    assert_eq!(body["region"], "iad1");
    assert_eq!(body["runtime"], "rust");
}

#[tokio::test]
async fn diagnostics_falls_back_when_nothing_is_set() {
    let base = spawn_status_server(config_from(&[])).await;

    let body: Value = reqwest::get(format!("{base}/api/diagnostics"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["hasKey"], false);
    assert_eq!(body["keyStatus"], "missing");
    assert_eq!(body["environment"], "development");
    assert_eq!(body["region"], "unknown");
}

#[tokio::test]
async fn empty_api_key_counts_as_missing() {
    let base = spawn_status_server(config_from(&[(ENV_API_KEY, "")])).await;

    let body: Value = reqwest::get(format!("{base}/api/diagnostics"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["hasKey"], false);
    assert_eq!(body["keyStatus"], "missing");
}
