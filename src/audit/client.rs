// SPDX-License-Identifier: MIT
//! HTTP client for the external audit service.
//!
//! Timeouts are per endpoint: the audit itself can take most of a minute,
//! the share-report call should not. No retries — a failed run reports one
//! error bucket and stops.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::config::{AUDIT_TIMEOUT, SHARE_TIMEOUT};
use crate::error::ProbeError;

use super::schema::{AuditRequest, AuditResponse, ShareReportRequest};

pub struct AuditClient {
    http: reqwest::Client,
    base_url: String,
}

impl AuditClient {
    /// Build a client for the audit app at `base_url` (no trailing slash).
    pub fn new(base_url: impl Into<String>) -> Result<Self, ProbeError> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| ProbeError::Client(e.to_string()))?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// POST /api/audit with the 60s bound.
    pub async fn run_audit(&self, request: &AuditRequest) -> Result<AuditResponse, ProbeError> {
        self.post_json("/api/audit", request, AUDIT_TIMEOUT).await
    }

    /// POST /api/share-report with the 30s bound. The service returns an
    /// unspecified acknowledgement object.
    pub async fn share_report(
        &self,
        request: &ShareReportRequest,
    ) -> Result<serde_json::Value, ProbeError> {
        self.post_json("/api/share-report", request, SHARE_TIMEOUT)
            .await
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        timeout: Duration,
    ) -> Result<T, ProbeError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, timeout_secs = timeout.as_secs(), "dispatching request");

        let response = self
            .http
            .post(&url)
            .timeout(timeout)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProbeError::Server {
                status: status.as_u16(),
                body,
            });
        }

        // Read the body as text first so a malformed 2xx payload maps to
        // the schema bucket, not a transport error.
        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| ProbeError::Schema(e.to_string()))
    }
}
