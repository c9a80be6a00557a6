// rest/mod.rs — Status endpoint HTTP server.
//
// Axum server, local only. Two routes, both GET:
//   GET /api/health       — liveness probe
//   GET /api/diagnostics  — environment/key diagnostics (presence-only)
//
// Any other method on either route answers 405 with a JSON error body.
// Axum's built-in 405 has an empty body, so each MethodRouter carries an
// explicit fallback.

pub mod routes;

use anyhow::Result;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

use crate::AppContext;

pub const STATUS_PORT: u16 = 4400;

pub async fn start_status_server(ctx: Arc<AppContext>, port: u16) -> Result<()> {
    let bind = format!("127.0.0.1:{port}");
    let addr: SocketAddr = bind.parse()?;

    let router = build_router(ctx);

    info!("status endpoints listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;
    Ok(())
}

pub fn build_router(ctx: Arc<AppContext>) -> Router {
    Router::new()
        .route(
            "/api/health",
            get(routes::health::health).fallback(method_not_allowed),
        )
        .route(
            "/api/diagnostics",
            get(routes::diagnostics::diagnostics).fallback(method_not_allowed),
        )
        .with_state(ctx)
}

async fn method_not_allowed() -> (StatusCode, Json<Value>) {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(json!({ "error": "Method not allowed" })),
    )
}
