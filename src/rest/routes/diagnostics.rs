// rest/routes/diagnostics.rs — GET /api/diagnostics.
//
// Presence-only disclosure: the response says whether the API key is
// configured, never what it is. The handler cannot leak the value because
// ProbeConfig only carries the boolean.

use axum::{extract::State, Json};
use chrono::Utc;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::AppContext;

pub async fn diagnostics(State(ctx): State<Arc<AppContext>>) -> Json<Value> {
    let cfg = &ctx.config;
    Json(json!({
        "ok": true,
        "hasKey": cfg.has_api_key,
        "environment": cfg.environment,
        "region": cfg.region,
        "timestamp": Utc::now().to_rfc3339(),
        "runtime": "rust",
        "version": env!("CARGO_PKG_VERSION"),
        "keyStatus": if cfg.has_api_key { "configured" } else { "missing" },
    }))
}
