use axum::{extract::State, Json};
use chrono::Utc;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::AppContext;

pub async fn health(State(_ctx): State<Arc<AppContext>>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "uxprobe",
        "timestamp": Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
