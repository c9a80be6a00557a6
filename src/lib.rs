// SPDX-License-Identifier: MIT
//! uxprobe — verification toolkit for the external UX Audit application.
//!
//! Three surfaces:
//! - `rest`      — embedded status/diagnostics HTTP server
//! - `audit`     — direct HTTP verification of the audit and share-report APIs
//! - `scenarios` — headless-browser end-to-end flows with screenshot capture

pub mod audit;
pub mod browser;
pub mod config;
pub mod error;
pub mod rest;
pub mod scenarios;

use std::sync::Arc;

use config::ProbeConfig;

/// Shared state handed to every REST handler.
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<ProbeConfig>,
    pub started_at: std::time::Instant,
}

impl AppContext {
    pub fn new(config: ProbeConfig) -> Self {
        Self {
            config: Arc::new(config),
            started_at: std::time::Instant::now(),
        }
    }
}
