// SPDX-License-Identifier: MIT
//! Probe error taxonomy.
//!
//! Every failure a verification run can hit falls into one of five buckets:
//!
//!   `server_error`  — the external API responded with a non-2xx status
//!   `network_error` — the request was dispatched but no response arrived
//!                     (connection refused, timeout)
//!   `client_error`  — anything else that went wrong constructing or
//!                     sending the request
//!   `schema_error`  — a 2xx body that does not match the expected shape
//!   `ui_failure`    — a browser automation step failed (selector timeout,
//!                     navigation error, CDP fault)
//!
//! None are retried; each run is terminal and reports exactly one bucket.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProbeError {
    /// The external API answered with an error status.
    #[error("server responded {status}: {body}")]
    Server { status: u16, body: String },

    /// The request went out but no response came back.
    #[error("no response from server: {0}")]
    Network(String),

    /// Request construction or dispatch failed before reaching the wire.
    #[error("request failed: {0}")]
    Client(String),

    /// A 2xx response body did not deserialize into the expected shape.
    #[error("response shape mismatch: {0}")]
    Schema(String),

    /// A browser interaction step failed.
    #[error("browser interaction failed: {0}")]
    Ui(String),
}

impl ProbeError {
    /// Machine-readable bucket name, used in log lines and asserted in tests.
    pub fn bucket(&self) -> &'static str {
        match self {
            ProbeError::Server { .. } => "server_error",
            ProbeError::Network(_) => "network_error",
            ProbeError::Client(_) => "client_error",
            ProbeError::Schema(_) => "schema_error",
            ProbeError::Ui(_) => "ui_failure",
        }
    }
}

impl From<reqwest::Error> for ProbeError {
    /// Classify a transport-level error: dispatched-but-unanswered requests
    /// (connect failures, timeouts) are `Network`; everything else is
    /// `Client`. Status errors never reach this path — the client inspects
    /// statuses before consuming the body.
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() || e.is_connect() {
            ProbeError::Network(e.to_string())
        } else {
            ProbeError::Client(e.to_string())
        }
    }
}

impl From<chromiumoxide::error::CdpError> for ProbeError {
    fn from(e: chromiumoxide::error::CdpError) -> Self {
        ProbeError::Ui(e.to_string())
    }
}
