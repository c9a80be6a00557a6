// SPDX-License-Identifier: MIT
//! Wire types for the external audit service.
//!
//! The service's response shape is loosely specified, so every field the
//! probe does not strictly need is defaulted: an absent `keyInsights` is an
//! empty list, not a deserialization failure. What does fail to
//! deserialize — a non-object body, a string where a list belongs — is
//! surfaced as a schema error at the boundary instead of propagating as
//! silently-missing data.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request body for POST /api/audit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditRequest {
    /// Audit flavor, e.g. `"full"` or `"quick"`.
    #[serde(rename = "type")]
    pub audit_type: String,
    /// Page to audit.
    pub url: String,
}

impl AuditRequest {
    pub fn full(url: impl Into<String>) -> Self {
        Self {
            audit_type: "full".to_string(),
            url: url.into(),
        }
    }
}

/// An issue found by the audit.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Issue {
    pub title: String,
    pub description: String,
    pub severity: String,
    pub recommendation: String,
}

/// Response body from POST /api/audit. All fields optional on the wire.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AuditResponse {
    pub key_insights: Vec<String>,
    pub recommendations: Vec<String>,
    pub issues: Vec<Issue>,
}

impl AuditResponse {
    /// First reported issue, if the audit found any.
    pub fn first_issue(&self) -> Option<&Issue> {
        self.issues.first()
    }
}

/// Request body for POST /api/share-report.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareReportRequest {
    /// Audit payload forwarded verbatim; the probe does not interpret it.
    pub audit_data: Value,
    pub recipient_email: String,
    pub recipient_name: String,
    pub platform_name: String,
}
