// SPDX-License-Identifier: MIT
//! Verification flows against the live audit service.
//!
//! Each flow issues one request, produces a typed report on success, and
//! maps failures onto the error taxonomy. Callers log the outcome; nothing
//! here panics or retries.

use serde_json::json;
use tracing::info;

use crate::error::ProbeError;

use super::client::AuditClient;
use super::language::{scan_language, LanguageScan};
use super::schema::{AuditRequest, Issue, ShareReportRequest};

/// Result of a successful audit verification run.
#[derive(Debug, Clone)]
pub struct AuditVerifyReport {
    pub key_insights: Vec<String>,
    pub recommendations: Vec<String>,
    pub first_issue: Option<Issue>,
    pub language: LanguageScan,
}

/// Run a full audit of `target_url` and summarize the response.
pub async fn verify_audit(
    client: &AuditClient,
    target_url: &str,
) -> Result<AuditVerifyReport, ProbeError> {
    let request = AuditRequest::full(target_url);
    let response = client.run_audit(&request).await?;

    info!(
        insights = response.key_insights.len(),
        recommendations = response.recommendations.len(),
        issues = response.issues.len(),
        "audit responded"
    );

    // Scan the whole serialized body, not just the prose fields, matching
    // what a reader of the raw response would see.
    let serialized =
        serde_json::to_string(&response).map_err(|e| ProbeError::Client(e.to_string()))?;
    let language = scan_language(&serialized);

    Ok(AuditVerifyReport {
        key_insights: response.key_insights.clone(),
        recommendations: response.recommendations.clone(),
        first_issue: response.first_issue().cloned(),
        language,
    })
}

/// Result of a successful share-report verification run.
#[derive(Debug, Clone)]
pub struct ShareVerifyReport {
    pub acknowledgement: serde_json::Value,
}

/// Post a canned share-report request and return the acknowledgement.
pub async fn verify_share(
    client: &AuditClient,
    recipient_email: &str,
    recipient_name: &str,
) -> Result<ShareVerifyReport, ProbeError> {
    let request = ShareReportRequest {
        audit_data: json!({
            "keyInsights": ["Navigation is discoverable"],
            "recommendations": ["Increase contrast on primary actions"],
            "issues": [],
        }),
        recipient_email: recipient_email.to_string(),
        recipient_name: recipient_name.to_string(),
        platform_name: "UX Audit".to_string(),
    };

    let acknowledgement = client.share_report(&request).await?;
    info!("share-report acknowledged");

    Ok(ShareVerifyReport { acknowledgement })
}
