// SPDX-License-Identifier: MIT
//! HTTP-driven verification of the external audit service.
//!
//! [`AuditClient`] talks to the audit and share-report APIs with bounded
//! timeouts and a typed wire boundary; [`verify`] runs the verification
//! flows and produces printable reports.

pub mod client;
pub mod language;
pub mod schema;
pub mod verify;

pub use client::AuditClient;
pub use language::{scan_language, LanguageScan};
pub use schema::{AuditRequest, AuditResponse, Issue, ShareReportRequest};
