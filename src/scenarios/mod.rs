// SPDX-License-Identifier: MIT
//! Browser-driven verification scenarios.
//!
//! All three scenarios share one shape:
//!
//! ```text
//! Start → NavigateHome → SubmitUrl → WaitForAnalysis
//!       → { results: Screenshot | deadline: FallbackScreenshot }
//!       → Cleanup → End
//! ```
//!
//! with an error transition from any state to ErrorScreenshot → Cleanup →
//! End. The harness in this module owns the two guarantees: an error-state
//! screenshot is attempted on every failure, and the session is closed on
//! every exit path.

pub mod audit_report;
pub mod case_study;
pub mod image_tab;

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{error, info, warn};

use crate::browser::BrowserSession;
use crate::error::ProbeError;

/// Screenshot written when a scenario errors out, whatever state it was in.
pub const ERROR_SCREENSHOT: &str = "error-state.png";

/// Selector for the audit app's URL input on the home page.
pub(crate) const URL_INPUT: &str = "input[type='url'], input[name='url']";
/// Selector that appears once audit results have rendered.
pub(crate) const RESULTS_PANEL: &str = ".audit-results";
/// Label of the submit affordance on the home page.
pub(crate) const ANALYZE_LABEL: &str = "analyze";
/// Label of the optional deep-dive affordance on the results view.
pub(crate) const DEEP_DIVE_LABEL: &str = "deep dive";

/// Bounded render-settle window after tab switches and expansions.
pub(crate) const SETTLE_BOUND: Duration = Duration::from_secs(5);

/// What a scenario run produced.
#[derive(Debug, Clone, Default)]
pub struct ScenarioOutcome {
    /// Screenshot files written, in capture order.
    pub screenshots: Vec<String>,
    /// The analysis wait expired and the fallback branch was taken.
    pub analysis_timed_out: bool,
    /// Whether the Deep Dive affordance was found, for scenarios that look.
    pub deep_dive_found: Option<bool>,
}

impl ScenarioOutcome {
    pub(crate) fn record(&mut self, screenshot: &str) {
        self.screenshots.push(screenshot.to_string());
    }
}

/// The slice of a session the harness needs. `BrowserSession` is the real
/// implementation; tests substitute a double to pin down the cleanup
/// contract.
#[async_trait]
pub trait SessionControl: Send {
    async fn capture_state(&self, path: &Path) -> Result<(), ProbeError>;
    async fn shutdown(&mut self);
}

#[async_trait]
impl SessionControl for BrowserSession {
    async fn capture_state(&self, path: &Path) -> Result<(), ProbeError> {
        self.capture(path, true).await
    }

    async fn shutdown(&mut self) {
        self.close().await;
    }
}

/// Terminal step of every scenario: error screenshot on failure, then
/// session shutdown, then the original result.
pub(crate) async fn conclude<S: SessionControl>(
    session: &mut S,
    name: &str,
    result: Result<ScenarioOutcome, ProbeError>,
) -> Result<ScenarioOutcome, ProbeError> {
    match &result {
        Ok(outcome) => {
            info!(
                scenario = name,
                screenshots = outcome.screenshots.len(),
                timed_out = outcome.analysis_timed_out,
                "scenario finished"
            );
        }
        Err(e) => {
            error!(scenario = name, bucket = e.bucket(), error = %e, "scenario failed");
            if let Err(shot) = session.capture_state(Path::new(ERROR_SCREENSHOT)).await {
                warn!(error = %shot, "error-state screenshot also failed");
            }
        }
    }
    session.shutdown().await;
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct FakeSession {
        captures: Arc<AtomicUsize>,
        shutdowns: Arc<AtomicUsize>,
        capture_fails: bool,
    }

    #[async_trait]
    impl SessionControl for FakeSession {
        async fn capture_state(&self, _path: &Path) -> Result<(), ProbeError> {
            self.captures.fetch_add(1, Ordering::SeqCst);
            if self.capture_fails {
                Err(ProbeError::Ui("no page".into()))
            } else {
                Ok(())
            }
        }

        async fn shutdown(&mut self) {
            self.shutdowns.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn fake(capture_fails: bool) -> (FakeSession, Arc<AtomicUsize>, Arc<AtomicUsize>) {
        let captures = Arc::new(AtomicUsize::new(0));
        let shutdowns = Arc::new(AtomicUsize::new(0));
        (
            FakeSession {
                captures: captures.clone(),
                shutdowns: shutdowns.clone(),
                capture_fails,
            },
            captures,
            shutdowns,
        )
    }

    #[tokio::test]
    async fn success_closes_session_without_error_screenshot() {
        let (mut session, captures, shutdowns) = fake(false);
        let result = conclude(&mut session, "t", Ok(ScenarioOutcome::default())).await;
        assert!(result.is_ok());
        assert_eq!(captures.load(Ordering::SeqCst), 0);
        assert_eq!(shutdowns.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failure_takes_error_screenshot_then_closes() {
        let (mut session, captures, shutdowns) = fake(false);
        let result = conclude(
            &mut session,
            "t",
            Err(ProbeError::Ui("selector timed out".into())),
        )
        .await;
        assert_eq!(result.unwrap_err().bucket(), "ui_failure");
        assert_eq!(captures.load(Ordering::SeqCst), 1);
        assert_eq!(shutdowns.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn session_closes_even_when_error_screenshot_fails() {
        let (mut session, _captures, shutdowns) = fake(true);
        let result = conclude(
            &mut session,
            "t",
            Err(ProbeError::Network("connection refused".into())),
        )
        .await;
        assert_eq!(result.unwrap_err().bucket(), "network_error");
        assert_eq!(shutdowns.load(Ordering::SeqCst), 1);
    }
}
