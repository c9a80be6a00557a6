// SPDX-License-Identifier: MIT
//! Audit report scenario: submit a URL, wait for the report, capture it,
//! then branch on the optional Deep Dive affordance. Deep Dive present →
//! expand it and capture the expanded report; absent → capture the
//! unexpanded state under its own name.

use std::path::Path;

use tracing::info;

use crate::browser::{wait_for_selector, BrowserSession};
use crate::config::ProbeConfig;
use crate::error::ProbeError;

use super::{
    conclude, ScenarioOutcome, ANALYZE_LABEL, DEEP_DIVE_LABEL, RESULTS_PANEL, SETTLE_BOUND,
    URL_INPUT,
};

pub const REPORT_SCREENSHOT: &str = "audit-report-updated.png";
pub const DEEP_DIVE_SCREENSHOT: &str = "deep-dive-updated.png";
pub const DEEP_DIVE_MISSING_SCREENSHOT: &str = "deep-dive-missing.png";
pub const TIMEOUT_SCREENSHOT: &str = "audit-report-timeout.png";

/// Which screenshot the Deep Dive branch writes: the expanded report when
/// the affordance was clicked, the still-unexpanded state when it was
/// absent. The base report shot always precedes this one.
fn deep_dive_capture(clicked: bool) -> &'static str {
    if clicked {
        DEEP_DIVE_SCREENSHOT
    } else {
        DEEP_DIVE_MISSING_SCREENSHOT
    }
}

pub async fn run(config: &ProbeConfig, target_url: &str) -> Result<ScenarioOutcome, ProbeError> {
    let mut session = BrowserSession::launch(&config.browser).await?;
    let result = flow(&session, config, target_url).await;
    conclude(&mut session, "audit-report", result).await
}

async fn flow(
    session: &BrowserSession,
    config: &ProbeConfig,
    target_url: &str,
) -> Result<ScenarioOutcome, ProbeError> {
    let browser_cfg = &config.browser;
    let mut outcome = ScenarioOutcome::default();

    session.goto(&config.base_url, browser_cfg.nav_timeout()).await?;
    session.fill(URL_INPUT, target_url).await?;
    session.click_labeled(ANALYZE_LABEL).await?;

    match wait_for_selector(session.page(), RESULTS_PANEL, browser_cfg.analysis_timeout()).await {
        Ok(_) => {
            session.capture(Path::new(REPORT_SCREENSHOT), true).await?;
            outcome.record(REPORT_SCREENSHOT);

            let deep_dive = session
                .try_click_labeled(DEEP_DIVE_LABEL, browser_cfg.deep_dive_timeout())
                .await?;
            outcome.deep_dive_found = Some(deep_dive);

            if deep_dive {
                session.settle(SETTLE_BOUND).await;
            } else {
                info!("deep dive not offered, capturing current state");
            }
            let branch_shot = deep_dive_capture(deep_dive);
            session.capture(Path::new(branch_shot), true).await?;
            outcome.record(branch_shot);
        }
        Err(_) => {
            info!("report did not render in time, capturing fallback");
            outcome.analysis_timed_out = true;
            session.capture(Path::new(TIMEOUT_SCREENSHOT), true).await?;
            outcome.record(TIMEOUT_SCREENSHOT);
        }
    }

    Ok(outcome)
}
