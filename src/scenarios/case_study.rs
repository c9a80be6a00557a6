// SPDX-License-Identifier: MIT
//! Case study scenario: a demo walkthrough against a known page. Captures
//! the rendered report, then tries the Deep Dive branch for an extra shot.

use std::path::Path;

use tracing::info;

use crate::browser::{wait_for_selector, BrowserSession};
use crate::config::ProbeConfig;
use crate::error::ProbeError;

use super::{
    conclude, ScenarioOutcome, ANALYZE_LABEL, DEEP_DIVE_LABEL, RESULTS_PANEL, SETTLE_BOUND,
    URL_INPUT,
};

pub const DEMO_SCREENSHOT: &str = "case-study-demo.png";
pub const DEEP_DIVE_SCREENSHOT: &str = "case-study-deep-dive.png";
pub const TIMEOUT_SCREENSHOT: &str = "case-study-timeout.png";

/// Page audited when the caller does not supply one.
pub const DEFAULT_CASE_STUDY_URL: &str = "https://example.com";

pub async fn run(
    config: &ProbeConfig,
    target_url: Option<&str>,
) -> Result<ScenarioOutcome, ProbeError> {
    let target = target_url.unwrap_or(DEFAULT_CASE_STUDY_URL);
    let mut session = BrowserSession::launch(&config.browser).await?;
    let result = flow(&session, config, target).await;
    conclude(&mut session, "case-study", result).await
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
            session.capture(Path::new(DEMO_SCREENSHOT), true).await?;
            outcome.record(DEMO_SCREENSHOT);

            let deep_dive = session
                .try_click_labeled(DEEP_DIVE_LABEL, browser_cfg.deep_dive_timeout())
                .await?;
            outcome.deep_dive_found = Some(deep_dive);
            if deep_dive {
                session.settle(SETTLE_BOUND).await;
                session
                    .capture(Path::new(DEEP_DIVE_SCREENSHOT), true)
                    .await?;
                outcome.record(DEEP_DIVE_SCREENSHOT);
            } else {
                info!("deep dive not offered in demo");
            }
        }
        Err(_) => {
            info!("demo report did not render in time, capturing fallback");
            outcome.analysis_timed_out = true;
            session.capture(Path::new(TIMEOUT_SCREENSHOT), true).await?;
            outcome.record(TIMEOUT_SCREENSHOT);
        }
    }

    Ok(outcome)
}
