// SPDX-License-Identifier: MIT
//! Image tab scenario: submit a URL, wait for results, open the image
//! analysis tab, capture it.

use std::path::Path;

use tracing::info;

use crate::browser::{wait_for_selector, BrowserSession};
use crate::config::ProbeConfig;
use crate::error::ProbeError;

use super::{
    conclude, ScenarioOutcome, ANALYZE_LABEL, RESULTS_PANEL, SETTLE_BOUND, URL_INPUT,
};

pub const MAIN_SCREENSHOT: &str = "image-tab-test.png";
pub const TIMEOUT_SCREENSHOT: &str = "image-tab-timeout.png";

const IMAGES_TAB_LABEL: &str = "images";

pub async fn run(config: &ProbeConfig, target_url: &str) -> Result<ScenarioOutcome, ProbeError> {
    let mut session = BrowserSession::launch(&config.browser).await?;
    let result = flow(&session, config, target_url).await;
    conclude(&mut session, "image-tab", result).await
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
            session.click_labeled(IMAGES_TAB_LABEL).await?;
            session.settle(SETTLE_BOUND).await;
            session.capture(Path::new(MAIN_SCREENSHOT), true).await?;
            outcome.record(MAIN_SCREENSHOT);
        }
        Err(_) => {
            info!("analysis did not render in time, capturing fallback");
            outcome.analysis_timed_out = true;
            session.capture(Path::new(TIMEOUT_SCREENSHOT), true).await?;
            outcome.record(TIMEOUT_SCREENSHOT);
        }
    }

    Ok(outcome)
}
