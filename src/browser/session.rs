// SPDX-License-Identifier: MIT
//! Chromium session lifecycle.
//!
//! A [`BrowserSession`] owns three things: the browser process, the spawned
//! CDP event-handler task, and one page. `close()` tears all three down and
//! is idempotent — the scenario harness calls it on every exit path, and a
//! second call is a no-op because the browser handle has already been taken.

use std::path::Path;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

use chromiumoxide::browser::{Browser, BrowserConfig as CdpBrowserConfig};
use chromiumoxide::cdp::browser_protocol::page::CaptureScreenshotFormat;
use chromiumoxide::page::{Page, ScreenshotParams};
use futures_util::StreamExt;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::config::BrowserConfig;
use crate::error::ProbeError;

use super::wait::{poll_attempt, wait_until};

pub struct BrowserSession {
    browser: Option<Browser>,
    handler_task: Option<JoinHandle<()>>,
    page: Page,
}

impl BrowserSession {
    /// Launch a Chromium process and open a blank page.
    pub async fn launch(config: &BrowserConfig) -> Result<Self, ProbeError> {
        let mut builder = CdpBrowserConfig::builder()
            .window_size(config.viewport_width, config.viewport_height)
            .no_sandbox();
        if !config.headless {
            builder = builder.with_head();
        }
        let cdp_config = builder.build().map_err(ProbeError::Ui)?;

        let (browser, mut handler) = Browser::launch(cdp_config).await?;

        // The handler stream must be drained for the CDP connection to make
        // progress; it ends when the browser process goes away.
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        let page = browser.new_page("about:blank").await?;
        debug!(
            width = config.viewport_width,
            height = config.viewport_height,
            "browser session started"
        );

        Ok(Self {
            browser: Some(browser),
            handler_task: Some(handler_task),
            page,
        })
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Navigate and wait for the load to finish, bounded by `timeout`.
    pub async fn goto(&self, url: &str, timeout: Duration) -> Result<(), ProbeError> {
        debug!(%url, "navigating");
        tokio::time::timeout(timeout, async {
            self.page.goto(url).await?;
            self.page.wait_for_navigation().await?;
            Ok::<_, ProbeError>(())
        })
        .await
        .map_err(|_| ProbeError::Ui(format!("navigation to {url} timed out")))?
    }

    /// Click an element and type into it.
    pub async fn fill(&self, selector: &str, text: &str) -> Result<(), ProbeError> {
        let element = self
            .page
            .find_element(selector)
            .await
            .map_err(|_| ProbeError::Ui(format!("input `{selector}` not found")))?;
        element.click().await?;
        element.type_str(text).await?;
        Ok(())
    }

    /// Click the first button-like element whose text contains `label`
    /// (case-insensitive). Errors when no such element exists — use
    /// [`try_click_labeled`](Self::try_click_labeled) for optional
    /// affordances.
    pub async fn click_labeled(&self, label: &str) -> Result<(), ProbeError> {
        if self.click_by_text(label).await? {
            Ok(())
        } else {
            Err(ProbeError::Ui(format!("no `{label}` button on page")))
        }
    }

    /// Poll for a button-like element labeled `label` until `timeout`
    /// expires; click it if it appears. Returns whether it was clicked.
    /// Absence is an expected branch, not an error; a CDP fault is an
    /// error and propagates immediately.
    pub async fn try_click_labeled(
        &self,
        label: &str,
        timeout: Duration,
    ) -> Result<bool, ProbeError> {
        let found = poll_attempt(timeout, || self.click_by_text(label)).await?;
        if !found {
            debug!(%label, "affordance not present within bound");
        }
        Ok(found)
    }

    async fn click_by_text(&self, label: &str) -> Result<bool, ProbeError> {
        // Label is injected as a JSON string literal so quoting is safe.
        let needle = serde_json::to_string(&label.to_lowercase())
            .map_err(|e| ProbeError::Client(e.to_string()))?;
        let expr = format!(
            r#"(() => {{
                const needle = {needle};
                const nodes = Array.from(
                    document.querySelectorAll('button, a, [role="button"], [role="tab"]')
                );
                const hit = nodes.find(
                    n => (n.textContent || '').toLowerCase().includes(needle)
                );
                if (!hit) return false;
                hit.click();
                return true;
            }})()"#
        );
        let clicked: bool = self
            .page
            .evaluate(expr)
            .await?
            .into_value()
            .map_err(|e| ProbeError::Ui(e.to_string()))?;
        Ok(clicked)
    }

    /// Give the page a bounded window to finish rendering after an
    /// interaction: waits until two consecutive polls observe the same DOM
    /// node count, or the bound expires. Expiry is not an error — the next
    /// screenshot simply captures whatever state was reached.
    pub async fn settle(&self, bound: Duration) {
        let last = AtomicI64::new(-1);
        let _ = wait_until("dom-settled", bound, || async {
            let count: i64 = match self
                .page
                .evaluate("document.querySelectorAll('*').length")
                .await
                .ok()
                .and_then(|v| v.into_value().ok())
            {
                Some(n) => n,
                None => return false,
            };
            let prev = last.swap(count, Ordering::SeqCst);
            count == prev && count > 0
        })
        .await;
    }

    /// Capture a screenshot to `path`.
    pub async fn capture(&self, path: &Path, full_page: bool) -> Result<(), ProbeError> {
        self.page
            .save_screenshot(
                ScreenshotParams::builder()
                    .format(CaptureScreenshotFormat::Png)
                    .full_page(full_page)
                    .build(),
                path,
            )
            .await?;
        debug!(path = %path.display(), "screenshot saved");
        Ok(())
    }

    /// Shut the session down. Safe to call more than once; only the first
    /// call does anything.
    pub async fn close(&mut self) {
        if let Some(mut browser) = self.browser.take() {
            if let Err(e) = browser.close().await {
                warn!(error = %e, "browser close failed, killing process");
                let _ = browser.kill().await;
            }
            let _ = browser.wait().await;
        }
        if let Some(task) = self.handler_task.take() {
            let _ = task.await;
        }
    }
}
