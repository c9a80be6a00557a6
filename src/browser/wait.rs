// SPDX-License-Identifier: MIT
//! Bounded condition polling.
//!
//! Every wait in a scenario is a predicate checked on an interval against a
//! deadline. There are no unconditional sleeps: if the page never reaches
//! the expected state, the wait expires with a `ui_failure` instead of the
//! scenario proceeding blind.

use std::time::Duration;

use chromiumoxide::element::Element;
use chromiumoxide::page::Page;
use tokio::time::Instant;

use crate::error::ProbeError;

/// Interval between predicate checks.
pub const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Poll until `predicate` returns true or `timeout` expires.
pub async fn wait_until<F, Fut>(
    what: &str,
    timeout: Duration,
    mut predicate: F,
) -> Result<(), ProbeError>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = bool>,
{
    let deadline = Instant::now() + timeout;
    loop {
        if predicate().await {
            return Ok(());
        }
        if Instant::now() >= deadline {
            return Err(ProbeError::Ui(format!(
                "condition `{what}` not met within {}ms",
                timeout.as_millis()
            )));
        }
        tokio::time::sleep(POLL_INTERVAL).await;
    }
}

/// Poll a fallible attempt until it reports success or `timeout` expires.
///
/// Distinct from [`wait_until`]: the attempt can fail outright, and a
/// failure is surfaced immediately instead of being treated as "condition
/// not yet met" — a dead page must not burn the whole deadline looking
/// like an absent element. Returns `Ok(false)` when the deadline passes
/// without success.
pub async fn poll_attempt<F, Fut, E>(timeout: Duration, mut attempt: F) -> Result<bool, E>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<bool, E>>,
{
    let deadline = Instant::now() + timeout;
    loop {
        if attempt().await? {
            return Ok(true);
        }
        if Instant::now() >= deadline {
            return Ok(false);
        }
        tokio::time::sleep(POLL_INTERVAL).await;
    }
}

/// Poll until `selector` matches an element on `page` or `timeout` expires.
pub async fn wait_for_selector(
    page: &Page,
    selector: &str,
    timeout: Duration,
) -> Result<Element, ProbeError> {
    let deadline = Instant::now() + timeout;
    loop {
        if let Ok(element) = page.find_element(selector).await {
            return Ok(element);
        }
        if Instant::now() >= deadline {
            return Err(ProbeError::Ui(format!(
                "selector `{selector}` not found within {}ms",
                timeout.as_millis()
            )));
        }
        tokio::time::sleep(POLL_INTERVAL).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test(start_paused = true)]
    async fn wait_until_expires_on_never_true() {
        let result = wait_until("never", Duration::from_secs(2), || async { false }).await;
        let err = result.unwrap_err();
        assert_eq!(err.bucket(), "ui_failure");
        assert!(err.to_string().contains("never"));
    }

    #[tokio::test(start_paused = true)]
    async fn wait_until_returns_once_predicate_holds() {
        let calls = AtomicU32::new(0);
        let result = wait_until("third-time", Duration::from_secs(10), || {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            async move { n >= 2 }
        })
        .await;
        assert!(result.is_ok());
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn poll_attempt_surfaces_errors_on_first_failure() {
        let calls = AtomicU32::new(0);
        let before = Instant::now();
        let result = poll_attempt(Duration::from_secs(30), || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err::<bool, ProbeError>(ProbeError::Ui("node detached".into())) }
        })
        .await;
        assert_eq!(result.unwrap_err().bucket(), "ui_failure");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        // The deadline was not consumed waiting on a faulted page.
        assert_eq!(Instant::now(), before);
    }

    #[tokio::test(start_paused = true)]
    async fn poll_attempt_reports_absence_at_the_deadline() {
        let result =
            poll_attempt(Duration::from_secs(2), || async { Ok::<_, ProbeError>(false) }).await;
        assert_eq!(result.unwrap(), false);
    }

    #[tokio::test(start_paused = true)]
    async fn poll_attempt_succeeds_once_the_attempt_does() {
        let calls = AtomicU32::new(0);
        let result = poll_attempt(Duration::from_secs(10), || {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            async move { Ok::<_, ProbeError>(n >= 2) }
        })
        .await;
        assert_eq!(result.unwrap(), true);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn wait_until_checks_immediately() {
        // A predicate that is already true must not wait a full interval.
        let before = Instant::now();
        wait_until("instant", Duration::from_secs(5), || async { true })
            .await
            .unwrap();
        assert_eq!(Instant::now(), before);
    }
}
