// SPDX-License-Identifier: MIT
//! Headless browser plumbing for the end-to-end scenarios.
//!
//! [`BrowserSession`] owns the Chromium process and its CDP event loop;
//! [`wait`] provides bounded condition polling so scenarios never rely on
//! bare fixed sleeps to synchronize with the page.

pub mod session;
pub mod wait;

pub use session::BrowserSession;
pub use wait::{poll_attempt, wait_for_selector, wait_until, POLL_INTERVAL};
