// SPDX-License-Identifier: MIT
//! Structural checks for the browser scenario configuration.
//!
//! Launching Chromium is not viable in every CI environment, so these tests
//! stop at config construction; the scenario cleanup contract is covered by
//! the harness unit tests in `src/scenarios/mod.rs`.

use uxprobe::config::BrowserConfig;

#[test]
fn cdp_config_builds_from_defaults() {
    let cfg = BrowserConfig::default();
    // Pin the executable so the builder does not depend on a Chrome install
    // being present on the test machine.
    let built = chromiumoxide::browser::BrowserConfig::builder()
        .chrome_executable("/usr/bin/chromium")
        .window_size(cfg.viewport_width, cfg.viewport_height)
        .no_sandbox()
        .build();
    assert!(built.is_ok(), "CDP browser config should build");
}

#[test]
fn scenario_bounds_are_ordered_sensibly() {
    let cfg = BrowserConfig::default();
    // The deep-dive probe must be much shorter than the analysis wait:
    // absence of the affordance is an expected branch and should not stall
    // the scenario.
    assert!(cfg.deep_dive_timeout() < cfg.analysis_timeout());
    assert!(cfg.headless);
}
