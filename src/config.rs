// SPDX-License-Identifier: MIT
//! Probe configuration.
//!
//! The environment is read exactly once, at startup, into a [`ProbeConfig`]
//! that is handed to every handler and scenario. Handlers never touch
//! `std::env` themselves, so tests can construct any configuration directly.
//!
//! The API key is the only secret: its value is used to compute
//! [`ProbeConfig::has_api_key`] and then dropped. Nothing downstream can
//! leak it because nothing downstream ever holds it.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Environment variable holding the audit service API key (presence-checked only).
pub const ENV_API_KEY: &str = "UXPROBE_API_KEY";
/// Environment variable naming the deploy environment. Fallback: `"development"`.
pub const ENV_ENVIRONMENT: &str = "UXPROBE_ENV";
/// Environment variable naming the deploy region. Fallback: `"unknown"`.
pub const ENV_REGION: &str = "UXPROBE_REGION";
/// Environment variable for the audit application base URL.
pub const ENV_BASE_URL: &str = "UXPROBE_BASE_URL";

const DEFAULT_BASE_URL: &str = "http://localhost:3000";
const DEFAULT_ENVIRONMENT: &str = "development";
const DEFAULT_REGION: &str = "unknown";

/// Timeout for POST /api/audit (the audit itself can be slow).
pub const AUDIT_TIMEOUT: Duration = Duration::from_secs(60);
/// Timeout for POST /api/share-report.
pub const SHARE_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for a headless browser scenario session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    /// Run the browser without a visible window. Always true outside tests.
    pub headless: bool,
    /// Viewport width in pixels.
    pub viewport_width: u32,
    /// Viewport height in pixels.
    pub viewport_height: u32,
    /// Bound on initial page navigation, in seconds.
    pub nav_timeout_secs: u64,
    /// Bound on waiting for audit results to render, in seconds.
    pub analysis_timeout_secs: u64,
    /// Bound on locating the optional Deep Dive affordance, in seconds.
    /// Short on purpose: absence is an expected branch, not a failure.
    pub deep_dive_timeout_secs: u64,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            viewport_width: 1280,
            viewport_height: 900,
            nav_timeout_secs: 30,
            analysis_timeout_secs: 45,
            deep_dive_timeout_secs: 5,
        }
    }
}

impl BrowserConfig {
    pub fn nav_timeout(&self) -> Duration {
        Duration::from_secs(self.nav_timeout_secs)
    }

    pub fn analysis_timeout(&self) -> Duration {
        Duration::from_secs(self.analysis_timeout_secs)
    }

    pub fn deep_dive_timeout(&self) -> Duration {
        Duration::from_secs(self.deep_dive_timeout_secs)
    }
}

/// Immutable probe configuration, constructed once at startup.
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    /// Whether the API key env var was set and non-empty. The value itself
    /// is never stored.
    pub has_api_key: bool,
    /// Deploy environment name ("development" when unset).
    pub environment: String,
    /// Deploy region ("unknown" when unset).
    pub region: String,
    /// Base URL of the audit application under verification.
    pub base_url: String,
    /// Browser scenario settings.
    pub browser: BrowserConfig,
}

impl ProbeConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// `from_env` delegates here; tests pass a map-backed closure instead of
    /// mutating process-global state.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let has_api_key = get(ENV_API_KEY).is_some_and(|v| !v.is_empty());
        let environment = get(ENV_ENVIRONMENT)
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string());
        let region = get(ENV_REGION)
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_REGION.to_string());
        let base_url = get(ENV_BASE_URL)
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Self {
            has_api_key,
            environment,
            region,
            base_url,
            browser: BrowserConfig::default(),
        }
    }

    /// Override the base URL (CLI flag takes precedence over the env var).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            has_api_key: false,
            environment: DEFAULT_ENVIRONMENT.to_string(),
            region: DEFAULT_REGION.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            browser: BrowserConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        let map: HashMap<&str, &str> = vars.iter().copied().collect();
        move |name| map.get(name).map(|v| (*v).to_string())
    }

    #[test]
    fn fallbacks_apply_when_unset() {
        let cfg = ProbeConfig::from_lookup(lookup(&[]));
        assert!(!cfg.has_api_key);
        assert_eq!(cfg.environment, "development");
        assert_eq!(cfg.region, "unknown");
        assert_eq!(cfg.base_url, "http://localhost:3000");
    }

    #[test]
    fn has_api_key_requires_non_empty_value() {
        let cfg = ProbeConfig::from_lookup(lookup(&[(ENV_API_KEY, "")]));
        assert!(!cfg.has_api_key);

        let cfg = ProbeConfig::from_lookup(lookup(&[(ENV_API_KEY, "sk-test-123")]));
        assert!(cfg.has_api_key);
    }

    #[test]
    fn explicit_values_win_over_fallbacks() {
        let cfg = ProbeConfig::from_lookup(lookup(&[
            (ENV_ENVIRONMENT, "production"),
            (ENV_REGION, "iad1"),
            (ENV_BASE_URL, "https://audit.example.com"),
        ]));
        assert_eq!(cfg.environment, "production");
        assert_eq!(cfg.region, "iad1");
        assert_eq!(cfg.base_url, "https://audit.example.com");
    }

    #[test]
    fn cli_override_beats_env() {
        let cfg = ProbeConfig::from_lookup(lookup(&[(ENV_BASE_URL, "http://env:3000")]))
            .with_base_url("http://flag:4000");
        assert_eq!(cfg.base_url, "http://flag:4000");
    }

    #[test]
    fn config_never_stores_the_secret() {
        let cfg = ProbeConfig::from_lookup(lookup(&[(ENV_API_KEY, "sk-super-secret")]));
        let debug = format!("{cfg:?}");
        assert!(!debug.contains("sk-super-secret"));
    }
}
