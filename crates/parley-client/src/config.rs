use std::time::Duration;

use serde::Deserialize;

const DEFAULT_BASE_API: &str = "http://localhost:8080/api";
const DEFAULT_TIMEOUT_MS: u64 = 600_000;

/// Where the backend lives and how long a single call may take.
///
/// Defaults are baked in at build time from `PARLEY_BASE_API` and
/// `PARLEY_TIMEOUT_MS`.
#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: option_env!("PARLEY_BASE_API")
                .unwrap_or(DEFAULT_BASE_API)
                .to_string(),
            timeout_ms: option_env!("PARLEY_TIMEOUT_MS")
                .and_then(|value| value.parse().ok())
                .unwrap_or(DEFAULT_TIMEOUT_MS),
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Absolute URLs are used verbatim, anything else is joined onto the base.
    pub fn url_for(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        let base = self.base_url.trim_end_matches('/');
        let relative = path.trim_start_matches('/');
        format!("{base}/{relative}")
    }
}
