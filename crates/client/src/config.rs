// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;
use std::time::Duration;

/// Configuration for talking to the leadscrape backend.
#[derive(Debug, Clone, clap::Args)]
pub struct ClientConfig {
    /// Base URL of the backend REST API (without the `/api/v1` prefix).
    #[arg(long = "api-url", default_value = "http://localhost:8080", env = "LEADSCRAPE_API_URL")]
    pub base_url: String,

    /// Seconds before access-token expiry at which a proactive refresh fires.
    #[arg(long, default_value_t = 60, env = "LEADSCRAPE_REFRESH_MARGIN_SECS")]
    pub refresh_margin_secs: u64,

    /// Per-request timeout in seconds (0 leaves it to the transport).
    #[arg(long, default_value_t = 30, env = "LEADSCRAPE_REQUEST_TIMEOUT_SECS")]
    pub request_timeout_secs: u64,

    /// Sign the user out after this many seconds without activity.
    #[arg(long, default_value_t = 1800, env = "LEADSCRAPE_INACTIVITY_TIMEOUT_SECS")]
    pub inactivity_timeout_secs: u64,

    /// Directory for the durable ("remember me") session file.
    #[arg(long, env = "LEADSCRAPE_STATE_DIR")]
    pub state_dir: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_owned(),
            refresh_margin_secs: 60,
            request_timeout_secs: 30,
            inactivity_timeout_secs: 1800,
            state_dir: None,
        }
    }
}

impl ClientConfig {
    /// Config pointed at `base_url` with all other settings at their defaults.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), ..Self::default() }
    }

    /// Base URL with any trailing slash removed.
    pub fn base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    pub fn refresh_margin(&self) -> Duration {
        Duration::from_secs(self.refresh_margin_secs)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        match self.request_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }

    pub fn inactivity_timeout(&self) -> Duration {
        Duration::from_secs(self.inactivity_timeout_secs)
    }

    /// Resolved state directory: explicit flag, then [`default_state_dir`].
    pub fn state_dir(&self) -> PathBuf {
        self.state_dir.clone().unwrap_or_else(default_state_dir)
    }
}

/// Resolve the state directory for console data.
///
/// Checks `$XDG_STATE_HOME/leadscrape`, then `$HOME/.local/state/leadscrape`.
pub fn default_state_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_STATE_HOME") {
        return PathBuf::from(xdg).join("leadscrape");
    }
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".local/state/leadscrape");
    }
    PathBuf::from(".leadscrape")
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
