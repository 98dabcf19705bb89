// src/config.rs

//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Backend connection settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Polling behavior settings
    #[serde(default)]
    pub poll: PollConfig,

    /// Panel presentation settings
    #[serde(default)]
    pub panels: PanelsConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.server.base_url.trim().is_empty() {
            return Err(AppError::config("server.base_url is empty"));
        }
        if self.server.timeout_secs == 0 {
            return Err(AppError::config("server.timeout_secs must be > 0"));
        }
        if self.poll.interval_secs == 0 {
            return Err(AppError::config("poll.interval_secs must be > 0"));
        }
        if self.panels.history_page_size == 0 {
            return Err(AppError::config("panels.history_page_size must be > 0"));
        }
        Ok(())
    }
}

/// Backend connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Base URL of the bot backend
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Login entry point the client redirects to on HTTP 401
    #[serde(default = "defaults::login_path")]
    pub login_path: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::base_url(),
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            login_path: defaults::login_path(),
        }
    }
}

/// Polling behavior settings.
///
/// The cadence is deliberately explicit configuration rather than a hidden
/// constant: deployments with slow backends poll less often, and
/// `active_panel_only` controls whether background ticks refresh every
/// panel or only the status panel plus the one currently shown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollConfig {
    /// Seconds between background refresh ticks
    #[serde(default = "defaults::poll_interval")]
    pub interval_secs: u64,

    /// Refresh only the active panel (plus status) on background ticks
    #[serde(default = "defaults::active_panel_only")]
    pub active_panel_only: bool,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval_secs: defaults::poll_interval(),
            active_panel_only: defaults::active_panel_only(),
        }
    }
}

/// Panel presentation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PanelsConfig {
    /// Records per history page
    #[serde(default = "defaults::history_page_size")]
    pub history_page_size: usize,

    /// Path of the persisted UI state file
    #[serde(default = "defaults::state_path")]
    pub state_path: String,
}

impl Default for PanelsConfig {
    fn default() -> Self {
        Self {
            history_page_size: defaults::history_page_size(),
            state_path: defaults::state_path(),
        }
    }
}

mod defaults {
    pub fn base_url() -> String {
        "http://127.0.0.1:8080".into()
    }
    pub fn user_agent() -> String {
        "postdash/0.1".into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn login_path() -> String {
        "/login".into()
    }
    pub fn poll_interval() -> u64 {
        10
    }
    pub fn active_panel_only() -> bool {
        true
    }
    pub fn history_page_size() -> usize {
        20
    }
    pub fn state_path() -> String {
        "data/state.json".into()
    }
}
