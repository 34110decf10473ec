//! Settings loaded from the environment (and `.env` through `dotenvy`).

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_LOG_FILE: &str = "securebank-dashboard.log";
pub const DEFAULT_TICK_MS: u64 = 200;

#[derive(Error, Debug)]
pub enum ConfigError {
    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Which dashboard page the host loads after a successful login.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    /// One implicit account, transfer by raw account number
    Simple,
    /// Account cards, account-type dropdowns, internal/external transfers
    #[default]
    Multi,
}

impl Layout {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::Multi => "multi",
        }
    }
}

impl FromStr for Layout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("simple") {
            Ok(Self::Simple)
        } else if s.eq_ignore_ascii_case("multi") {
            Ok(Self::Multi)
        } else {
            Err(format!("expected `simple` or `multi`, got `{s}`"))
        }
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    /// Server origin every API path is joined to
    pub base_url: String,
    pub layout: Layout,
    pub log_file: PathBuf,
    /// Redraw and notification tick interval
    pub tick_rate: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            layout: Layout::default(),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            tick_rate: Duration::from_millis(DEFAULT_TICK_MS),
        }
    }
}

impl Settings {
    /// Load settings from process environment variables prefixed with `BANK_`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load settings through an arbitrary key lookup; unset keys keep defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Settings::default();

        if let Some(url) = lookup("BANK_BASE_URL") {
            let url = url.trim().trim_end_matches('/').to_string();
            if url.is_empty() {
                return Err(invalid("BANK_BASE_URL", "must not be empty"));
            }
            settings.base_url = url;
        }
        if let Some(layout) = lookup("BANK_DASHBOARD_LAYOUT") {
            settings.layout = layout
                .trim()
                .parse()
                .map_err(|e: String| invalid("BANK_DASHBOARD_LAYOUT", &e))?;
        }
        if let Some(path) = lookup("BANK_LOG_FILE") {
            settings.log_file = PathBuf::from(path);
        }
        if let Some(ms) = lookup("BANK_TICK_MS") {
            let ms: u64 = ms
                .trim()
                .parse()
                .map_err(|e: std::num::ParseIntError| invalid("BANK_TICK_MS", &e.to_string()))?;
            if ms == 0 {
                return Err(invalid("BANK_TICK_MS", "must be greater than zero"));
            }
            settings.tick_rate = Duration::from_millis(ms);
        }

        Ok(settings)
    }
}

fn invalid(key: &str, message: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        message: message.to_string(),
    }
}
