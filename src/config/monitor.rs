//! # Monitor Configuration
//!
//! Process-level settings loaded from environment variables.

use crate::constants::{
    DEFAULT_BADGES_API_URL, DEFAULT_BADGE_LIMIT, DEFAULT_CHECK_INTERVAL_SECS, DEFAULT_PORT,
    DEFAULT_PRESENCE_API_URL, DEFAULT_ROBLOX_USER_ID, SUPPORTED_BADGE_LIMITS,
};
use crate::monitor::BaselinePolicy;
use crate::observability::logging::LogFormat;
use std::time::Duration;
use thiserror::Error;

/// Error type for invalid configuration
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("check interval must be at least one second")]
    ZeroInterval,
    #[error("badge limit {0} is not supported (expected one of 10, 25, 50, 100)")]
    UnsupportedBadgeLimit(u32),
    #[error("{name} must be an http(s) URL, got '{value}'")]
    InvalidUrl { name: &'static str, value: String },
}

/// Monitor configuration
///
/// All settings have defaults and can be overridden via environment variables.
#[derive(Clone)]
pub struct MonitorConfig {
    /// Roblox user whose badges and presence are tracked
    pub user_id: u64,
    /// Discord incoming webhook; `None` means log-only mode
    pub webhook_url: Option<String>,
    /// Delay between the end of one cycle and the start of the next (seconds)
    pub check_interval_secs: u64,
    /// Port for the status endpoint
    pub port: u16,
    /// Number of most recent badges fetched per cycle
    pub badge_limit: u32,
    pub badges_api_url: String,
    pub presence_api_url: String,
    /// Keep the previous snapshot when a fetch fails instead of clearing it
    pub retain_baseline_on_failure: bool,
    /// Default tracing level (ERROR, WARN, INFO, DEBUG, TRACE)
    pub log_level: String,
    pub log_format: LogFormat,
}

impl std::fmt::Debug for MonitorConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MonitorConfig")
            .field("user_id", &self.user_id)
            .field("webhook_configured", &self.webhook_url.is_some())
            .field("check_interval_secs", &self.check_interval_secs)
            .field("port", &self.port)
            .field("badge_limit", &self.badge_limit)
            .field("badges_api_url", &self.badges_api_url)
            .field("presence_api_url", &self.presence_api_url)
            .field("retain_baseline_on_failure", &self.retain_baseline_on_failure)
            .field("log_level", &self.log_level)
            .field("log_format", &self.log_format)
            .finish()
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            user_id: DEFAULT_ROBLOX_USER_ID,
            webhook_url: None,
            check_interval_secs: DEFAULT_CHECK_INTERVAL_SECS,
            port: DEFAULT_PORT,
            badge_limit: DEFAULT_BADGE_LIMIT,
            badges_api_url: DEFAULT_BADGES_API_URL.to_string(),
            presence_api_url: DEFAULT_PRESENCE_API_URL.to_string(),
            retain_baseline_on_failure: false,
            log_level: "info".to_string(),
            log_format: LogFormat::Text,
        }
    }
}

impl MonitorConfig {
    /// Load configuration from environment variables with defaults
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    ///
    /// Unparseable values fall back to their defaults.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            user_id: parsed_or(&lookup, "ROBLOX_USER_ID", defaults.user_id),
            webhook_url: lookup("DISCORD_WEBHOOK_URL").filter(|v| !v.trim().is_empty()),
            check_interval_secs: parsed_or(
                &lookup,
                "CHECK_INTERVAL_SECS",
                defaults.check_interval_secs,
            ),
            port: parsed_or(&lookup, "PORT", defaults.port),
            badge_limit: parsed_or(&lookup, "BADGE_LIMIT", defaults.badge_limit),
            badges_api_url: lookup("BADGES_API_URL").unwrap_or(defaults.badges_api_url),
            presence_api_url: lookup("PRESENCE_API_URL").unwrap_or(defaults.presence_api_url),
            retain_baseline_on_failure: bool_or(
                &lookup,
                "RETAIN_BASELINE_ON_FAILURE",
                defaults.retain_baseline_on_failure,
            ),
            log_level: lookup("LOG_LEVEL").unwrap_or(defaults.log_level),
            log_format: parsed_or(&lookup, "LOG_FORMAT", defaults.log_format),
        }
    }

    /// Check values that would make the monitor misbehave
    ///
    /// # Errors
    /// Returns the first invalid setting found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.check_interval_secs == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        if !SUPPORTED_BADGE_LIMITS.contains(&self.badge_limit) {
            return Err(ConfigError::UnsupportedBadgeLimit(self.badge_limit));
        }
        check_url("BADGES_API_URL", &self.badges_api_url)?;
        check_url("PRESENCE_API_URL", &self.presence_api_url)?;
        if let Some(url) = &self.webhook_url {
            check_url("DISCORD_WEBHOOK_URL", url)?;
        }
        Ok(())
    }

    /// Get check interval duration
    #[must_use]
    pub fn check_interval(&self) -> Duration {
        Duration::from_secs(self.check_interval_secs)
    }

    #[must_use]
    pub fn baseline_policy(&self) -> BaselinePolicy {
        if self.retain_baseline_on_failure {
            BaselinePolicy::RetainLastKnown
        } else {
            BaselinePolicy::Reset
        }
    }
}

fn check_url(name: &'static str, value: &str) -> Result<(), ConfigError> {
    if value.starts_with("http://") || value.starts_with("https://") {
        Ok(())
    } else {
        Err(ConfigError::InvalidUrl {
            name,
            value: value.to_string(),
        })
    }
}

/// Read a key and parse it, or return the default
fn parsed_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    lookup(key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// Read a key as boolean or return the default
fn bool_or<F>(lookup: &F, key: &str, default: bool) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|v| {
            let v_lower = v.to_lowercase();
            v_lower == "true" || v_lower == "1" || v_lower == "yes" || v_lower == "on"
        })
        .unwrap_or(default)
}
