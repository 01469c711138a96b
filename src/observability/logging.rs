//! # Logging
//!
//! Tracing subscriber setup. `RUST_LOG` takes precedence over the configured level.

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// Output format of the fmt layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "pretty" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unsupported log format '{other}' (expected text or json)")),
        }
    }
}

/// Install the global tracing subscriber
///
/// # Errors
/// Fails if a global subscriber is already installed.
pub fn init_tracing(level: &str, format: LogFormat) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("roblox_monitor={level},tower_http=info")));

    let result = match format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .try_init(),
        LogFormat::Text => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .try_init(),
    };
    result.map_err(|e| anyhow!("Failed to initialize tracing subscriber: {e}"))
}
