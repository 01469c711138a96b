//! # CLI
//!
//! Command-line flags for the monitor. Every flag is optional and, when
//! given, overrides the matching environment variable.
//!
//! ## Usage
//!
//! ```bash
//! # Track another user, checking every minute
//! roblox-monitor --user-id 1234 --interval-secs 60
//!
//! # JSON logs on a custom port
//! roblox-monitor --port 8080 --log-format json
//! ```

use crate::config::MonitorConfig;
use crate::observability::logging::LogFormat;
use clap::Parser;

/// Roblox badge and presence monitor
#[derive(Debug, Parser)]
#[command(name = "roblox-monitor", version)]
#[command(
    about = "Polls a Roblox user's badges and presence and posts changes to a Discord webhook",
    long_about = None,
    after_help = "\
Environment variables:
  ROBLOX_USER_ID, DISCORD_WEBHOOK_URL, CHECK_INTERVAL_SECS, PORT, BADGE_LIMIT,
  BADGES_API_URL, PRESENCE_API_URL, RETAIN_BASELINE_ON_FAILURE, LOG_LEVEL, LOG_FORMAT
"
)]
pub struct Cli {
    /// Roblox user to track
    #[arg(long)]
    pub user_id: Option<u64>,

    /// Discord incoming webhook URL
    #[arg(long)]
    pub webhook_url: Option<String>,

    /// Seconds between the end of one check and the start of the next
    #[arg(long)]
    pub interval_secs: Option<u64>,

    /// Port for the status endpoint
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Number of most recent badges compared per check (10, 25, 50 or 100)
    #[arg(long)]
    pub badge_limit: Option<u32>,

    /// Log output format (text or json)
    #[arg(long)]
    pub log_format: Option<LogFormat>,
}

impl Cli {
    /// Overlay the flags that were given onto `config`
    pub fn apply(self, config: &mut MonitorConfig) {
        if let Some(user_id) = self.user_id {
            config.user_id = user_id;
        }
        if let Some(url) = self.webhook_url {
            config.webhook_url = Some(url).filter(|u| !u.trim().is_empty());
        }
        if let Some(secs) = self.interval_secs {
            config.check_interval_secs = secs;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(limit) = self.badge_limit {
            config.badge_limit = limit;
        }
        if let Some(format) = self.log_format {
            config.log_format = format;
        }
    }
}
