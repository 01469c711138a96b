//! # Initialization
//!
//! Monitor start-up: tracing, metrics, status server, HTTP clients.

use crate::config::MonitorConfig;
use crate::constants::{DEFAULT_SERVER_POLL_INTERVAL_MS, DEFAULT_SERVER_STARTUP_TIMEOUT_SECS};
use crate::fetcher::RobloxClient;
use crate::monitor::Monitor;
use crate::notifier::DiscordNotifier;
use crate::observability;
use crate::server::{start_server, ServerState};
use anyhow::{Context, Result};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{error, info, warn};

/// Everything the poll loop needs
pub struct InitializationResult {
    pub monitor: Monitor<RobloxClient, DiscordNotifier>,
    /// Server state for the status endpoint and probes
    pub server_state: Arc<ServerState>,
}

impl std::fmt::Debug for InitializationResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InitializationResult")
            .field(
                "server_ready",
                &self.server_state.is_ready.load(Ordering::Relaxed),
            )
            .finish_non_exhaustive()
    }
}

/// Initialize the monitor runtime
///
/// This function handles:
/// - Tracing subscriber setup
/// - Metrics registration
/// - HTTP server startup
/// - Roblox client and webhook notifier setup
///
/// # Errors
/// Fails if tracing or metrics cannot be installed, the server does not come
/// up, or the HTTP client cannot be built.
pub async fn initialize(config: &MonitorConfig) -> Result<InitializationResult> {
    observability::logging::init_tracing(&config.log_level, config.log_format)?;

    info!("🚀 Starting Roblox User Monitor v{}", env!("CARGO_PKG_VERSION"));
    info!("Monitoring User ID: {}", config.user_id);
    info!("Check interval: every {}s", config.check_interval_secs);
    info!("Status port: {}", config.port);
    if config.webhook_url.is_some() {
        info!("Discord webhook configured");
    } else {
        warn!("DISCORD_WEBHOOK_URL not set, changes will only be logged");
    }
    if config.retain_baseline_on_failure {
        info!("Failed fetches keep the last known snapshot (RETAIN_BASELINE_ON_FAILURE)");
    }

    observability::metrics::register_metrics()?;

    let server_state = Arc::new(ServerState::new(config.user_id));

    let server_state_clone = Arc::clone(&server_state);
    let server_port = config.port;
    let server_handle = tokio::spawn(async move {
        if let Err(e) = start_server(server_port, server_state_clone).await {
            error!("HTTP server error: {}", e);
        }
    });
    wait_for_server_ready(&server_state, &server_handle).await?;

    let http_client = reqwest::Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Failed to create HTTP client")?;

    let source = RobloxClient::new(
        http_client.clone(),
        &config.badges_api_url,
        &config.presence_api_url,
        config.user_id,
        config.badge_limit,
    );
    let notifier = DiscordNotifier::new(http_client, config.webhook_url.clone());
    let monitor = Monitor::new(source, notifier, config.user_id, config.baseline_policy());

    info!("Monitor initialized, starting poll loop...");

    Ok(InitializationResult {
        monitor,
        server_state,
    })
}

/// Wait for the HTTP server to become ready
async fn wait_for_server_ready(
    server_state: &ServerState,
    server_handle: &tokio::task::JoinHandle<()>,
) -> Result<()> {
    let startup_timeout = Duration::from_secs(DEFAULT_SERVER_STARTUP_TIMEOUT_SECS);
    let poll_interval = Duration::from_millis(DEFAULT_SERVER_POLL_INTERVAL_MS);
    let start_time = Instant::now();

    loop {
        if server_handle.is_finished() {
            return Err(anyhow::anyhow!("HTTP server failed to start"));
        }

        if server_state.is_ready.load(Ordering::Relaxed) {
            info!("HTTP server is ready and accepting connections");
            return Ok(());
        }

        if start_time.elapsed() > startup_timeout {
            return Err(anyhow::anyhow!(
                "HTTP server failed to become ready within {} seconds",
                startup_timeout.as_secs()
            ));
        }

        tokio::time::sleep(poll_interval).await;
    }
}
