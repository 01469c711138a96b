//! # Roblox User Monitor
//!
//! Polls a Roblox user's badges and presence and posts changes to a Discord webhook.
//!
//! ## Overview
//!
//! 1. **Badges** - The most recent badges are compared against the previous check;
//!    gained and lost badges are each reported
//! 2. **Presence** - Offline / Online / In Game transitions are reported
//! 3. **Status endpoint** - A small HTTP server reports liveness, readiness and metrics
//!
//! The first check only records a baseline. Nothing is reported until a later
//! check differs from it.

use anyhow::{Context, Result};
use clap::Parser;
use roblox_monitor::cli::Cli;
use roblox_monitor::config::MonitorConfig;
use roblox_monitor::runtime::{initialize, run_poll_loop, shutdown_signal};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = MonitorConfig::from_env();
    cli.apply(&mut config);
    config.validate().context("Invalid monitor configuration")?;

    let init_result = initialize(&config).await?;
    let server_state = Arc::clone(&init_result.server_state);

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let signal_state = Arc::clone(&server_state);
    tokio::spawn(async move {
        shutdown_signal().await;
        signal_state.is_ready.store(false, Ordering::Relaxed);
        shutdown_tx.send_replace(true);
    });

    let final_state = run_poll_loop(
        &init_result.monitor,
        config.check_interval(),
        &server_state,
        shutdown_rx,
    )
    .await;

    info!(
        badges = final_state.badges.len(),
        presence_known = final_state.presence.is_some(),
        "Monitor stopped"
    );
    Ok(())
}
