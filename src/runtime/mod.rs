//! # Runtime
//!
//! Process wiring around the monitor.
//!
//! - `initialization`: tracing, metrics, status server, clients
//! - `poll_loop`: the re-arming scheduler that runs cycles

pub mod initialization;
pub mod poll_loop;

pub use initialization::{initialize, InitializationResult};
pub use poll_loop::run_poll_loop;

use tracing::info;

/// Resolve on Ctrl-C, or SIGTERM on Unix
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
    info!("Received shutdown signal (SIGINT/SIGTERM), initiating graceful shutdown...");
}
