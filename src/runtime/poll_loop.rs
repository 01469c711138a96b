//! # Poll Loop
//!
//! Drives the monitor: one cycle immediately, then one cycle per interval.
//!
//! The next cycle is armed only after the current one has returned, with a
//! single-shot sleep. A slow cycle therefore delays the next one instead of
//! overlapping it, and the baseline is never read and written by two cycles
//! at once.

use crate::fetcher::RemoteStateSource;
use crate::monitor::{Monitor, MonitorState};
use crate::notifier::Notifier;
use crate::server::ServerState;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, info};

/// Run cycles until `shutdown` flips to `true` (or its sender is dropped).
///
/// Shutdown is only observed between cycles; an in-flight cycle always
/// completes. Returns the last baseline.
pub async fn run_poll_loop<S, N>(
    monitor: &Monitor<S, N>,
    interval: Duration,
    server_state: &ServerState,
    mut shutdown: watch::Receiver<bool>,
) -> MonitorState
where
    S: RemoteStateSource,
    N: Notifier,
{
    info!("Starting poll loop (interval: {:?})", interval);
    let mut state = MonitorState::default();

    loop {
        if *shutdown.borrow() {
            break;
        }

        let outcome = monitor.run_cycle(state).await;
        state = outcome.state;
        server_state.set_presence_known(state.presence.is_some());

        debug!("Next check in {:?}", interval);
        tokio::select! {
            () = tokio::time::sleep(interval) => {}
            _ = shutdown.changed() => {
                info!("Shutdown requested, exiting poll loop");
                break;
            }
        }
    }

    state
}
