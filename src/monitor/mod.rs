//! # Monitor
//!
//! One poll cycle: fetch, diff, notify, advance the baseline.
//!
//! The baseline is passed in and returned rather than held in globals, so a
//! cycle is a state transition `previous -> (next, events)` with the fetch
//! and delivery side effects in between.

mod state;

pub use state::{badge_step, presence_step, BaselinePolicy, MonitorState};

use crate::fetcher::RemoteStateSource;
use crate::model::{BadgeSnapshot, PresenceSnapshot};
use crate::notifier::{MonitorEvent, Notifier};
use crate::observability::metrics;
use std::time::Instant;
use tracing::{info, info_span, warn, Instrument};

/// Result of one cycle
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleOutcome {
    /// Baseline for the next cycle
    pub state: MonitorState,
    /// Events delivered during the cycle, in delivery order
    pub events: Vec<MonitorEvent>,
}

/// Fetches remote state and reports changes against a baseline
pub struct Monitor<S, N> {
    source: S,
    notifier: N,
    user_id: u64,
    policy: BaselinePolicy,
}

impl<S, N> std::fmt::Debug for Monitor<S, N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Monitor")
            .field("user_id", &self.user_id)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl<S, N> Monitor<S, N>
where
    S: RemoteStateSource,
    N: Notifier,
{
    #[must_use]
    pub fn new(source: S, notifier: N, user_id: u64, policy: BaselinePolicy) -> Self {
        Self {
            source,
            notifier,
            user_id,
            policy,
        }
    }

    /// Fetch badges, logging and counting a failure as `None`
    pub async fn fetch_badges(&self) -> Option<BadgeSnapshot> {
        match self.source.badges().await {
            Ok(badges) => Some(badges),
            Err(e) => {
                warn!(user_id = self.user_id, "Error fetching badges: {}", e);
                metrics::increment_fetch_errors("badges");
                None
            }
        }
    }

    /// Fetch presence, logging and counting a failure as `None`
    pub async fn fetch_presence(&self) -> Option<PresenceSnapshot> {
        match self.source.presence().await {
            Ok(presence) => Some(presence),
            Err(e) => {
                warn!(user_id = self.user_id, "Error fetching status: {}", e);
                metrics::increment_fetch_errors("presence");
                None
            }
        }
    }

    /// Run one cycle against `previous` and return the next baseline.
    ///
    /// Badge notifications are delivered before the presence notification.
    /// Nothing in here fails the cycle.
    pub async fn run_cycle(&self, previous: MonitorState) -> CycleOutcome {
        let span = info_span!("monitor.cycle", user_id = self.user_id);
        async move {
            let start = Instant::now();
            info!("Checking user {}...", self.user_id);

            let fetched_badges = self.fetch_badges().await;
            let (badges, mut events) = badge_step(&previous.badges, fetched_badges, self.policy);
            for event in &events {
                self.notifier.notify(event).await;
            }

            let fetched_presence = self.fetch_presence().await;
            let (presence, status_event) =
                presence_step(previous.presence.as_ref(), fetched_presence, self.policy);
            if let Some(event) = status_event {
                if let MonitorEvent::StatusChanged(t) = &event {
                    info!(from = %t.from, to = %t.to, "Status changed");
                }
                self.notifier.notify(&event).await;
                events.push(event);
            }

            metrics::set_badges_tracked(badges.len());
            metrics::increment_cycles();
            metrics::observe_cycle_duration(start.elapsed().as_secs_f64());
            if !events.is_empty() {
                info!(count = events.len(), "Reported changes");
            }

            CycleOutcome {
                state: MonitorState { badges, presence },
                events,
            }
        }
        .instrument(span)
        .await
    }
}
