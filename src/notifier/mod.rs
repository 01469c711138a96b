//! # Notifier
//!
//! Turns change events into outbound notifications.
//!
//! Delivery is best-effort: a notifier logs failures and returns, it never
//! retries, queues, or reports back to the poll loop.

use crate::differ::Transition;
use crate::model::BadgeRecord;
use async_trait::async_trait;
use thiserror::Error;

pub mod discord;

pub use discord::{build_payload, DiscordNotifier, Embed, EmbedField, Thumbnail, WebhookPayload};

/// A reportable change detected during a cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonitorEvent {
    BadgeAdded(BadgeRecord),
    BadgeRemoved(BadgeRecord),
    StatusChanged(Transition),
}

impl MonitorEvent {
    /// Short name for logs and metric labels
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            MonitorEvent::BadgeAdded(_) => "badge_added",
            MonitorEvent::BadgeRemoved(_) => "badge_removed",
            MonitorEvent::StatusChanged(_) => "status_changed",
        }
    }
}

/// Error type for webhook delivery
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("webhook request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("webhook rejected notification with HTTP status {0}")]
    Status(reqwest::StatusCode),
}

/// Delivers one notification per event
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver a notification for `event`. Failures are handled internally.
    async fn notify(&self, event: &MonitorEvent);
}
