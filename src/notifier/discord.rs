//! Discord webhook notifier
//!
//! Payloads follow the Discord incoming-webhook schema:
//! `{ content, embeds: [{ title, description?, fields?, color?, thumbnail?, timestamp }] }`.
//! One embed is sent per event.

use super::{MonitorEvent, Notifier, NotifyError};
use crate::constants::{
    ASSET_DELIVERY_URL, COLOR_BLUE, COLOR_GRAY, COLOR_GREEN, COLOR_RED, GAMES_URL,
};
use crate::differ::Transition;
use crate::model::{BadgeRecord, PresenceStatus};
use crate::observability::metrics;
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookPayload {
    pub content: String,
    pub embeds: Vec<Embed>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Embed {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<EmbedField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<Thumbnail>,
    /// Delivery time, not the time of the underlying change
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub inline: bool,
}

impl EmbedField {
    fn new(name: &str, value: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            value: value.into(),
            inline: false,
        }
    }

    fn inline(name: &str, value: impl Into<String>) -> Self {
        Self {
            inline: true,
            ..Self::new(name, value)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thumbnail {
    pub url: String,
}

/// Build the webhook payload for `event`, stamped with `now`
#[must_use]
pub fn build_payload(event: &MonitorEvent, now: DateTime<Utc>) -> WebhookPayload {
    let timestamp = now.to_rfc3339_opts(SecondsFormat::Millis, true);
    let embed = match event {
        MonitorEvent::BadgeAdded(badge) => badge_added_embed(badge, timestamp),
        MonitorEvent::BadgeRemoved(badge) => Embed {
            title: "❌ Badge Removed".to_string(),
            description: Some(badge.name.clone()),
            fields: Vec::new(),
            color: Some(COLOR_RED),
            thumbnail: None,
            timestamp,
        },
        MonitorEvent::StatusChanged(transition) => status_changed_embed(transition, timestamp),
    };

    WebhookPayload {
        content: String::new(),
        embeds: vec![embed],
    }
}

fn badge_added_embed(badge: &BadgeRecord, timestamp: String) -> Embed {
    let description = badge
        .description
        .as_deref()
        .filter(|d| !d.is_empty())
        .unwrap_or("No description");
    let awarded = badge.created.map_or_else(
        || "Unknown".to_string(),
        |created| created.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
    );

    Embed {
        title: "🏆 New Badge Earned!".to_string(),
        description: Some(badge.name.clone()),
        fields: vec![
            EmbedField::new("Description", description),
            EmbedField::new("Awarded", awarded),
        ],
        color: Some(COLOR_GREEN),
        thumbnail: badge.icon_image_id.map(|id| Thumbnail {
            url: format!("{ASSET_DELIVERY_URL}?id={id}"),
        }),
        timestamp,
    }
}

fn status_changed_embed(transition: &Transition, timestamp: String) -> Embed {
    let mut fields = vec![
        EmbedField::inline("Previous", transition.from.label()),
        EmbedField::inline("Current", transition.to.label()),
    ];
    if transition.to == PresenceStatus::InGame {
        if let Some(place_id) = transition.current.place_id {
            fields.push(EmbedField::new(
                "Game",
                format!("[View Game]({GAMES_URL}/{place_id})"),
            ));
        }
    }

    Embed {
        title: "📊 Status Changed".to_string(),
        description: None,
        fields,
        color: Some(status_color(transition.to)),
        thumbnail: None,
        timestamp,
    }
}

fn status_color(status: PresenceStatus) -> u32 {
    match status {
        PresenceStatus::InGame => COLOR_BLUE,
        PresenceStatus::Online => COLOR_GREEN,
        PresenceStatus::Offline | PresenceStatus::Unknown(_) => COLOR_GRAY,
    }
}

/// Notifier posting to a Discord incoming webhook
///
/// With no webhook URL every notification is logged and dropped.
#[derive(Clone)]
pub struct DiscordNotifier {
    http_client: Client,
    webhook_url: Option<String>,
}

impl std::fmt::Debug for DiscordNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // The webhook URL embeds its token
        f.debug_struct("DiscordNotifier")
            .field("configured", &self.webhook_url.is_some())
            .finish_non_exhaustive()
    }
}

impl DiscordNotifier {
    #[must_use]
    pub fn new(http_client: Client, webhook_url: Option<String>) -> Self {
        Self {
            http_client,
            webhook_url: webhook_url.filter(|u| !u.trim().is_empty()),
        }
    }

    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.webhook_url.is_some()
    }

    /// POST a payload to the configured webhook
    ///
    /// # Errors
    /// Returns an error on transport failure or a non-2xx response. Sending
    /// without a configured webhook is a no-op.
    pub async fn send(&self, payload: &WebhookPayload) -> Result<(), NotifyError> {
        let Some(url) = self.webhook_url.as_deref() else {
            info!("No webhook configured, notification dropped");
            return Ok(());
        };

        let response = self.http_client.post(url).json(payload).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(NotifyError::Status(status));
        }
        Ok(())
    }
}

#[async_trait]
impl Notifier for DiscordNotifier {
    async fn notify(&self, event: &MonitorEvent) {
        let payload = build_payload(event, Utc::now());
        match self.send(&payload).await {
            Ok(()) if self.is_configured() => {
                debug!(kind = event.kind(), "Webhook notification delivered");
                metrics::increment_notifications_sent(event.kind());
            }
            Ok(()) => {}
            Err(e) => {
                error!(kind = event.kind(), "Error sending webhook: {}", e);
                metrics::increment_notification_errors(event.kind());
            }
        }
    }
}
