//! # Model
//!
//! Snapshot types for the two tracked attribute categories.
//!
//! `BadgeRecord` deserializes straight from the badges API; presence is
//! normalized from the presence API by the fetcher.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// A badge awarded to the tracked user
///
/// Badges are compared by `id` only; other fields are carried for display.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgeRecord {
    /// Stable badge identifier
    pub id: u64,
    /// Display name
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// When the badge was awarded; `None` when missing or unparseable
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created: Option<DateTime<Utc>>,
    #[serde(default)]
    pub icon_image_id: Option<u64>,
}

/// Most recent badges as returned by one poll, newest first
pub type BadgeSnapshot = Vec<BadgeRecord>;

/// Decode an award time without failing the record.
///
/// RFC 3339 and timezone-less ISO 8601 (read as UTC) are accepted. Any other
/// value, including non-strings, becomes `None`.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw
        .as_ref()
        .and_then(serde_json::Value::as_str)
        .and_then(parse_timestamp))
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .or_else(|_| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").map(|t| t.and_utc())
        })
        .ok()
}

/// Presence status reported for a user
///
/// Codes 0-2 are the documented values; anything else is kept as
/// `Unknown(code)` so two unknown codes still compare by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum PresenceStatus {
    Offline,
    Online,
    InGame,
    Unknown(i64),
}

impl From<i64> for PresenceStatus {
    fn from(code: i64) -> Self {
        match code {
            0 => PresenceStatus::Offline,
            1 => PresenceStatus::Online,
            2 => PresenceStatus::InGame,
            other => PresenceStatus::Unknown(other),
        }
    }
}

impl From<PresenceStatus> for i64 {
    fn from(status: PresenceStatus) -> Self {
        match status {
            PresenceStatus::Offline => 0,
            PresenceStatus::Online => 1,
            PresenceStatus::InGame => 2,
            PresenceStatus::Unknown(code) => code,
        }
    }
}

impl PresenceStatus {
    /// Label used in notifications
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            PresenceStatus::Offline => "🔴 Offline",
            PresenceStatus::Online => "🟢 Online",
            PresenceStatus::InGame => "🎮 Playing",
            PresenceStatus::Unknown(_) => "❓ Unknown",
        }
    }

    /// Short name for logs and metric labels
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            PresenceStatus::Offline => "offline",
            PresenceStatus::Online => "online",
            PresenceStatus::InGame => "in-game",
            PresenceStatus::Unknown(_) => "unknown",
        }
    }
}

impl fmt::Display for PresenceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PresenceStatus::Unknown(code) => write!(f, "unknown({code})"),
            other => f.write_str(other.as_str()),
        }
    }
}

/// Presence observed in one poll cycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PresenceSnapshot {
    pub status: PresenceStatus,
    /// Free-form location text, e.g. the game name
    pub last_location: Option<String>,
    /// Place the user is in, when in a game and visible
    pub place_id: Option<u64>,
}

impl PresenceSnapshot {
    #[must_use]
    pub fn new(status: PresenceStatus) -> Self {
        Self {
            status,
            last_location: None,
            place_id: None,
        }
    }

    #[must_use]
    pub fn with_place(mut self, place_id: u64) -> Self {
        self.place_id = Some(place_id);
        self
    }
}
