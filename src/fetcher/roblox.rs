//! Roblox REST client
//!
//! Two public, unauthenticated endpoints:
//! - `GET /v1/users/{userId}/badges` on the badges API
//! - `POST /v1/presence/users` on the presence API
//!
//! One request per call, transport-default timeouts, no retries.

use super::{FetchError, RemoteStateSource};
use crate::model::{BadgeRecord, BadgeSnapshot, PresenceSnapshot, PresenceStatus};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Badges page wrapper. A missing `data` array is an empty page.
#[derive(Debug, Deserialize)]
struct BadgesResponse {
    #[serde(default)]
    data: Vec<BadgeRecord>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PresenceRequest {
    user_ids: Vec<u64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PresenceResponse {
    #[serde(default)]
    user_presences: Vec<UserPresence>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserPresence {
    user_presence_type: PresenceStatus,
    #[serde(default)]
    last_location: Option<String>,
    #[serde(default)]
    place_id: Option<u64>,
    #[serde(default)]
    user_id: Option<u64>,
}

impl From<UserPresence> for PresenceSnapshot {
    fn from(presence: UserPresence) -> Self {
        Self {
            status: presence.user_presence_type,
            last_location: presence.last_location.filter(|l| !l.is_empty()),
            place_id: presence.place_id,
        }
    }
}

/// Client for the Roblox badges and presence APIs
#[derive(Debug, Clone)]
pub struct RobloxClient {
    http_client: Client,
    badges_base_url: String,
    presence_base_url: String,
    user_id: u64,
    badge_limit: u32,
}

impl RobloxClient {
    #[must_use]
    pub fn new(
        http_client: Client,
        badges_base_url: &str,
        presence_base_url: &str,
        user_id: u64,
        badge_limit: u32,
    ) -> Self {
        Self {
            http_client,
            badges_base_url: badges_base_url.trim_end_matches('/').to_string(),
            presence_base_url: presence_base_url.trim_end_matches('/').to_string(),
            user_id,
            badge_limit,
        }
    }

    #[must_use]
    pub fn user_id(&self) -> u64 {
        self.user_id
    }

    fn badges_url(&self) -> String {
        format!(
            "{}/v1/users/{}/badges?limit={}&sortOrder=Desc",
            self.badges_base_url, self.user_id, self.badge_limit
        )
    }

    fn presence_url(&self) -> String {
        format!("{}/v1/presence/users", self.presence_base_url)
    }
}

/// Reject non-2xx responses before decoding
fn check_status(response: reqwest::Response) -> Result<reqwest::Response, FetchError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(FetchError::Status {
            status,
            url: response.url().to_string(),
        })
    }
}

#[async_trait]
impl RemoteStateSource for RobloxClient {
    async fn badges(&self) -> Result<BadgeSnapshot, FetchError> {
        let url = self.badges_url();
        debug!(url = %url, "Fetching badges");

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(FetchError::Transport)?;
        let page: BadgesResponse = check_status(response)?
            .json()
            .await
            .map_err(FetchError::Decode)?;

        debug!(count = page.data.len(), "Fetched badges");
        Ok(page.data)
    }

    async fn presence(&self) -> Result<PresenceSnapshot, FetchError> {
        let url = self.presence_url();
        debug!(url = %url, user_id = self.user_id, "Fetching presence");

        let response = self
            .http_client
            .post(&url)
            .json(&PresenceRequest {
                user_ids: vec![self.user_id],
            })
            .send()
            .await
            .map_err(FetchError::Transport)?;
        let body: PresenceResponse = check_status(response)?
            .json()
            .await
            .map_err(FetchError::Decode)?;

        let mut presences = body.user_presences;
        if presences.is_empty() {
            return Err(FetchError::MissingPresence(self.user_id));
        }
        let index = presences
            .iter()
            .position(|p| p.user_id == Some(self.user_id))
            .unwrap_or(0);
        Ok(presences.swap_remove(index).into())
    }
}
