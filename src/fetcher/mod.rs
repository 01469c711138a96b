//! # Remote State Fetcher
//!
//! Read-only access to the remote state of the tracked user.
//!
//! Sources return `Result`s. Turning a failure into an empty badge snapshot
//! or an absent presence is the monitor's job, so the error can be logged
//! and counted once in one place.

use crate::model::{BadgeSnapshot, PresenceSnapshot};
use async_trait::async_trait;
use thiserror::Error;

pub mod roblox;

pub use roblox::RobloxClient;

/// Error type for remote state reads
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("unexpected HTTP status {status} from {url}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },
    #[error("malformed response body: {0}")]
    Decode(#[source] reqwest::Error),
    #[error("no presence entry returned for user {0}")]
    MissingPresence(u64),
}

/// Source of badge and presence snapshots for one tracked user
#[async_trait]
pub trait RemoteStateSource: Send + Sync {
    /// Most recent badges, newest first
    async fn badges(&self) -> Result<BadgeSnapshot, FetchError>;

    /// Current presence
    async fn presence(&self) -> Result<PresenceSnapshot, FetchError>;
}
