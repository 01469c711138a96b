//! # Prelude
//!
//! Re-exports commonly used types and traits.
//!
//! ```rust
//! use roblox_monitor::prelude::*;
//! ```

// Snapshot types
pub use crate::model::{BadgeRecord, BadgeSnapshot, PresenceSnapshot, PresenceStatus};

// Seams for alternative sources and sinks
pub use crate::fetcher::{FetchError, RemoteStateSource};
pub use crate::notifier::{MonitorEvent, Notifier, NotifyError};

// Cycle and policy
pub use crate::monitor::{BaselinePolicy, CycleOutcome, Monitor, MonitorState};

pub use crate::config::{ConfigError, MonitorConfig};
