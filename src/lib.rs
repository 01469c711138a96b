//! Roblox User Monitor Library
//!
//! Change detection for a single Roblox user: badges earned or lost and
//! presence transitions, reported to a Discord webhook.
//! Tests are included in the module files and under `tests/`.
//!
//! ## Quick Start
//!
//! ```rust
//! use roblox_monitor::prelude::*;
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod differ;
pub mod fetcher;
pub mod model;
pub mod monitor;
pub mod notifier;
pub mod observability;
pub mod prelude;
pub mod runtime;
pub mod server;
