//! # Configuration
//!
//! Settings come from the environment first, then command line flags.

pub mod monitor;

pub use monitor::{ConfigError, MonitorConfig};
