//! # Constants
//!
//! Shared constants used throughout the monitor.
//!
//! These values represent reasonable defaults and can be overridden via
//! configuration or environment variables where applicable.

/// Default tracked Roblox user
pub const DEFAULT_ROBLOX_USER_ID: u64 = 8_213_751_331;

/// Default delay between the end of one cycle and the start of the next (seconds)
pub const DEFAULT_CHECK_INTERVAL_SECS: u64 = 5 * 60;

/// Default HTTP server port for the status endpoint
pub const DEFAULT_PORT: u16 = 3000;

/// Default number of most recent badges requested per poll
pub const DEFAULT_BADGE_LIMIT: u32 = 10;

/// Page sizes accepted by the badges endpoint
pub const SUPPORTED_BADGE_LIMITS: [u32; 4] = [10, 25, 50, 100];

/// Default HTTP server startup timeout (how long to wait for server to be ready)
pub const DEFAULT_SERVER_STARTUP_TIMEOUT_SECS: u64 = 10;

/// Default HTTP server readiness poll interval
pub const DEFAULT_SERVER_POLL_INTERVAL_MS: u64 = 50;

/// Roblox badges API
pub const DEFAULT_BADGES_API_URL: &str = "https://badges.roblox.com";

/// Roblox presence API
pub const DEFAULT_PRESENCE_API_URL: &str = "https://presence.roblox.com";

/// Badge icons are served by asset id from here
pub const ASSET_DELIVERY_URL: &str = "https://assetdelivery.roblox.com/v1/asset/";

/// Place links in status notifications point here
pub const GAMES_URL: &str = "https://www.roblox.com/games";

/// Embed color for positive events (badge earned, came online)
pub const COLOR_GREEN: u32 = 0x00ff00;

/// Embed color for removals
pub const COLOR_RED: u32 = 0xff0000;

/// Embed color for entering a game
pub const COLOR_BLUE: u32 = 0x0099ff;

/// Embed color for offline or unknown presence
pub const COLOR_GRAY: u32 = 0x808080;
