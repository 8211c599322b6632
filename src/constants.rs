//! Application constants
//!
//! Centralized location for magic strings and configuration defaults.

use std::time::Duration;

/// How long the referenda fetch may run before it is abandoned
pub const FETCH_DATA_TIMEOUT: Duration = Duration::from_millis(15000);

/// The one message shown when referenda could not be loaded
pub const FETCH_ERROR_MESSAGE: &str = "Failed to fetch data in time";

/// Shown when the configured endpoint cannot be turned into a chain source
pub const CONNECT_ERROR_MESSAGE: &str = "Failed to connect to chain";

/// Default chain gateway
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8080";

/// Default log file, relative to the working directory
pub const DEFAULT_LOG_FILE: &str = "swipevote.log";

/// Horizontal drag distance (in columns) that counts as a swipe
pub const SWIPE_THRESHOLD: u16 = 8;

/// Application name
pub const APP_NAME: &str = "SwipeVote";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
