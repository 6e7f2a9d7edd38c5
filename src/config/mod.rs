//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (endpoints, timeouts, notification text)
//! - Log level/format option types
//! - The library `Config` struct

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{Config, LogFormat, LogLevel};
