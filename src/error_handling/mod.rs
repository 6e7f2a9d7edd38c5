//! Error handling and lookup statistics.
//!
//! This module provides:
//! - Error type definitions for initialization, lookups and preference storage
//! - Transport error categorization for `reqwest` failures
//! - Lookup statistics tracking (requests per tier, fallbacks, outcomes)

mod categorization;
mod stats;
mod types;

// Re-export public API
pub use categorization::categorize_reqwest_error;
pub use stats::LookupStats;
pub use types::{
    InitializationError, LookupError, LookupEvent, PreferenceError, TransportErrorKind,
};
