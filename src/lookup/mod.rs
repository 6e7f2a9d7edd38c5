//! IP geolocation lookups against ip-api.com.
//!
//! This module provides:
//! - The provider record type (`IpRecord`)
//! - Endpoint selection for the free and pro tiers
//! - `IpLookupClient`, which performs requests and the pro->free fallback
//! - `LookupSession`, the stateful view with sequence-tagged requests
//! - Text rendering of records

mod client;
mod display;
mod endpoint;
mod session;
mod types;

// Re-export public API
pub use client::IpLookupClient;
pub use display::{auto_detected_badge, info_rows};
pub use endpoint::{Endpoints, Tier};
pub use session::LookupSession;
pub use types::{IpRecord, LookupStatus};
