//! ip_finder library: IP geolocation lookups against ip-api.com
//!
//! This library looks up geolocation and network metadata for IP addresses,
//! detects the caller's own address, and supports an optional pro-tier API key
//! with automatic fallback to the free tier.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use ip_finder::{
//!     ApiKeyPreference, Config, IpLookupClient, LookupSession, MemoryPreferenceStore,
//!     TerminalNotifier,
//! };
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::default();
//! let client = IpLookupClient::from_config(&config)?;
//! let api_key = ApiKeyPreference::new(Arc::new(MemoryPreferenceStore::new()));
//! let session = LookupSession::new(client, api_key, Arc::new(TerminalNotifier));
//!
//! if let Some(me) = session.detect_caller_address().await {
//!     println!("Your IP: {}", me.query);
//! }
//! let record = session.lookup("8.8.8.8").await?;
//! println!("{}", record);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime.

pub mod app;
pub mod cli;
pub mod config;
pub mod error_handling;
pub mod initialization;
pub mod lookup;
pub mod notify;
pub mod preferences;

// Re-export public API
pub use config::{Config, LogFormat, LogLevel};
pub use error_handling::{LookupError, LookupStats, PreferenceError};
pub use lookup::{IpLookupClient, IpRecord, LookupSession, LookupStatus};
pub use notify::{Notification, NotificationKind, Notifier, RecordingNotifier, TerminalNotifier};
pub use preferences::{
    ApiKeyChange, ApiKeyPreference, FilePreferenceStore, MemoryPreferenceStore, PreferenceStore,
};
