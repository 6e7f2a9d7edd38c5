//! Persisted user preferences.
//!
//! The only preference is the provider API key. Storage sits behind the
//! `PreferenceStore` trait so the lookup session can be built with a durable
//! JSON file store or an in-memory store in tests.

mod api_key;
mod file;
mod store;

// Re-export public API
pub use api_key::{ApiKeyChange, ApiKeyPreference};
pub use file::FilePreferenceStore;
pub use store::{MemoryPreferenceStore, PreferenceStore};
