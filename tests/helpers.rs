// Shared test helpers for building a lookup session against a mock provider.

use std::sync::Arc;

use ip_finder::config::API_KEY_PREFERENCE;
use ip_finder::{
    ApiKeyPreference, Config, IpLookupClient, LookupSession, MemoryPreferenceStore,
    PreferenceStore, RecordingNotifier,
};
use serde_json::{json, Value};
use wiremock::MockServer;

/// Session plus the handles tests inspect.
#[allow(dead_code)] // Not every test file reads every field
pub struct Harness {
    pub session: LookupSession,
    pub notifier: Arc<RecordingNotifier>,
    pub store: Arc<dyn PreferenceStore>,
}

/// Config pointing both tiers at the mock server (`/free` and `/pro`).
#[allow(dead_code)]
pub fn test_config(server: &MockServer) -> Config {
    Config {
        free_endpoint: format!("{}/free", server.uri()),
        pro_endpoint: format!("{}/pro", server.uri()),
        timeout_seconds: 2,
        detect_on_start: false,
        ..Default::default()
    }
}

/// Builds a session backed by an in-memory store, optionally holding a key.
#[allow(dead_code)]
pub fn harness(server: &MockServer, api_key: Option<&str>) -> Harness {
    let store: Arc<dyn PreferenceStore> = match api_key {
        Some(key) => Arc::new(MemoryPreferenceStore::with_value(API_KEY_PREFERENCE, key)),
        None => Arc::new(MemoryPreferenceStore::new()),
    };
    harness_with_store(&test_config(server), store)
}

/// Builds a session over an arbitrary store.
#[allow(dead_code)]
pub fn harness_with_store(config: &Config, store: Arc<dyn PreferenceStore>) -> Harness {
    let client = IpLookupClient::from_config(config).expect("Failed to build lookup client");
    let notifier = Arc::new(RecordingNotifier::new());
    let session = LookupSession::new(
        client,
        ApiKeyPreference::new(Arc::clone(&store)),
        notifier.clone(),
    );
    Harness {
        session,
        notifier,
        store,
    }
}

/// A provider success body.
#[allow(dead_code)]
pub fn success_body(query: &str, country: &str) -> Value {
    json!({
        "query": query,
        "status": "success",
        "country": country,
        "countryCode": "US",
        "region": "CA",
        "regionName": "California",
        "city": "Mountain View",
        "zip": "94043",
        "lat": 37.422,
        "lon": -122.084,
        "timezone": "America/Los_Angeles",
        "isp": "Google LLC",
        "org": "Google Public DNS",
        "as": "AS15169 Google LLC"
    })
}

/// A provider fail body.
#[allow(dead_code)]
pub fn fail_body(query: &str, message: &str) -> Value {
    json!({
        "query": query,
        "status": "fail",
        "message": message
    })
}

/// Number of requests the mock server has seen.
#[allow(dead_code)]
pub async fn request_count(server: &MockServer) -> usize {
    server
        .received_requests()
        .await
        .map(|requests| requests.len())
        .unwrap_or(0)
}
