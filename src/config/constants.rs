//! Configuration constants.
//!
//! Endpoints, timeouts, preference keys and the user-facing notification text
//! used throughout the crate.

/// Free-tier provider base URL (plain HTTP, the provider does not serve TLS on the free tier)
pub const FREE_ENDPOINT: &str = "http://ip-api.com";

/// Elevated-tier ("pro") provider base URL
pub const PRO_ENDPOINT: &str = "https://pro.ip-api.com";

/// Path prefix for the JSON response format
pub const JSON_PATH: &str = "json";

/// Query parameter carrying the API key on the elevated tier
pub const API_KEY_PARAM: &str = "key";

/// Per-request timeout in seconds.
///
/// The provider usually answers in well under a second; 5s keeps the loading
/// indicator from spinning indefinitely on a dead network.
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// TCP connect timeout in seconds
pub const CONNECT_TIMEOUT_SECS: u64 = 3;

/// Default User-Agent string for provider requests
pub const DEFAULT_USER_AGENT: &str = concat!("ip_finder/", env!("CARGO_PKG_VERSION"));

/// Preference key under which the API key is persisted
pub const API_KEY_PREFERENCE: &str = "ip_api_key";

/// Environment variable that supplies an API key for a single run
pub const API_KEY_ENV: &str = "IP_FINDER_API_KEY";

/// Directory name used under the user's config dir for persisted preferences
pub const PREFERENCES_DIR: &str = "ip_finder";

/// File name of the persisted preference map
pub const PREFERENCES_FILE: &str = "preferences.json";

// Notification text
pub const TITLE_SUCCESS: &str = "Success";
pub const TITLE_ERROR: &str = "Error";
pub const MSG_INVALID_INPUT: &str = "Please enter a valid IP address";
pub const MSG_LOOKUP_SUCCESS: &str = "IP information retrieved successfully";
pub const MSG_PROVIDER_FAILED: &str = "Failed to retrieve IP information";
pub const MSG_NETWORK_ERROR: &str = "Network error occurred. Please try again.";
pub const MSG_API_KEY_SAVED: &str = "API key saved. Lookups will use the pro endpoint.";
pub const MSG_API_KEY_REMOVED: &str = "API key removed. Lookups will use the free endpoint.";
