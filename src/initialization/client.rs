//! HTTP client initialization.

use std::sync::Arc;
use std::time::Duration;

use reqwest::ClientBuilder;

use crate::config::{Config, CONNECT_TIMEOUT_SECS};

/// Initializes the HTTP client used for provider requests.
///
/// Creates a `reqwest::Client` configured with:
/// - User-Agent header from the config
/// - Request timeout from the config
/// - Connect timeout (`CONNECT_TIMEOUT_SECS`, capped by the request timeout)
///
/// # Errors
///
/// Returns a `reqwest::Error` if client creation fails.
pub fn init_client(config: &Config) -> Result<Arc<reqwest::Client>, reqwest::Error> {
    let timeout = Duration::from_secs(config.timeout_seconds.max(1));
    let connect_timeout = Duration::from_secs(CONNECT_TIMEOUT_SECS).min(timeout);
    let client = ClientBuilder::new()
        .timeout(timeout)
        .connect_timeout(connect_timeout)
        .user_agent(config.user_agent.clone())
        .build()?;
    Ok(Arc::new(client))
}
