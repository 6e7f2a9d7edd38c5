//! HTTP client for the geolocation provider.

use std::sync::Arc;

use log::{debug, warn};

use crate::config::{Config, MSG_PROVIDER_FAILED};
use crate::error_handling::{
    InitializationError, LookupError, LookupEvent, LookupStats, TransportErrorKind,
};
use crate::initialization::init_client;

use super::endpoint::{redacted, Endpoints, Tier};
use super::types::IpRecord;

/// Issues provider requests and applies the pro->free fallback.
///
/// Cheap to clone; the underlying `reqwest::Client` and stats are shared.
#[derive(Debug, Clone)]
pub struct IpLookupClient {
    http: Arc<reqwest::Client>,
    endpoints: Endpoints,
    stats: Arc<LookupStats>,
}

impl IpLookupClient {
    pub fn new(http: Arc<reqwest::Client>, endpoints: Endpoints, stats: Arc<LookupStats>) -> Self {
        Self {
            http,
            endpoints,
            stats,
        }
    }

    /// Builds the HTTP client and endpoints from `config`.
    pub fn from_config(config: &Config) -> Result<Self, InitializationError> {
        let http = init_client(config)?;
        let endpoints = Endpoints::from_config(config)?;
        Ok(Self::new(http, endpoints, Arc::new(LookupStats::new())))
    }

    pub fn stats(&self) -> &Arc<LookupStats> {
        &self.stats
    }

    /// Looks up `subject`, or the caller's own address when `subject` is `None`.
    ///
    /// With an API key the elevated endpoint is tried first. If it answers
    /// `status = fail`, exactly one retry goes to the free endpoint with the
    /// same subject and its result is returned. Transport failures on the
    /// elevated endpoint are returned as-is.
    ///
    /// # Errors
    ///
    /// - `LookupError::InvalidInput` for a subject that cannot be a path segment
    /// - `LookupError::ProviderRejected` when the (final) answer is `status = fail`,
    ///   whatever the HTTP status
    /// - `LookupError::TransportFailure` for network and decoding errors, and for
    ///   non-2xx responses without a provider record
    pub async fn fetch(
        &self,
        subject: Option<&str>,
        api_key: Option<&str>,
    ) -> Result<IpRecord, LookupError> {
        if let Some(subject) = subject {
            if !Endpoints::is_addressable(subject) {
                return Err(LookupError::InvalidInput);
            }
        }
        let tier = Endpoints::tier_for(api_key);
        let result = self.request(tier, subject, api_key).await;

        match result {
            Err(LookupError::ProviderRejected(message)) if tier == Tier::Elevated => {
                warn!(
                    "Pro endpoint rejected lookup for {} ({}), retrying on free endpoint",
                    subject.unwrap_or("caller"),
                    message
                );
                self.stats.record(LookupEvent::Fallback);
                self.request(Tier::Free, subject, None).await
            }
            other => other,
        }
    }

    async fn request(
        &self,
        tier: Tier,
        subject: Option<&str>,
        api_key: Option<&str>,
    ) -> Result<IpRecord, LookupError> {
        let url = self.endpoints.url(tier, subject, api_key);
        self.stats.record(match tier {
            Tier::Free => LookupEvent::FreeRequest,
            Tier::Elevated => LookupEvent::ElevatedRequest,
        });
        debug!("GET {} ({} tier)", redacted(&url), tier);

        let response = self.http.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        // A body that decodes as a record wins over the HTTP status
        let record = match serde_json::from_str::<IpRecord>(&body) {
            Ok(record) => record,
            Err(e) if !status.is_success() => {
                return Err(LookupError::TransportFailure {
                    kind: TransportErrorKind::Status(status.as_u16()),
                    message: format!("provider returned HTTP {}: {}", status, e),
                });
            }
            Err(e) => return Err(e.into()),
        };

        if record.is_success() {
            debug!("Resolved {} via {} tier", record.query, tier);
            Ok(record)
        } else {
            let message = record
                .message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| MSG_PROVIDER_FAILED.to_string());
            debug!("Provider rejected lookup on {} tier: {}", tier, message);
            Err(LookupError::ProviderRejected(message))
        }
    }
}
