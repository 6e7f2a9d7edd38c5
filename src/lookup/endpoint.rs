//! Endpoint selection and URL construction.

use url::Url;

use crate::config::{Config, API_KEY_PARAM, JSON_PATH};
use crate::error_handling::InitializationError;

/// Provider tier a request is sent to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    /// Public endpoint, rate limited per caller IP
    Free,
    /// API-key endpoint with higher limits
    Elevated,
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Tier::Free => f.write_str("free"),
            Tier::Elevated => f.write_str("pro"),
        }
    }
}

/// Parsed base URLs for both tiers.
#[derive(Debug, Clone)]
pub struct Endpoints {
    free: Url,
    elevated: Url,
}

impl Endpoints {
    /// Parses and validates both base URLs.
    ///
    /// # Errors
    ///
    /// Returns `InitializationError::EndpointError` if either URL does not parse
    /// or cannot carry a path (e.g. `mailto:`).
    pub fn new(free: &str, elevated: &str) -> Result<Self, InitializationError> {
        Ok(Self {
            free: parse_base(free)?,
            elevated: parse_base(elevated)?,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, InitializationError> {
        Self::new(&config.free_endpoint, &config.pro_endpoint)
    }

    /// Tier chosen for a request: elevated when a non-empty key is present.
    pub fn tier_for(api_key: Option<&str>) -> Tier {
        match api_key {
            Some(key) if !key.trim().is_empty() => Tier::Elevated,
            _ => Tier::Free,
        }
    }

    /// False for subjects that cannot be sent as a path segment.
    ///
    /// URL parsing removes `.` and `..` segments, which would turn a subject
    /// lookup into a lookup of the caller's own address.
    pub fn is_addressable(subject: &str) -> bool {
        !matches!(subject, "" | "." | "..")
    }

    /// Builds the request URL.
    ///
    /// - free, self: `{free}/json/`
    /// - free, subject: `{free}/json/{subject}`
    /// - elevated, self: `{pro}/json/?key={key}`
    /// - elevated, subject: `{pro}/json/{subject}?key={key}`
    ///
    /// `api_key` is ignored for the free tier.
    pub fn url(&self, tier: Tier, subject: Option<&str>, api_key: Option<&str>) -> Url {
        let base = match tier {
            Tier::Free => &self.free,
            Tier::Elevated => &self.elevated,
        };
        let mut url = base.clone();
        url.set_query(None);
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .push(JSON_PATH)
                .push(subject.unwrap_or(""));
        }
        if tier == Tier::Elevated {
            if let Some(key) = api_key {
                url.query_pairs_mut().append_pair(API_KEY_PARAM, key.trim());
            }
        }
        url
    }
}

fn parse_base(raw: &str) -> Result<Url, InitializationError> {
    let url = Url::parse(raw).map_err(|e| InitializationError::EndpointError {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;
    if url.cannot_be_a_base() {
        return Err(InitializationError::EndpointError {
            url: raw.to_string(),
            reason: "URL cannot have a path".to_string(),
        });
    }
    Ok(url)
}

/// URL with the API key masked, for logging.
pub(crate) fn redacted(url: &Url) -> String {
    let mut shown = url.clone();
    if shown.query().is_some() {
        shown.set_query(Some(&format!("{}=***", API_KEY_PARAM)));
    }
    shown.to_string()
}
