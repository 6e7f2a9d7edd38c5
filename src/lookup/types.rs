//! Provider record types.
//!
//! Field names follow the provider's JSON (`countryCode`, `regionName`, `as`).

use serde::{Deserialize, Serialize};

/// Provider result flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LookupStatus {
    Success,
    Fail,
}

/// Result of a lookup as returned by the provider.
///
/// Only `status` is guaranteed; fail responses usually carry just `status`,
/// `message` and `query`, so every other field defaults to empty. Check
/// `is_success()` before reading anything else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IpRecord {
    #[serde(default)]
    pub query: String,
    pub status: LookupStatus,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub country_code: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub region_name: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub zip: String,
    #[serde(default)]
    pub lat: f64,
    #[serde(default)]
    pub lon: f64,
    #[serde(default)]
    pub timezone: String,
    #[serde(default)]
    pub isp: String,
    #[serde(default)]
    pub org: String,
    #[serde(default, rename = "as")]
    pub asn: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl IpRecord {
    pub fn is_success(&self) -> bool {
        self.status == LookupStatus::Success
    }
}
