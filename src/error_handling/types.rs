//! Error type definitions.
//!
//! This module defines the error enums used throughout the crate and the event
//! kinds tracked by `LookupStats`.

use std::path::PathBuf;

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

use crate::config::MSG_INVALID_INPUT;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),

    /// A configured endpoint is not a valid base URL.
    #[error("Invalid endpoint URL {url}: {reason}")]
    EndpointError { url: String, reason: String },
}

/// Broad category of a transport-level failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    /// Request or connect timeout
    Timeout,
    /// TCP/TLS connection could not be established
    Connect,
    /// Response body was not a valid provider record
    Decode,
    /// Provider answered with a non-2xx HTTP status
    Status(u16),
    /// Request could not be built (bad URL)
    Builder,
    /// Anything else reqwest reports
    Other,
}

impl std::fmt::Display for TransportErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransportErrorKind::Timeout => f.write_str("timeout"),
            TransportErrorKind::Connect => f.write_str("connect"),
            TransportErrorKind::Decode => f.write_str("decode"),
            TransportErrorKind::Status(code) => write!(f, "HTTP {}", code),
            TransportErrorKind::Builder => f.write_str("builder"),
            TransportErrorKind::Other => f.write_str("other"),
        }
    }
}

/// Errors returned by a lookup.
///
/// `InvalidInput`, `ProviderRejected` and `TransportFailure` are user-visible
/// on the explicit lookup path. `Superseded` is never shown: it marks a
/// response that arrived after a newer request had been issued.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LookupError {
    /// Empty or whitespace-only subject.
    #[error("{}", MSG_INVALID_INPUT)]
    InvalidInput,

    /// Provider answered `status = fail`.
    #[error("{0}")]
    ProviderRejected(String),

    /// Network, HTTP or decoding failure.
    #[error("Transport failure ({kind}): {message}")]
    TransportFailure {
        kind: TransportErrorKind,
        message: String,
    },

    /// A newer request was issued before this response arrived.
    #[error("Response discarded: a newer lookup was issued")]
    Superseded,
}

/// Error types for preference storage.
#[derive(Error, Debug)]
pub enum PreferenceError {
    /// Reading or writing the preference file failed.
    #[error("Preference file I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The preference file exists but is not a valid JSON object of strings.
    #[error("Preference file {path} is malformed: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Events counted by `LookupStats`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum LookupEvent {
    FreeRequest,
    ElevatedRequest,
    Fallback,
    Success,
    ProviderRejected,
    TransportFailure,
    StaleDiscarded,
    InvalidInput,
}

impl std::fmt::Display for LookupEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl LookupEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            LookupEvent::FreeRequest => "Free-tier requests",
            LookupEvent::ElevatedRequest => "Pro-tier requests",
            LookupEvent::Fallback => "Pro to free fallbacks",
            LookupEvent::Success => "Successful lookups",
            LookupEvent::ProviderRejected => "Provider rejections",
            LookupEvent::TransportFailure => "Network errors",
            LookupEvent::StaleDiscarded => "Stale responses discarded",
            LookupEvent::InvalidInput => "Rejected empty inputs",
        }
    }

    /// True for events that correspond to an outgoing HTTP request.
    pub fn is_request(&self) -> bool {
        matches!(self, LookupEvent::FreeRequest | LookupEvent::ElevatedRequest)
    }
}
