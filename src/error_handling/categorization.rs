//! Transport error categorization.

use super::types::{LookupError, TransportErrorKind};

/// Categorizes a `reqwest::Error` into a `TransportErrorKind`.
///
/// HTTP status codes are checked first, then the reqwest error kind.
pub fn categorize_reqwest_error(error: &reqwest::Error) -> TransportErrorKind {
    if let Some(status) = error.status() {
        return TransportErrorKind::Status(status.as_u16());
    }

    if error.is_timeout() {
        TransportErrorKind::Timeout
    } else if error.is_connect() {
        TransportErrorKind::Connect
    } else if error.is_decode() || error.is_body() {
        TransportErrorKind::Decode
    } else if error.is_builder() {
        TransportErrorKind::Builder
    } else {
        TransportErrorKind::Other
    }
}

impl From<reqwest::Error> for LookupError {
    fn from(error: reqwest::Error) -> Self {
        LookupError::TransportFailure {
            kind: categorize_reqwest_error(&error),
            message: error.to_string(),
        }
    }
}

impl From<serde_json::Error> for LookupError {
    fn from(error: serde_json::Error) -> Self {
        LookupError::TransportFailure {
            kind: TransportErrorKind::Decode,
            message: error.to_string(),
        }
    }
}
