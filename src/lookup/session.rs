//! Lookup session: the state behind the lookup view.
//!
//! Holds the displayed record, the auto-detected flag, the input text and the
//! busy flag, and routes outcomes to the notifier. Every request takes a
//! sequence token; a response is applied only if no newer request has been
//! issued since, so the last *issued* lookup wins regardless of arrival order.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use log::{debug, info, warn};

use crate::config::{
    MSG_API_KEY_REMOVED, MSG_API_KEY_SAVED, MSG_INVALID_INPUT, MSG_LOOKUP_SUCCESS,
    MSG_NETWORK_ERROR,
};
use crate::error_handling::{LookupError, LookupEvent, LookupStats, PreferenceError};
use crate::notify::{Notification, Notifier};
use crate::preferences::{ApiKeyChange, ApiKeyPreference};

use super::client::IpLookupClient;
use super::endpoint::Endpoints;
use super::types::IpRecord;

#[derive(Debug, Default)]
struct ViewState {
    record: Option<IpRecord>,
    auto_detected: bool,
    input: String,
}

/// Decrements the in-flight counter when a request finishes or is dropped.
struct InFlight<'a>(&'a AtomicUsize);

impl<'a> InFlight<'a> {
    fn start(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        InFlight(counter)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Stateful lookup session.
///
/// Operations take `&self`, so overlapping lookups can be driven from one
/// task (`tokio::join!`) or shared behind an `Arc`.
pub struct LookupSession {
    client: IpLookupClient,
    api_key: ApiKeyPreference,
    notifier: Arc<dyn Notifier>,
    state: Mutex<ViewState>,
    latest_token: AtomicU64,
    in_flight: AtomicUsize,
}

impl LookupSession {
    pub fn new(
        client: IpLookupClient,
        api_key: ApiKeyPreference,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            client,
            api_key,
            notifier,
            state: Mutex::new(ViewState::default()),
            latest_token: AtomicU64::new(0),
            in_flight: AtomicUsize::new(0),
        }
    }

    fn state(&self) -> MutexGuard<'_, ViewState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn stats(&self) -> &LookupStats {
        self.client.stats()
    }

    /// Shared statistics handle.
    pub fn lookup_stats(&self) -> Arc<LookupStats> {
        Arc::clone(self.client.stats())
    }

    /// The record currently displayed, if any.
    pub fn current_record(&self) -> Option<IpRecord> {
        self.state().record.clone()
    }

    /// True when the displayed record came from `detect_caller_address`.
    pub fn is_auto_detected(&self) -> bool {
        let state = self.state();
        state.auto_detected && state.record.is_some()
    }

    /// True while any request is outstanding.
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    pub fn input(&self) -> String {
        self.state().input.clone()
    }

    pub fn set_input(&self, text: impl Into<String>) {
        self.state().input = text.into();
    }

    /// The active API key, if one is set.
    pub fn api_key_preference(&self) -> Option<String> {
        self.api_key.get()
    }

    /// Looks up the caller's own address.
    ///
    /// Best effort: failures are logged and never notified. On success the
    /// record is displayed, flagged as auto-detected and copied into the input.
    pub async fn detect_caller_address(&self) -> Option<IpRecord> {
        self.fetch_and_apply(None, false).await.ok()
    }

    /// Looks up `subject` on explicit user request.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` for an empty, whitespace-only, `.` or `..` subject (no
    ///   request sent)
    /// - `ProviderRejected` / `TransportFailure` from the provider; the displayed
    ///   record is left unchanged
    /// - `Superseded` if a newer lookup was issued while this one was in flight
    pub async fn lookup(&self, subject: &str) -> Result<IpRecord, LookupError> {
        let subject = subject.trim();
        if !Endpoints::is_addressable(subject) {
            self.stats().record(LookupEvent::InvalidInput);
            self.notifier.notify(Notification::error(MSG_INVALID_INPUT));
            return Err(LookupError::InvalidInput);
        }
        self.fetch_and_apply(Some(subject), true).await
    }

    /// Looks up whatever is in the input (the Enter key / button path).
    pub async fn submit(&self) -> Result<IpRecord, LookupError> {
        let input = self.input();
        self.lookup(&input).await
    }

    /// Saves (non-empty after trimming) or removes the API key.
    ///
    /// Applies to the next request only; nothing is re-fetched.
    pub fn set_api_key_preference(&self, raw: &str) -> Result<ApiKeyChange, PreferenceError> {
        match self.api_key.set(raw) {
            Ok(change) => {
                let message = match change {
                    ApiKeyChange::Saved => MSG_API_KEY_SAVED,
                    ApiKeyChange::Removed => MSG_API_KEY_REMOVED,
                };
                self.notifier.notify(Notification::success(message));
                Ok(change)
            }
            Err(e) => {
                warn!("Failed to update API key preference: {}", e);
                self.notifier.notify(Notification::error(e.to_string()));
                Err(e)
            }
        }
    }

    /// Shared request path for detection (`report_errors = false`) and
    /// explicit lookups (`report_errors = true`).
    async fn fetch_and_apply(
        &self,
        subject: Option<&str>,
        report_errors: bool,
    ) -> Result<IpRecord, LookupError> {
        let token = self.latest_token.fetch_add(1, Ordering::SeqCst) + 1;
        let _in_flight = InFlight::start(&self.in_flight);

        let api_key = self.api_key.get();
        let result = self.client.fetch(subject, api_key.as_deref()).await;
        let label = subject.unwrap_or("caller address");

        let mut state = self.state();
        if self.latest_token.load(Ordering::SeqCst) != token {
            debug!("Discarding stale response #{} for {}", token, label);
            self.stats().record(LookupEvent::StaleDiscarded);
            return Err(LookupError::Superseded);
        }

        match result {
            Ok(record) => {
                state.record = Some(record.clone());
                state.auto_detected = subject.is_none();
                if subject.is_none() {
                    state.input = record.query.clone();
                }
                drop(state);

                self.stats().record(LookupEvent::Success);
                info!("Resolved {} ({})", record.query, label);
                if report_errors {
                    self.notifier.notify(Notification::success(MSG_LOOKUP_SUCCESS));
                }
                Ok(record)
            }
            Err(e) => {
                drop(state);
                let description = match &e {
                    LookupError::ProviderRejected(message) => {
                        self.stats().record(LookupEvent::ProviderRejected);
                        message.clone()
                    }
                    _ => {
                        self.stats().record(LookupEvent::TransportFailure);
                        MSG_NETWORK_ERROR.to_string()
                    }
                };
                if report_errors {
                    warn!("Lookup for {} failed: {}", label, e);
                    self.notifier.notify(Notification::error(description));
                } else {
                    warn!("Could not detect caller address: {}", e);
                }
                Err(e)
            }
        }
    }
}

impl std::fmt::Debug for LookupSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LookupSession")
            .field("client", &self.client)
            .field("api_key", &self.api_key)
            .field("busy", &self.is_busy())
            .finish()
    }
}
