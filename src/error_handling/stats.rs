//! Lookup statistics tracking.
//!
//! Thread-safe counters for every `LookupEvent`, shared between the lookup
//! client and the session.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use strum::IntoEnumIterator;

use super::types::LookupEvent;

/// Thread-safe lookup statistics tracker.
///
/// All event kinds are initialized to zero on creation. Share it with `Arc`.
#[derive(Debug)]
pub struct LookupStats {
    counters: HashMap<LookupEvent, AtomicUsize>,
}

impl LookupStats {
    pub fn new() -> Self {
        let mut counters = HashMap::new();
        for event in LookupEvent::iter() {
            counters.insert(event, AtomicUsize::new(0));
        }
        LookupStats { counters }
    }

    /// Increment the counter for an event.
    pub fn record(&self, event: LookupEvent) {
        if let Some(counter) = self.counters.get(&event) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to record {:?} which is not in the counter map",
                event
            );
        }
    }

    /// Get the count for an event. Returns 0 for unknown events.
    pub fn get_count(&self, event: LookupEvent) -> usize {
        self.counters
            .get(&event)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    /// Total HTTP requests issued across both tiers.
    pub fn total_requests(&self) -> usize {
        LookupEvent::iter()
            .filter(|e| e.is_request())
            .map(|e| self.get_count(e))
            .sum()
    }
}

impl Default for LookupStats {
    fn default() -> Self {
        Self::new()
    }
}
