//! Statistics printing.

use log::info;
use strum::IntoEnumIterator;

use crate::error_handling::{LookupEvent, LookupStats};

/// Logs every non-zero lookup counter.
pub fn print_lookup_statistics(stats: &LookupStats) {
    let total_requests = stats.total_requests();
    if total_requests == 0 && stats.get_count(LookupEvent::InvalidInput) == 0 {
        return;
    }

    info!("Lookup Counts ({} requests):", total_requests);
    for event in LookupEvent::iter() {
        let count = stats.get_count(event);
        if count > 0 {
            info!("   {}: {}", event.as_str(), count);
        }
    }
}

/// One-line summary for the end of a session.
pub fn summary_line(stats: &LookupStats) -> String {
    let succeeded = stats.get_count(LookupEvent::Success);
    let failed = stats.get_count(LookupEvent::ProviderRejected)
        + stats.get_count(LookupEvent::TransportFailure);
    format!(
        "{} lookup{} ({} succeeded, {} failed, {} request{})",
        succeeded + failed,
        if succeeded + failed == 1 { "" } else { "s" },
        succeeded,
        failed,
        stats.total_requests(),
        if stats.total_requests() == 1 { "" } else { "s" },
    )
}
