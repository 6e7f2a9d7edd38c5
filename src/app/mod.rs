//! Command-line application flow.
//!
//! This module drives a `LookupSession` from the CLI: one-shot lookups of the
//! subjects given on the command line, the interactive prompt, and end-of-run
//! statistics.

pub mod interactive;
pub mod statistics;

use std::io::Write;

use crate::error_handling::LookupError;
use crate::lookup::{auto_detected_badge, IpRecord, LookupSession};

// Re-export public API
pub use interactive::run_interactive;
pub use statistics::{print_lookup_statistics, summary_line};

/// Writes a record as text, or as one line of JSON when `json` is set.
pub fn write_record<W: Write>(
    out: &mut W,
    record: &IpRecord,
    auto_detected: bool,
    json: bool,
) -> std::io::Result<()> {
    if json {
        let line = serde_json::to_string(record).map_err(std::io::Error::other)?;
        return writeln!(out, "{}", line);
    }
    if auto_detected {
        writeln!(out, "{}", auto_detected_badge(record))?;
    }
    write!(out, "{}", record)
}

/// Looks up each subject in order and writes successful records.
///
/// Returns the number of subjects that failed.
pub async fn run_lookups<W: Write>(
    session: &LookupSession,
    subjects: &[String],
    out: &mut W,
    json: bool,
) -> std::io::Result<usize> {
    let mut failed = 0;
    for subject in subjects {
        session.set_input(subject.as_str());
        match session.submit().await {
            Ok(record) => write_record(out, &record, false, json)?,
            Err(LookupError::Superseded) => {}
            Err(_) => failed += 1,
        }
    }
    Ok(failed)
}

/// Masks a key for display.
///
/// At most the first four characters are shown, and never more than half of
/// the key.
pub fn mask_key(key: &str) -> String {
    let len = key.chars().count();
    let shown = (len / 2).min(4);
    let visible: String = key.chars().take(shown).collect();
    format!("{}{}", visible, "*".repeat(len - shown))
}
