//! Text rendering of lookup results.

use std::fmt;

use super::types::IpRecord;

/// Label/value rows shown for a successful record, in display order.
pub fn info_rows(record: &IpRecord) -> Vec<(&'static str, String)> {
    vec![
        (
            "Location",
            format!("{}, {}, {}", record.city, record.region_name, record.country),
        ),
        ("Country Code", record.country_code.clone()),
        ("Coordinates", format!("{}, {}", record.lat, record.lon)),
        ("Timezone", record.timezone.clone()),
        ("ISP", record.isp.clone()),
        ("Organization", record.org.clone()),
        ("ASN", record.asn.clone()),
        (
            "Postal Code",
            if record.zip.is_empty() {
                "N/A".to_string()
            } else {
                record.zip.clone()
            },
        ),
        ("Region", record.region.clone()),
    ]
}

/// Badge shown next to an auto-detected record.
pub fn auto_detected_badge(record: &IpRecord) -> String {
    format!("Your IP: {} (Auto-detected)", record.query)
}

impl fmt::Display for IpRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_success() {
            return write!(
                f,
                "Lookup failed for {}: {}",
                self.query,
                self.message.as_deref().unwrap_or("unknown error")
            );
        }
        writeln!(f, "IP Information for {}", self.query)?;
        let rows = info_rows(self);
        let width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
        for (label, value) in rows {
            writeln!(f, "  {:<width$}  {}", label, value, width = width)?;
        }
        Ok(())
    }
}
