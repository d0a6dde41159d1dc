//! Millisecond-resolution local timestamps.

use chrono::{DateTime, Local};

/// strftime layout for the line prefix, e.g. `2024-03-01 14:02:11.437`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

#[must_use]
pub fn format_timestamp(ts: &DateTime<Local>) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}
