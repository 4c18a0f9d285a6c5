use chrono::{DateTime, FixedOffset, SecondsFormat};

use crate::{Error, Result};

/// A point in time with the offset it was written with.
pub type Timestamp = DateTime<FixedOffset>;

/// RFC 3339 rendering of the zero timestamp, used when no value is declared.
pub const ZERO_TIMESTAMP: &str = "0001-01-01T00:00:00Z";

/// Parse an RFC 3339 timestamp such as `2021-05-25T17:15:16Z`.
pub fn parse_timestamp(text: &str) -> Result<Timestamp> {
    DateTime::parse_from_rfc3339(text).map_err(|e| Error::InvalidTimestamp {
        text: text.to_string(),
        reason: e.to_string(),
    })
}

/// Format a timestamp as RFC 3339 with second precision, using `Z` for UTC.
pub fn format_timestamp(ts: &Timestamp) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}
