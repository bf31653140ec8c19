pub mod freshness;
pub mod reducer;
pub mod sources;

use chrono::{DateTime, Utc};

use crate::errors::CoreError;

pub use reducer::reduce;

/// Parse an RFC 3339 / ISO-8601 timestamp into UTC.
pub fn parse_datetime(raw: &str) -> Result<DateTime<Utc>, CoreError> {
    DateTime::parse_from_rfc3339(raw.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| CoreError::InvalidDatetime(raw.to_string()))
}
