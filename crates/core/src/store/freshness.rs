//! The single comparison behind both expiry directions.
//!
//! A grid fetch can make a zone's history stale, and a history fetch can
//! make the grid stale. Both ask the same question of two timestamps, so
//! both go through `is_newer`.

use chrono::{DateTime, Utc};

/// True if `candidate` is strictly later than `reference`.
///
/// A missing candidate is never newer. A missing reference is older than
/// any present candidate.
pub fn is_newer(candidate: Option<DateTime<Utc>>, reference: Option<DateTime<Utc>>) -> bool {
    match (candidate, reference) {
        (Some(c), Some(r)) => c > r,
        (Some(_), None) => true,
        (None, _) => false,
    }
}

/// Expiry of a zone slice given whether a history fetch has succeeded
/// for it and the newest grid and detail datetimes.
///
/// A slice stays expired until its first history arrives. An empty
/// history is a valid answer and stays fresh whatever the grid reports.
pub fn slice_is_expired(
    history_loaded: bool,
    latest_grid: Option<DateTime<Utc>>,
    latest_detail: Option<DateTime<Utc>>,
) -> bool {
    !history_loaded || (latest_detail.is_some() && is_newer(latest_grid, latest_detail))
}

/// Whether a freshly loaded history shows the grid for the same
/// aggregate to be behind. Unknown grid datetimes never count as stale.
pub fn grid_is_stale(
    latest_grid: Option<DateTime<Utc>>,
    latest_detail: Option<DateTime<Utc>>,
) -> bool {
    latest_grid.is_some() && is_newer(latest_detail, latest_grid)
}
