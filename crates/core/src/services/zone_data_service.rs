use chrono::{DateTime, Utc};
use std::collections::BTreeSet;

use crate::models::aggregate::{ElectricityMixMode, TimeAggregate};
use crate::models::chart::ZoneDataPoint;
use crate::models::state::DataState;
use crate::models::zone::{PowerBreakdown, ZoneRecord};

/// Merge a zone's overview and detail series for one aggregate.
///
/// Returns one point per overview: overview metrics, overlaid by the
/// detail at the same index when there is one, plus the zone's
/// `has_parser` and `center`. A zone with no overviews yields a single
/// placeholder point carrying only `has_data`, `has_parser` and `center`.
pub fn combine_zone_data(zone: &ZoneRecord, aggregate: TimeAggregate) -> Vec<ZoneDataPoint> {
    let slice = zone.slice(aggregate);
    let has_parser = zone.config.has_parser;
    let center = zone.geography.center;

    if slice.overviews.is_empty() {
        return vec![ZoneDataPoint {
            datetime: None,
            metrics: Default::default(),
            breakdown: PowerBreakdown::default(),
            source: None,
            has_parser,
            center,
            has_data: Some(slice.has_data),
        }];
    }

    slice
        .overviews
        .iter()
        .enumerate()
        .map(|(i, overview)| match slice.details.get(i) {
            Some(detail) => ZoneDataPoint {
                datetime: Some(detail.datetime),
                metrics: overview.metrics.overlay(&detail.metrics),
                breakdown: detail.breakdown.clone(),
                source: detail.source.clone(),
                has_parser,
                center,
                has_data: None,
            },
            None => ZoneDataPoint {
                datetime: overview.state_datetime,
                metrics: overview.metrics.clone(),
                breakdown: PowerBreakdown::default(),
                source: None,
                has_parser,
                center,
                has_data: None,
            },
        })
        .collect()
}

/// The point shown for a zone at the selected time.
///
/// With no selection, or when the series has a single point, the newest
/// point is returned ("live"). Returns `None` for an empty or unknown
/// zone id and for an index past the end of the series.
pub fn select_current_zone_data(
    state: &DataState,
    zone_id: &str,
    aggregate: TimeAggregate,
    selected_time_index: Option<usize>,
) -> Option<ZoneDataPoint> {
    if zone_id.is_empty() {
        return None;
    }
    let zone = state.zone(zone_id)?;
    let mut history = combine_zone_data(zone, aggregate);
    match selected_time_index {
        Some(index) if history.len() > 1 => {
            if index < history.len() {
                Some(history.swap_remove(index))
            } else {
                None
            }
        }
        _ => history.pop(),
    }
}

/// Every exchange partner seen anywhere in a zone's combined history,
/// sorted. Empty unless `mix_mode` is consumption, since production mode
/// doesn't show imports or exports.
pub fn select_exchange_keys_for_zone(
    state: &DataState,
    zone_id: &str,
    aggregate: TimeAggregate,
    mix_mode: ElectricityMixMode,
) -> Vec<String> {
    if mix_mode != ElectricityMixMode::Consumption {
        return Vec::new();
    }
    let Some(zone) = state.zone(zone_id) else {
        return Vec::new();
    };
    let keys: BTreeSet<String> = combine_zone_data(zone, aggregate)
        .into_iter()
        .flat_map(|point| point.breakdown.exchange.into_keys())
        .collect();
    keys.into_iter().collect()
}

/// Datetime the map is showing: the selected grid datetime, or the
/// newest one when nothing is selected.
pub fn select_current_datetime(
    state: &DataState,
    aggregate: TimeAggregate,
    selected_time_index: Option<usize>,
) -> Option<DateTime<Utc>> {
    let datetimes = state.datetimes.get(aggregate);
    match selected_time_index {
        Some(index) => datetimes.get(index).copied(),
        None => datetimes.last().copied(),
    }
}
