use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::aggregate::TimeAggregate;
use super::exchange::ExchangeRecord;
use super::zone::{CarbonMetrics, OverviewRecord, PowerBreakdown};

/// Body of a successful grid (all zones) fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridPayload {
    /// Zone code → overviews aligned with `datetimes`.
    #[serde(default)]
    pub countries: BTreeMap<String, Vec<OverviewRecord>>,

    /// ISO-8601 timestamps, oldest first.
    #[serde(default)]
    pub datetimes: Vec<String>,

    /// Exchange key → flows aligned with `datetimes`. Hourly only.
    #[serde(default)]
    pub exchanges: BTreeMap<String, Vec<ExchangeRecord>>,

    pub state_aggregation: TimeAggregate,
}

/// One raw history element as delivered by the API, before the store
/// parses its datetime and cleans its source string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailRecord {
    pub state_datetime: String,

    /// Comma-joined, possibly duplicated or escaped source list.
    #[serde(default)]
    pub source: Option<String>,

    #[serde(flatten)]
    pub metrics: CarbonMetrics,

    #[serde(flatten)]
    pub breakdown: PowerBreakdown,
}

/// Body of a successful zone-history fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneHistoryPayload {
    pub state_aggregation: TimeAggregate,
    pub zone_id: String,
    #[serde(default)]
    pub zone_states: Vec<DetailRecord>,
    #[serde(default)]
    pub has_data: bool,
}

/// Gridded weather forecast (GFS) for the solar or wind overlay.
///
/// The grid itself is consumed by the renderer; the core only stores it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherForecast {
    pub forecasts: Vec<serde_json::Value>,
}
