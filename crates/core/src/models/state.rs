use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::aggregate::{PerAggregate, TimeAggregate};
use super::exchange::ExchangeEdgeRecord;
use super::payload::WeatherForecast;
use super::zone::{AggregateSlice, ZoneRecord};

/// Which kind of request failed most recently. Surfaced to the UI for a
/// retry affordance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailedRequestType {
    Grid,
    Zone,
}

impl std::fmt::Display for FailedRequestType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailedRequestType::Grid => write!(f, "grid"),
            FailedRequestType::Zone => write!(f, "zone"),
        }
    }
}

/// Weather overlay kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeatherKind {
    Solar,
    Wind,
}

impl WeatherKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            WeatherKind::Solar => "solar",
            WeatherKind::Wind => "wind",
        }
    }
}

impl std::fmt::Display for WeatherKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Loading flag and latest forecast of one weather overlay.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherState {
    pub is_loading: bool,
    pub forecast: Option<WeatherForecast>,
    pub has_error: bool,
}

/// The whole data store.
///
/// Zone and exchange configs are fixed at construction; only the series,
/// freshness and loading fields change, through `DataState::apply`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataState {
    pub zones: HashMap<String, ZoneRecord>,
    pub exchanges: HashMap<String, ExchangeEdgeRecord>,

    /// Grid datetimes per aggregate, oldest first.
    pub datetimes: PerAggregate<Vec<DateTime<Utc>>>,

    /// Per-aggregate staleness of the overview series.
    pub grid_freshness: PerAggregate<bool>,

    pub is_loading_grid: bool,
    pub is_loading_histories: bool,
    pub has_initialized_grid: bool,
    pub failed_request_type: Option<FailedRequestType>,

    pub solar: WeatherState,
    pub wind: WeatherState,
}

impl DataState {
    pub fn new(
        zones: HashMap<String, ZoneRecord>,
        exchanges: HashMap<String, ExchangeEdgeRecord>,
    ) -> Self {
        Self {
            zones,
            exchanges,
            datetimes: PerAggregate::default(),
            grid_freshness: PerAggregate::splat(true),
            is_loading_grid: false,
            is_loading_histories: false,
            has_initialized_grid: false,
            failed_request_type: None,
            solar: WeatherState::default(),
            wind: WeatherState::default(),
        }
    }

    pub fn zone(&self, zone_id: &str) -> Option<&ZoneRecord> {
        self.zones.get(zone_id)
    }

    pub fn slice(&self, zone_id: &str, aggregate: TimeAggregate) -> Option<&AggregateSlice> {
        self.zones.get(zone_id).map(|z| z.slice(aggregate))
    }

    pub fn exchange(&self, key: &str) -> Option<&ExchangeEdgeRecord> {
        self.exchanges.get(key)
    }

    /// Newest grid datetime known for `aggregate`.
    pub fn latest_grid_datetime(&self, aggregate: TimeAggregate) -> Option<DateTime<Utc>> {
        self.datetimes.get(aggregate).iter().max().copied()
    }

    pub fn weather(&self, kind: WeatherKind) -> &WeatherState {
        match kind {
            WeatherKind::Solar => &self.solar,
            WeatherKind::Wind => &self.wind,
        }
    }

    pub fn weather_mut(&mut self, kind: WeatherKind) -> &mut WeatherState {
        match kind {
            WeatherKind::Solar => &mut self.solar,
            WeatherKind::Wind => &mut self.wind,
        }
    }

    /// Sorted zone codes, for deterministic iteration.
    pub fn zone_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.zones.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}
