use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::aggregate::{PerAggregate, TimeAggregate};

/// `[longitude, latitude]` in WGS84 degrees.
pub type LonLat = [f64; 2];

/// A closed ring of `[lon, lat]` vertices.
pub type Ring = Vec<LonLat>;

/// Outer ring first, then holes.
pub type Polygon = Vec<Ring>;

// ── Static configuration ────────────────────────────────────────────

/// Publication delay of a zone's data sources, in hours.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ZoneDelays {
    #[serde(default)]
    pub production: Option<u32>,
    #[serde(default)]
    pub consumption: Option<u32>,
}

/// Immutable metadata of a zone, built once from the zone table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ZoneConfig {
    /// The zone's own code, e.g. "DK-DK2".
    pub zone_id: String,

    /// Installed capacity per production mode, in MW.
    pub capacity: BTreeMap<String, f64>,

    /// Contributor handles credited for this zone's parser.
    pub contributors: Vec<String>,

    /// IANA timezone name, e.g. "Europe/Copenhagen".
    pub timezone: Option<String>,

    /// True if live data exists for this zone (a production parser or an
    /// estimation method is configured).
    pub has_parser: bool,

    pub delays: Option<ZoneDelays>,

    pub disclaimer: Option<String>,
}

impl ZoneConfig {
    /// Config for a zone that has geometry but no entry in the zone table.
    pub fn unconfigured(zone_id: impl Into<String>) -> Self {
        Self {
            zone_id: zone_id.into(),
            ..Self::default()
        }
    }
}

/// Immutable geometry of a zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneGeography {
    /// MultiPolygon boundary.
    pub polygons: Vec<Polygon>,

    /// Label anchor / map centroid.
    pub center: LonLat,
}

// ── Series records ──────────────────────────────────────────────────

/// Carbon figures shared by overview and detail records.
///
/// Every field is optional: zones without live data report nulls.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarbonMetrics {
    #[serde(default)]
    pub co2intensity: Option<f64>,
    #[serde(default)]
    pub co2intensity_production: Option<f64>,
    #[serde(default)]
    pub fossil_fuel_ratio: Option<f64>,
    #[serde(default)]
    pub fossil_fuel_ratio_production: Option<f64>,
    #[serde(default)]
    pub renewable_ratio: Option<f64>,
    #[serde(default)]
    pub renewable_ratio_production: Option<f64>,
}

impl CarbonMetrics {
    /// Field-wise merge where `top` wins whenever it has a value.
    pub fn overlay(&self, top: &CarbonMetrics) -> CarbonMetrics {
        CarbonMetrics {
            co2intensity: top.co2intensity.or(self.co2intensity),
            co2intensity_production: top.co2intensity_production.or(self.co2intensity_production),
            fossil_fuel_ratio: top.fossil_fuel_ratio.or(self.fossil_fuel_ratio),
            fossil_fuel_ratio_production: top
                .fossil_fuel_ratio_production
                .or(self.fossil_fuel_ratio_production),
            renewable_ratio: top.renewable_ratio.or(self.renewable_ratio),
            renewable_ratio_production: top
                .renewable_ratio_production
                .or(self.renewable_ratio_production),
        }
    }
}

/// Day-ahead price for one timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Price {
    pub value: Option<f64>,
    pub currency: Option<String>,
}

/// Production / storage / exchange breakdown of one detail record.
///
/// Values are in MW. Storage is positive when charging. Exchange is
/// positive when importing from the keyed partner zone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PowerBreakdown {
    #[serde(default)]
    pub production: BTreeMap<String, Option<f64>>,
    #[serde(default)]
    pub storage: BTreeMap<String, Option<f64>>,
    #[serde(default)]
    pub exchange: BTreeMap<String, Option<f64>>,
    #[serde(default)]
    pub capacity: BTreeMap<String, Option<f64>>,
    #[serde(default)]
    pub price: Option<Price>,
    #[serde(default)]
    pub total_production: Option<f64>,
    #[serde(default)]
    pub total_consumption: Option<f64>,
    #[serde(default)]
    pub total_import: Option<f64>,
    #[serde(default)]
    pub total_export: Option<f64>,
    #[serde(default)]
    pub estimation_method: Option<String>,
}

impl PowerBreakdown {
    /// True if any production mode carries a value.
    pub fn has_production(&self) -> bool {
        self.production.values().any(Option::is_some)
    }
}

/// Lightweight per-timestamp summary delivered by the grid fetch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewRecord {
    /// Filled from the grid's datetime sequence when the payload omits it.
    #[serde(default)]
    pub state_datetime: Option<DateTime<Utc>>,

    #[serde(flatten)]
    pub metrics: CarbonMetrics,
}

/// Rich per-timestamp record delivered by the zone-history fetch, after
/// datetime parsing and source dedup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneDetail {
    pub datetime: DateTime<Utc>,

    /// Deduplicated, comma-separated data sources.
    pub source: Option<String>,

    pub metrics: CarbonMetrics,

    pub breakdown: PowerBreakdown,
}

// ── Mutable per-aggregate state ─────────────────────────────────────

/// Series and freshness of one (zone, aggregate) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateSlice {
    /// Aligned by index with the aggregate's grid datetimes.
    pub overviews: Vec<OverviewRecord>,

    /// Chronological; may be shorter or longer than `overviews`.
    pub details: Vec<ZoneDetail>,

    /// True until a history fetch succeeds, and again whenever the grid
    /// reports a datetime newer than the newest detail. An empty history
    /// stays fresh.
    pub is_expired: bool,

    pub has_data: bool,

    /// Set by the first successful history fetch and never cleared.
    pub history_loaded: bool,
}

impl Default for AggregateSlice {
    fn default() -> Self {
        Self {
            overviews: Vec::new(),
            details: Vec::new(),
            is_expired: true,
            has_data: false,
            history_loaded: false,
        }
    }
}

impl AggregateSlice {
    /// Newest detail datetime, if any details are loaded.
    pub fn latest_detail_datetime(&self) -> Option<DateTime<Utc>> {
        self.details.iter().map(|d| d.datetime).max()
    }
}

/// Everything the store knows about one zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneRecord {
    pub geography: ZoneGeography,
    pub config: ZoneConfig,
    pub aggregates: PerAggregate<AggregateSlice>,
}

impl ZoneRecord {
    pub fn new(config: ZoneConfig, geography: ZoneGeography) -> Self {
        Self {
            geography,
            config,
            aggregates: PerAggregate::default(),
        }
    }

    pub fn slice(&self, aggregate: TimeAggregate) -> &AggregateSlice {
        self.aggregates.get(aggregate)
    }

    pub fn zone_id(&self) -> &str {
        &self.config.zone_id
    }
}
