use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::zone::{CarbonMetrics, LonLat, PowerBreakdown};

/// One timestamp of a zone's combined history: overview merged with the
/// matching detail record, plus zone-level flags.
///
/// The core generates these; the frontend just renders them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneDataPoint {
    /// Detail datetime when present, otherwise the overview's.
    pub datetime: Option<DateTime<Utc>>,

    pub metrics: CarbonMetrics,

    /// Empty when no detail record covers this index.
    pub breakdown: PowerBreakdown,

    pub source: Option<String>,

    pub has_parser: bool,

    pub center: LonLat,

    /// Only set on the "no data" placeholder point.
    pub has_data: Option<bool>,
}

impl ZoneDataPoint {
    /// True for the single point returned when a zone has no overviews.
    pub fn is_placeholder(&self) -> bool {
        self.has_data.is_some()
    }
}

/// A single value of a line chart (carbon intensity, price).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub datetime: DateTime<Utc>,
    pub value: Option<f64>,
}

/// One stacked sample of an area layer: the band spans `y0..y1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackedPoint {
    pub datetime: DateTime<Utc>,
    pub y0: f64,
    pub y1: f64,
    /// Raw value before stacking; `None` when the source had no data.
    pub value: Option<f64>,
}

/// A named band of a stacked area chart (one production mode or one
/// exchange partner).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaLayer {
    pub key: String,
    pub points: Vec<StackedPoint>,
}
