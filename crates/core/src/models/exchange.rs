use serde::{Deserialize, Serialize};

use super::zone::LonLat;

/// Separator between the two zone codes of an exchange key.
pub const EXCHANGE_KEY_SEPARATOR: &str = "->";

/// Immutable metadata of an exchange edge, built once from the exchange table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeConfig {
    /// Canonical key, e.g. "DE->DK-DK1".
    pub key: String,

    /// Anchor of the flow arrow on the map.
    pub lonlat: Option<LonLat>,

    /// Arrow rotation in degrees.
    pub rotation: f64,

    /// Name of the parser feeding this edge, if any.
    pub parser: Option<String>,

    /// Both zone codes of `key`, sorted. Derived once at construction.
    pub sorted_country_codes: [String; 2],
}

impl ExchangeConfig {
    pub fn new(
        key: impl Into<String>,
        lonlat: Option<LonLat>,
        rotation: f64,
        parser: Option<String>,
    ) -> Option<Self> {
        let key = key.into();
        let sorted_country_codes = sorted_country_codes(&key)?;
        Some(Self {
            key,
            lonlat,
            rotation,
            parser,
            sorted_country_codes,
        })
    }

    /// True if `zone_id` is one of the two ends of this edge.
    pub fn connects(&self, zone_id: &str) -> bool {
        self.sorted_country_codes.iter().any(|c| c == zone_id)
    }
}

/// Split an `"A->B"` key into its two zone codes, sorted.
///
/// Returns `None` when the key does not contain exactly two non-empty codes.
pub fn sorted_country_codes(key: &str) -> Option<[String; 2]> {
    let mut parts = key.split(EXCHANGE_KEY_SEPARATOR);
    let a = parts.next()?.trim();
    let b = parts.next()?.trim();
    if a.is_empty() || b.is_empty() || parts.next().is_some() {
        return None;
    }
    let (first, second) = if a <= b { (a, b) } else { (b, a) };
    Some([first.to_string(), second.to_string()])
}

/// Flow across an exchange edge at one timestamp.
///
/// `net_flow` is positive in the direction of the key (first → second).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeRecord {
    #[serde(default)]
    pub net_flow: Option<f64>,
    #[serde(default)]
    pub co2intensity: Option<f64>,
}

/// Static config plus the latest hourly series of one exchange edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeEdgeRecord {
    pub config: ExchangeConfig,

    /// Only written by hourly grid fetches.
    pub data: Vec<ExchangeRecord>,
}

impl ExchangeEdgeRecord {
    pub fn new(config: ExchangeConfig) -> Self {
        Self {
            config,
            data: Vec::new(),
        }
    }
}
