use serde::Deserialize;
use std::collections::BTreeMap;

use crate::errors::CoreError;
use crate::models::zone::{ZoneConfig, ZoneDelays};

// ── Zone table file format ──────────────────────────────────────────

#[derive(Deserialize, Default)]
struct RawParsers {
    #[serde(default)]
    production: Option<String>,
}

#[derive(Deserialize)]
struct RawZoneEntry {
    #[serde(default)]
    capacity: BTreeMap<String, Option<f64>>,
    #[serde(default)]
    contributors: Vec<String>,
    #[serde(default)]
    timezone: Option<String>,
    #[serde(default)]
    parsers: RawParsers,
    #[serde(default)]
    estimation_method: Option<String>,
    #[serde(default)]
    delays: Option<ZoneDelays>,
    #[serde(default)]
    disclaimer: Option<String>,
}

impl RawZoneEntry {
    fn into_config(self, zone_id: String) -> ZoneConfig {
        let has_parser = self.parsers.production.is_some() || self.estimation_method.is_some();
        ZoneConfig {
            zone_id,
            // Unknown capacities are listed as null; they carry no information.
            capacity: self
                .capacity
                .into_iter()
                .filter_map(|(mode, mw)| mw.map(|mw| (mode, mw)))
                .collect(),
            contributors: self.contributors,
            timezone: self.timezone,
            has_parser,
            delays: self.delays,
            disclaimer: self.disclaimer,
        }
    }
}

/// Static per-zone metadata, keyed by zone code.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ZoneConfigTable {
    zones: BTreeMap<String, ZoneConfig>,
}

impl ZoneConfigTable {
    /// Parse the zone table (`{"DK-DK2": {...}, ...}`).
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let raw: BTreeMap<String, RawZoneEntry> = serde_json::from_str(json)?;
        let mut zones = BTreeMap::new();
        for (zone_id, entry) in raw {
            if zone_id.trim().is_empty() {
                return Err(CoreError::InvalidConfig("zone table contains an empty zone code".into()));
            }
            zones.insert(zone_id.clone(), entry.into_config(zone_id));
        }
        tracing::debug!(count = zones.len(), "loaded zone table");
        Ok(Self { zones })
    }

    /// Read and parse a zone table file (native only, not WASM).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_file(path: &str) -> Result<Self, CoreError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn get(&self, zone_id: &str) -> Option<&ZoneConfig> {
        self.zones.get(zone_id)
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    /// Iterate configs in zone-code order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &ZoneConfig)> {
        self.zones.iter()
    }
}
