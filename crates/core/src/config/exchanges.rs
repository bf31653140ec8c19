use serde::Deserialize;
use std::collections::BTreeMap;

use crate::errors::CoreError;
use crate::models::exchange::{ExchangeConfig, EXCHANGE_KEY_SEPARATOR};
use crate::models::zone::LonLat;

#[derive(Deserialize, Default)]
struct RawExchangeParsers {
    #[serde(default)]
    exchange: Option<String>,
}

#[derive(Deserialize)]
struct RawExchangeEntry {
    #[serde(default)]
    lonlat: Option<LonLat>,
    #[serde(default)]
    rotation: f64,
    #[serde(default)]
    parsers: RawExchangeParsers,
}

/// Static exchange-edge metadata, keyed by `"A->B"`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExchangeConfigTable {
    exchanges: BTreeMap<String, ExchangeConfig>,
}

impl ExchangeConfigTable {
    /// Parse the exchange table (`{"DE->DK-DK1": {...}, ...}`).
    ///
    /// Keys are expected to be alphabetically sorted ("DE->DK-DK1", not
    /// "DK-DK1->DE"). An unsorted key is accepted with a warning; a key
    /// that isn't two zone codes is rejected.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let raw: BTreeMap<String, RawExchangeEntry> = serde_json::from_str(json)?;
        let mut exchanges = BTreeMap::new();
        for (key, entry) in raw {
            let config = ExchangeConfig::new(
                key.clone(),
                entry.lonlat,
                entry.rotation,
                entry.parsers.exchange,
            )
            .ok_or_else(|| {
                CoreError::InvalidConfig(format!(
                    "exchange key '{key}' must be two zone codes joined by '{EXCHANGE_KEY_SEPARATOR}'"
                ))
            })?;
            let canonical = config.sorted_country_codes.join(EXCHANGE_KEY_SEPARATOR);
            if canonical != key {
                tracing::warn!(exchange = %key, expected = %canonical, "exchange key is not sorted alphabetically");
            }
            exchanges.insert(key, config);
        }
        tracing::debug!(count = exchanges.len(), "loaded exchange table");
        Ok(Self { exchanges })
    }

    /// Read and parse an exchange table file (native only, not WASM).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_file(path: &str) -> Result<Self, CoreError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn get(&self, key: &str) -> Option<&ExchangeConfig> {
        self.exchanges.get(key)
    }

    pub fn len(&self) -> usize {
        self.exchanges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exchanges.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ExchangeConfig)> {
        self.exchanges.iter()
    }
}
