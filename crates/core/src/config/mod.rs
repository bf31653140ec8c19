pub mod exchanges;
pub mod topology;
pub mod zones;

use std::collections::HashMap;

use crate::models::exchange::ExchangeEdgeRecord;
use crate::models::state::DataState;
use crate::models::zone::{ZoneConfig, ZoneRecord};

use exchanges::ExchangeConfigTable;
use topology::TopologyTable;
use zones::ZoneConfigTable;

/// Build the store skeleton from static configuration.
///
/// Every zone with geometry gets a record. Zones with geometry but no
/// config entry get an unconfigured config; zones with a config entry but
/// no geometry can't be drawn and are left out. Both cases are logged.
pub fn build_initial_state(
    zone_table: &ZoneConfigTable,
    exchange_table: &ExchangeConfigTable,
    topology: &TopologyTable,
) -> DataState {
    let mut zones = HashMap::with_capacity(topology.len());
    for (zone_id, geography) in topology.iter() {
        let config = match zone_table.get(zone_id) {
            Some(config) => config.clone(),
            None => {
                tracing::warn!(%zone_id, "zone has geometry but no configuration");
                ZoneConfig::unconfigured(zone_id.clone())
            }
        };
        zones.insert(zone_id.clone(), ZoneRecord::new(config, geography.clone()));
    }

    for (zone_id, _) in zone_table.iter() {
        if topology.get(zone_id).is_none() {
            tracing::warn!(%zone_id, "zone is configured but has no geometry, skipping");
        }
    }

    let exchanges: HashMap<String, ExchangeEdgeRecord> = exchange_table
        .iter()
        .map(|(key, config)| (key.clone(), ExchangeEdgeRecord::new(config.clone())))
        .collect();

    tracing::info!(
        zones = zones.len(),
        exchanges = exchanges.len(),
        "built initial data state"
    );
    DataState::new(zones, exchanges)
}
