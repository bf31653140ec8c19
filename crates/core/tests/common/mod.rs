// Shared fixtures for the integration tests. Not every test file uses
// every helper.
#![allow(dead_code)]

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

use carbon_map_core::config::build_initial_state;
use carbon_map_core::config::exchanges::ExchangeConfigTable;
use carbon_map_core::config::topology::TopologyTable;
use carbon_map_core::config::zones::ZoneConfigTable;
use carbon_map_core::models::aggregate::TimeAggregate;
use carbon_map_core::models::exchange::ExchangeRecord;
use carbon_map_core::models::payload::{DetailRecord, GridPayload, ZoneHistoryPayload};
use carbon_map_core::models::state::DataState;
use carbon_map_core::models::zone::{CarbonMetrics, OverviewRecord, PowerBreakdown, Price};

pub const ZONES_JSON: &str = r#"{
    "DK-DK2": {
        "capacity": { "wind": 1800, "solar": 600, "nuclear": null },
        "contributors": ["corradio", "systemcatch"],
        "timezone": "Europe/Copenhagen",
        "parsers": { "production": "DK.fetch_production" },
        "delays": { "production": 3 },
        "disclaimer": "Production data is estimated for the last hour."
    },
    "DK-DK1": {
        "timezone": "Europe/Copenhagen",
        "parsers": { "production": "DK.fetch_production" }
    },
    "DE": {
        "timezone": "Europe/Berlin",
        "estimation_method": "ENTSOE_FORECAST"
    }
}"#;

pub const EXCHANGES_JSON: &str = r#"{
    "DE->DK-DK1": {
        "lonlat": [9.3, 54.8],
        "rotation": -5,
        "parsers": { "exchange": "ENTSOE.fetch_exchange" }
    },
    "DK-DK1->DK-DK2": {
        "lonlat": [10.9, 55.3],
        "rotation": 90,
        "parsers": { "exchange": "DK.fetch_exchange" }
    }
}"#;

pub const TOPOLOGY_JSON: &str = r#"{
    "DK-DK2": {
        "coordinates": [[[[11.0, 55.0], [13.0, 55.0], [13.0, 56.0], [11.0, 56.0], [11.0, 55.0]]]]
    },
    "DK-DK1": {
        "coordinates": [[[[8.0, 55.0], [10.0, 55.0], [10.0, 57.0], [8.0, 57.0], [8.0, 55.0]]]],
        "center": [9.2, 56.1]
    },
    "DE": {
        "coordinates": [[[[6.0, 47.0], [15.0, 47.0], [15.0, 55.0], [6.0, 55.0], [6.0, 47.0]]]]
    }
}"#;

pub fn dt(raw: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(raw).unwrap().with_timezone(&Utc)
}

pub fn initial_state() -> DataState {
    let zones = ZoneConfigTable::from_json(ZONES_JSON).unwrap();
    let exchanges = ExchangeConfigTable::from_json(EXCHANGES_JSON).unwrap();
    let topology = TopologyTable::from_json(TOPOLOGY_JSON).unwrap();
    build_initial_state(&zones, &exchanges, &topology)
}

pub fn overview(co2intensity: f64) -> OverviewRecord {
    OverviewRecord {
        state_datetime: None,
        metrics: CarbonMetrics {
            co2intensity: Some(co2intensity),
            co2intensity_production: Some(co2intensity - 10.0),
            fossil_fuel_ratio: Some(0.4),
            renewable_ratio: Some(0.6),
            ..Default::default()
        },
    }
}

pub fn detail(state_datetime: &str, co2intensity: f64) -> DetailRecord {
    let mut production = BTreeMap::new();
    production.insert("wind".to_string(), Some(800.0));
    production.insert("solar".to_string(), Some(150.0));
    production.insert("coal".to_string(), None);
    let mut storage = BTreeMap::new();
    storage.insert("battery".to_string(), Some(-20.0));
    let mut exchange = BTreeMap::new();
    exchange.insert("DK-DK1".to_string(), Some(-120.0));
    exchange.insert("SE-SE4".to_string(), Some(300.0));

    DetailRecord {
        state_datetime: state_datetime.to_string(),
        source: Some(r#"energinet.dk,\"entsoe.eu\",energinet.dk"#.to_string()),
        metrics: CarbonMetrics {
            co2intensity: Some(co2intensity),
            co2intensity_production: Some(co2intensity + 5.0),
            ..Default::default()
        },
        breakdown: PowerBreakdown {
            production,
            storage,
            exchange,
            price: Some(Price {
                value: Some(120.5),
                currency: Some("EUR".to_string()),
            }),
            total_production: Some(950.0),
            ..Default::default()
        },
    }
}

/// Grid payload covering every fixture zone and exchange.
pub fn grid_payload(aggregate: TimeAggregate, datetimes: &[&str]) -> GridPayload {
    let mut countries = BTreeMap::new();
    for zone_id in ["DK-DK2", "DK-DK1", "DE"] {
        let overviews = (0..datetimes.len())
            .map(|i| overview(100.0 + i as f64))
            .collect();
        countries.insert(zone_id.to_string(), overviews);
    }
    let mut exchanges = BTreeMap::new();
    for key in ["DE->DK-DK1", "DK-DK1->DK-DK2"] {
        let flows = (0..datetimes.len())
            .map(|i| ExchangeRecord {
                net_flow: Some(250.0 + i as f64),
                co2intensity: Some(300.0),
            })
            .collect();
        exchanges.insert(key.to_string(), flows);
    }
    GridPayload {
        countries,
        datetimes: datetimes.iter().map(|s| s.to_string()).collect(),
        exchanges,
        state_aggregation: aggregate,
    }
}

pub fn history_payload(
    zone_id: &str,
    aggregate: TimeAggregate,
    datetimes: &[&str],
) -> ZoneHistoryPayload {
    ZoneHistoryPayload {
        state_aggregation: aggregate,
        zone_id: zone_id.to_string(),
        zone_states: datetimes
            .iter()
            .enumerate()
            .map(|(i, ts)| detail(ts, 200.0 + i as f64))
            .collect(),
        has_data: true,
    }
}
