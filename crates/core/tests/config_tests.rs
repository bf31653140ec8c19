// ═══════════════════════════════════════════════════════════════════
// Config Tests — zone/exchange/topology tables, initial state, settings
// ═══════════════════════════════════════════════════════════════════

mod common;

use carbon_map_core::config::build_initial_state;
use carbon_map_core::config::exchanges::ExchangeConfigTable;
use carbon_map_core::config::topology::TopologyTable;
use carbon_map_core::config::zones::ZoneConfigTable;
use carbon_map_core::errors::CoreError;
use carbon_map_core::models::aggregate::{ElectricityMixMode, TimeAggregate};
use carbon_map_core::models::settings::{Settings, DEFAULT_API_BASE_URL};
use common::*;

// ═══════════════════════════════════════════════════════════════════
//  Zone table
// ═══════════════════════════════════════════════════════════════════

mod zone_table {
    use super::*;

    #[test]
    fn parses_full_entry() {
        let table = ZoneConfigTable::from_json(ZONES_JSON).unwrap();
        assert_eq!(table.len(), 3);

        let dk2 = table.get("DK-DK2").unwrap();
        assert_eq!(dk2.zone_id, "DK-DK2");
        assert_eq!(dk2.capacity.get("wind"), Some(&1800.0));
        assert_eq!(dk2.capacity.get("solar"), Some(&600.0));
        assert_eq!(dk2.contributors, vec!["corradio", "systemcatch"]);
        assert_eq!(dk2.timezone.as_deref(), Some("Europe/Copenhagen"));
        assert!(dk2.has_parser);
        assert_eq!(dk2.delays.as_ref().unwrap().production, Some(3));
        assert_eq!(dk2.delays.as_ref().unwrap().consumption, None);
        assert!(dk2.disclaimer.is_some());
    }

    #[test]
    fn null_capacities_are_dropped() {
        let table = ZoneConfigTable::from_json(ZONES_JSON).unwrap();
        assert!(!table.get("DK-DK2").unwrap().capacity.contains_key("nuclear"));
    }

    #[test]
    fn estimation_method_counts_as_parser() {
        let table = ZoneConfigTable::from_json(ZONES_JSON).unwrap();
        assert!(table.get("DE").unwrap().has_parser);
    }

    #[test]
    fn bare_entry_has_no_parser() {
        let table = ZoneConfigTable::from_json(r#"{"AQ": {}}"#).unwrap();
        let aq = table.get("AQ").unwrap();
        assert!(!aq.has_parser);
        assert!(aq.capacity.is_empty());
        assert!(aq.contributors.is_empty());
        assert_eq!(aq.delays, None);
    }

    #[test]
    fn empty_zone_code_is_rejected() {
        let err = ZoneConfigTable::from_json(r#"{"": {}}"#).unwrap_err();
        assert!(matches!(err, CoreError::InvalidConfig(_)));
    }

    #[test]
    fn malformed_json_is_a_deserialization_error() {
        let err = ZoneConfigTable::from_json("{not json").unwrap_err();
        assert!(matches!(err, CoreError::Deserialization(_)));
    }

    #[test]
    fn iterates_in_zone_code_order() {
        let table = ZoneConfigTable::from_json(ZONES_JSON).unwrap();
        let ids: Vec<&String> = table.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec!["DE", "DK-DK1", "DK-DK2"]);
        assert!(table.get("DE").is_some());
        assert!(table.get("FR").is_none());
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Exchange table
// ═══════════════════════════════════════════════════════════════════

mod exchange_table {
    use super::*;

    #[test]
    fn parses_entries() {
        let table = ExchangeConfigTable::from_json(EXCHANGES_JSON).unwrap();
        assert_eq!(table.len(), 2);

        let edge = table.get("DE->DK-DK1").unwrap();
        assert_eq!(edge.key, "DE->DK-DK1");
        assert_eq!(edge.lonlat, Some([9.3, 54.8]));
        assert_eq!(edge.rotation, -5.0);
        assert_eq!(edge.parser.as_deref(), Some("ENTSOE.fetch_exchange"));
        assert!(edge.connects("DE"));
        assert!(edge.connects("DK-DK1"));
        assert!(!edge.connects("DK-DK2"));
    }

    #[test]
    fn unsorted_key_is_accepted_with_sorted_codes() {
        let table = ExchangeConfigTable::from_json(r#"{"SE-SE4->DK-DK2": {}}"#).unwrap();
        let edge = table.get("SE-SE4->DK-DK2").unwrap();
        assert_eq!(
            edge.sorted_country_codes,
            ["DK-DK2".to_string(), "SE-SE4".to_string()]
        );
        assert_eq!(edge.rotation, 0.0);
        assert_eq!(edge.lonlat, None);
    }

    #[test]
    fn key_without_separator_is_rejected() {
        let err = ExchangeConfigTable::from_json(r#"{"DE-DK": {}}"#).unwrap_err();
        assert!(matches!(err, CoreError::InvalidConfig(_)));
    }

    #[test]
    fn key_with_three_codes_is_rejected() {
        let err = ExchangeConfigTable::from_json(r#"{"DE->DK->SE": {}}"#).unwrap_err();
        assert!(matches!(err, CoreError::InvalidConfig(_)));
    }

    #[test]
    fn key_with_empty_side_is_rejected() {
        let err = ExchangeConfigTable::from_json(r#"{"->DK-DK1": {}}"#).unwrap_err();
        assert!(matches!(err, CoreError::InvalidConfig(_)));
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Topology
// ═══════════════════════════════════════════════════════════════════

mod topology {
    use super::*;

    #[test]
    fn explicit_center_is_kept() {
        let table = TopologyTable::from_json(TOPOLOGY_JSON).unwrap();
        assert_eq!(table.get("DK-DK1").unwrap().center, [9.2, 56.1]);
    }

    #[test]
    fn missing_center_is_computed() {
        let table = TopologyTable::from_json(TOPOLOGY_JSON).unwrap();
        let center = table.get("DK-DK2").unwrap().center;
        assert!((center[0] - 12.0).abs() < 1e-9);
        assert!((center[1] - 55.5).abs() < 1e-9);
    }

    #[test]
    fn polygons_are_kept() {
        let table = TopologyTable::from_json(TOPOLOGY_JSON).unwrap();
        let polygons = &table.get("DE").unwrap().polygons;
        assert_eq!(polygons.len(), 1);
        assert_eq!(polygons[0][0].len(), 5);
    }

    #[test]
    fn zone_without_geometry_is_rejected() {
        let err = TopologyTable::from_json(r#"{"XX": {"coordinates": []}}"#).unwrap_err();
        assert!(matches!(err, CoreError::InvalidConfig(_)));
    }

    #[test]
    fn empty_geometry_with_center_is_accepted() {
        let table =
            TopologyTable::from_json(r#"{"XX": {"coordinates": [], "center": [1.0, 2.0]}}"#)
                .unwrap();
        assert_eq!(table.get("XX").unwrap().center, [1.0, 2.0]);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Initial state
// ═══════════════════════════════════════════════════════════════════

mod initial_state_builder {
    use super::*;

    #[test]
    fn one_record_per_zone_with_geometry() {
        let state = initial_state();
        let mut ids = state.zone_ids();
        ids.sort_unstable();
        assert_eq!(ids, vec!["DE", "DK-DK1", "DK-DK2"]);
        assert_eq!(state.exchanges.len(), 2);
    }

    #[test]
    fn records_carry_config_and_geography() {
        let state = initial_state();
        let dk2 = state.zone("DK-DK2").unwrap();
        assert_eq!(dk2.zone_id(), "DK-DK2");
        assert!(dk2.config.has_parser);
        assert!((dk2.geography.center[0] - 12.0).abs() < 1e-9);
    }

    #[test]
    fn geometry_without_config_gets_unconfigured_zone() {
        let zones = ZoneConfigTable::from_json(r#"{"DE": {}}"#).unwrap();
        let exchanges = ExchangeConfigTable::from_json("{}").unwrap();
        let topology = TopologyTable::from_json(TOPOLOGY_JSON).unwrap();
        let state = build_initial_state(&zones, &exchanges, &topology);

        let dk1 = state.zone("DK-DK1").unwrap();
        assert_eq!(dk1.config.zone_id, "DK-DK1");
        assert!(!dk1.config.has_parser);
        assert!(dk1.config.capacity.is_empty());
    }

    #[test]
    fn config_without_geometry_is_skipped() {
        let zones = ZoneConfigTable::from_json(r#"{"DE": {}, "FR": {}}"#).unwrap();
        let exchanges = ExchangeConfigTable::from_json("{}").unwrap();
        let topology = TopologyTable::from_json(
            r#"{"DE": {"coordinates": [[[[6.0, 47.0], [15.0, 47.0], [15.0, 55.0], [6.0, 47.0]]]]}}"#,
        )
        .unwrap();
        let state = build_initial_state(&zones, &exchanges, &topology);
        assert!(state.zone("FR").is_none());
        assert_eq!(state.zones.len(), 1);
    }

    #[test]
    fn building_twice_gives_equal_states() {
        assert_eq!(initial_state(), initial_state());
    }

    #[test]
    fn every_aggregate_starts_without_datetimes() {
        let state = initial_state();
        for aggregate in TimeAggregate::ALL {
            assert!(state.datetimes.get(aggregate).is_empty());
            assert_eq!(state.latest_grid_datetime(aggregate), None);
        }
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Loading from disk
// ═══════════════════════════════════════════════════════════════════

mod files {
    use super::*;
    use std::fs;

    #[test]
    fn tables_load_from_files() {
        let dir = tempfile::tempdir().unwrap();
        let zones_path = dir.path().join("zones.json");
        let exchanges_path = dir.path().join("exchanges.json");
        let topology_path = dir.path().join("world.json");
        fs::write(&zones_path, ZONES_JSON).unwrap();
        fs::write(&exchanges_path, EXCHANGES_JSON).unwrap();
        fs::write(&topology_path, TOPOLOGY_JSON).unwrap();

        let zones = ZoneConfigTable::from_file(zones_path.to_str().unwrap()).unwrap();
        let exchanges = ExchangeConfigTable::from_file(exchanges_path.to_str().unwrap()).unwrap();
        let topology = TopologyTable::from_file(topology_path.to_str().unwrap()).unwrap();

        assert_eq!(build_initial_state(&zones, &exchanges, &topology), initial_state());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.json");
        let err = ZoneConfigTable::from_file(path.to_str().unwrap()).unwrap_err();
        assert!(matches!(err, CoreError::FileIO(_)));
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Settings
// ═══════════════════════════════════════════════════════════════════

mod settings {
    use super::*;

    #[test]
    fn defaults() {
        let settings = Settings::default();
        assert_eq!(settings.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(settings.api_token, None);
        assert_eq!(settings.grid_poll_interval().as_secs(), 300);
        assert_eq!(settings.electricity_mix_mode, ElectricityMixMode::Consumption);
    }

    #[test]
    fn empty_object_takes_defaults() {
        assert_eq!(Settings::from_json("{}").unwrap(), Settings::default());
    }

    #[test]
    fn parses_overrides() {
        let settings = Settings::from_json(
            r#"{
                "api_base_url": "http://localhost:8001/",
                "api_token": "secret",
                "grid_poll_interval_secs": 60,
                "electricity_mix_mode": "production"
            }"#,
        )
        .unwrap();
        assert_eq!(settings.api_base_url, "http://localhost:8001");
        assert_eq!(settings.api_token.as_deref(), Some("secret"));
        assert_eq!(settings.grid_poll_interval_secs, 60);
        assert_eq!(settings.electricity_mix_mode, ElectricityMixMode::Production);
    }

    #[test]
    fn zero_interval_is_rejected() {
        let err = Settings::from_json(r#"{"grid_poll_interval_secs": 0}"#).unwrap_err();
        assert!(matches!(err, CoreError::InvalidConfig(_)));
    }

    #[test]
    fn empty_base_url_is_rejected() {
        let err = Settings::from_json(r#"{"api_base_url": "/"}"#).unwrap_err();
        assert!(matches!(err, CoreError::InvalidConfig(_)));
    }
}
