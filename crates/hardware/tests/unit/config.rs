//! # Configuration Tests
//!
//! Defaults, JSON deserialization, and validation.

use cdbsim_core::common::ConfigError;
use cdbsim_core::config::*;

#[test]
fn test_config_default() {
    let config = Config::default();
    assert!(!config.general.trace);
    assert_eq!(config.bus.station_count, 4);
    assert_eq!(config.bus.station_index_bits, 2);
    assert_eq!(config.bus.bus_count, 2);
    assert_eq!(config.memory.accessor_count, 2);
    assert_eq!(config.memory.word_address_bits, 30);
    assert_eq!(config.memory.arbitration, ArbitrationMode::Combinational);
    assert_eq!(config.register_file.index_bits, 2);
    assert_eq!(config.register_file.read_ports, 2);
    assert_eq!(config.register_file.write_ports, 2);
    assert_eq!(config.register_file.register_count(), 4);
    assert!(config.validate().is_ok());
}

#[test]
fn test_empty_json_uses_defaults() {
    let config = Config::from_json("{}").unwrap();
    assert_eq!(config.bus.station_count, 4);
    assert_eq!(config.memory.size_words, 1024);
}

#[test]
fn test_partial_section_keeps_other_defaults() {
    let config = Config::from_json(r#"{ "bus": { "bus_count": 1 } }"#).unwrap();
    assert_eq!(config.bus.bus_count, 1);
    assert_eq!(config.bus.station_count, 4);
}

#[test]
fn test_registered_mode_parses() {
    let config = Config::from_json(r#"{ "memory": { "arbitration": "Registered" } }"#).unwrap();
    assert_eq!(config.memory.arbitration, ArbitrationMode::Registered);
}

#[test]
fn test_unknown_mode_rejected() {
    let err = Config::from_json(r#"{ "memory": { "arbitration": "RoundRobin" } }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn test_malformed_json_rejected() {
    assert!(matches!(
        Config::from_json("{ bus: ").unwrap_err(),
        ConfigError::Parse(_)
    ));
}

#[test]
fn test_zero_buses_rejected() {
    let err = Config::from_json(r#"{ "bus": { "bus_count": 0 } }"#).unwrap_err();
    assert!(matches!(err, ConfigError::ZeroCount { name: "bus.bus_count" }));
}

#[test]
fn test_station_index_too_narrow() {
    let err = Config::from_json(r#"{ "bus": { "station_count": 5 } }"#).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::IndexTooNarrow {
            bits: 2,
            count: 5,
            ..
        }
    ));
}

#[test]
fn test_single_station_needs_no_index_bits() {
    let json = r#"{ "bus": { "station_count": 1, "station_index_bits": 0, "bus_count": 1 },
                   "register_file": { "write_ports": 1 } }"#;
    assert!(Config::from_json(json).is_ok());
}

#[test]
fn test_register_index_width_capped() {
    let err = Config::from_json(r#"{ "register_file": { "index_bits": 17 } }"#).unwrap_err();
    assert!(matches!(err, ConfigError::WidthTooLarge { max: 16, .. }));
}

#[test]
fn test_address_width_capped() {
    let err = Config::from_json(r#"{ "memory": { "word_address_bits": 33 } }"#).unwrap_err();
    assert!(matches!(err, ConfigError::WidthTooLarge { max: 32, .. }));
}

#[test]
fn test_write_ports_must_cover_buses() {
    let err = Config::from_json(r#"{ "register_file": { "write_ports": 1 } }"#).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::TooFewWritePorts {
            write_ports: 1,
            bus_count: 2
        }
    ));
}

#[test]
fn test_error_messages_name_the_field() {
    let err = Config::from_json(r#"{ "memory": { "accessor_count": 0 } }"#).unwrap_err();
    assert_eq!(err.to_string(), "memory.accessor_count must be at least 1");
}
