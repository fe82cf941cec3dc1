//! Integration tests for the driver facade over the simulated transport
//!
//! Covers the connect/discover/export flow and the scoped session cleanup
//! guarantees (closed exactly once on every exit path).

use opcdriver::{Driver, DriverConfig, DriverError, SimConnector, TransportError, Value};
use tempfile::TempDir;

use super::common::panel_fixtures::process_panel;

#[test]
fn test_discovery_order_is_preorder() {
    let connector = process_panel();
    let driver = Driver::connect(&connector, &DriverConfig::default()).unwrap();

    let set = driver.variables().unwrap();
    let names: Vec<&str> = set.iter().map(|v| v.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "Tag_Level",
            "Tag_ValveOpen",
            "Tag_BatchId",
            "Tag_ScreenNumber",
            "@DiagnosticsIndicatorTag",
            "Tag_MixerSpeed",
            "Tag_MixerRunning",
        ]
    );
}

#[test]
fn test_discovery_preserves_value_types() {
    let connector = process_panel();
    let driver = Driver::connect(&connector, &DriverConfig::default()).unwrap();

    let set = driver.variables().unwrap();
    assert_eq!(set.get("Tag_Level").unwrap().value, Value::Number(88.0));
    assert_eq!(set.get("Tag_ValveOpen").unwrap().value, Value::Bool(true));
    assert_eq!(
        set.get("Tag_BatchId").unwrap().value,
        Value::Text("batch-17".to_string())
    );
}

#[test]
fn test_export_then_load_through_facade() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("variables.json");

    let connector = process_panel();
    let driver = Driver::connect(&connector, &DriverConfig::default()).unwrap();

    let exported = driver.export_variables(&path).unwrap();
    let loaded = driver.load_variables(&path).unwrap();
    assert_eq!(loaded, exported);
}

#[test]
fn test_session_closed_once_on_drop() {
    let connector = process_panel();
    {
        let _driver = Driver::connect(&connector, &DriverConfig::default()).unwrap();
    }
    assert_eq!(connector.close_count(), 1);
}

#[test]
fn test_double_disconnect_is_noop() {
    let connector = process_panel();
    let mut driver = Driver::connect(&connector, &DriverConfig::default()).unwrap();

    driver.disconnect();
    driver.disconnect();
    drop(driver);

    assert_eq!(connector.close_count(), 1);
}

#[test]
fn test_session_closed_once_when_root_resolution_fails() {
    let connector = process_panel();
    let config = DriverConfig {
        objects_node_name: "Decommissioned Panel".to_string(),
        ..DriverConfig::default()
    };

    let err = Driver::connect(&connector, &config).unwrap_err();
    assert!(matches!(
        err,
        DriverError::Transport(TransportError::NodeResolution { .. })
    ));
    assert_eq!(connector.close_count(), 1);
}

#[test]
fn test_connection_failure_surfaces_url() {
    let connector = SimConnector::failing("connection refused");
    let err = Driver::connect(&connector, &DriverConfig::default()).unwrap_err();

    let message = err.to_string();
    assert!(message.contains("opc.tcp://localhost:4870"));
    assert!(message.contains("connection refused"));
}
