//! Integration tests for the snapshot/perturbation file flow
//!
//! Exercises the export -> perturb -> load pipeline the CLI runs, plus the
//! round-trip law as a property over arbitrary variable sets.

use opcdriver::{
    export, load, perturb, Driver, DriverConfig, ExclusionSet, Value, Variable, VariableSet,
    DEFAULT_JITTER,
};
use proptest::prelude::*;
use tempfile::TempDir;

use super::common::panel_fixtures::process_panel;

#[test]
fn test_perturbed_snapshot_round_trips() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("variables_copy.json");

    let connector = process_panel();
    let driver = Driver::connect(&connector, &DriverConfig::default()).unwrap();
    let set = driver.variables().unwrap();

    let perturbed = perturb(&set, &ExclusionSet::default_tags(), DEFAULT_JITTER);
    export(&perturbed, &path).unwrap();
    let loaded = load(&path).unwrap();

    assert_eq!(loaded, perturbed);
}

#[test]
fn test_perturb_leaves_diagnostic_tags_alone_end_to_end() {
    let connector = process_panel();
    let driver = Driver::connect(&connector, &DriverConfig::default()).unwrap();
    let set = driver.variables().unwrap();

    let perturbed = perturb(&set, &ExclusionSet::default_tags(), DEFAULT_JITTER);

    assert_eq!(
        perturbed.get("@DiagnosticsIndicatorTag"),
        set.get("@DiagnosticsIndicatorTag")
    );
    assert_eq!(
        perturbed.get("Tag_ScreenNumber"),
        set.get("Tag_ScreenNumber")
    );
}

#[test]
fn test_applying_loaded_snapshot_updates_panel() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("variables_copy.json");

    let connector = process_panel();
    let driver = Driver::connect(&connector, &DriverConfig::default()).unwrap();

    let set = driver.variables().unwrap();
    let perturbed = perturb(&set, &ExclusionSet::default_tags(), DEFAULT_JITTER);
    export(&perturbed, &path).unwrap();

    let loaded = driver.load_variables(&path).unwrap();
    let applied = driver.apply_variables(&loaded).unwrap();
    assert_eq!(applied, loaded.len());

    assert_eq!(driver.variables().unwrap(), perturbed);
}

fn value_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<bool>().prop_map(Value::Bool),
        (-1.0e9f64..1.0e9).prop_map(Value::Number),
        "[A-Za-z0-9 _.-]{0,24}".prop_map(Value::Text),
    ]
}

fn variable_set_strategy() -> impl Strategy<Value = VariableSet> {
    prop::collection::vec(
        ("[A-Za-z_@][A-Za-z0-9_]{0,16}", value_strategy()),
        0..20,
    )
    .prop_map(|entries| {
        entries
            .into_iter()
            .enumerate()
            .map(|(i, (name, value))| Variable {
                name,
                node_id: format!("ns=3;s=node-{}", i),
                value,
            })
            .collect()
    })
}

proptest! {
    /// load(export(S)) == S for any set of the three supported value kinds
    #[test]
    fn prop_snapshot_round_trip(set in variable_set_strategy()) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("variables.json");

        export(&set, &path).unwrap();
        let loaded = load(&path).unwrap();
        prop_assert_eq!(loaded, set);
    }
}
