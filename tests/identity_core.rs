use molt::core::error::MoltError;
use molt::core::ident::{self, IdentityTriple};
use molt::core::store::{self, IdentityRecord};
use molt::core::variant::{ConfigPaths, Variant};
use regex::Regex;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::thread;
use std::time::Duration;
use tempfile::tempdir;

#[test]
fn resolve_paths_is_deterministic_and_pure() {
    let home = Path::new("/home/molt-user");
    for variant in Variant::all() {
        let first = ConfigPaths::resolve(home, *variant);
        let second = ConfigPaths::resolve(home, *variant);
        assert_eq!(first.storage_json, second.storage_json);
        assert_eq!(first.state_db, second.state_db);
        assert_eq!(first.workspace_storage, second.workspace_storage);
        assert!(first.storage_json.starts_with(home));
        assert!(
            first.storage_json.ends_with("User/globalStorage/storage.json"),
            "unexpected store path: {}",
            first.storage_json.display()
        );
    }
}

#[test]
fn variant_detection_respects_priority_and_fallback() {
    // Two markers present: the higher-priority one wins.
    let both = Variant::detect(|m| m == "CURSOR_TRACE_ID" || m == "VSCODE_INSIDERS");
    assert_eq!(both, Variant::Cursor);

    let insiders = Variant::detect(|m| m == "VSCODE_INSIDERS");
    assert_eq!(insiders, Variant::CodeInsiders);

    assert_eq!(Variant::detect(|_| false), Variant::Code);
}

#[test]
fn new_identifier_matches_canonical_shape() {
    let shape = Regex::new(
        r"^[0-9a-f]{8}-[0-9a-f]{4}-4[0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}$",
    )
    .expect("shape regex");

    for _ in 0..100 {
        let id = ident::new_identifier();
        assert_eq!(id.len(), 36);
        assert!(shape.is_match(&id), "non-canonical identifier: {id}");
        assert!(ident::is_canonical(&id));
    }
}

#[test]
fn ten_thousand_identifiers_contain_no_duplicates() {
    let mut seen = HashSet::new();
    for _ in 0..10_000 {
        assert!(seen.insert(ident::new_identifier()), "duplicate identifier");
    }
}

#[test]
fn triple_serializes_with_domain_key_names() {
    let triple = IdentityTriple::fresh();
    let json = serde_json::to_value(&triple).expect("serialize triple");
    assert!(json.get("machineId").is_some());
    assert!(json.get("deviceId").is_some());
    assert!(json.get("sessionId").is_some());
}

#[test]
fn record_round_trips_through_disk() {
    let tmp = tempdir().expect("tempdir");
    let path = tmp.path().join("storage.json");

    let mut record = IdentityRecord::new();
    record.set_string("telemetry.machineId", "m-1");
    record.set_string("sessionId", "s-1");
    record.set_string("scoreInfo_user42", "cached");
    store::save(&path, &record).expect("save");

    let reloaded = store::load(&path).expect("load").expect("present");
    assert_eq!(reloaded.fields(), record.fields());
}

#[test]
fn unknown_non_string_values_survive_rewrite() {
    let tmp = tempdir().expect("tempdir");
    let path = tmp.path().join("storage.json");
    fs::write(
        &path,
        r#"{"machineId":"m","nested":{"enabled":true,"count":3},"flags":[1,2]}"#,
    )
    .expect("seed store");

    let mut record = store::load(&path).expect("load").expect("present");
    record.set_string("machineId", "m-new");
    store::save(&path, &record).expect("save");

    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).expect("read")).expect("json");
    assert_eq!(value["machineId"], "m-new");
    assert_eq!(value["nested"]["enabled"], true);
    assert_eq!(value["nested"]["count"], 3);
    assert_eq!(value["flags"], serde_json::json!([1, 2]));
}

#[test]
fn load_reports_absence_as_none_not_error() {
    let tmp = tempdir().expect("tempdir");
    let loaded = store::load(&tmp.path().join("missing.json")).expect("load");
    assert!(loaded.is_none());
}

#[test]
fn load_reports_malformed_json_as_parse_error() {
    let tmp = tempdir().expect("tempdir");
    let path = tmp.path().join("storage.json");
    fs::write(&path, "{ not json").expect("seed store");

    match store::load(&path) {
        Err(MoltError::ParseError(msg)) => assert!(msg.contains("storage.json")),
        other => panic!("expected ParseError, got {other:?}"),
    }
}

#[test]
fn save_detects_concurrent_rewrite() {
    let tmp = tempdir().expect("tempdir");
    let path = tmp.path().join("storage.json");
    fs::write(&path, r#"{"machineId":"m"}"#).expect("seed store");

    let mut record = store::load(&path).expect("load").expect("present");
    record.set_string("machineId", "m-new");

    // Host application rewrites the store between our load and save.
    thread::sleep(Duration::from_millis(25));
    fs::write(&path, r#"{"machineId":"host-won"}"#).expect("host rewrite");

    match store::save(&path, &record) {
        Err(MoltError::ConcurrentModification(msg)) => assert!(msg.contains("storage.json")),
        other => panic!("expected ConcurrentModification, got {other:?}"),
    }

    // The host's write is still intact.
    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).expect("read")).expect("json");
    assert_eq!(value["machineId"], "host-won");
}
