use super::*;
use serde_json::{Value, json};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const DOC: &str = "GAME_STATE/Game_State.json";

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn read_doc(root: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(root.join(DOC)).unwrap()).unwrap()
}

fn run(root: &Path, mode: ReconcileMode) -> ProgressUpdate {
    ProgressUpdater::new(root, Path::new(DOC))
        .mode(mode)
        .run()
        .unwrap()
}

#[test]
fn test_new_document_groups_root_first() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "LOCATIONS/DESK/A.json", r#"{"isDiscovered": false}"#);
    write(
        tmp.path(),
        "LOCATIONS/DESK/B.json",
        r#"{"isDiscovered": true, "isRoot": true}"#,
    );

    let update = run(tmp.path(), ReconcileMode::Preserve);

    assert!(update.written);
    let text = fs::read_to_string(tmp.path().join(DOC)).unwrap();
    assert_eq!(
        text,
        "{\n  \"desk_locations\": {\n    \"/LOCATIONS/DESK/B.json\": true,\n    \"/LOCATIONS/DESK/A.json\": false\n  }\n}\n"
    );
}

#[test]
fn test_preserve_and_reset_against_existing_progress() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "LOCATIONS/DESK/A.json", r#"{"isDiscovered": false}"#);
    write(
        tmp.path(),
        DOC,
        r#"{"desk_locations": {"/LOCATIONS/DESK/A.json": true}}"#,
    );

    run(tmp.path(), ReconcileMode::Preserve);
    assert_eq!(
        read_doc(tmp.path())["desk_locations"]["/LOCATIONS/DESK/A.json"],
        json!(true)
    );

    run(tmp.path(), ReconcileMode::Reset);
    assert_eq!(
        read_doc(tmp.path())["desk_locations"]["/LOCATIONS/DESK/A.json"],
        json!(false)
    );
}

#[test]
fn test_pass_through_fields_survive() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "NOTES/AVERY/N1.json", r#"{"isDiscovered": false}"#);
    write(
        tmp.path(),
        DOC,
        r#"{
  "currentMode": "explore",
  "currentLocation": "/LOCATIONS/DESK/A.json",
  "currentNote": null,
  "avery_notes": {"/NOTES/AVERY/N1.json": true}
}"#,
    );

    run(tmp.path(), ReconcileMode::Reset);

    let doc = read_doc(tmp.path());
    assert_eq!(doc["currentMode"], json!("explore"));
    assert_eq!(doc["currentLocation"], json!("/LOCATIONS/DESK/A.json"));
    assert_eq!(doc["currentNote"], Value::Null);
    assert_eq!(doc["avery_notes"]["/NOTES/AVERY/N1.json"], json!(false));

    let fields: Vec<&str> = doc.as_object().unwrap().keys().map(String::as_str).collect();
    assert_eq!(
        fields,
        vec!["currentMode", "currentLocation", "currentNote", "avery_notes"]
    );
}

#[test]
fn test_legacy_flat_map_migrates_into_groups() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "LOCATIONS/DESK/A.json", r#"{"isDiscovered": false}"#);
    write(tmp.path(), "NOTES/AVERY/N1.json", r#"{"isDiscovered": false}"#);
    write(tmp.path(), "Intro.json", r#"{"isDiscovered": true}"#);
    write(
        tmp.path(),
        DOC,
        r#"{"discovered": {"/LOCATIONS/DESK/A.json": true, "/Removed.json": true}}"#,
    );

    let update = run(tmp.path(), ReconcileMode::Preserve);

    let doc = read_doc(tmp.path());
    assert_eq!(doc["desk_locations"]["/LOCATIONS/DESK/A.json"], json!(true));
    assert_eq!(doc["avery_notes"]["/NOTES/AVERY/N1.json"], json!(false));
    assert_eq!(doc["discovered"], json!({"/Intro.json": true}));

    let added: Vec<&str> = update
        .reconciliation
        .added
        .iter()
        .map(|a| a.key.as_str())
        .collect();
    assert_eq!(added, vec!["/Intro.json", "/NOTES/AVERY/N1.json"]);
    assert_eq!(update.reconciliation.removed, vec!["/Removed.json"]);
}

#[test]
fn test_emptied_group_is_dropped() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "LOCATIONS/DESK/A.json", r#"{"isDiscovered": false}"#);
    write(
        tmp.path(),
        DOC,
        r#"{
  "desk_locations": {"/LOCATIONS/DESK/A.json": true},
  "avery_notes": {"/NOTES/AVERY/N1.json": true}
}"#,
    );

    let update = run(tmp.path(), ReconcileMode::Preserve);

    let doc = read_doc(tmp.path());
    assert!(doc.get("avery_notes").is_none());
    assert_eq!(update.reconciliation.removed, vec!["/NOTES/AVERY/N1.json"]);
}

#[test]
fn test_progress_document_and_noise_not_scanned() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "LOCATIONS/DESK/A.json", r#"{"isDiscovered": false}"#);
    write(tmp.path(), "LOCATIONS/DESK/Broken.json", "{ nope");
    write(tmp.path(), "LOCATIONS/Locations.json", r#"[{"name": "Desk"}]"#);
    write(tmp.path(), DOC, r#"{"isDiscovered": true}"#);

    let update = run(tmp.path(), ReconcileMode::Preserve);

    assert_eq!(update.reconciliation.total_entities(), 1);
    let doc = read_doc(tmp.path());
    assert_eq!(doc["isDiscovered"], json!(true));
    assert_eq!(doc["desk_locations"]["/LOCATIONS/DESK/A.json"], json!(false));
}

#[test]
fn test_boolean_settings_field_is_carried_through() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "LOCATIONS/DESK/A.json", r#"{"isDiscovered": false}"#);
    write(
        tmp.path(),
        DOC,
        r#"{"settings": {"musicOn": true}, "desk_locations": {"/LOCATIONS/DESK/A.json": true}}"#,
    );

    let update = run(tmp.path(), ReconcileMode::Preserve);

    assert!(update.reconciliation.removed.is_empty());
    assert!(update.reconciliation.added.is_empty());
    assert_eq!(
        read_doc(tmp.path()),
        json!({
            "settings": {"musicOn": true},
            "desk_locations": {"/LOCATIONS/DESK/A.json": true}
        })
    );
}

#[test]
fn test_invalid_member_keeps_rest_of_group() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "LOCATIONS/DESK/A.json", r#"{"isDiscovered": false}"#);
    write(tmp.path(), "LOCATIONS/DESK/B.json", r#"{"isDiscovered": false}"#);
    write(
        tmp.path(),
        DOC,
        r#"{"desk_locations": {"/LOCATIONS/DESK/A.json": true, "/LOCATIONS/DESK/B.json": null}}"#,
    );

    let update = run(tmp.path(), ReconcileMode::Preserve);

    let added: Vec<&str> = update
        .reconciliation
        .added
        .iter()
        .map(|a| a.key.as_str())
        .collect();
    assert_eq!(added, vec!["/LOCATIONS/DESK/B.json"]);

    let doc = read_doc(tmp.path());
    assert_eq!(doc["desk_locations"]["/LOCATIONS/DESK/A.json"], json!(true));
    assert_eq!(doc["desk_locations"]["/LOCATIONS/DESK/B.json"], json!(false));
}

#[test]
fn test_null_root_flag_keeps_scene_progress() {
    let tmp = TempDir::new().unwrap();
    write(
        tmp.path(),
        "LOCATIONS/DESK/A.json",
        r#"{"isDiscovered": false, "isRoot": null}"#,
    );
    write(
        tmp.path(),
        DOC,
        r#"{"desk_locations": {"/LOCATIONS/DESK/A.json": true}}"#,
    );

    let update = run(tmp.path(), ReconcileMode::Preserve);

    assert!(update.reconciliation.removed.is_empty());
    assert_eq!(
        read_doc(tmp.path()),
        json!({"desk_locations": {"/LOCATIONS/DESK/A.json": true}})
    );
}
