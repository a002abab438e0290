use super::*;

#[test]
fn missing_file_reads_empty() {
    let dir = tempfile::tempdir().unwrap();
    let prefs = FilePreferences::new(Some(dir.path().join("prefs.json")));
    assert_eq!(prefs.get("theme"), None);
}

#[test]
fn set_creates_file_and_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prefs.json");
    let prefs = FilePreferences::new(Some(path.clone()));

    prefs.set("theme", "dark").unwrap();

    assert_eq!(prefs.get("theme").as_deref(), Some("dark"));
    let on_disk: serde_json::Value = serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
    assert_eq!(on_disk, serde_json::json!({ "theme": "dark" }));
}

#[test]
fn set_keeps_other_keys() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prefs.json");
    fs::write(&path, r#"{"lang":"fr","theme":"light"}"#).unwrap();
    let prefs = FilePreferences::new(Some(path));

    prefs.set("theme", "dark").unwrap();

    assert_eq!(prefs.get("lang").as_deref(), Some("fr"));
    assert_eq!(prefs.get("theme").as_deref(), Some("dark"));
}

#[test]
fn corrupt_file_reads_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prefs.json");
    fs::write(&path, "not json").unwrap();
    let prefs = FilePreferences::new(Some(path));
    assert_eq!(prefs.get("theme"), None);
}

#[test]
fn no_path_is_unavailable() {
    let prefs = FilePreferences::new(None);
    assert_eq!(prefs.get("theme"), None);
    assert_eq!(prefs.set("theme", "dark"), Err(StorageError::Unavailable));
}

#[test]
fn write_into_missing_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    let prefs = FilePreferences::new(Some(dir.path().join("nope").join("prefs.json")));
    assert!(matches!(prefs.set("theme", "dark"), Err(StorageError::Write(_))));
}

#[test]
fn set_refuses_to_clobber_corrupt_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prefs.json");
    let truncated = r#"{"lang":"fr","theme":"light""#;
    fs::write(&path, truncated).unwrap();
    let prefs = FilePreferences::new(Some(path.clone()));

    assert!(matches!(prefs.set("theme", "dark"), Err(StorageError::Write(_))));
    assert_eq!(fs::read_to_string(path).unwrap(), truncated);
}
