//! Integration tests for aurel-config.
//!
//! These tests verify persistence end to end through real files.

use aurel_config::{
    AudioSettings, ConfigError, ProfileStore, factory_presets, load_settings, preset,
    save_settings,
};
use tempfile::TempDir;

#[test]
fn profiles_survive_reopen_in_order() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("profiles.toml");

    let mut store = ProfileStore::open(&path).unwrap();
    store.upsert("Office", preset("quiet").unwrap()).unwrap();
    store
        .upsert("Left ear", AudioSettings::new(55.0, 3.0, -2.0, -40.0))
        .unwrap();
    store.upsert("Commute", preset("street").unwrap()).unwrap();
    store.save().unwrap();

    let reopened = ProfileStore::open(&path).unwrap();
    let names: Vec<_> = reopened.list().iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["Office", "Left ear", "Commute"]);
    assert_eq!(reopened.list(), store.list());

    let left = reopened.load("Left ear").unwrap();
    assert_eq!(left.balance(), -40.0);
    assert_eq!(left.derive().pan, -0.4);
}

#[test]
fn profile_delete_persists() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("profiles.toml");

    let mut store = ProfileStore::open(&path).unwrap();
    store.upsert("A", AudioSettings::default()).unwrap();
    store.upsert("B", AudioSettings::default()).unwrap();
    store.save().unwrap();

    let removed = store.remove("A").unwrap();
    assert_eq!(removed.name, "A");
    store.save().unwrap();

    let reopened = ProfileStore::open(&path).unwrap();
    assert_eq!(reopened.len(), 1);
    assert!(reopened.get("A").is_none());
    assert!(matches!(
        reopened.load("A"),
        Err(ConfigError::ProfileNotFound(_))
    ));
}

#[test]
fn profile_keeps_preset_label() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("profiles.toml");

    let mut store = ProfileStore::open(&path).unwrap();
    store.upsert("TV night", preset("tv").unwrap()).unwrap();
    store.save().unwrap();

    let loaded = ProfileStore::open(&path).unwrap().load("TV night").unwrap();
    assert_eq!(loaded.preset(), "tv");
    assert_eq!(loaded, preset("tv").unwrap());
}

#[test]
fn corrupt_profile_file_is_reported() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("profiles.toml");
    std::fs::write(&path, "[[profiles]]\nname = 3\n").unwrap();
    assert!(matches!(
        ProfileStore::open(&path),
        Err(ConfigError::TomlParse(_))
    ));
}

#[test]
fn settings_round_trip_through_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.toml");

    for (_, settings) in factory_presets() {
        save_settings(&path, &settings).unwrap();
        assert_eq!(load_settings(&path).unwrap(), settings);
    }
}

#[test]
fn saved_settings_use_camel_case_keys() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.toml");
    save_settings(&path, &AudioSettings::new(65.0, 4.0, -1.0, 10.0)).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("masterVolume = 65"), "got: {content}");
    assert!(content.contains("highFreq"), "got: {content}");
    assert!(content.contains("lowFreq"), "got: {content}");
    assert!(content.contains("balance"), "got: {content}");
}
