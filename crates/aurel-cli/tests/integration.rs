//! Integration tests for the `aurel` binary.
//!
//! Only commands that need no audio hardware are exercised here.

use std::process::Command;
use tempfile::TempDir;

fn aurel_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_aurel"))
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.output().expect("failed to run aurel");
    assert!(
        output.status.success(),
        "aurel failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn help_lists_subcommands() {
    let stdout = stdout_of(aurel_bin().arg("--help"));
    for cmd in ["listen", "devices", "presets", "profiles"] {
        assert!(stdout.contains(cmd), "help should mention '{cmd}'");
    }
}

#[test]
fn presets_lists_factory_presets() {
    let stdout = stdout_of(aurel_bin().arg("presets"));
    assert!(stdout.contains("Factory Presets"));
    for name in ["normal", "quiet", "street", "tv"] {
        assert!(stdout.contains(name), "listing should contain '{name}'");
    }
}

#[test]
fn presets_json_is_parseable() {
    let stdout = stdout_of(aurel_bin().args(["presets", "list", "--json"]));
    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let presets = value.as_array().unwrap();
    assert_eq!(presets.len(), 4);
    assert_eq!(presets[2]["preset"], "street");
    assert_eq!(presets[2]["masterVolume"], 70.0);
    assert_eq!(presets[2]["highFreq"], 15.0);
}

#[test]
fn presets_show_unknown_fails() {
    let output = aurel_bin()
        .args(["presets", "show", "concert"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("unknown preset"));
}

#[test]
fn profiles_save_list_delete() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("profiles.toml");
    let file = file.to_str().unwrap();

    let stdout = stdout_of(aurel_bin().args(["profiles", "--file", file, "list"]));
    assert!(stdout.contains("No saved profiles"));

    stdout_of(aurel_bin().args([
        "profiles", "--file", file, "save", "Kitchen", "--preset", "tv", "--balance", "-20",
    ]));
    stdout_of(aurel_bin().args(["profiles", "--file", file, "save", " Office ", "--preset", "quiet"]));

    let stdout = stdout_of(aurel_bin().args(["profiles", "--file", file, "list"]));
    let kitchen = stdout.find("Kitchen").unwrap();
    let office = stdout.find("Office").unwrap();
    assert!(kitchen < office, "profiles should list in save order");

    let stdout = stdout_of(aurel_bin().args(["profiles", "--file", file, "show", "Kitchen"]));
    assert!(stdout.contains("preset 'tv'"), "got: {stdout}");
    assert!(stdout.contains("balance  -20"), "got: {stdout}");

    stdout_of(aurel_bin().args(["profiles", "--file", file, "delete", "Kitchen"]));
    let stdout = stdout_of(aurel_bin().args(["profiles", "--file", file, "list"]));
    assert!(!stdout.contains("Kitchen"));
    assert!(stdout.contains("Office"));

    let stdout = stdout_of(aurel_bin().args(["profiles", "--file", file, "show", " Office"]));
    assert!(stdout.contains("preset 'quiet'"), "got: {stdout}");
}

#[test]
fn profiles_delete_unknown_fails() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("profiles.toml");
    let output = aurel_bin()
        .args(["profiles", "--file", file.to_str().unwrap(), "delete", "ghost"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("profile not found"));
}
