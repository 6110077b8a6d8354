use super::*;
use tempfile::tempdir;

#[test]
fn test_defaults() {
    let defaults = SettingsValues::default();
    assert_eq!(defaults.theme, Theme::Light);
    assert!(defaults.verify_integrity);
    assert!(!defaults.verify_signature);
}

#[test]
fn test_missing_file_uses_defaults() {
    let dir = tempdir().expect("tempdir");
    let settings = Settings::load_from(dir.path().join("settings.json"));
    assert_eq!(settings.get("theme").as_deref(), Some("Light"));
    assert_eq!(settings.get("verify_integrity").as_deref(), Some("true"));
}

#[test]
fn test_partial_file_fills_defaults() {
    let dir = tempdir().expect("tempdir");
    let file = dir.path().join("settings.json");
    fs::write(&file, r#"{"theme": "Dark"}"#).expect("write");

    let settings = Settings::load_from(&file);
    assert_eq!(settings.values().theme, Theme::Dark);
    assert!(settings.values().verify_integrity);
}

#[test]
fn test_malformed_file_uses_defaults() {
    let dir = tempdir().expect("tempdir");
    let file = dir.path().join("settings.json");
    fs::write(&file, "theme = dark").expect("write");
    assert_eq!(Settings::load_from(&file).values(), &SettingsValues::default());
}

#[test]
fn test_set_persists_and_reloads() {
    let dir = tempdir().expect("tempdir");
    let file = dir.path().join("nested").join("settings.json");

    let mut settings = Settings::load_from(&file);
    settings.set("theme", "dark").expect("set theme");
    settings.set("verify_signature", "on").expect("set signature");

    let reloaded = Settings::load_from(&file);
    assert_eq!(reloaded.values().theme, Theme::Dark);
    assert!(reloaded.values().verify_signature);

    let raw = fs::read_to_string(&file).expect("read");
    assert!(raw.contains("\"theme\": \"Dark\""));
}

#[test]
fn test_invalid_key_and_value() {
    let dir = tempdir().expect("tempdir");
    let mut settings = Settings::load_from(dir.path().join("settings.json"));
    assert!(settings.set("color", "auto").is_err());
    assert!(settings.set("theme", "solarized").is_err());
    assert!(settings.set("verify_integrity", "maybe").is_err());
    assert!(settings.reset("unknown").is_err());
}

#[test]
fn test_reset_restores_default() {
    let dir = tempdir().expect("tempdir");
    let file = dir.path().join("settings.json");
    let mut settings = Settings::load_from(&file);
    settings.set("verify_integrity", "false").expect("set");
    settings.reset("verify_integrity").expect("reset");
    assert!(Settings::load_from(&file).values().verify_integrity);
}

#[test]
fn test_all_lists_every_key_in_order() {
    let dir = tempdir().expect("tempdir");
    let settings = Settings::load_from(dir.path().join("settings.json"));
    let keys: Vec<_> = settings.all().into_iter().map(|(k, _)| k).collect();
    assert_eq!(keys, SETTING_KEYS.to_vec());
}
