use super::*;

use std::{collections::HashMap, io::Write};

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| vars.get(key).cloned()
}

#[test]
fn speed_maps_to_delay_and_clamps() {
    let settings = Settings::default();
    assert_eq!(settings.delay_for_speed(1), Duration::from_millis(500));
    assert_eq!(settings.delay_for_speed(5), Duration::from_millis(100));
    assert_eq!(settings.delay_for_speed(10), Duration::from_millis(50));
    assert_eq!(settings.delay_for_speed(0), settings.delay_for_speed(1));
    assert_eq!(settings.delay_for_speed(99), settings.delay_for_speed(10));
    assert_eq!(settings.delay(), Duration::from_millis(100));
}

#[test]
fn file_values_override_defaults() {
    let mut settings = Settings::default();
    settings
        .apply_file("speed = 8\nmax_array_size = 50\n")
        .expect("parse");

    assert_eq!(settings.speed, 8);
    assert_eq!(settings.max_array_size, 50);
    assert_eq!(settings.base_delay_ms, 500);
    assert_eq!(settings.log_filter, "info");
}

#[test]
fn unknown_file_keys_are_rejected() {
    let mut settings = Settings::default();
    assert!(settings.apply_file("sped = 3\n").is_err());
}

#[test]
fn app_prefixed_env_wins_over_short_name() {
    let mut settings = Settings::default();
    settings.apply_env(lookup_from(&[
        ("SORTVIS_SPEED", "2"),
        ("APP__SPEED", "7"),
        ("SORTVIS_BASE_DELAY_MS", "1000"),
        ("SORTVIS_LOG", "debug"),
    ]));

    assert_eq!(settings.speed, 7);
    assert_eq!(settings.base_delay_ms, 1000);
    assert_eq!(settings.log_filter, "debug");
}

#[test]
fn unparsable_env_values_are_ignored() {
    let mut settings = Settings::default();
    settings.apply_env(lookup_from(&[
        ("SORTVIS_SPEED", "fast"),
        ("APP__MAX_ARRAY_SIZE", "-4"),
    ]));

    assert_eq!(settings, Settings::default());
}

#[test]
fn explicit_config_path_is_loaded() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(file, "base_delay_ms = 200").expect("write");

    let settings = load_settings(Some(file.path())).expect("load");
    assert_eq!(settings.base_delay_ms, 200);
}

#[test]
fn missing_explicit_config_path_is_an_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let missing = dir.path().join("absent.toml");

    let err = load_settings(Some(&missing)).expect_err("should fail");
    assert!(err.to_string().contains("absent.toml"));
}
