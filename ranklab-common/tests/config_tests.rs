//! Tests for settings loading and validation

use ranklab_common::config::{ConditionRanges, Settings};
use std::io::Write;
use std::path::PathBuf;

#[test]
fn default_settings_are_valid() {
    let settings = Settings::default();
    settings.validate().expect("defaults should validate");
    assert_eq!(settings.trials, 2);
    assert_eq!(settings.samples, 5);
    assert_eq!(settings.log_dir, "log/");
    assert!(settings.submit_url.is_none());
}

#[test]
fn default_ranges_match_compiled_defaults() {
    let ranges = ConditionRanges::default();
    assert_eq!(ranges.speaker, (1, 10));
    assert_eq!(ranges.text, (20, 50));
    assert_eq!(ranges.emotion, (0, 4));
}

#[test]
fn partial_toml_fills_in_defaults() {
    let settings = Settings::from_toml_str(
        r#"
        trials = 8
        root_folder = "/srv/ranklab"
        "#,
    )
    .unwrap();

    assert_eq!(settings.trials, 8);
    assert_eq!(settings.root_folder, PathBuf::from("/srv/ranklab"));
    // Unspecified keys keep their defaults
    assert_eq!(settings.samples, 5);
    assert_eq!(settings.bind_addr, "127.0.0.1:5731");
}

#[test]
fn full_toml_round_trip() {
    let settings = Settings::from_toml_str(
        r#"
        bind_addr = "0.0.0.0:8080"
        root_folder = "/data/experiment"
        submit_url = "http://example.com/save_result.php"
        log_dir = "results/"
        trials = 10
        samples = 5

        [ranges]
        speaker = [2, 4]
        text = [1, 1]
        emotion = [0, 4]
        "#,
    )
    .unwrap();

    assert_eq!(settings.bind_addr, "0.0.0.0:8080");
    assert_eq!(
        settings.submit_url.as_deref(),
        Some("http://example.com/save_result.php")
    );
    assert_eq!(settings.log_dir, "results/");
    assert_eq!(settings.ranges.speaker, (2, 4));
    assert_eq!(settings.ranges.text, (1, 1));
}

#[test]
fn zero_trials_rejected() {
    let err = Settings::from_toml_str("trials = 0").unwrap_err();
    assert!(err.to_string().contains("trials"));
}

#[test]
fn oversized_sample_set_rejected() {
    let err = Settings::from_toml_str("samples = 27").unwrap_err();
    assert!(err.to_string().contains("samples"));
}

#[test]
fn empty_condition_range_rejected() {
    let err = Settings::from_toml_str(
        r#"
        [ranges]
        speaker = [10, 1]
        "#,
    )
    .unwrap_err();
    assert!(err.to_string().contains("speaker"));
}

#[test]
fn emotion_range_beyond_label_set_rejected() {
    let err = Settings::from_toml_str(
        r#"
        [ranges]
        emotion = [0, 9]
        "#,
    )
    .unwrap_err();
    assert!(err.to_string().contains("emotion"));
}

#[test]
fn emotion_range_upper_bound_of_four_accepted() {
    let settings = Settings::from_toml_str(
        r#"
        [ranges]
        emotion = [4, 4]
        "#,
    )
    .unwrap();
    assert_eq!(settings.ranges.emotion, (4, 4));
}

#[test]
fn load_from_explicit_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "trials = 3").unwrap();

    let settings = Settings::load(Some(file.path())).unwrap();
    assert_eq!(settings.trials, 3);
}

#[test]
fn load_missing_explicit_file_errors() {
    let result = Settings::load(Some(std::path::Path::new(
        "/nonexistent/ranklab/config.toml",
    )));
    assert!(result.is_err());
}

#[test]
fn derived_directories_hang_off_root_folder() {
    let settings = Settings::from_toml_str(r#"root_folder = "/srv/rl""#).unwrap();
    assert_eq!(settings.audio_dir(), PathBuf::from("/srv/rl/wav"));
    assert_eq!(settings.local_log_dir(), PathBuf::from("/srv/rl/log"));
}
