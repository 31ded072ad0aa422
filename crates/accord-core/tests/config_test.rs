//! Tests for the Accord configuration system.

use std::sync::Mutex;

use accord_core::config::{AccordConfig, ConfigOverrides};
use accord_core::errors::ConfigError;

/// Serializes tests that touch process environment variables.
static ENV_MUTEX: Mutex<()> = Mutex::new(());

const ACCORD_ENV_VARS: [&str; 5] = [
    "ACCORD_MATCHING_MIN_CONFIDENCE",
    "ACCORD_ANALYSIS_ROOT_MARKER",
    "ACCORD_ANALYSIS_IGNORE_ENDPOINTS",
    "ACCORD_ANALYSIS_REPORT_UNMATCHED_BACKEND",
    "ACCORD_ANALYSIS_REPORT_UNMATCHED_FRONTEND",
];

fn tempdir() -> tempfile::TempDir {
    tempfile::TempDir::new().unwrap()
}

/// Point HOME at an empty directory and clear ACCORD_ vars so the host
/// machine's user config cannot leak into assertions.
fn isolate_env(home: &std::path::Path) {
    for key in ACCORD_ENV_VARS {
        std::env::remove_var(key);
    }
    std::env::set_var("HOME", home);
    std::env::remove_var("USERPROFILE");
}

#[test]
fn test_layered_resolution() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempdir();
    isolate_env(home.path());

    let user_dir = home.path().join(".accord");
    std::fs::create_dir_all(&user_dir).unwrap();
    std::fs::write(
        user_dir.join("config.toml"),
        r#"
[matching]
min_confidence = 0.1

[analysis]
root_marker = "user"
report_unmatched_frontend = false
"#,
    )
    .unwrap();

    let project = tempdir();
    std::fs::write(
        project.path().join("accord.toml"),
        r#"
[matching]
min_confidence = 0.2

[analysis]
root_marker = "project"
ignore_endpoints = ["/internal/*"]
"#,
    )
    .unwrap();

    std::env::set_var("ACCORD_MATCHING_MIN_CONFIDENCE", "0.3");

    let overrides = ConfigOverrides {
        root_marker: Some("body".into()),
        ..Default::default()
    };
    let config = AccordConfig::load(project.path(), Some(&overrides)).unwrap();

    // Override beats project beats user
    assert_eq!(config.analysis.effective_root_marker(), "body");
    // Env beats project
    assert_eq!(config.matching.min_confidence, Some(0.3));
    // Project-only value survives
    assert_eq!(config.analysis.ignore_endpoints, vec!["/internal/*".to_string()]);
    // User-only value survives
    assert!(!config.analysis.effective_report_unmatched_frontend());
    assert!(config.analysis.effective_report_unmatched_backend());

    isolate_env(home.path());
}

#[test]
fn test_load_without_files_uses_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempdir();
    isolate_env(home.path());

    let project = tempdir();
    let config = AccordConfig::load(project.path(), None).unwrap();

    assert_eq!(config.matching.effective_min_confidence(), 0.0);
    assert_eq!(config.analysis.effective_root_marker(), "$");
    assert!(config.analysis.ignore_endpoints.is_empty());
    assert!(config.analysis.effective_report_unmatched_backend());
}

#[test]
fn test_env_ignore_list_is_comma_separated() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempdir();
    isolate_env(home.path());

    std::env::set_var("ACCORD_ANALYSIS_IGNORE_ENDPOINTS", "/health, /metrics,,");
    let project = tempdir();
    let config = AccordConfig::load(project.path(), None).unwrap();
    assert_eq!(
        config.analysis.ignore_endpoints,
        vec!["/health".to_string(), "/metrics".to_string()]
    );

    isolate_env(home.path());
}

#[test]
fn test_invalid_project_toml_is_parse_error() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempdir();
    isolate_env(home.path());

    let project = tempdir();
    std::fs::write(project.path().join("accord.toml"), "[matching\nmin_confidence = ").unwrap();

    let result = AccordConfig::load(project.path(), None);
    assert!(matches!(result, Err(ConfigError::Parse { .. })));
}

#[test]
fn test_validation_rejects_out_of_range_confidence() {
    let result = AccordConfig::from_toml("[matching]\nmin_confidence = 1.5\n");
    match result {
        Err(err @ ConfigError::OutOfRange { value, .. }) => {
            assert_eq!(value, 1.5);
            assert_eq!(err.field(), Some("matching.min_confidence"));
        }
        other => panic!("expected validation failure, got {other:?}"),
    }
}

#[test]
fn test_validation_rejects_empty_root_marker_and_bad_glob() {
    assert!(matches!(
        AccordConfig::from_toml("[analysis]\nroot_marker = \"  \"\n"),
        Err(ConfigError::Blank {
            field: "analysis.root_marker"
        })
    ));
    assert!(matches!(
        AccordConfig::from_toml("[analysis]\nignore_endpoints = [\"/a/[\"]\n"),
        Err(ConfigError::InvalidGlob { ref pattern, .. }) if pattern == "/a/["
    ));
}

#[test]
fn test_unknown_keys_are_ignored() {
    let config = AccordConfig::from_toml(
        r#"
[matching]
min_confidence = 0.5
future_knob = true

[storage]
path = "x"
"#,
    )
    .unwrap();
    assert_eq!(config.matching.min_confidence, Some(0.5));
}

#[test]
fn test_toml_round_trip() {
    let config = AccordConfig::from_toml(
        "[analysis]\nroot_marker = \"body\"\nignore_endpoints = [\"/internal/*\"]\n",
    )
    .unwrap();
    let rendered = config.to_toml().unwrap();
    let reparsed = AccordConfig::from_toml(&rendered).unwrap();
    assert_eq!(reparsed.analysis.effective_root_marker(), "body");
    assert_eq!(reparsed.analysis.ignore_endpoints, config.analysis.ignore_endpoints);
}

#[test]
fn test_unreadable_user_config_is_skipped() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempdir();
    isolate_env(home.path());
    // A directory where the file should be cannot be read as a string.
    std::fs::create_dir_all(home.path().join(".accord").join("config.toml")).unwrap();

    let project = tempdir();
    let config = AccordConfig::load(project.path(), None).unwrap();
    assert_eq!(config.analysis.effective_root_marker(), "$");
}
