//! Tests for the retrofit configuration system.

use std::sync::Mutex;

use retrofit_core::config::{CliOverrides, RetrofitConfig};
use retrofit_core::errors::ConfigError;

/// Serializes tests that touch environment variables.
static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn clear_retrofit_env_vars() {
    for key in [
        "RETROFIT_SCAN_MAX_FILE_SIZE",
        "RETROFIT_FIX_DRY_RUN",
        "RETROFIT_FIX_MIN_CONFIDENCE",
        "RETROFIT_CATALOG_PATH",
    ] {
        std::env::remove_var(key);
    }
}

/// Points HOME at an empty directory so a developer's own config never leaks in.
fn isolated_home() -> tempfile::TempDir {
    let home = tempfile::TempDir::new().unwrap();
    std::env::set_var("HOME", home.path());
    home
}

#[test]
fn layered_resolution_prefers_cli_then_env_then_project() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_retrofit_env_vars();
    let _home = isolated_home();

    let dir = tempfile::TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("retrofit.toml"),
        r#"
[scan]
max_file_size = 2_000_000
extra_ignore = ["legacy/"]

[fix]
dry_run = false
"#,
    )
    .unwrap();

    std::env::set_var("RETROFIT_SCAN_MAX_FILE_SIZE", "5000000");
    let cli = CliOverrides {
        dry_run: Some(true),
        ..Default::default()
    };

    let config = RetrofitConfig::load(dir.path(), Some(&cli)).unwrap();
    assert_eq!(config.fix.dry_run, Some(true));
    assert_eq!(config.scan.max_file_size, Some(5_000_000));
    assert_eq!(config.scan.extra_ignore, vec!["legacy/".to_string()]);

    clear_retrofit_env_vars();
}

#[test]
fn missing_files_fall_back_to_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_retrofit_env_vars();
    let _home = isolated_home();

    let dir = tempfile::TempDir::new().unwrap();
    let config = RetrofitConfig::load(dir.path(), None).unwrap();

    assert_eq!(config.scan.effective_max_file_size(), 1024 * 1024);
    assert!(config.scan.effective_extensions().contains(&"tsx".to_string()));
    assert!(!config.fix.effective_dry_run());
    assert_eq!(config.fix.effective_min_confidence(), "high");
    assert!(config.catalog.path.is_none());
}

#[test]
fn invalid_project_toml_is_a_parse_error() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_retrofit_env_vars();
    let _home = isolated_home();

    let dir = tempfile::TempDir::new().unwrap();
    std::fs::write(dir.path().join("retrofit.toml"), "[scan\nmax_file_size = ").unwrap();

    let err = RetrofitConfig::load(dir.path(), None).unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
}

#[test]
fn validation_rejects_bad_values() {
    let err = RetrofitConfig::from_toml("[scan]\nmax_file_size = 0\n").unwrap_err();
    assert!(matches!(err, ConfigError::ValidationFailed { ref field, .. } if field == "scan.max_file_size"));

    let err = RetrofitConfig::from_toml("[fix]\nmin_confidence = \"certain\"\n").unwrap_err();
    assert!(matches!(err, ConfigError::ValidationFailed { ref field, .. } if field == "fix.min_confidence"));

    let err = RetrofitConfig::from_toml("[scan]\nextensions = [\".tsx\"]\n").unwrap_err();
    assert!(matches!(err, ConfigError::ValidationFailed { ref field, .. } if field == "scan.extensions"));
}

#[test]
fn toml_round_trip_preserves_values() {
    let config = RetrofitConfig::from_toml(
        r#"
[scan]
extensions = ["jsx"]

[catalog]
path = "rules/react-19.json"
"#,
    )
    .unwrap();

    let reparsed = RetrofitConfig::from_toml(&config.to_toml().unwrap()).unwrap();
    assert_eq!(reparsed.scan.extensions, vec!["jsx".to_string()]);
    assert_eq!(reparsed.catalog.path.as_deref(), Some("rules/react-19.json"));
}
