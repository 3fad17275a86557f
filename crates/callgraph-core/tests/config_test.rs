//! Tests for the callgraph configuration system.

use std::sync::Mutex;

use callgraph_core::config::{CallgraphConfig, CliOverrides};
use callgraph_core::errors::ConfigError;

/// Global mutex to serialize tests that modify environment variables.
static ENV_MUTEX: Mutex<()> = Mutex::new(());

const ENV_KEYS: [&str; 6] = [
    "CALLGRAPH_INGEST_WORKERS",
    "CALLGRAPH_INGEST_FOLLOW_INCLUDES",
    "CALLGRAPH_INGEST_MAX_INCLUDE_DEPTH",
    "CALLGRAPH_QUERY_MAX_CALL_PATHS",
    "CALLGRAPH_QUERY_SHOW_ALL",
    "CALLGRAPH_QUERY_FILTER",
];

/// Clear all CALLGRAPH_ env vars and point HOME at an empty directory so a
/// developer's user config cannot leak into the tests.
fn isolate_env(home: &std::path::Path) {
    for key in ENV_KEYS {
        std::env::remove_var(key);
    }
    std::env::set_var("HOME", home);
}

#[test]
fn test_layered_resolution() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempfile::TempDir::new().unwrap();
    isolate_env(home.path());

    let dir = tempfile::TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("callgraph.toml"),
        r#"
[ingest]
workers = 4

[query]
max_call_paths = 50
filter = "/src/project"
"#,
    )
    .unwrap();

    std::env::set_var("CALLGRAPH_QUERY_MAX_CALL_PATHS", "75");

    let cli = CliOverrides {
        workers: Some(2),
        ..Default::default()
    };
    let config = CallgraphConfig::load(dir.path(), Some(&cli)).unwrap();

    // CLI beats project
    assert_eq!(config.ingest.effective_workers(), 2);
    // Env beats project
    assert_eq!(config.query.effective_max_call_paths(), 75);
    // Project beats defaults
    assert_eq!(config.query.effective_filter("/ignored"), "/src/project");

    isolate_env(home.path());
}

#[test]
fn test_user_config_is_lowest_layer() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempfile::TempDir::new().unwrap();
    isolate_env(home.path());

    std::fs::create_dir_all(home.path().join(".callgraph")).unwrap();
    std::fs::write(
        home.path().join(".callgraph/config.toml"),
        "[ingest]\nworkers = 3\n[query]\nshow_all = true\n",
    )
    .unwrap();

    let dir = tempfile::TempDir::new().unwrap();
    std::fs::write(dir.path().join("callgraph.toml"), "[ingest]\nworkers = 6\n").unwrap();

    let config = CallgraphConfig::load(dir.path(), None).unwrap();
    assert_eq!(config.ingest.effective_workers(), 6);
    assert!(config.query.effective_show_all());
}

#[test]
fn test_missing_files_fall_back_to_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempfile::TempDir::new().unwrap();
    isolate_env(home.path());

    let dir = tempfile::TempDir::new().unwrap();
    let config = CallgraphConfig::load(dir.path(), None).unwrap();

    assert_eq!(config.ingest.effective_workers(), 10);
    assert!(config.ingest.effective_follow_includes());
    assert_eq!(config.ingest.effective_max_include_depth(), 8);
    assert_eq!(config.query.effective_max_call_paths(), 300);
    assert!(!config.query.effective_show_all());
    assert_eq!(config.query.effective_filter("/home/me/proj"), "/home/me/proj");
}

#[test]
fn test_invalid_env_values_are_ignored() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempfile::TempDir::new().unwrap();
    isolate_env(home.path());

    std::env::set_var("CALLGRAPH_INGEST_WORKERS", "lots");
    std::env::set_var("CALLGRAPH_QUERY_SHOW_ALL", "yes please");

    let dir = tempfile::TempDir::new().unwrap();
    let config = CallgraphConfig::load(dir.path(), None).unwrap();
    assert_eq!(config.ingest.workers, None);
    assert_eq!(config.query.show_all, None);

    isolate_env(home.path());
}

#[test]
fn test_invalid_toml_is_a_parse_error() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempfile::TempDir::new().unwrap();
    isolate_env(home.path());

    let dir = tempfile::TempDir::new().unwrap();
    std::fs::write(dir.path().join("callgraph.toml"), "[ingest\nworkers = ").unwrap();

    let err = CallgraphConfig::load(dir.path(), None).unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
}

#[test]
fn test_validation_rejects_out_of_range_values() {
    let zero_workers = CallgraphConfig::from_toml("[ingest]\nworkers = 0\n").unwrap();
    assert!(matches!(
        CallgraphConfig::validate(&zero_workers),
        Err(ConfigError::ValidationFailed { ref field, .. }) if field == "ingest.workers"
    ));

    let too_many = CallgraphConfig::from_toml("[ingest]\nworkers = 65\n").unwrap();
    assert!(CallgraphConfig::validate(&too_many).is_err());

    let no_paths = CallgraphConfig::from_toml("[query]\nmax_call_paths = 0\n").unwrap();
    assert!(matches!(
        CallgraphConfig::validate(&no_paths),
        Err(ConfigError::ValidationFailed { ref field, .. }) if field == "query.max_call_paths"
    ));

    let deep = CallgraphConfig::from_toml("[ingest]\nmax_include_depth = 100\n").unwrap();
    assert!(CallgraphConfig::validate(&deep).is_err());
}

#[test]
fn test_unknown_keys_are_ignored() {
    let config = CallgraphConfig::from_toml(
        "[ingest]\nworkers = 2\nfuture_knob = true\n[telemetry]\nenabled = false\n",
    )
    .unwrap();
    assert_eq!(config.ingest.workers, Some(2));
}

#[test]
fn test_toml_roundtrip_preserves_values() {
    let config = CallgraphConfig::from_toml(
        "[ingest]\nworkers = 5\n[query]\nshow_all = true\nfilter = \"lib/\"\n",
    )
    .unwrap();
    let text = config.to_toml().unwrap();
    let back = CallgraphConfig::from_toml(&text).unwrap();
    assert_eq!(back.ingest.workers, Some(5));
    assert_eq!(back.query.show_all, Some(true));
    assert_eq!(back.query.filter.as_deref(), Some("lib/"));
}
