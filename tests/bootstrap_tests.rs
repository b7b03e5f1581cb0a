//! Integration tests for working-directory and logger setup.
//!
//! These run without the console sink so test output stays readable; the
//! file sink is read back after an explicit flush.

use std::fs;

use buried_point::config::{self, ConnectionSettings, LoggingConfig};
use buried_point::{BuriedPoint, Data, Database, Diagnostics, SetupError};
use log::Log;

fn logging_in(dir: &std::path::Path) -> LoggingConfig {
    LoggingConfig {
        dir: dir.join("logs").to_string_lossy().into_owned(),
        ..LoggingConfig::default()
    }
}

#[test]
fn creates_nested_working_directory_and_log_file() {
    let tmp = tempfile::tempdir().unwrap();
    let bp = BuriedPoint::without_console(&logging_in(tmp.path())).unwrap();

    assert!(bp.work_dir().ends_with("buried_point"));
    assert!(bp.work_dir().is_dir());

    bp.logger().flush();
    let text = fs::read_to_string(bp.work_dir().join("buried_point.log")).unwrap();
    assert!(text.contains("[INFO]"), "{text}");
    assert!(text.contains("BuriedPoint initialized, working path:"), "{text}");
    assert!(text.contains("bootstrap.rs:"), "missing source location: {text}");
}

#[test]
fn log_file_is_truncated_per_run() {
    let tmp = tempfile::tempdir().unwrap();
    let cfg = logging_in(tmp.path());
    for _ in 0..3 {
        let bp = BuriedPoint::without_console(&cfg).unwrap();
        bp.logger().flush();
    }
    let text = fs::read_to_string(tmp.path().join("logs/buried_point/buried_point.log")).unwrap();
    assert_eq!(text.matches("BuriedPoint initialized").count(), 1, "{text}");
}

#[test]
fn disabled_file_sink_writes_no_file() {
    let tmp = tempfile::tempdir().unwrap();
    let cfg = LoggingConfig {
        enable: false,
        ..logging_in(tmp.path())
    };
    let bp = BuriedPoint::without_console(&cfg).unwrap();
    assert!(bp.work_dir().is_dir());
    assert!(!bp.work_dir().join("buried_point.log").exists());
}

#[test]
fn level_filter_applies_to_file() {
    let tmp = tempfile::tempdir().unwrap();
    let cfg = LoggingConfig {
        level: "warn".into(),
        ..logging_in(tmp.path())
    };
    let bp = BuriedPoint::without_console(&cfg).unwrap();
    bp.logger().flush();
    let text = fs::read_to_string(bp.work_dir().join("buried_point.log")).unwrap();
    assert!(!text.contains("BuriedPoint initialized"), "{text}");
}

#[test]
fn bad_level_is_a_config_error() {
    let tmp = tempfile::tempdir().unwrap();
    let cfg = LoggingConfig {
        level: "chatty".into(),
        ..logging_in(tmp.path())
    };
    assert!(matches!(BuriedPoint::without_console(&cfg), Err(SetupError::Config(_))));
}

#[test]
fn opened_database_lives_in_work_dir_and_shares_logger() {
    let tmp = tempfile::tempdir().unwrap();
    let cfg = config::parse(&format!(
        r#"
        [logging]
        dir = '{}'

        [database]
        path = "events.db"
        synchronous = "FULL"
        "#,
        tmp.path().join("logs").display()
    ))
    .unwrap();

    let bp = BuriedPoint::without_console(&cfg.logging).unwrap();
    let mut db = bp.open_database(&cfg.database).unwrap();
    assert_eq!(db.path(), bp.work_dir().join("events.db"));
    assert!(db.path().exists());

    db.insert(&Data::new(1, 42, "click")).unwrap();
    assert_eq!(db.query(1).unwrap()[0].timestamp, 42);

    bp.logger().flush();
    let text = fs::read_to_string(bp.work_dir().join("buried_point.log")).unwrap();
    assert!(text.contains("[db] Database ready at"), "{text}");
}

#[test]
fn global_logger_can_only_be_installed_once() {
    let tmp = tempfile::tempdir().unwrap();
    let bp = BuriedPoint::without_console(&logging_in(tmp.path())).unwrap();
    bp.install_global().unwrap();
    log::warn!("through the facade");

    // A store handed the global sink ends up in the same file.
    let _db = Database::open_with_settings(
        bp.work_dir().join("global.db"),
        &ConnectionSettings::default(),
        Diagnostics::global(),
    )
    .unwrap();
    log::logger().flush();

    let text = fs::read_to_string(bp.work_dir().join("buried_point.log")).unwrap();
    assert!(text.contains("through the facade"), "{text}");
    assert!(text.contains("global.db"), "{text}");

    assert!(matches!(bp.install_global(), Err(SetupError::GlobalLogger(_))));
}
