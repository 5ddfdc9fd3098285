use compound_assist::config::Config;
use compound_assist::config::migrate::{fill_missing_keys, run_config_migration};
use compound_assist::core::log::LogLogic;
use compound_assist::db::migrate::{applied_versions, run_pending_migrations};
use compound_assist::db::pool::DbPool;
use std::fs;

#[test]
fn test_missing_keys_take_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("compound-assist.conf");
    fs::write(&path, "database: /tmp/custom.sqlite\nreminder_lead_minutes: 15\n").unwrap();

    let cfg = Config::load_from(&path).unwrap();
    assert_eq!(cfg.database, "/tmp/custom.sqlite");
    assert_eq!(cfg.reminder_lead_minutes, 15);
    assert_eq!(cfg.upcoming_limit, 20);
    assert_eq!(cfg.previous_limit, 20);
    assert_eq!(cfg.security_phone, "4001");
    assert_eq!(cfg.maintenance_phone, "4022");
    assert_eq!(cfg.provider_authority, "com.compoundassist.fileprovider");
}

#[test]
fn test_absent_file_means_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = Config::load_from(&dir.path().join("nope.conf")).unwrap();
    assert_eq!(cfg.reminder_lead_minutes, 10);
}

#[test]
fn test_fill_missing_keys_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("compound-assist.conf");
    fs::write(&path, "database: /tmp/custom.sqlite\nsecurity_phone: '9999'\n").unwrap();

    let missing = Config::missing_keys(&path).unwrap();
    assert!(missing.contains(&"maintenance_phone".to_string()));
    assert!(!missing.contains(&"database".to_string()));

    let added = fill_missing_keys(&path).unwrap();
    assert_eq!(added.len(), missing.len());
    assert!(Config::missing_keys(&path).unwrap().is_empty());

    // Existing values survive.
    let cfg = Config::load_from(&path).unwrap();
    assert_eq!(cfg.database, "/tmp/custom.sqlite");
    assert_eq!(cfg.security_phone, "9999");

    let before = fs::read_to_string(&path).unwrap();
    assert!(fill_missing_keys(&path).unwrap().is_empty());
    assert_eq!(fs::read_to_string(&path).unwrap(), before);
}

#[test]
fn test_config_migration_logged_once() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("compound-assist.conf");
    fs::write(&path, "database: /tmp/custom.sqlite\n").unwrap();
    let pool = DbPool::in_memory().unwrap();

    run_config_migration(&pool.conn, &path).unwrap();
    run_config_migration(&pool.conn, &path).unwrap();

    let entries = LogLogic::entries(&pool.conn).unwrap();
    let migrations = entries
        .iter()
        .filter(|e| e.operation == "config_migrate")
        .count();
    assert_eq!(migrations, 1);
}

#[test]
fn test_schema_migrations_apply_once() {
    let pool = DbPool::in_memory().unwrap();
    let first = applied_versions(&pool.conn).unwrap();
    assert_eq!(first.len(), 3);

    run_pending_migrations(&pool.conn).unwrap();
    assert_eq!(applied_versions(&pool.conn).unwrap(), first);

    for table in ["log", "preferences", "reminders"] {
        let n: i64 = pool
            .conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
                [table],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(n, 1, "table {table} missing");
    }
}
