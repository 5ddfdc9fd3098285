#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::NaiveDate;
use compound_assist::db::pool::DbPool;
use compound_assist::files::{ImageRef, PrivateFileStore};
use compound_assist::store::{Repository, SqlitePreferences};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

pub const AUTHORITY: &str = "com.compoundassist.fileprovider";

pub fn ca() -> Command {
    cargo_bin_cmd!("compound-assist")
}

/// Fixed reference day so date-dependent assertions never drift.
pub fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 18).expect("valid date")
}

/// Fake JPEG bytes; nothing decodes them.
pub fn write_image(dir: &std::path::Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, b"\xFF\xD8\xFF\xE0fake-jpeg").expect("write image");
    path
}

/// A private HOME with its own config, database and image folders, for
/// running the binary.
pub struct TestEnv {
    pub home: TempDir,
    pub db: String,
}

impl TestEnv {
    pub fn new() -> Self {
        let home = tempfile::tempdir().expect("temp home");
        let db = home
            .path()
            .join("test_compound.sqlite")
            .to_string_lossy()
            .to_string();
        Self { home, db }
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = ca();
        cmd.env("HOME", self.home.path());
        cmd.args(["--db", &self.db]);
        cmd
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.home.path().join(name)
    }

    pub fn image(&self, name: &str) -> String {
        write_image(self.home.path(), name)
            .to_string_lossy()
            .to_string()
    }

    /// Initialize config and database, asserting success.
    pub fn init(&self) {
        self.cmd().arg("init").assert().success();
    }
}

/// In-memory database plus temporary private/cache folders, for calling the
/// library directly.
pub struct Fixture {
    pub pool: DbPool,
    pub dir: TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            pool: DbPool::in_memory().expect("in-memory db"),
            dir: tempfile::tempdir().expect("temp dir"),
        }
    }

    pub fn repo(&self) -> Repository<SqlitePreferences<'_>> {
        Repository::new(SqlitePreferences::new(&self.pool.conn))
    }

    pub fn files(&self) -> PrivateFileStore {
        PrivateFileStore::new(
            self.dir.path().join("files"),
            self.dir.path().join("cache"),
            AUTHORITY,
        )
    }

    /// External reference to a freshly written picture.
    pub fn external_image(&self, name: &str) -> ImageRef {
        let picked = self.dir.path().join("picked");
        fs::create_dir_all(&picked).expect("picked dir");
        ImageRef::new(write_image(&picked, name).to_string_lossy().to_string())
    }

    /// External reference to a picture that does not exist.
    pub fn missing_image(&self, name: &str) -> ImageRef {
        ImageRef::new(
            self.dir
                .path()
                .join("gone")
                .join(name)
                .to_string_lossy()
                .to_string(),
        )
    }
}
