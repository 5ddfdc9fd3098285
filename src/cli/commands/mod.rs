//! One handler per subcommand. Each opens the database, builds what the
//! command needs and hands over to `core`.

pub mod backup;
pub mod config;
pub mod contacts;
pub mod dashboard;
pub mod init;
pub mod log;
pub mod profile;
pub mod remind;
pub mod saved;
pub mod visitors;

use crate::core::migration::MigrationReport;
use crate::db::log::ttlog_quiet;
use crate::files::ImageRef;
use crate::files::reference::{CONTENT_SCHEME, FILE_SCHEME};
use crate::ui::messages::info;
use crate::utils::path::expand_tilde;
use rusqlite::Connection;

/// Record an image migration that actually moved something.
pub(crate) fn report_migration(conn: &Connection, report: &MigrationReport) {
    if report.is_empty() {
        return;
    }
    let summary = report.summary();
    info(format!("Images moved to private storage ({})", summary));
    ttlog_quiet(conn, "image_migration", "images", &summary);
}

/// First characters of an id, enough to type it back on the command line.
pub(crate) fn short_id(id: &str) -> String {
    id.chars().take(8).collect()
}

/// Image argument as typed: provider and file URIs are taken verbatim,
/// plain paths get `~` expanded.
pub(crate) fn image_arg(raw: &str) -> ImageRef {
    let raw = raw.trim();
    if raw.starts_with(CONTENT_SCHEME) || raw.starts_with(FILE_SCHEME) {
        ImageRef::from(raw)
    } else {
        ImageRef::new(expand_tilde(raw).to_string_lossy().to_string())
    }
}
