use super::report_migration;
use crate::cli::parser::{BackupAction, Commands};
use crate::config::Config;
use crate::core::backup::{BackupLogic, ExportOptions};
use crate::core::migration::migrate_all;
use crate::db::log::ttlog_quiet;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::files::PrivateFileStore;
use crate::store::{Repository, SqlitePreferences};
use crate::ui::messages::{success, warning};
use crate::utils::path::expand_tilde;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Backup { action } = cmd else {
        return Ok(());
    };

    let pool = DbPool::new(&cfg.database)?;
    let repo = Repository::new(SqlitePreferences::new(&pool.conn));

    match action {
        BackupAction::Export {
            file,
            compress,
            force,
        } => {
            let written = BackupLogic::export(
                &repo,
                &expand_tilde(file),
                ExportOptions {
                    compress: *compress,
                    force: *force,
                },
            )?;
            let target = written.to_string_lossy();
            ttlog_quiet(&pool.conn, "backup", &target, "backup exported");
            success(format!("Backup created: {}", target));
        }

        BackupAction::Import { file } => {
            let report = BackupLogic::import(&repo, &expand_tilde(file))?;
            ttlog_quiet(&pool.conn, "import", file, &report.summary());

            // Restored records may still point at pictures outside private storage.
            let files = PrivateFileStore::from_config(cfg);
            report_migration(&pool.conn, &migrate_all(&repo, &files)?);

            if report.restored.is_empty() {
                warning(format!("Nothing restored from {} ({})", file, report.summary()));
            } else {
                success(format!("Backup imported: {}", report.summary()));
            }
            if !report.skipped.is_empty() {
                warning("Unreadable sections were skipped; the stored data was kept.");
            }
        }
    }

    Ok(())
}
