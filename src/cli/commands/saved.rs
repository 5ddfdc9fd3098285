use super::{image_arg, report_migration, short_id};
use crate::cli::parser::{Commands, SavedAction};
use crate::config::Config;
use crate::core::reminder::SqliteReminders;
use crate::core::visitors::VisitorBook;
use crate::db::log::ttlog_quiet;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::files::PrivateFileStore;
use crate::store::{Repository, SqlitePreferences};
use crate::ui::messages::{header, info, success};
use crate::utils::date;
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Saved { action } = cmd else {
        return Ok(());
    };

    let pool = DbPool::new(&cfg.database)?;
    let repo = Repository::new(SqlitePreferences::new(&pool.conn));
    let files = PrivateFileStore::from_config(cfg);
    let reminders = SqliteReminders::new(&pool.conn);

    let mut book = VisitorBook::open(
        &repo,
        &files,
        &reminders,
        cfg.reminder_lead_minutes,
        date::today(),
    )?;
    report_migration(&pool.conn, book.migration());

    match action {
        SavedAction::List => {
            if book.saved_people().is_empty() {
                info("No saved visitors. Use `visitors add --save` to keep one.");
                return Ok(());
            }

            header("Saved visitors");
            let mut table = Table::new(vec![
                Column::new("ID", 8),
                Column::new("Name", 32),
                Column::new("ID image", 9),
            ]);
            for p in book.saved_people() {
                let image = if files.is_readable(&p.id_image_uri) {
                    "ok"
                } else {
                    "missing"
                };
                table.add_row(vec![short_id(&p.id), p.name.clone(), image.to_string()]);
            }
            println!("{}", table.render());
        }

        SavedAction::Edit { id, name, image } => {
            let current = book.saved_person(id)?.name.clone();
            let name = name.clone().unwrap_or(current);
            let image = image.as_deref().map(image_arg);

            let p = book.edit_saved(id, &name, image.as_ref())?;
            ttlog_quiet(&pool.conn, "saved_edit", &p.name, p.id_image_uri.as_str());
            success(format!("Saved visitor updated: {}", p.name));
        }

        SavedAction::Del { id } => {
            let p = book.delete_saved(id)?;
            ttlog_quiet(&pool.conn, "saved_del", &p.name, &p.id);
            success(format!("Saved visitor deleted: {}", p.name));
        }
    }

    Ok(())
}
