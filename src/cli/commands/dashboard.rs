use super::{report_migration, short_id};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::profile::ProfileLogic;
use crate::core::reminder::SqliteReminders;
use crate::core::visitors::VisitorBook;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::files::PrivateFileStore;
use crate::store::{Repository, SqlitePreferences};
use crate::ui::messages::{header, info};
use crate::utils::date;
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if !matches!(cmd, Commands::Dashboard) {
        return Ok(());
    }

    let pool = DbPool::new(&cfg.database)?;
    let repo = Repository::new(SqlitePreferences::new(&pool.conn));
    let files = PrivateFileStore::from_config(cfg);
    let reminders = SqliteReminders::new(&pool.conn);

    let (profile, id_moved) = ProfileLogic::open(&repo, &files)?;
    let book = VisitorBook::open(
        &repo,
        &files,
        &reminders,
        cfg.reminder_lead_minutes,
        date::today(),
    )?;

    let mut report = book.migration().clone();
    report.profile_id = id_moved;
    report_migration(&pool.conn, &report);

    if profile.name.trim().is_empty() {
        header("Welcome");
    } else {
        header(format!("Welcome, {}", profile.name));
    }
    if !profile.apartment.trim().is_empty() {
        println!("🏠 Apartment {}", profile.apartment);
    }
    println!();

    let todays = book.todays_visits();
    println!("👥 Today's visitors ({})", date::display_date(&date::format_date(book.today())));

    if todays.is_empty() {
        info("No visitors today.");
    } else {
        let mut table = Table::new(vec![
            Column::new("ID", 8),
            Column::new("Name", 28),
            Column::new("Arrival", 8),
            Column::new("Departure", 9),
        ]);
        for v in &todays {
            let (arrival, departure) = v.display_times();
            table.add_row(vec![short_id(&v.id), v.name.clone(), arrival, departure]);
        }
        print!("{}", table.render());
    }

    println!();
    println!("📞 Security    : {}", cfg.security_phone);
    println!("🔧 Maintenance : {}", cfg.maintenance_phone);

    Ok(())
}
