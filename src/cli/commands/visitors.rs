use super::{image_arg, report_migration, short_id};
use crate::cli::parser::{Commands, VisitorsAction};
use crate::config::Config;
use crate::core::notice;
use crate::core::reminder::SqliteReminders;
use crate::core::visitors::{NewVisit, VisitEdit, VisitorBook};
use crate::db::log::ttlog_quiet;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::files::PrivateFileStore;
use crate::models::Visitor;
use crate::store::{Repository, SqlitePreferences};
use crate::ui::messages::{header, info, success, warning};
use crate::utils::table::{Column, Table};
use crate::utils::{date, time};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Visitors { action } = cmd else {
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
        VisitorsAction::List { all } => {
            let (up, prev) = if *all {
                (usize::MAX, usize::MAX)
            } else {
                (cfg.upcoming_limit, cfg.previous_limit)
            };
            let p = book.partition(up, prev);

            if p.is_empty() {
                info("No visitors yet.");
                return Ok(());
            }

            print_section("Today", &p.today, p.today.len(), &files);
            print_section("Upcoming", p.upcoming_shown(), p.upcoming.len(), &files);
            print_section("Previous", p.previous_shown(), p.previous.len(), &files);
        }

        VisitorsAction::Add {
            name,
            image,
            arrival,
            departure,
            date: day,
            save,
            from_saved,
        } => {
            let mut req = match from_saved {
                Some(id) => book.prefill(id)?,
                None => NewVisit::default(),
            };
            if let Some(n) = name {
                req.name = n.clone();
            }
            if let Some(i) = image {
                req.image = Some(image_arg(i));
            }
            req.arrival = time::parse_optional_time(arrival.as_ref())?;
            req.departure = time::parse_optional_time(departure.as_ref())?;
            req.date = parse_optional_date(day.as_deref())?;
            req.save_for_reuse = *save;

            let saved_before = book.saved_people().len();
            let v = book.add(req)?;

            ttlog_quiet(&pool.conn, "add", &v.name, &describe(&v));
            success(format!("Visitor added: {}", describe(&v)));
            println!("🆔 {}", v.id);
            if *save {
                if book.saved_people().len() > saved_before {
                    info(format!("{} saved for reuse.", v.name));
                } else {
                    info(format!("{} is already saved.", v.name));
                }
            }
        }

        VisitorsAction::Edit {
            id,
            name,
            arrival,
            departure,
        } => {
            let mut edit = VisitEdit::from_visitor(book.visitor(id)?);
            if let Some(n) = name {
                edit.name = n.clone();
            }
            if let Some(a) = time::parse_optional_time(arrival.as_ref())? {
                edit.arrival = Some(a);
            }
            if let Some(d) = time::parse_optional_time(departure.as_ref())? {
                edit.departure = Some(d);
            }

            let v = book.edit(id, edit)?;
            ttlog_quiet(&pool.conn, "edit", &v.name, &describe(&v));
            success(format!("Visitor updated: {}", describe(&v)));
        }

        VisitorsAction::Del { id } => {
            let v = book.delete(id)?;
            ttlog_quiet(&pool.conn, "del", &v.name, &describe(&v));
            success(format!("Visitor deleted: {}", describe(&v)));
        }

        VisitorsAction::Dup { id } => {
            let v = book.duplicate_for_tomorrow(id)?;
            ttlog_quiet(&pool.conn, "dup", &v.name, &describe(&v));
            success(format!("Visitor duplicated: {}", describe(&v)));
            println!("🆔 {}", v.id);
        }

        VisitorsAction::Notice { id } => {
            let profile = repo.load_profile()?;
            if profile.apartment.trim().is_empty() {
                warning("Apartment is not set (profile set --apartment).");
            }

            let v = book.visitor(id)?;
            let n = notice::compose(&profile, v, &files, &cfg.security_email)?;

            header("Visit notice");
            println!("To         : {}", n.to);
            println!("Subject    : {}", n.subject);
            println!("Attachment : {}", n.attachment.display());
            println!();
            println!("{}", n.body);
        }
    }

    Ok(())
}

fn parse_optional_date(input: Option<&str>) -> AppResult<Option<chrono::NaiveDate>> {
    input
        .map(|d| date::parse_date(d).ok_or_else(|| AppError::InvalidDate(d.to_string())))
        .transpose()
}

fn describe(v: &Visitor) -> String {
    let (arrival, departure) = v.display_times();
    format!(
        "{} on {} from {} to {}",
        v.name,
        date::display_date(&v.date),
        arrival,
        departure
    )
}

fn print_section(title: &str, shown: &[Visitor], total: usize, files: &PrivateFileStore) {
    if total == 0 {
        return;
    }

    if shown.len() < total {
        header(format!("{} (showing {} of {})", title, shown.len(), total));
    } else {
        header(format!("{} ({})", title, total));
    }

    let mut table = Table::new(vec![
        Column::new("ID", 8),
        Column::new("Name", 28),
        Column::new("Date", 12),
        Column::new("Arrival", 8),
        Column::new("Departure", 9),
        Column::new("ID image", 9),
    ]);

    for v in shown {
        let (arrival, departure) = v.display_times();
        let image = if files.is_readable(&v.id_image_uri) {
            "ok"
        } else {
            "missing"
        };
        table.add_row(vec![
            short_id(&v.id),
            v.name.clone(),
            date::display_date(&v.date),
            arrival,
            departure,
            image.to_string(),
        ]);
    }

    println!("{}", table.render());
}
