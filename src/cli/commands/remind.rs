use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::reminder::{SqliteReminders, display_fire_at, local_now};
use crate::db::log::ttlog_quiet;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{header, info, notify};
use crate::utils::table::{Column, Table};
use crate::utils::time;
use chrono::NaiveDateTime;

const AT_FORMATS: &[&str] = &["%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"];

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Remind { pending, fire, at } = cmd else {
        return Ok(());
    };

    let pool = DbPool::new(&cfg.database)?;
    let reminders = SqliteReminders::new(&pool.conn);

    if *pending {
        let list = reminders.pending()?;
        if list.is_empty() {
            info("No pending reminders.");
        } else {
            header("Pending reminders");
            let mut table = Table::new(vec![
                Column::new("Fires at", 16),
                Column::new("Visitor", 28),
                Column::new("Leaves", 8),
            ]);
            for r in &list {
                table.add_row(vec![
                    display_fire_at(r),
                    r.name.clone(),
                    time::display_time(&r.departure),
                ]);
            }
            println!("{}", table.render());
        }
    }

    if *fire {
        let now = match at {
            Some(raw) => parse_at(raw)?,
            None => local_now(),
        };

        let fired = reminders.fire_due(now)?;
        if fired.is_empty() {
            info("No reminders due.");
        }
        for n in &fired {
            notify(&n.title, &n.text);
            ttlog_quiet(&pool.conn, "remind", &n.title, &n.text);
        }
    }

    if !*pending && !*fire {
        info("Nothing to do: use --pending or --fire.");
    }

    Ok(())
}

fn parse_at(raw: &str) -> AppResult<NaiveDateTime> {
    AT_FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(raw.trim(), f).ok())
        .ok_or_else(|| AppError::InvalidDate(raw.to_string()))
}
