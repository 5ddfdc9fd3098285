//! Departure reminders.
//!
//! A reminder is a one-shot wake-up `lead` minutes before a visitor's
//! departure. Scheduling is keyed by visitor id (rescheduling replaces the
//! pending wake-up); firing collapses reminders that share the same
//! (name, departure) slot into a single notification.
//!
//! Deleting a visitor does not cancel its reminder.

use crate::errors::AppResult;
use crate::models::Visitor;
use crate::utils::{date, time};
use chrono::{Duration, Local, NaiveDate, NaiveDateTime};
use rusqlite::{Connection, params};
use std::collections::HashSet;

const FIRE_AT_FMT: &str = "%Y-%m-%dT%H:%M:%S";

pub const NOTIFICATION_TITLE: &str = "Visitor departing soon";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reminder {
    pub visitor_id: String,
    pub name: String,
    /// Departure as stored, "HH:MM".
    pub departure: String,
    pub fire_at: NaiveDateTime,
}

impl Reminder {
    /// Reminder for `v`, or None when its departure time is unreadable.
    /// An unreadable visit date falls back to `today`.
    pub fn for_visitor(v: &Visitor, lead_minutes: i64, today: NaiveDate) -> Option<Self> {
        let departure = v.departure_time()?;
        let day = v.visit_date().unwrap_or(today);
        let fire_at = day.and_time(departure) - Duration::minutes(lead_minutes);

        Some(Self {
            visitor_id: v.id.clone(),
            name: v.name.clone(),
            departure: time::store_time(departure),
            fire_at,
        })
    }

    /// Notification slot: same name and time share one notification.
    pub fn slot(&self) -> (String, String) {
        (self.name.clone(), self.departure.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub text: String,
}

impl Notification {
    pub fn departing(name: &str, departure: &str) -> Self {
        let name = if name.trim().is_empty() { "Visitor" } else { name };
        Self {
            title: NOTIFICATION_TITLE.to_string(),
            text: format!("{} is scheduled to leave at {}", name, departure),
        }
    }
}

/// Something able to register a future wake-up.
pub trait ReminderScheduler {
    fn schedule(&self, reminder: &Reminder) -> AppResult<()>;
}

/// Wake-ups persisted in the `reminders` table and fired by `remind --fire`.
pub struct SqliteReminders<'c> {
    conn: &'c Connection,
}

impl<'c> SqliteReminders<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    /// Reminders that have not fired yet, soonest first.
    pub fn pending(&self) -> AppResult<Vec<Reminder>> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT visitor_id, name, departure, fire_at FROM reminders
             WHERE fired = 0 ORDER BY fire_at ASC",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
            ))
        })?;

        let mut out = Vec::new();
        for r in rows {
            let (visitor_id, name, departure, raw_fire_at) = r?;
            // Rows are written by `schedule` only; skip anything unreadable.
            if let Ok(fire_at) = NaiveDateTime::parse_from_str(&raw_fire_at, FIRE_AT_FMT) {
                out.push(Reminder {
                    visitor_id,
                    name,
                    departure,
                    fire_at,
                });
            }
        }
        Ok(out)
    }

    /// Fire every reminder due at `now`: one notification per slot, and
    /// each fired reminder is marked so it never fires again.
    pub fn fire_due(&self, now: NaiveDateTime) -> AppResult<Vec<Notification>> {
        let due: Vec<Reminder> = self
            .pending()?
            .into_iter()
            .filter(|r| r.fire_at <= now)
            .collect();

        let mut seen = HashSet::new();
        let mut notifications = Vec::new();

        for r in &due {
            if seen.insert(r.slot()) {
                notifications.push(Notification::departing(&r.name, &r.departure));
            }
            self.conn.execute(
                "UPDATE reminders SET fired = 1 WHERE visitor_id = ?1",
                [&r.visitor_id],
            )?;
        }

        Ok(notifications)
    }
}

impl ReminderScheduler for SqliteReminders<'_> {
    fn schedule(&self, reminder: &Reminder) -> AppResult<()> {
        let mut stmt = self.conn.prepare_cached(
            "INSERT INTO reminders (visitor_id, name, departure, fire_at, fired, created_at)
             VALUES (?1, ?2, ?3, ?4, 0, ?5)
             ON CONFLICT(visitor_id) DO UPDATE SET
                name = excluded.name,
                departure = excluded.departure,
                fire_at = excluded.fire_at,
                fired = 0",
        )?;
        stmt.execute(params![
            reminder.visitor_id,
            reminder.name,
            reminder.departure,
            reminder.fire_at.format(FIRE_AT_FMT).to_string(),
            Local::now().to_rfc3339(),
        ])?;
        Ok(())
    }
}

/// Local wall-clock "now", the reference point for firing.
pub fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Convenience for listings: "2026-10-18 10:50".
pub fn display_fire_at(r: &Reminder) -> String {
    format!(
        "{} {}",
        date::format_date(r.fire_at.date()),
        r.fire_at.format(time::STORE_FMT)
    )
}
