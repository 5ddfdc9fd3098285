//! Visitor log: add, edit, delete, duplicate, and the saved-people templates.
//!
//! [`VisitorBook`] is the per-session view of the visitor screen. It loads
//! (and migrates) both collections once, then every mutation builds a new
//! collection, persists it, and only then replaces the snapshot it holds.

use super::migration::{MigrationReport, migrate_visit_records};
use super::partition::Partition;
use super::reminder::{Reminder, ReminderScheduler};
use crate::errors::{AppError, AppResult};
use crate::files::{ImageRef, PrivateFileStore, VISITOR_IMAGES};
use crate::models::{SavedPerson, Visitor, new_id};
use crate::store::{PreferenceStore, Repository};
use crate::ui::messages::warning;
use crate::utils::{date, time};
use chrono::{NaiveDate, NaiveTime};

/// Input of the "Add visitor" form. Every field may be missing; `add`
/// decides what is acceptable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewVisit {
    pub name: String,
    pub image: Option<ImageRef>,
    pub arrival: Option<NaiveTime>,
    pub departure: Option<NaiveTime>,
    /// Defaults to the book's reference day.
    pub date: Option<NaiveDate>,
    pub save_for_reuse: bool,
}

/// Input of the "Edit visit" form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitEdit {
    pub name: String,
    pub arrival: Option<NaiveTime>,
    pub departure: Option<NaiveTime>,
}

impl VisitEdit {
    /// Form prefilled from the stored visit; unreadable times come back empty.
    pub fn from_visitor(v: &Visitor) -> Self {
        Self {
            name: v.name.clone(),
            arrival: v.arrival_time(),
            departure: v.departure_time(),
        }
    }
}

pub struct VisitorBook<'a, S, R> {
    repo: &'a Repository<S>,
    files: &'a PrivateFileStore,
    reminders: &'a R,
    lead_minutes: i64,
    today: NaiveDate,
    visitors: Vec<Visitor>,
    saved: Vec<SavedPerson>,
    migration: MigrationReport,
}

impl<'a, S: PreferenceStore, R: ReminderScheduler> VisitorBook<'a, S, R> {
    pub fn open(
        repo: &'a Repository<S>,
        files: &'a PrivateFileStore,
        reminders: &'a R,
        lead_minutes: i64,
        today: NaiveDate,
    ) -> AppResult<Self> {
        let (visitors, saved, migration) = migrate_visit_records(repo, files)?;

        Ok(Self {
            repo,
            files,
            reminders,
            lead_minutes,
            today,
            visitors,
            saved,
            migration,
        })
    }

    pub fn visitors(&self) -> &[Visitor] {
        &self.visitors
    }

    pub fn saved_people(&self) -> &[SavedPerson] {
        &self.saved
    }

    pub fn migration(&self) -> &MigrationReport {
        &self.migration
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn visitor(&self, id: &str) -> AppResult<&Visitor> {
        let idx = find_index(&self.visitors, id, |v| &v.id, "Visitor")?;
        Ok(&self.visitors[idx])
    }

    pub fn saved_person(&self, id: &str) -> AppResult<&SavedPerson> {
        let idx = find_index(&self.saved, id, |p| &p.id, "Saved person")?;
        Ok(&self.saved[idx])
    }

    pub fn partition(&self, upcoming_limit: usize, previous_limit: usize) -> Partition {
        Partition::split(&self.visitors, self.today, upcoming_limit, previous_limit)
    }

    /// Today's visits ordered by arrival, as the dashboard shows them.
    pub fn todays_visits(&self) -> Vec<Visitor> {
        let today = date::format_date(self.today);
        let mut out: Vec<Visitor> = self
            .visitors
            .iter()
            .filter(|v| v.date == today)
            .cloned()
            .collect();
        out.sort_by(|a, b| a.arrival.cmp(&b.arrival));
        out
    }

    /// Register a visit. The ID image is copied into private storage first;
    /// if that fails nothing is saved.
    pub fn add(&mut self, req: NewVisit) -> AppResult<Visitor> {
        let name = req.name.trim();
        if name.is_empty() {
            return Err(AppError::Validation("Visitor name is required".into()));
        }
        let image = match req.image {
            Some(ref r) if !r.is_blank() => r,
            _ => return Err(AppError::Validation("Visitor ID image is required".into())),
        };
        let arrival = req
            .arrival
            .ok_or_else(|| AppError::Validation("Arrival time is required".into()))?;
        let departure = req
            .departure
            .ok_or_else(|| AppError::Validation("Departure time is required".into()))?;

        let private = self.files.ensure_private(image, VISITOR_IMAGES)?;

        let visitor = Visitor::new(
            name,
            private.clone(),
            arrival,
            departure,
            req.date.unwrap_or(self.today),
        );

        let mut visitors = self.visitors.clone();
        visitors.push(visitor.clone());
        self.repo.save_visitors(&visitors)?;
        self.visitors = visitors;

        if req.save_for_reuse && !self.saved.iter().any(|p| p.same_as(name, &private)) {
            let mut saved = self.saved.clone();
            saved.push(SavedPerson::new(name, private));
            self.repo.save_saved_people(&saved)?;
            self.saved = saved;
        }

        self.schedule(&visitor);
        Ok(visitor)
    }

    /// Update name and times of a visit and move its reminder.
    pub fn edit(&mut self, id: &str, edit: VisitEdit) -> AppResult<Visitor> {
        let name = edit.name.trim();
        if name.is_empty() {
            return Err(AppError::Validation("Visitor name is required".into()));
        }
        let (Some(arrival), Some(departure)) = (edit.arrival, edit.departure) else {
            return Err(AppError::Validation(
                "Arrival and departure times are required".into(),
            ));
        };

        let idx = find_index(&self.visitors, id, |v| &v.id, "Visitor")?;

        let updated = Visitor {
            name: name.to_string(),
            arrival: time::store_time(arrival),
            departure: time::store_time(departure),
            ..self.visitors[idx].clone()
        };

        let mut visitors = self.visitors.clone();
        visitors[idx] = updated.clone();
        self.repo.save_visitors(&visitors)?;
        self.visitors = visitors;

        self.schedule(&updated);
        Ok(updated)
    }

    /// Remove a visit. A reminder already scheduled for it stays scheduled.
    pub fn delete(&mut self, id: &str) -> AppResult<Visitor> {
        let idx = find_index(&self.visitors, id, |v| &v.id, "Visitor")?;

        let mut visitors = self.visitors.clone();
        let removed = visitors.remove(idx);
        self.repo.save_visitors(&visitors)?;
        self.visitors = visitors;

        Ok(removed)
    }

    /// Same visitor, same times, one day later, under a new id.
    pub fn duplicate_for_tomorrow(&mut self, id: &str) -> AppResult<Visitor> {
        let idx = find_index(&self.visitors, id, |v| &v.id, "Visitor")?;
        let base = &self.visitors[idx];

        let next = date::next_day(&base.date)
            .ok_or_else(|| AppError::InvalidDate(base.date.clone()))?;

        let copy = Visitor {
            id: new_id(),
            date: next,
            ..base.clone()
        };

        let mut visitors = self.visitors.clone();
        visitors.push(copy.clone());
        self.repo.save_visitors(&visitors)?;
        self.visitors = visitors;

        self.schedule(&copy);
        Ok(copy)
    }

    /// Rename a saved person and optionally give them a new ID image.
    pub fn edit_saved(
        &mut self,
        id: &str,
        name: &str,
        image: Option<&ImageRef>,
    ) -> AppResult<SavedPerson> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::Validation("Name is required".into()));
        }

        let idx = find_index(&self.saved, id, |p| &p.id, "Saved person")?;

        let id_image_uri = match image {
            Some(r) => self.files.ensure_private(r, VISITOR_IMAGES)?,
            None => self.saved[idx].id_image_uri.clone(),
        };

        let updated = SavedPerson {
            id: self.saved[idx].id.clone(),
            name: name.to_string(),
            id_image_uri,
        };

        let mut saved = self.saved.clone();
        saved[idx] = updated.clone();
        self.repo.save_saved_people(&saved)?;
        self.saved = saved;

        Ok(updated)
    }

    pub fn delete_saved(&mut self, id: &str) -> AppResult<SavedPerson> {
        let idx = find_index(&self.saved, id, |p| &p.id, "Saved person")?;

        let mut saved = self.saved.clone();
        let removed = saved.remove(idx);
        self.repo.save_saved_people(&saved)?;
        self.saved = saved;

        Ok(removed)
    }

    /// "Add visitor" form prefilled from a saved person: name and image set,
    /// times left for the resident, no second copy saved for reuse.
    pub fn prefill(&self, saved_id: &str) -> AppResult<NewVisit> {
        let person = self.saved_person(saved_id)?;
        Ok(NewVisit {
            name: person.name.clone(),
            image: Some(person.id_image_uri.clone()),
            save_for_reuse: false,
            ..Default::default()
        })
    }

    /// Best effort: a reminder that cannot be scheduled never undoes the
    /// change that asked for it.
    fn schedule(&self, v: &Visitor) {
        let Some(reminder) = Reminder::for_visitor(v, self.lead_minutes, self.today) else {
            warning(format!(
                "No reminder for {}: departure time '{}' is not valid",
                v.name, v.departure
            ));
            return;
        };

        if let Err(e) = self.reminders.schedule(&reminder) {
            warning(format!("Reminder not scheduled for {}: {}", v.name, e));
        }
    }
}

/// Locate a record by full id, or by an unambiguous id prefix as typed on
/// the command line.
fn find_index<T>(
    items: &[T],
    id: &str,
    id_of: impl Fn(&T) -> &String,
    what: &str,
) -> AppResult<usize> {
    let id = id.trim();
    if id.is_empty() {
        return Err(AppError::NotFound(format!("{} ''", what)));
    }

    if let Some(idx) = items.iter().position(|it| id_of(it) == id) {
        return Ok(idx);
    }

    let matches: Vec<usize> = items
        .iter()
        .enumerate()
        .filter(|(_, it)| id_of(it).starts_with(id))
        .map(|(i, _)| i)
        .collect();

    match matches.as_slice() {
        [idx] => Ok(*idx),
        [] => Err(AppError::NotFound(format!("{} '{}'", what, id))),
        _ => Err(AppError::Validation(format!(
            "Id prefix '{}' matches {} records; type more characters",
            id,
            matches.len()
        ))),
    }
}
