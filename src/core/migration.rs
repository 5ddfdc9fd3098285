//! One-time move of externally referenced images into private storage.
//!
//! Runs every time a screen loads its records. A reference is rewritten only
//! when it is foreign and still readable; everything else is left as is, so a
//! second run over already migrated data changes nothing and persists
//! nothing.

use crate::errors::AppResult;
use crate::files::{ID_IMAGES, ImageRef, PrivateFileStore, VISITOR_IMAGES};
use crate::models::{Profile, SavedPerson, Visitor, new_id};
use crate::store::{PreferenceStore, Repository};
use crate::ui::messages::warning;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MigrationReport {
    pub profile_id: bool,
    pub visitors: usize,
    pub saved_people: usize,
    /// Records that were stored without an id and received one.
    pub ids_assigned: usize,
}

impl MigrationReport {
    pub fn is_empty(&self) -> bool {
        !self.profile_id && self.visitors == 0 && self.saved_people == 0 && self.ids_assigned == 0
    }

    pub fn summary(&self) -> String {
        format!(
            "my id: {}, visitors: {}, saved people: {}, ids assigned: {}",
            if self.profile_id { "moved" } else { "unchanged" },
            self.visitors,
            self.saved_people,
            self.ids_assigned
        )
    }
}

/// Private counterpart of `r`, or `r` itself when it is already private,
/// unreadable, or the copy fails.
pub fn migrate_reference(files: &PrivateFileStore, r: &ImageRef, subdir: &str) -> ImageRef {
    if r.is_blank() || files.is_own_reference(r) || !files.is_readable(r) {
        return r.clone();
    }

    match files.ensure_private(r, subdir) {
        Ok(private) => private,
        Err(e) => {
            warning(format!("Image left in place: {}", e));
            r.clone()
        }
    }
}

/// Migrate the personal ID image. Returns the (possibly updated) profile and
/// whether it was persisted.
pub fn migrate_profile<S: PreferenceStore>(
    repo: &Repository<S>,
    files: &PrivateFileStore,
) -> AppResult<(Profile, bool)> {
    let profile = repo.load_profile()?;
    let fixed = migrate_reference(files, &profile.my_id_uri, ID_IMAGES);

    if fixed == profile.my_id_uri {
        return Ok((profile, false));
    }

    let updated = Profile {
        my_id_uri: fixed,
        ..profile
    };
    repo.save_profile(&updated)?;
    Ok((updated, true))
}

/// Migrate visitor and saved-person ID images, and give records stored
/// without an id a permanent one. Each collection is written back at most
/// once, and only when something in it changed.
pub fn migrate_visit_records<S: PreferenceStore>(
    repo: &Repository<S>,
    files: &PrivateFileStore,
) -> AppResult<(Vec<Visitor>, Vec<SavedPerson>, MigrationReport)> {
    let mut report = MigrationReport::default();

    let mut visitors = repo.load_visitors()?;
    let mut visitors_changed = false;
    for v in visitors.iter_mut() {
        if v.id.trim().is_empty() {
            v.id = new_id();
            report.ids_assigned += 1;
            visitors_changed = true;
        }
        let fixed = migrate_reference(files, &v.id_image_uri, VISITOR_IMAGES);
        if fixed != v.id_image_uri {
            v.id_image_uri = fixed;
            report.visitors += 1;
            visitors_changed = true;
        }
    }

    let mut people = repo.load_saved_people()?;
    let mut people_changed = false;
    for p in people.iter_mut() {
        if p.id.trim().is_empty() {
            p.id = new_id();
            report.ids_assigned += 1;
            people_changed = true;
        }
        let fixed = migrate_reference(files, &p.id_image_uri, VISITOR_IMAGES);
        if fixed != p.id_image_uri {
            p.id_image_uri = fixed;
            report.saved_people += 1;
            people_changed = true;
        }
    }

    if visitors_changed {
        repo.save_visitors(&visitors)?;
    }
    if people_changed {
        repo.save_saved_people(&people)?;
    }

    Ok((visitors, people, report))
}

/// Both passes, as run at start-up by commands that touch every record.
pub fn migrate_all<S: PreferenceStore>(
    repo: &Repository<S>,
    files: &PrivateFileStore,
) -> AppResult<MigrationReport> {
    let (_, profile_id) = migrate_profile(repo, files)?;
    let (_, _, mut report) = migrate_visit_records(repo, files)?;
    report.profile_id = profile_id;
    Ok(report)
}
