//! Backup and restore of everything the resident entered.
//!
//! The backup is a single JSON object with four sections: `profile`,
//! `contacts`, `visitors`, `saved_people`. Restoring is per section: each
//! section that is present and readable replaces the stored collection,
//! anything else is left alone.

use crate::errors::{AppError, AppResult};
use crate::models::{Contact, Profile, SavedPerson, Visitor};
use crate::store::{PreferenceStore, Repository};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use zip::write::FileOptions;
use zip::{ZipArchive, ZipWriter};

pub const SECTION_PROFILE: &str = "profile";
pub const SECTION_CONTACTS: &str = "contacts";
pub const SECTION_VISITORS: &str = "visitors";
pub const SECTION_SAVED_PEOPLE: &str = "saved_people";

pub const DEFAULT_BACKUP_NAME: &str = "compound_backup.json";

const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

#[derive(Serialize)]
struct BackupDocument<'a> {
    profile: &'a Profile,
    contacts: &'a [Contact],
    visitors: &'a [Visitor],
    saved_people: &'a [SavedPerson],
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ExportOptions {
    pub compress: bool,
    pub force: bool,
}

/// What an import did, section by section.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ImportReport {
    /// Sections found, parsed and persisted.
    pub restored: Vec<&'static str>,
    /// Sections found but not readable; stored data kept.
    pub skipped: Vec<&'static str>,
}

impl ImportReport {
    pub fn summary(&self) -> String {
        let list = |v: &[&str]| {
            if v.is_empty() {
                "none".to_string()
            } else {
                v.join(", ")
            }
        };
        format!(
            "restored: {}; skipped: {}",
            list(&self.restored),
            list(&self.skipped)
        )
    }
}

pub struct BackupLogic;

impl BackupLogic {
    /// Serialize all four collections into one document.
    pub fn document_json<S: PreferenceStore>(repo: &Repository<S>) -> AppResult<String> {
        let profile = repo.load_profile()?;
        let contacts = repo.load_contacts()?;
        let visitors = repo.load_visitors()?;
        let saved_people = repo.load_saved_people()?;

        let doc = BackupDocument {
            profile: &profile,
            contacts: &contacts,
            visitors: &visitors,
            saved_people: &saved_people,
        };
        Ok(serde_json::to_string_pretty(&doc)?)
    }

    /// Write the backup to `dest` (or its `.zip` sibling when compressing).
    /// The file is written next to the target and renamed into place, so a
    /// failed export never leaves a truncated backup behind.
    pub fn export<S: PreferenceStore>(
        repo: &Repository<S>,
        dest: &Path,
        opts: ExportOptions,
    ) -> AppResult<PathBuf> {
        let final_path = if opts.compress {
            dest.with_extension("zip")
        } else {
            dest.to_path_buf()
        };

        if final_path.exists() && !opts.force {
            return Err(AppError::Backup(format!(
                "'{}' already exists (use --force to overwrite)",
                final_path.display()
            )));
        }

        if let Some(parent) = final_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let json = Self::document_json(repo)?;
        let tmp = temp_sibling(&final_path);

        let written = if opts.compress {
            let entry = dest
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| DEFAULT_BACKUP_NAME.to_string());
            write_zip(&tmp, &entry, json.as_bytes())
        } else {
            fs::write(&tmp, json.as_bytes()).map_err(AppError::from)
        };

        if let Err(e) = written.and_then(|_| fs::rename(&tmp, &final_path).map_err(AppError::from))
        {
            let _ = fs::remove_file(&tmp);
            return Err(e);
        }

        Ok(final_path)
    }

    /// Restore from a backup file (plain JSON or zipped).
    pub fn import<S: PreferenceStore>(repo: &Repository<S>, src: &Path) -> AppResult<ImportReport> {
        let bytes = fs::read(src)?;

        let json = if bytes.starts_with(ZIP_MAGIC) {
            read_first_zip_entry(&bytes)?
        } else {
            String::from_utf8(bytes)
                .map_err(|_| AppError::Backup(format!("'{}' is not a text file", src.display())))?
        };

        Self::restore_from_str(repo, &json)
    }

    pub fn restore_from_str<S: PreferenceStore>(
        repo: &Repository<S>,
        json: &str,
    ) -> AppResult<ImportReport> {
        let root: Value = serde_json::from_str(json)
            .map_err(|e| AppError::Backup(format!("not a backup document: {}", e)))?;
        let Some(root) = root.as_object() else {
            return Err(AppError::Backup(
                "not a backup document: expected a JSON object".into(),
            ));
        };

        let mut report = ImportReport::default();

        if let Some(profile) = section::<Profile>(root, SECTION_PROFILE, &mut report) {
            repo.save_profile(&profile)?;
        }
        if let Some(contacts) = section::<Vec<Contact>>(root, SECTION_CONTACTS, &mut report) {
            repo.save_contacts(&contacts)?;
        }
        if let Some(visitors) = section::<Vec<Visitor>>(root, SECTION_VISITORS, &mut report) {
            repo.save_visitors(&visitors)?;
        }
        if let Some(people) = section::<Vec<SavedPerson>>(root, SECTION_SAVED_PEOPLE, &mut report)
        {
            repo.save_saved_people(&people)?;
        }

        Ok(report)
    }
}

/// Parse one section. Missing or null sections are ignored; unreadable ones
/// are reported as skipped.
fn section<T: DeserializeOwned>(
    root: &Map<String, Value>,
    name: &'static str,
    report: &mut ImportReport,
) -> Option<T> {
    let value = root.get(name).filter(|v| !v.is_null())?;

    match serde_json::from_value::<T>(value.clone()) {
        Ok(parsed) => {
            report.restored.push(name);
            Some(parsed)
        }
        Err(_) => {
            report.skipped.push(name);
            None
        }
    }
}

fn temp_sibling(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| DEFAULT_BACKUP_NAME.to_string());
    path.with_file_name(format!(".{}.tmp", name))
}

fn write_zip(path: &Path, entry: &str, content: &[u8]) -> AppResult<()> {
    let file = fs::File::create(path)?;
    let mut zip = ZipWriter::new(file);

    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    zip.start_file(entry, options)?;
    zip.write_all(content)?;
    zip.finish()?;
    Ok(())
}

fn read_first_zip_entry(bytes: &[u8]) -> AppResult<String> {
    let mut archive = ZipArchive::new(std::io::Cursor::new(bytes))?;
    if archive.is_empty() {
        return Err(AppError::Backup("backup archive is empty".into()));
    }

    let mut entry = archive.by_index(0)?;
    let mut json = String::new();
    entry.read_to_string(&mut json)?;
    Ok(json)
}
