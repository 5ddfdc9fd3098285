//! Resident profile and the personal ID card.

use super::migration::migrate_profile;
use crate::errors::{AppError, AppResult};
use crate::files::{ID_IMAGES, ImageRef, PrivateFileStore};
use crate::models::Profile;
use crate::store::{PreferenceStore, Repository};
use std::path::PathBuf;

pub struct ProfileLogic;

impl ProfileLogic {
    /// Load the profile, moving a foreign ID image into private storage.
    /// The flag tells whether the ID image was moved.
    pub fn open<S: PreferenceStore>(
        repo: &Repository<S>,
        files: &PrivateFileStore,
    ) -> AppResult<(Profile, bool)> {
        migrate_profile(repo, files)
    }

    pub fn update<S: PreferenceStore>(
        repo: &Repository<S>,
        name: Option<&str>,
        apartment: Option<&str>,
    ) -> AppResult<Profile> {
        let current = repo.load_profile()?;
        let updated = Profile {
            name: name.map_or_else(|| current.name.clone(), |s| s.trim().to_string()),
            apartment: apartment.map_or_else(|| current.apartment.clone(), |s| s.trim().to_string()),
            ..current
        };
        repo.save_profile(&updated)?;
        Ok(updated)
    }

    /// Store a private copy of the picked ID image.
    pub fn set_id_image<S: PreferenceStore>(
        repo: &Repository<S>,
        files: &PrivateFileStore,
        picked: &ImageRef,
    ) -> AppResult<Profile> {
        let private = files.ensure_private(picked, ID_IMAGES)?;
        let updated = Profile {
            my_id_uri: private,
            ..repo.load_profile()?
        };
        repo.save_profile(&updated)?;
        Ok(updated)
    }

    pub fn set_photo<S: PreferenceStore>(
        repo: &Repository<S>,
        files: &PrivateFileStore,
        picked: &ImageRef,
    ) -> AppResult<Profile> {
        let private = files.ensure_private(picked, ID_IMAGES)?;
        let updated = Profile {
            profile_photo_uri: private,
            ..repo.load_profile()?
        };
        repo.save_profile(&updated)?;
        Ok(updated)
    }

    /// Where the ID card can be opened from, if it is still there.
    pub fn id_card_path(profile: &Profile, files: &PrivateFileStore) -> AppResult<PathBuf> {
        let r = &profile.my_id_uri;
        if r.is_blank() {
            return Err(AppError::ImageUnavailable("no ID selected".into()));
        }
        if !files.is_readable(r) {
            return Err(AppError::ImageUnavailable(
                "ID image not found. Please replace it.".into(),
            ));
        }

        match files.resolve(r) {
            Some(p) => Ok(p),
            None => Ok(PathBuf::from(r.as_str())),
        }
    }
}
