//! Message to the security office announcing a visit.

use crate::errors::{AppError, AppResult};
use crate::files::PrivateFileStore;
use crate::models::{Profile, Visitor};
use std::path::PathBuf;

pub const NOTICE_SUBJECT: &str = "Visitor";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitNotice {
    pub to: String,
    pub subject: String,
    pub body: String,
    pub attachment: PathBuf,
}

pub fn notice_body(profile: &Profile, v: &Visitor) -> String {
    let (arrival, departure) = v.display_times();
    format!(
        "Dear all,\n\
         I have a visitor coming to {} at {} and will be leaving at {}\n\
         Thanks,\n\
         {}",
        profile.apartment, arrival, departure, profile.name
    )
}

/// Compose the notice and stage the visitor's ID image as its attachment.
pub fn compose(
    profile: &Profile,
    v: &Visitor,
    files: &PrivateFileStore,
    security_email: &str,
) -> AppResult<VisitNotice> {
    if !files.is_readable(&v.id_image_uri) {
        return Err(AppError::ImageUnavailable(
            "Visitor ID image not found. Please update it.".into(),
        ));
    }

    let attachment = files.copy_to_cache(&v.id_image_uri)?;

    Ok(VisitNotice {
        to: security_email.to_string(),
        subject: NOTICE_SUBJECT.to_string(),
        body: notice_body(profile, v),
        attachment,
    })
}
