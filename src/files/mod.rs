//! App-private image storage.
//!
//! Pictures picked by the resident (IDs, profile photo) are copied under the
//! private root and handed out as provider references
//! (`content://<authority>/<subdir>/<file>`), never as raw paths.

pub mod reference;

pub use reference::{ImageRef, RefKind};

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::utils::path::expand_tilde;
use chrono::Utc;
use std::fs::{self, File};
use std::io;
use std::path::{Component, Path, PathBuf};

/// Personal ID and profile photo.
pub const ID_IMAGES: &str = "id_images";
/// Visitor and saved-person IDs.
pub const VISITOR_IMAGES: &str = "visitor_images";

const ATTACHMENTS: &str = "attachments";

pub struct PrivateFileStore {
    root: PathBuf,
    cache: PathBuf,
    authority: String,
}

impl PrivateFileStore {
    pub fn new(root: impl Into<PathBuf>, cache: impl Into<PathBuf>, authority: &str) -> Self {
        Self {
            root: root.into(),
            cache: cache.into(),
            authority: authority.to_string(),
        }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(
            expand_tilde(&cfg.files_dir),
            expand_tilde(&cfg.cache_dir),
            &cfg.provider_authority,
        )
    }

    pub fn authority(&self) -> &str {
        &self.authority
    }

    /// True iff the reference was issued by this store's provider.
    pub fn is_own_reference(&self, r: &ImageRef) -> bool {
        r.authority().as_deref() == Some(self.authority.as_str())
    }

    /// Filesystem location behind an own reference.
    /// Foreign providers and paths escaping the root resolve to nothing.
    pub fn resolve(&self, r: &ImageRef) -> Option<PathBuf> {
        match r.kind() {
            RefKind::Provider { authority, path } if authority == self.authority => {
                let rel = Path::new(&path);
                let safe = !path.is_empty()
                    && rel.components().all(|c| matches!(c, Component::Normal(_)));
                safe.then(|| self.root.join(rel))
            }
            _ => None,
        }
    }

    /// Open a readable stream on any reference this process can reach.
    pub fn open(&self, r: &ImageRef) -> io::Result<File> {
        match r.kind() {
            RefKind::Empty => Err(io::Error::new(
                io::ErrorKind::NotFound,
                "no image reference",
            )),
            RefKind::External(path) if path.is_dir() => Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} is a directory", path.display()),
            )),
            RefKind::External(path) => File::open(path),
            RefKind::Provider { authority, .. } => match self.resolve(r) {
                Some(path) => File::open(path),
                None => Err(io::Error::new(
                    io::ErrorKind::PermissionDenied,
                    format!("no access grant for provider '{}'", authority),
                )),
            },
        }
    }

    /// Best-effort probe: can a stream be opened right now? Never fails.
    pub fn is_readable(&self, r: &ImageRef) -> bool {
        self.open(r).is_ok()
    }

    /// Name the source reports for itself, if any.
    pub fn display_name(&self, r: &ImageRef) -> Option<String> {
        let path = match r.kind() {
            RefKind::External(p) => p,
            RefKind::Provider { path, .. } => PathBuf::from(path),
            RefKind::Empty => return None,
        };

        path.file_name()
            .map(|n| n.to_string_lossy().to_string())
            .filter(|n| !n.trim().is_empty())
    }

    /// Filesystem path the reference reads from, when there is one.
    fn source_path(&self, r: &ImageRef) -> Option<PathBuf> {
        match r.kind() {
            RefKind::External(p) => Some(p),
            RefKind::Provider { .. } => self.resolve(r),
            RefKind::Empty => None,
        }
    }

    /// True when copying `source` onto `dest` would truncate the source.
    fn copies_onto_itself(&self, source: &ImageRef, dest: &Path) -> bool {
        let Some(src) = self.source_path(source) else {
            return false;
        };
        match (src.canonicalize(), dest.canonicalize()) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        }
    }

    /// Copy the source into `<root>/<subdir>/` and return a provider
    /// reference to the copy.
    pub fn copy_to_private(&self, source: &ImageRef, subdir: &str) -> AppResult<ImageRef> {
        let fail = |reason: String| AppError::ImageCopy {
            reference: source.to_string(),
            reason,
        };

        let mut input = self.open(source).map_err(|e| fail(e.to_string()))?;

        let dir = self.root.join(subdir);
        fs::create_dir_all(&dir).map_err(|e| fail(e.to_string()))?;

        let name = self
            .display_name(source)
            .unwrap_or_else(|| format!("image_{}.jpg", Utc::now().timestamp_millis()));

        let out_path = dir.join(&name);
        if !self.copies_onto_itself(source, &out_path) {
            let mut output = File::create(&out_path).map_err(|e| fail(e.to_string()))?;
            io::copy(&mut input, &mut output).map_err(|e| fail(e.to_string()))?;
        }

        Ok(ImageRef::provider(&self.authority, subdir, &name))
    }

    /// Own references pass through untouched; anything else is copied.
    pub fn ensure_private(&self, r: &ImageRef, subdir: &str) -> AppResult<ImageRef> {
        if self.is_own_reference(r) {
            Ok(r.clone())
        } else {
            self.copy_to_private(r, subdir)
        }
    }

    /// Copy an image into the attachments cache so it can be handed to an
    /// outgoing message. Returns the path of the cached copy.
    pub fn copy_to_cache(&self, source: &ImageRef) -> AppResult<PathBuf> {
        let fail = |reason: String| AppError::ImageCopy {
            reference: source.to_string(),
            reason,
        };

        let mut input = self.open(source).map_err(|e| fail(e.to_string()))?;

        let dir = self.cache.join(ATTACHMENTS);
        fs::create_dir_all(&dir).map_err(|e| fail(e.to_string()))?;

        let name = self
            .display_name(source)
            .unwrap_or_else(|| "visitor_id.jpg".to_string());
        let out_path = dir.join(name);
        if self.copies_onto_itself(source, &out_path) {
            return Ok(out_path);
        }

        let mut output = File::create(&out_path).map_err(|e| fail(e.to_string()))?;
        io::copy(&mut input, &mut output).map_err(|e| fail(e.to_string()))?;

        Ok(out_path)
    }
}
