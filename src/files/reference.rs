//! Image references as stored inside records.
//!
//! A reference is kept as the exact string the record was saved with, so a
//! round trip through the store never rewrites it. Interpretation happens on
//! demand through [`ImageRef::kind`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

pub const CONTENT_SCHEME: &str = "content://";
pub const FILE_SCHEME: &str = "file://";

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageRef(String);

/// What a reference points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefKind {
    /// No image recorded.
    Empty,
    /// `content://<authority>/<path>`, served by some provider.
    Provider { authority: String, path: String },
    /// A plain filesystem location (`file://` URI or bare path).
    External(PathBuf),
}

impl ImageRef {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn empty() -> Self {
        Self(String::new())
    }

    /// Provider reference for a file under a provider's root.
    pub fn provider(authority: &str, subdir: &str, file_name: &str) -> Self {
        Self(format!("{CONTENT_SCHEME}{authority}/{subdir}/{file_name}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    pub fn kind(&self) -> RefKind {
        let raw = self.0.trim();

        if raw.is_empty() {
            return RefKind::Empty;
        }

        if let Some(rest) = raw.strip_prefix(CONTENT_SCHEME) {
            let (authority, path) = rest.split_once('/').unwrap_or((rest, ""));
            return RefKind::Provider {
                authority: authority.to_string(),
                path: path.to_string(),
            };
        }

        let path = raw.strip_prefix(FILE_SCHEME).unwrap_or(raw);
        RefKind::External(PathBuf::from(path))
    }

    /// Origin marker of the reference: the provider authority, if any.
    pub fn authority(&self) -> Option<String> {
        match self.kind() {
            RefKind::Provider { authority, .. } => Some(authority),
            _ => None,
        }
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ImageRef {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ImageRef {
    fn from(s: String) -> Self {
        Self(s)
    }
}
