use super::new_id;
use crate::files::ImageRef;
use serde::{Deserialize, Serialize};

/// Reusable visitor template: someone who comes over regularly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedPerson {
    /// Blank for records stored without one; migration assigns it.
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub id_image_uri: ImageRef,
}

impl SavedPerson {
    pub fn new(name: &str, id_image_uri: ImageRef) -> Self {
        Self {
            id: new_id(),
            name: name.to_string(),
            id_image_uri,
        }
    }

    /// Same person as far as "save for reuse" is concerned: name compared
    /// case-insensitively, image reference compared exactly.
    pub fn same_as(&self, name: &str, image: &ImageRef) -> bool {
        self.name.to_lowercase() == name.to_lowercase() && &self.id_image_uri == image
    }
}
