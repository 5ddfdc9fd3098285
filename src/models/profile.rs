use crate::files::ImageRef;
use serde::{Deserialize, Serialize};

/// The resident. There is exactly one; it starts empty and is only ever
/// overwritten as a whole.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Profile {
    pub name: String,
    pub apartment: String,
    pub profile_photo_uri: ImageRef,
    pub my_id_uri: ImageRef,
}
