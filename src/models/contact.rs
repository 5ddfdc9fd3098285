use serde::{Deserialize, Serialize};

pub const DEFAULT_CATEGORY: &str = "Other";

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

/// Phone directory entry. Contacts carry no id: (name, phone) is what edits
/// and deletions target, see [`ContactKey`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub hours: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub favorite: bool,
}

impl Contact {
    pub fn new(name: &str, phone: &str, hours: &str, category: &str) -> Self {
        Self {
            name: name.to_string(),
            phone: phone.to_string(),
            hours: hours.to_string(),
            category: category.to_string(),
            favorite: false,
        }
    }

    /// Blank categories are shown under "Other".
    pub fn category_label(&self) -> &str {
        if self.category.trim().is_empty() {
            DEFAULT_CATEGORY
        } else {
            &self.category
        }
    }

    pub fn matches(&self, key: &ContactKey) -> bool {
        self.name == key.name && self.phone == key.phone
    }
}

/// De-facto identity of a contact. Nothing enforces uniqueness: when two
/// entries share it, an operation on the key applies to both.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContactKey {
    pub name: String,
    pub phone: String,
}

impl ContactKey {
    pub fn new(name: &str, phone: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            phone: phone.trim().to_string(),
        }
    }
}
