//! Preference store: a flat string-to-string map, one JSON document per key.

pub mod repository;
pub mod sqlite;

pub use repository::Repository;
pub use sqlite::SqlitePreferences;

use crate::errors::AppResult;

pub const KEY_PROFILE: &str = "profile_json";
pub const KEY_CONTACTS: &str = "contacts_json";
pub const KEY_VISITORS: &str = "visitors_json";
pub const KEY_SAVED_PEOPLE: &str = "saved_people_json";

pub trait PreferenceStore {
    /// Raw text stored under `key`, if any.
    fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Replace whatever is stored under `key` in one step.
    fn put(&self, key: &str, value: &str) -> AppResult<()>;
}
