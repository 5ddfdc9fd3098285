//! Typed access to the four persisted collections.
//!
//! `try_load_*` reports malformed stored JSON as
//! [`AppError::MalformedStore`]; `load_*` is the everyday policy on top of it
//! and treats malformed data as "nothing saved yet". Store failures are never
//! swallowed by either.

use super::{KEY_CONTACTS, KEY_PROFILE, KEY_SAVED_PEOPLE, KEY_VISITORS, PreferenceStore};
use crate::errors::{AppError, AppResult};
use crate::models::{Contact, Profile, SavedPerson, Visitor};
use crate::ui::messages::warning;
use serde::Serialize;
use serde::de::DeserializeOwned;

pub struct Repository<S> {
    store: S,
}

impl<S: PreferenceStore> Repository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn try_load<T: DeserializeOwned + Default>(&self, key: &'static str) -> AppResult<T> {
        match self.store.get(key)? {
            None => Ok(T::default()),
            Some(raw) => {
                serde_json::from_str(&raw).map_err(|source| AppError::MalformedStore { key, source })
            }
        }
    }

    fn load_or_default<T: DeserializeOwned + Default>(&self, key: &'static str) -> AppResult<T> {
        match self.try_load(key) {
            Err(e @ AppError::MalformedStore { .. }) => {
                warning(format!("{}; starting from an empty value.", e));
                Ok(T::default())
            }
            other => other,
        }
    }

    fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> AppResult<()> {
        let json = serde_json::to_string(value)?;
        self.store.put(key, &json)
    }

    pub fn try_load_profile(&self) -> AppResult<Profile> {
        self.try_load(KEY_PROFILE)
    }

    pub fn load_profile(&self) -> AppResult<Profile> {
        self.load_or_default(KEY_PROFILE)
    }

    pub fn save_profile(&self, profile: &Profile) -> AppResult<()> {
        self.save(KEY_PROFILE, profile)
    }

    pub fn try_load_contacts(&self) -> AppResult<Vec<Contact>> {
        self.try_load(KEY_CONTACTS)
    }

    pub fn load_contacts(&self) -> AppResult<Vec<Contact>> {
        self.load_or_default(KEY_CONTACTS)
    }

    pub fn save_contacts(&self, contacts: &[Contact]) -> AppResult<()> {
        self.save(KEY_CONTACTS, contacts)
    }

    pub fn try_load_visitors(&self) -> AppResult<Vec<Visitor>> {
        self.try_load(KEY_VISITORS)
    }

    pub fn load_visitors(&self) -> AppResult<Vec<Visitor>> {
        self.load_or_default(KEY_VISITORS)
    }

    pub fn save_visitors(&self, visitors: &[Visitor]) -> AppResult<()> {
        self.save(KEY_VISITORS, visitors)
    }

    pub fn try_load_saved_people(&self) -> AppResult<Vec<SavedPerson>> {
        self.try_load(KEY_SAVED_PEOPLE)
    }

    pub fn load_saved_people(&self) -> AppResult<Vec<SavedPerson>> {
        self.load_or_default(KEY_SAVED_PEOPLE)
    }

    pub fn save_saved_people(&self, people: &[SavedPerson]) -> AppResult<()> {
        self.save(KEY_SAVED_PEOPLE, people)
    }
}
