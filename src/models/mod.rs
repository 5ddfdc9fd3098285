pub mod contact;
pub mod profile;
pub mod saved_person;
pub mod visitor;

pub use contact::{Contact, ContactKey};
pub use profile::Profile;
pub use saved_person::SavedPerson;
pub use visitor::Visitor;

/// Fresh record identifier (UUID v4, hyphenated).
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
