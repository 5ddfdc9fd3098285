//! Compound phone directory.

use crate::errors::{AppError, AppResult};
use crate::models::contact::DEFAULT_CATEGORY;
use crate::models::{Contact, ContactKey};
use crate::store::{PreferenceStore, Repository};
use std::cmp::Ordering;

pub const ALL_CATEGORIES: &str = "All";
pub const EMERGENCY: &str = "Emergency";

/// Directory shipped with the app, used when nothing is stored yet.
pub fn builtin_contacts() -> Vec<Contact> {
    const RAW: &[(&str, &str, &str, &str)] = &[
        ("Compound Manager – Ms. Hala Al Athel", "4037", "8:00 am – 5:00 pm", "Administration"),
        ("Deputy Manager – Mohammad Al-Alfan", "4019", "8:00 am – 5:00 pm", "Administration"),
        ("Secretary (C.M.) – Lourdes", "4037", "8:00 am – 5:00 pm", "Administration"),
        ("Lease Administrator – Mohd. Moklesur Rahman", "4036", "8:00 am – 5:00 pm", "Leasing"),
        ("Leasing Assistant – Danish", "4003", "8:00 am – 5:00 pm", "Leasing"),
        ("Leasing Assistant – Ms. Randa", "4005", "8:00 am – 5:00 pm", "Leasing"),
        ("Chief Accountant – Mohammed Nadeem Baig", "4039", "8:00 am – 5:00 pm", "Accounting"),
        ("Accountant – Sajid Ali", "4026", "8:00 am – 5:00 pm", "Accounting"),
        ("Cashier – Kumar", "4006", "8:00 am – 8:00 pm", "Accounting"),
        ("IT / HR – Mr. Fahad", "4045", "8:00 am – 11:00 pm", "IT / HR"),
        ("PABX Telephone – Augustin", "3999", "1:00 pm – 9:00 pm", "IT / HR"),
        ("Video Operator – Augustin", "4009", "3:00 pm – 11:00 pm", "IT / HR"),
        ("Housing Supervisor – Lourdes", "4004 / 1387", "8:00 am – 5:00 pm", "Housing"),
        ("Housing Assistant – Amina", "4004 / 1387", "8:00 am – 5:00 pm", "Housing"),
        ("Operator & Security (Emergency)", "0 / 4001 / 4024", "24 Hours", "Emergency"),
        ("Administration Reception – Jewel / Kamlesh", "0", "24 Hours", "Emergency"),
        ("Transport Supervisor – Najim Uddin", "0", "8:00 am – 5:00 pm", "Emergency"),
        ("Maintenance Manager – Mr. Chris", "4027", "8:00 am – 5:00 pm", "Maintenance"),
        ("Maintenance Coordinator – Mr. Dias", "1333", "8:00 am – 5:00 pm", "Maintenance"),
        ("Maintenance Office – Masoud", "4022", "8:00 am – 5:00 pm", "Maintenance"),
        ("Warehouse – Obaidullah", "4044", "8:00 am – 5:00 pm", "Maintenance"),
        ("Security Supervisor – Dosari", "4001 / 4024", "8:00 am – 5:00 pm", "Security"),
        ("Visitor Gate – Security", "4001", "24 Hours", "Security"),
        ("Main Gate – Security", "4042 / 1193", "24 Hours", "Security"),
        ("Arm Gate – Security", "4040", "24 Hours", "Security"),
        ("Housekeeping Supervisor – Masoud", "4022", "8:00 am – 5:00 pm", "Housekeeping"),
        ("Pest Control & Landscaping – Shabir", "4007", "8:00 am – 5:00 pm", "Housekeeping"),
        ("Recreation Supervisor – Roel", "4017", "9:00 am – 5:00 pm", "Recreation"),
        ("Attendant Rec. A", "4015", "3:00 pm – 11:00 pm", "Recreation"),
        ("Attendant Rec. B – Hasan", "4029", "8:00 am – 11:00 pm", "Recreation"),
        ("Coffee Shop Rec. A", "3215", "7:00 am – 12:00 am", "Food & Shops"),
        ("Sports Café Shop Rec. A", "3216", "1:00 pm – 12:00 am", "Food & Shops"),
        ("New Crystal Pizza Shop", "4008", "11:00 am – 12:00 am", "Food & Shops"),
        ("Restaurant Crystal", "4033", "12:00 pm – 12:00 am", "Food & Shops"),
        ("Pizza Shop – Bakery", "3233", "11:00 am – 12:00 am", "Food & Shops"),
        ("ZINC Café (Family S. Pool)", "4021", "12:00 pm – 12:00 am", "Food & Shops"),
        ("Laundry Shop", "4018", "12:00 pm – 10:00 pm", "Services"),
        ("Mini Market", "4020", "7:00 am – 12:00 am", "Services"),
    ];

    RAW.iter()
        .map(|(name, phone, hours, category)| Contact::new(name, phone, hours, category))
        .collect()
}

/// Fields of the add/edit contact form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub phone: String,
    pub hours: String,
    pub category: String,
}

impl ContactForm {
    pub fn from_contact(c: &Contact) -> Self {
        Self {
            name: c.name.clone(),
            phone: c.phone.clone(),
            hours: c.hours.clone(),
            category: c.category.clone(),
        }
    }

    fn validate(&self) -> AppResult<()> {
        if self.name.trim().is_empty() || self.phone.trim().is_empty() {
            return Err(AppError::Validation(
                "Contact name and phone are required".into(),
            ));
        }
        Ok(())
    }

    fn category(&self) -> String {
        let c = self.category.trim();
        if c.is_empty() {
            DEFAULT_CATEGORY.to_string()
        } else {
            c.to_string()
        }
    }
}

pub struct Directory<'a, S> {
    repo: &'a Repository<S>,
    contacts: Vec<Contact>,
}

impl<'a, S: PreferenceStore> Directory<'a, S> {
    /// Load the directory, seeding the built-in list when nothing is stored.
    pub fn open(repo: &'a Repository<S>) -> AppResult<Self> {
        let mut contacts = repo.load_contacts()?;
        if contacts.is_empty() {
            contacts = builtin_contacts();
            repo.save_contacts(&contacts)?;
        }
        Ok(Self { repo, contacts })
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    fn replace(&mut self, contacts: Vec<Contact>) -> AppResult<()> {
        self.repo.save_contacts(&contacts)?;
        self.contacts = contacts;
        Ok(())
    }

    fn ensure_exists(&self, key: &ContactKey) -> AppResult<()> {
        if self.contacts.iter().any(|c| c.matches(key)) {
            Ok(())
        } else {
            Err(AppError::NotFound(format!(
                "Contact '{}' ({})",
                key.name, key.phone
            )))
        }
    }

    pub fn add(&mut self, form: &ContactForm) -> AppResult<Contact> {
        form.validate()?;

        let contact = Contact::new(
            form.name.trim(),
            form.phone.trim(),
            form.hours.trim(),
            &form.category(),
        );

        let mut contacts = self.contacts.clone();
        contacts.push(contact.clone());
        self.replace(contacts)?;
        Ok(contact)
    }

    /// Rewrite every entry carrying `key`. The favorite flag is kept.
    pub fn edit(&mut self, key: &ContactKey, form: &ContactForm) -> AppResult<usize> {
        form.validate()?;
        self.ensure_exists(key)?;

        let mut changed = 0;
        let contacts = self
            .contacts
            .iter()
            .map(|c| {
                if c.matches(key) {
                    changed += 1;
                    Contact {
                        name: form.name.trim().to_string(),
                        phone: form.phone.trim().to_string(),
                        hours: form.hours.trim().to_string(),
                        category: form.category(),
                        favorite: c.favorite,
                    }
                } else {
                    c.clone()
                }
            })
            .collect();

        self.replace(contacts)?;
        Ok(changed)
    }

    pub fn delete(&mut self, key: &ContactKey) -> AppResult<usize> {
        self.ensure_exists(key)?;

        let before = self.contacts.len();
        let contacts: Vec<Contact> = self
            .contacts
            .iter()
            .filter(|c| !c.matches(key))
            .cloned()
            .collect();
        let removed = before - contacts.len();

        self.replace(contacts)?;
        Ok(removed)
    }

    /// Flip the favorite flag; returns the new state.
    pub fn toggle_favorite(&mut self, key: &ContactKey) -> AppResult<bool> {
        self.ensure_exists(key)?;

        let mut state = false;
        let contacts = self
            .contacts
            .iter()
            .map(|c| {
                if c.matches(key) {
                    state = !c.favorite;
                    Contact {
                        favorite: !c.favorite,
                        ..c.clone()
                    }
                } else {
                    c.clone()
                }
            })
            .collect();

        self.replace(contacts)?;
        Ok(state)
    }

    /// "All" followed by every category in use, sorted.
    pub fn categories(&self) -> Vec<String> {
        let mut cats: Vec<String> = self
            .contacts
            .iter()
            .map(|c| c.category_label().to_string())
            .collect();
        cats.sort();
        cats.dedup();

        let mut out = vec![ALL_CATEGORIES.to_string()];
        out.extend(cats);
        out
    }

    /// Filtered, sorted and grouped view of the directory.
    pub fn view(&self, query: &str, category: &str) -> Vec<(String, Vec<Contact>)> {
        group(&filter(&self.contacts, query, category))
    }
}

/// Favorites first, then category, then name.
fn directory_order(a: &Contact, b: &Contact) -> Ordering {
    b.favorite
        .cmp(&a.favorite)
        .then_with(|| a.category.cmp(&b.category))
        .then_with(|| a.name.cmp(&b.name))
}

/// Case-insensitive search over name, phone and hours, plus an optional
/// category ("All" or empty matches everything).
pub fn filter(contacts: &[Contact], query: &str, category: &str) -> Vec<Contact> {
    let q = query.trim().to_lowercase();
    let category = category.trim();
    let any_category = category.is_empty() || category == ALL_CATEGORIES;

    let mut out: Vec<Contact> = contacts
        .iter()
        .filter(|c| {
            q.is_empty()
                || c.name.to_lowercase().contains(&q)
                || c.phone.to_lowercase().contains(&q)
                || c.hours.to_lowercase().contains(&q)
        })
        .filter(|c| any_category || c.category_label() == category)
        .cloned()
        .collect();

    out.sort_by(directory_order);
    out
}

/// Group by category label: Emergency first, the rest alphabetically.
/// Order inside each group is preserved.
pub fn group(contacts: &[Contact]) -> Vec<(String, Vec<Contact>)> {
    let mut groups: Vec<(String, Vec<Contact>)> = Vec::new();

    for c in contacts {
        let label = c.category_label();
        match groups.iter_mut().find(|(cat, _)| cat == label) {
            Some((_, items)) => items.push(c.clone()),
            None => groups.push((label.to_string(), vec![c.clone()])),
        }
    }

    groups.sort_by(|(a, _), (b, _)| {
        (a != EMERGENCY)
            .cmp(&(b != EMERGENCY))
            .then_with(|| a.cmp(b))
    });
    groups
}
