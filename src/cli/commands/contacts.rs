use crate::cli::parser::{Commands, ContactsAction};
use crate::config::Config;
use crate::core::directory::{ALL_CATEGORIES, ContactForm, Directory};
use crate::db::log::ttlog_quiet;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::ContactKey;
use crate::store::{Repository, SqlitePreferences};
use crate::ui::messages::{header, info, success};
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Contacts { action } = cmd else {
        return Ok(());
    };

    let pool = DbPool::new(&cfg.database)?;
    let repo = Repository::new(SqlitePreferences::new(&pool.conn));
    let mut dir = Directory::open(&repo)?;

    match action {
        ContactsAction::List {
            query,
            category,
            categories,
        } => {
            if *categories {
                for c in dir.categories() {
                    println!("{}", c);
                }
                return Ok(());
            }

            let groups = dir.view(
                query.as_deref().unwrap_or(""),
                category.as_deref().unwrap_or(ALL_CATEGORIES),
            );
            if groups.is_empty() {
                info("No contacts match.");
                return Ok(());
            }

            for (category, contacts) in groups {
                header(&category);
                let mut table = Table::new(vec![
                    Column::new("★", 1),
                    Column::new("Name", 44),
                    Column::new("Phone", 16),
                    Column::new("Hours", 22),
                ]);
                for c in contacts {
                    table.add_row(vec![
                        if c.favorite { "★" } else { "" }.to_string(),
                        c.name,
                        c.phone,
                        c.hours,
                    ]);
                }
                println!("{}", table.render());
            }
        }

        ContactsAction::Add {
            name,
            phone,
            hours,
            category,
        } => {
            let contact = dir.add(&ContactForm {
                name: name.clone(),
                phone: phone.clone(),
                hours: hours.clone(),
                category: category.clone(),
            })?;
            ttlog_quiet(&pool.conn, "contact_add", &contact.name, &contact.phone);
            success(format!("Contact added: {} ({})", contact.name, contact.phone));
        }

        ContactsAction::Edit {
            name,
            phone,
            new_name,
            new_phone,
            hours,
            category,
        } => {
            let key = ContactKey::new(name, phone);
            let Some(current) = dir.contacts().iter().find(|c| c.matches(&key)) else {
                return Err(AppError::NotFound(format!(
                    "Contact '{}' ({})",
                    key.name, key.phone
                )));
            };

            let mut form = ContactForm::from_contact(current);
            if let Some(v) = new_name {
                form.name = v.clone();
            }
            if let Some(v) = new_phone {
                form.phone = v.clone();
            }
            if let Some(v) = hours {
                form.hours = v.clone();
            }
            if let Some(v) = category {
                form.category = v.clone();
            }

            let changed = dir.edit(&key, &form)?;
            ttlog_quiet(
                &pool.conn,
                "contact_edit",
                &key.name,
                &format!("{} entr{} updated", changed, if changed == 1 { "y" } else { "ies" }),
            );
            success(format!("Contact updated: {} ({})", form.name.trim(), form.phone.trim()));
        }

        ContactsAction::Del { name, phone } => {
            let key = ContactKey::new(name, phone);
            let removed = dir.delete(&key)?;
            ttlog_quiet(&pool.conn, "contact_del", &key.name, &key.phone);
            success(format!("Deleted {} contact(s) named '{}'", removed, key.name));
        }

        ContactsAction::Fav { name, phone } => {
            let key = ContactKey::new(name, phone);
            if dir.toggle_favorite(&key)? {
                success(format!("★ {} added to favorites", key.name));
            } else {
                success(format!("{} removed from favorites", key.name));
            }
        }
    }

    Ok(())
}
