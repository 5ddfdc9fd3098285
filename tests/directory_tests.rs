use compound_assist::core::directory::{
    ALL_CATEGORIES, ContactForm, Directory, EMERGENCY, builtin_contacts, filter, group,
};
use compound_assist::errors::AppError;
use compound_assist::models::{Contact, ContactKey};

mod common;
use common::Fixture;

fn form(name: &str, phone: &str, category: &str) -> ContactForm {
    ContactForm {
        name: name.into(),
        phone: phone.into(),
        hours: "24 Hours".into(),
        category: category.into(),
    }
}

#[test]
fn test_first_open_seeds_builtin_directory() {
    let fx = Fixture::new();
    let repo = fx.repo();

    let dir = Directory::open(&repo).unwrap();

    assert_eq!(dir.contacts().len(), 38);
    assert_eq!(builtin_contacts().len(), 38);
    assert_eq!(repo.load_contacts().unwrap().len(), 38);
}

#[test]
fn test_non_empty_directory_is_not_reseeded() {
    let fx = Fixture::new();
    let repo = fx.repo();
    repo.save_contacts(&[Contact::new("Gate", "4001", "", "Security")])
        .unwrap();

    let dir = Directory::open(&repo).unwrap();
    assert_eq!(dir.contacts().len(), 1);
}

#[test]
fn test_add_trims_and_defaults_category() {
    let fx = Fixture::new();
    let repo = fx.repo();
    let mut dir = Directory::open(&repo).unwrap();

    let c = dir.add(&form("  Plumber ", " 5555 ", "  ")).unwrap();
    assert_eq!(c.name, "Plumber");
    assert_eq!(c.phone, "5555");
    assert_eq!(c.category, "Other");
    assert_eq!(repo.load_contacts().unwrap().len(), 39);

    assert!(matches!(
        dir.add(&form("Nobody", "  ", "Other")),
        Err(AppError::Validation(_))
    ));
}

#[test]
fn test_key_operations_hit_every_duplicate() {
    let fx = Fixture::new();
    let repo = fx.repo();
    repo.save_contacts(&[
        Contact::new("Gate", "4001", "", "Security"),
        Contact::new("Gate", "4001", "", "Security"),
        Contact::new("Gate", "4042", "", "Security"),
    ])
    .unwrap();
    let mut dir = Directory::open(&repo).unwrap();
    let key = ContactKey::new("Gate", "4001");

    assert!(dir.toggle_favorite(&key).unwrap());
    let changed = dir.edit(&key, &form("Visitor Gate", "4001", "Security")).unwrap();
    assert_eq!(changed, 2);

    let stored = repo.load_contacts().unwrap();
    let renamed: Vec<_> = stored.iter().filter(|c| c.name == "Visitor Gate").collect();
    assert_eq!(renamed.len(), 2);
    // Favorite survives the edit.
    assert!(renamed.iter().all(|c| c.favorite));

    let removed = dir.delete(&ContactKey::new("Visitor Gate", "4001")).unwrap();
    assert_eq!(removed, 2);
    assert_eq!(repo.load_contacts().unwrap().len(), 1);

    assert!(matches!(
        dir.delete(&ContactKey::new("Visitor Gate", "4001")),
        Err(AppError::NotFound(_))
    ));
}

#[test]
fn test_view_sorts_favorites_first_and_groups_emergency_first() {
    let fx = Fixture::new();
    let repo = fx.repo();
    let mut dir = Directory::open(&repo).unwrap();

    dir.toggle_favorite(&ContactKey::new("Mini Market", "4020"))
        .unwrap();

    let groups = dir.view("", ALL_CATEGORIES);
    assert_eq!(groups[0].0, EMERGENCY);

    let labels: Vec<&str> = groups.iter().map(|(c, _)| c.as_str()).collect();
    let mut rest = labels[1..].to_vec();
    rest.sort();
    assert_eq!(&labels[1..], rest.as_slice());

    let services = groups.iter().find(|(c, _)| c == "Services").unwrap();
    assert_eq!(services.1[0].name, "Mini Market");
    assert!(services.1[0].favorite);
}

#[test]
fn test_filter_by_query_and_category() {
    let contacts = builtin_contacts();

    let hits = filter(&contacts, "SECURITY", ALL_CATEGORIES);
    assert!(!hits.is_empty());
    assert!(hits.iter().all(|c| c.name.to_lowercase().contains("security")));

    let by_phone = filter(&contacts, "4022", "");
    assert_eq!(by_phone.len(), 2);

    let only_security = filter(&contacts, "", "Security");
    assert_eq!(only_security.len(), 4);
    assert!(only_security.iter().all(|c| c.category == "Security"));

    let groups = group(&only_security);
    assert_eq!(groups.len(), 1);
}

#[test]
fn test_blank_category_is_listed_as_other() {
    let contacts = vec![
        Contact::new("Driver", "7000", "", ""),
        Contact::new("Guard", "4001", "", EMERGENCY),
    ];

    let groups = group(&filter(&contacts, "", "Other"));
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].0, "Other");
    assert_eq!(groups[0].1[0].name, "Driver");
}

#[test]
fn test_categories_start_with_all() {
    let fx = Fixture::new();
    let repo = fx.repo();
    let dir = Directory::open(&repo).unwrap();

    let cats = dir.categories();
    assert_eq!(cats[0], ALL_CATEGORIES);
    assert!(cats.contains(&EMERGENCY.to_string()));
    let mut sorted = cats[1..].to_vec();
    sorted.sort();
    assert_eq!(&cats[1..], sorted.as_slice());
}
