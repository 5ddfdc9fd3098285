use compound_assist::errors::AppError;
use compound_assist::files::ImageRef;
use compound_assist::models::{Contact, Profile, SavedPerson, Visitor};
use compound_assist::store::{KEY_PROFILE, KEY_SAVED_PEOPLE, KEY_VISITORS, PreferenceStore};
use chrono::NaiveTime;

mod common;
use common::{Fixture, day};

fn hm(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).expect("valid time")
}

#[test]
fn test_missing_keys_load_as_empty_values() {
    let fx = Fixture::new();
    let repo = fx.repo();

    assert_eq!(repo.load_profile().unwrap(), Profile::default());
    assert!(repo.load_contacts().unwrap().is_empty());
    assert!(repo.load_visitors().unwrap().is_empty());
    assert!(repo.load_saved_people().unwrap().is_empty());
}

#[test]
fn test_saved_collections_read_back_equal() {
    let fx = Fixture::new();
    let repo = fx.repo();

    let profile = Profile {
        name: "Sara".into(),
        apartment: "B-12".into(),
        profile_photo_uri: ImageRef::empty(),
        my_id_uri: ImageRef::new("content://com.compoundassist.fileprovider/id_images/me.jpg"),
    };
    let contacts = vec![Contact::new("Gate", "4001", "24 Hours", "Security")];
    let visitors = vec![Visitor::new(
        "Ali",
        ImageRef::empty(),
        hm(9, 0),
        hm(11, 0),
        day(),
    )];
    let people = vec![SavedPerson::new("Ali", ImageRef::empty())];

    repo.save_profile(&profile).unwrap();
    repo.save_contacts(&contacts).unwrap();
    repo.save_visitors(&visitors).unwrap();
    repo.save_saved_people(&people).unwrap();

    assert_eq!(repo.load_profile().unwrap(), profile);
    assert_eq!(repo.load_contacts().unwrap(), contacts);
    assert_eq!(repo.load_visitors().unwrap(), visitors);
    assert_eq!(repo.load_saved_people().unwrap(), people);
}

#[test]
fn test_malformed_value_is_reported_then_defaulted() {
    let fx = Fixture::new();
    let repo = fx.repo();

    repo.store().put(KEY_VISITORS, "{not json").unwrap();

    match repo.try_load_visitors() {
        Err(AppError::MalformedStore { key, .. }) => assert_eq!(key, KEY_VISITORS),
        other => panic!("expected MalformedStore, got {:?}", other),
    }
    assert!(repo.load_visitors().unwrap().is_empty());
}

#[test]
fn test_wrong_shape_counts_as_malformed() {
    let fx = Fixture::new();
    let repo = fx.repo();

    repo.store().put(KEY_SAVED_PEOPLE, r#"{"name":"x"}"#).unwrap();

    assert!(matches!(
        repo.try_load_saved_people(),
        Err(AppError::MalformedStore { .. })
    ));
    assert!(repo.load_saved_people().unwrap().is_empty());
}

#[test]
fn test_removed_key_loads_as_default() {
    let fx = Fixture::new();
    let repo = fx.repo();

    repo.save_profile(&Profile {
        name: "Sara".into(),
        ..Default::default()
    })
    .unwrap();
    fx.pool
        .conn
        .execute("DELETE FROM preferences WHERE key = ?1", [KEY_PROFILE])
        .unwrap();

    assert_eq!(repo.load_profile().unwrap(), Profile::default());
}

#[test]
fn test_camel_case_documents_and_missing_fields() {
    let fx = Fixture::new();
    let repo = fx.repo();

    repo.store()
        .put(
            KEY_PROFILE,
            r#"{"name":"Sara","myIdUri":"content://com.compoundassist.fileprovider/id_images/me.jpg"}"#,
        )
        .unwrap();
    repo.store()
        .put(
            KEY_VISITORS,
            r#"[{"id":"v1","name":"Ali","idImageUri":"","arrival":"09:00","departure":"11:00"}]"#,
        )
        .unwrap();

    let profile = repo.try_load_profile().unwrap();
    assert_eq!(profile.name, "Sara");
    assert_eq!(profile.apartment, "");
    assert!(profile.my_id_uri.as_str().ends_with("id_images/me.jpg"));

    let visitors = repo.try_load_visitors().unwrap();
    assert_eq!(visitors.len(), 1);
    // A visit stored without a date belongs to the day it is read.
    assert!(visitors[0].visit_date().is_some());

    let raw = {
        repo.save_profile(&profile).unwrap();
        repo.store().get(KEY_PROFILE).unwrap().unwrap()
    };
    assert!(raw.contains("\"myIdUri\""));
    assert!(raw.contains("\"profilePhotoUri\""));
}

#[test]
fn test_contact_defaults_when_fields_missing() {
    let fx = Fixture::new();
    let repo = fx.repo();

    repo.store()
        .put("contacts_json", r#"[{"name":"Gate","phone":"4001"}]"#)
        .unwrap();

    let contacts = repo.try_load_contacts().unwrap();
    assert_eq!(contacts[0].category, "Other");
    assert_eq!(contacts[0].hours, "");
    assert!(!contacts[0].favorite);
}
