use chrono::NaiveTime;
use compound_assist::core::backup::{BackupLogic, ExportOptions, SECTION_CONTACTS, SECTION_VISITORS};
use compound_assist::errors::AppError;
use compound_assist::files::ImageRef;
use compound_assist::models::{Contact, Profile, SavedPerson, Visitor};
use std::fs;

mod common;
use common::{Fixture, day};

fn fill(fx: &Fixture) {
    let repo = fx.repo();
    repo.save_profile(&Profile {
        name: "Sara".into(),
        apartment: "B-12".into(),
        ..Default::default()
    })
    .unwrap();
    repo.save_contacts(&[Contact::new("Gate", "4001", "24 Hours", "Security")])
        .unwrap();
    repo.save_visitors(&[Visitor::new(
        "Ali",
        ImageRef::new("content://com.compoundassist.fileprovider/visitor_images/ali.jpg"),
        NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
        NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
        day(),
    )])
    .unwrap();
    repo.save_saved_people(&[SavedPerson::new("Ali", ImageRef::empty())])
        .unwrap();
}

#[test]
fn test_export_then_import_restores_everything() {
    let src = Fixture::new();
    fill(&src);
    let dest = src.dir.path().join("backup/compound_backup.json");

    let written = BackupLogic::export(&src.repo(), &dest, ExportOptions::default()).unwrap();
    assert_eq!(written, dest);

    let doc: serde_json::Value = serde_json::from_str(&fs::read_to_string(&dest).unwrap()).unwrap();
    for key in ["profile", "contacts", "visitors", "saved_people"] {
        assert!(doc.get(key).is_some(), "missing section {key}");
    }
    assert_eq!(doc["visitors"][0]["idImageUri"], "content://com.compoundassist.fileprovider/visitor_images/ali.jpg");

    let target = Fixture::new();
    let report = BackupLogic::import(&target.repo(), &dest).unwrap();
    assert_eq!(report.restored.len(), 4);
    assert!(report.skipped.is_empty());

    let (a, b) = (src.repo(), target.repo());
    assert_eq!(a.load_profile().unwrap(), b.load_profile().unwrap());
    assert_eq!(a.load_contacts().unwrap(), b.load_contacts().unwrap());
    assert_eq!(a.load_visitors().unwrap(), b.load_visitors().unwrap());
    assert_eq!(a.load_saved_people().unwrap(), b.load_saved_people().unwrap());
}

#[test]
fn test_export_refuses_to_overwrite_without_force() {
    let fx = Fixture::new();
    fill(&fx);
    let dest = fx.dir.path().join("compound_backup.json");
    fs::write(&dest, "keep me").unwrap();

    let err = BackupLogic::export(&fx.repo(), &dest, ExportOptions::default()).unwrap_err();
    assert!(matches!(err, AppError::Backup(ref m) if m.contains("already exists")));
    assert_eq!(fs::read_to_string(&dest).unwrap(), "keep me");

    BackupLogic::export(
        &fx.repo(),
        &dest,
        ExportOptions {
            force: true,
            ..Default::default()
        },
    )
    .unwrap();
    assert!(fs::read_to_string(&dest).unwrap().contains("\"contacts\""));

    // No temporary file left behind.
    let leftovers: Vec<_> = fs::read_dir(fx.dir.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty());
}

#[test]
fn test_compressed_backup_imports() {
    let src = Fixture::new();
    fill(&src);
    let dest = src.dir.path().join("compound_backup.json");

    let written = BackupLogic::export(
        &src.repo(),
        &dest,
        ExportOptions {
            compress: true,
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(written, src.dir.path().join("compound_backup.zip"));
    assert!(!dest.exists());

    let target = Fixture::new();
    let report = BackupLogic::import(&target.repo(), &written).unwrap();
    assert_eq!(report.restored.len(), 4);
    assert_eq!(
        target.repo().load_visitors().unwrap(),
        src.repo().load_visitors().unwrap()
    );
}

#[test]
fn test_import_with_only_contacts_touches_only_contacts() {
    let fx = Fixture::new();
    fill(&fx);
    let repo = fx.repo();
    let visitors_before = repo.load_visitors().unwrap();
    let profile_before = repo.load_profile().unwrap();

    let report = BackupLogic::restore_from_str(
        &repo,
        r#"{"contacts":[{"name":"Laundry","phone":"4018","hours":"","category":"Services","favorite":true}]}"#,
    )
    .unwrap();

    assert_eq!(report.restored, vec![SECTION_CONTACTS]);
    assert!(report.skipped.is_empty());
    let contacts = repo.load_contacts().unwrap();
    assert_eq!(contacts.len(), 1);
    assert_eq!(contacts[0].name, "Laundry");
    assert!(contacts[0].favorite);
    assert_eq!(repo.load_visitors().unwrap(), visitors_before);
    assert_eq!(repo.load_profile().unwrap(), profile_before);
}

#[test]
fn test_unreadable_section_is_skipped() {
    let fx = Fixture::new();
    fill(&fx);
    let repo = fx.repo();
    let visitors_before = repo.load_visitors().unwrap();

    let report = BackupLogic::restore_from_str(
        &repo,
        r#"{"visitors":"oops","profile":{"name":"Omar"},"saved_people":null}"#,
    )
    .unwrap();

    assert_eq!(report.skipped, vec![SECTION_VISITORS]);
    assert_eq!(report.restored, vec!["profile"]);
    assert_eq!(repo.load_visitors().unwrap(), visitors_before);
    assert_eq!(repo.load_profile().unwrap().name, "Omar");
    assert_eq!(repo.load_saved_people().unwrap().len(), 1);
}

#[test]
fn test_import_rejects_non_documents() {
    let fx = Fixture::new();
    let repo = fx.repo();

    assert!(matches!(
        BackupLogic::restore_from_str(&repo, "[1, 2, 3]"),
        Err(AppError::Backup(_))
    ));
    assert!(matches!(
        BackupLogic::restore_from_str(&repo, "not json at all"),
        Err(AppError::Backup(_))
    ));
}
