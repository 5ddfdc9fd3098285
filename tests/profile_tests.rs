use compound_assist::core::profile::ProfileLogic;
use compound_assist::errors::AppError;
use std::fs;

mod common;
use common::{AUTHORITY, Fixture};

#[test]
fn test_set_id_image_stores_private_copy() {
    let fx = Fixture::new();
    let repo = fx.repo();
    let files = fx.files();

    let p = ProfileLogic::set_id_image(&repo, &files, &fx.external_image("my_id.jpg")).unwrap();

    assert_eq!(
        p.my_id_uri.as_str(),
        format!("content://{}/id_images/my_id.jpg", AUTHORITY)
    );
    assert_eq!(repo.load_profile().unwrap(), p);
    assert_eq!(
        ProfileLogic::id_card_path(&p, &files).unwrap(),
        fx.dir.path().join("files/id_images/my_id.jpg")
    );
}

#[test]
fn test_set_id_image_again_with_own_reference_keeps_bytes() {
    let fx = Fixture::new();
    let repo = fx.repo();
    let files = fx.files();

    let first = ProfileLogic::set_id_image(&repo, &files, &fx.external_image("my_id.jpg")).unwrap();
    let stored = fx.dir.path().join("files/id_images/my_id.jpg");
    let before = fs::read(&stored).unwrap();
    assert!(!before.is_empty());

    let again = ProfileLogic::set_id_image(&repo, &files, &first.my_id_uri).unwrap();

    assert_eq!(again.my_id_uri, first.my_id_uri);
    assert_eq!(fs::read(&stored).unwrap(), before);
}

#[test]
fn test_update_trims_and_keeps_unset_fields() {
    let fx = Fixture::new();
    let repo = fx.repo();

    ProfileLogic::update(&repo, Some("  Sara "), Some(" B-12 ")).unwrap();
    let p = ProfileLogic::update(&repo, None, Some("C-3")).unwrap();

    assert_eq!(p.name, "Sara");
    assert_eq!(p.apartment, "C-3");
}

#[test]
fn test_missing_id_card_is_reported() {
    let fx = Fixture::new();
    let repo = fx.repo();
    let files = fx.files();

    let p = ProfileLogic::set_id_image(&repo, &files, &fx.external_image("my_id.jpg")).unwrap();
    fs::remove_file(fx.dir.path().join("files/id_images/my_id.jpg")).unwrap();

    assert!(matches!(
        ProfileLogic::id_card_path(&p, &files),
        Err(AppError::ImageUnavailable(_))
    ));
}
