use compound_assist::errors::AppError;
use compound_assist::files::{ID_IMAGES, ImageRef, RefKind, VISITOR_IMAGES};

mod common;
use common::{AUTHORITY, Fixture};

#[test]
fn test_reference_kinds() {
    assert_eq!(ImageRef::new("").kind(), RefKind::Empty);
    assert_eq!(ImageRef::new("   ").kind(), RefKind::Empty);
    assert!(matches!(
        ImageRef::new("file:///tmp/a.jpg").kind(),
        RefKind::External(p) if p.ends_with("a.jpg")
    ));
    assert!(matches!(
        ImageRef::new("/tmp/a.jpg").kind(),
        RefKind::External(_)
    ));
    assert_eq!(
        ImageRef::new("content://other.app/pics/a.jpg").authority().as_deref(),
        Some("other.app")
    );
}

#[test]
fn test_copy_to_private_issues_own_reference() {
    let fx = Fixture::new();
    let files = fx.files();
    let picked = fx.external_image("passport.jpg");

    assert!(!files.is_own_reference(&picked));
    assert!(files.is_readable(&picked));

    let private = files.copy_to_private(&picked, VISITOR_IMAGES).unwrap();

    assert_eq!(
        private.as_str(),
        format!("content://{}/visitor_images/passport.jpg", AUTHORITY)
    );
    assert!(files.is_own_reference(&private));
    assert!(files.is_readable(&private));
    assert!(fx.dir.path().join("files/visitor_images/passport.jpg").exists());
}

#[test]
fn test_ensure_private_keeps_own_reference() {
    let fx = Fixture::new();
    let files = fx.files();

    let private = files
        .copy_to_private(&fx.external_image("me.jpg"), ID_IMAGES)
        .unwrap();
    let again = files.ensure_private(&private, ID_IMAGES).unwrap();

    assert_eq!(again, private);
}

#[test]
fn test_copy_failure_yields_no_reference() {
    let fx = Fixture::new();
    let files = fx.files();

    let err = files
        .copy_to_private(&fx.missing_image("lost.jpg"), VISITOR_IMAGES)
        .unwrap_err();

    assert!(matches!(err, AppError::ImageCopy { .. }));
    assert!(!fx.dir.path().join("files/visitor_images/lost.jpg").exists());
}

#[test]
fn test_unreachable_references_are_not_readable() {
    let fx = Fixture::new();
    let files = fx.files();

    assert!(!files.is_readable(&ImageRef::empty()));
    assert!(!files.is_readable(&fx.missing_image("x.jpg")));
    assert!(!files.is_readable(&ImageRef::new("content://other.app/pics/a.jpg")));
    // A directory is not an image.
    assert!(!files.is_readable(&ImageRef::new(fx.dir.path().to_string_lossy().to_string())));
}

#[test]
fn test_own_reference_cannot_escape_root() {
    let fx = Fixture::new();
    let files = fx.files();

    let sneaky = ImageRef::new(format!("content://{}/../secret.jpg", AUTHORITY));
    assert_eq!(files.resolve(&sneaky), None);
    assert!(!files.is_readable(&sneaky));

    let fine = ImageRef::provider(AUTHORITY, VISITOR_IMAGES, "a.jpg");
    assert_eq!(
        files.resolve(&fine),
        Some(fx.dir.path().join("files").join("visitor_images").join("a.jpg"))
    );
}

#[test]
fn test_copy_to_cache_stages_attachment() {
    let fx = Fixture::new();
    let files = fx.files();

    let private = files
        .copy_to_private(&fx.external_image("guest.jpg"), VISITOR_IMAGES)
        .unwrap();
    let staged = files.copy_to_cache(&private).unwrap();

    assert_eq!(staged, fx.dir.path().join("cache/attachments/guest.jpg"));
    assert!(staged.exists());
}

#[test]
fn test_copy_of_private_file_onto_itself_keeps_bytes() {
    let fx = Fixture::new();
    let files = fx.files();

    let private = files
        .copy_to_private(&fx.external_image("guest.jpg"), VISITOR_IMAGES)
        .unwrap();
    let stored = fx.dir.path().join("files/visitor_images/guest.jpg");
    let before = std::fs::read(&stored).unwrap();

    // Raw path that already points inside the private root.
    let raw = ImageRef::new(stored.to_string_lossy().to_string());
    let again = files.copy_to_private(&raw, VISITOR_IMAGES).unwrap();
    assert_eq!(again, private);
    assert_eq!(std::fs::read(&stored).unwrap(), before);

    let via_own = files.copy_to_private(&private, VISITOR_IMAGES).unwrap();
    assert_eq!(via_own, private);
    assert_eq!(std::fs::read(&stored).unwrap(), before);
}
