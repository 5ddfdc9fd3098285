use chrono::NaiveTime;
use compound_assist::core::notice::{NOTICE_SUBJECT, compose, notice_body};
use compound_assist::errors::AppError;
use compound_assist::files::VISITOR_IMAGES;
use compound_assist::models::{Profile, Visitor};
use std::fs;

mod common;
use common::{Fixture, day};

fn resident() -> Profile {
    Profile {
        name: "Sara".into(),
        apartment: "B-12".into(),
        ..Default::default()
    }
}

fn guest(fx: &Fixture) -> Visitor {
    let image = fx
        .files()
        .copy_to_private(&fx.external_image("ali.jpg"), VISITOR_IMAGES)
        .unwrap();
    Visitor::new(
        "Ali",
        image,
        NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
        NaiveTime::from_hms_opt(14, 30, 0).unwrap(),
        day(),
    )
}

#[test]
fn test_body_names_apartment_times_and_resident() {
    let fx = Fixture::new();
    let body = notice_body(&resident(), &guest(&fx));

    assert!(body.contains("coming to B-12"));
    assert!(body.contains("at 09:00 AM"));
    assert!(body.contains("leaving at 02:30 PM"));
    assert!(body.trim_end().ends_with("Sara"));
}

#[test]
fn test_compose_addresses_security_and_stages_image() {
    let fx = Fixture::new();
    let files = fx.files();
    let v = guest(&fx);

    let notice = compose(&resident(), &v, &files, "security@compound.example").unwrap();

    assert_eq!(notice.to, "security@compound.example");
    assert_eq!(notice.subject, NOTICE_SUBJECT);
    assert_eq!(notice.subject, "Visitor");
    assert_eq!(notice.body, notice_body(&resident(), &v));
    assert_eq!(notice.attachment, fx.dir.path().join("cache/attachments/ali.jpg"));
    assert_eq!(fs::read(&notice.attachment).unwrap(), b"\xFF\xD8\xFF\xE0fake-jpeg");
}

#[test]
fn test_compose_refuses_unreadable_image() {
    let fx = Fixture::new();
    let files = fx.files();
    let mut v = guest(&fx);
    v.id_image_uri = fx.missing_image("ali.jpg");

    match compose(&resident(), &v, &files, "security@compound.example") {
        Err(AppError::ImageUnavailable(msg)) => {
            assert_eq!(msg, "Visitor ID image not found. Please update it.")
        }
        other => panic!("expected ImageUnavailable, got {:?}", other),
    }
    assert!(!fx.dir.path().join("cache/attachments").exists());
}
