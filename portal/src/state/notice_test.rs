use super::*;

#[test]
fn newer_notice_replaces_older() {
    let mut notices = Notices::default();
    notices.success("User created");
    let id = notices.error("Email is required");
    let current = notices.current().unwrap();
    assert_eq!(current.id, id);
    assert_eq!(current.kind, NoticeKind::Error);
    assert_eq!(current.message, "Email is required");
}

#[test]
fn stale_dismiss_keeps_newer_notice() {
    let mut notices = Notices::default();
    let first = notices.success("Saved");
    let second = notices.success("Deleted");
    notices.dismiss(first);
    assert_eq!(notices.current().map(|n| n.id), Some(second));
    notices.dismiss(second);
    assert!(notices.current().is_none());
}

#[test]
fn report_maps_outcome_to_kind() {
    let mut notices = Notices::default();
    notices.report::<String>(Ok("Payment recorded".to_owned()));
    assert_eq!(notices.current().unwrap().kind, NoticeKind::Success);

    notices.report::<String>(Err("Amount must be greater than zero".to_owned()));
    let current = notices.current().unwrap();
    assert_eq!(current.kind, NoticeKind::Error);
    assert_eq!(current.message, "Amount must be greater than zero");
}

#[test]
fn kind_classes_are_distinct() {
    assert_ne!(NoticeKind::Success.class(), NoticeKind::Error.class());
    assert!(NoticeKind::Info.class().starts_with("toast "));
}
