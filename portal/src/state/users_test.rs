use records::user::Role;
use time::macros::datetime;

use super::*;

const NOW: PrimitiveDateTime = datetime!(2025-06-02 12:00);

fn state() -> UsersState {
    UsersState::new(fixtures::users(10))
}

fn fill(state: &mut UsersState, name: &str, email: &str) {
    let form = state.form.as_mut().unwrap();
    form.draft.name = name.to_owned();
    form.draft.email = email.to_owned();
    form.draft.phone = "9876543210".to_owned();
    form.draft.role = Role::Expert;
}

#[test]
fn create_inserts_at_top_and_closes_form() {
    let mut s = state();
    s.open_create();
    fill(&mut s, "Nisha Rao", "nisha@example.com");
    let message = s.submit(Uuid::from_u128(7), NOW).unwrap();

    assert_eq!(message, "Created Nisha Rao");
    assert!(s.form.is_none());
    assert_eq!(s.users.table().len(), 11);
    assert_eq!(s.users.table().rows()[0].id, Uuid::from_u128(7));
}

#[test]
fn invalid_draft_keeps_form_open_with_message() {
    let mut s = state();
    s.open_create();
    fill(&mut s, "Nisha Rao", "not-an-email");
    assert!(s.submit(Uuid::from_u128(7), NOW).is_err());

    let form = s.form.as_ref().unwrap();
    assert!(form.error.is_some());
    assert_eq!(s.users.table().len(), 10);
}

#[test]
fn duplicate_email_is_rejected_except_for_self() {
    let mut s = state();
    let existing = s.users.table().rows()[3].clone();

    s.open_create();
    fill(&mut s, "Copy Cat", &existing.email.to_uppercase());
    let err = s.submit(Uuid::from_u128(7), NOW).unwrap_err();
    assert_eq!(err.to_string(), "A user with this email already exists");

    s.open_edit(existing.id).unwrap();
    s.form.as_mut().unwrap().draft.name = "Renamed".to_owned();
    assert_eq!(s.submit(Uuid::nil(), NOW).unwrap(), "Updated Renamed");
    assert_eq!(s.users.get(existing.id).unwrap().updated_at, NOW);
}

#[test]
fn submit_without_form_is_an_error() {
    let mut s = state();
    assert!(matches!(s.submit(Uuid::nil(), NOW), Err(ActionError::NoForm)));
}

#[test]
fn block_toggle_updates_stats_and_message() {
    let mut s = state();
    let id = s.users.table().rows().iter().find(|u| !u.is_blocked).unwrap().id;
    let before = s.stats();

    let message = s.toggle_block(id, NOW).unwrap();
    assert!(message.starts_with("Blocked "));
    assert_eq!(s.stats().blocked, before.blocked + 1);
    assert_eq!(s.stats().total, before.total);

    assert!(s.toggle_block(id, NOW).unwrap().starts_with("Unblocked "));
    assert_eq!(s.stats(), before);
}

#[test]
fn delete_removes_one_user() {
    let mut s = state();
    let id = s.users.table().rows()[2].id;
    s.users.request_delete(id);
    assert!(s.confirm_delete().unwrap().starts_with("Deleted "));
    assert!(s.users.get(id).is_none());
    assert_eq!(s.users.table().len(), 9);
}

#[test]
fn editing_a_missing_user_fails() {
    let mut s = state();
    assert!(s.open_edit(Uuid::from_u128(999)).is_err());
    assert!(s.form.is_none());
}
