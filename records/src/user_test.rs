use time::macros::datetime;

use super::*;
use crate::query::{Search, SortSpec, ViewState};
use crate::table::Table;

fn user(n: u128, name: &str, role: Role, created_at: PrimitiveDateTime) -> User {
    User {
        id: Uuid::from_u128(n),
        name: name.to_owned(),
        email: format!("{}@example.com", name.to_lowercase()),
        country_code: "+91".to_owned(),
        phone: format!("98765432{n:02}"),
        role,
        is_active: true,
        is_blocked: false,
        created_at,
        updated_at: created_at,
    }
}

#[test]
fn blocking_flips_flag_and_offered_action() {
    let mut u = user(1, "Asha", Role::Patient, datetime!(2025-01-01 10:00));
    assert_eq!(u.block_action(), BlockAction::Block);
    assert_eq!(u.block_action().label(), "Block");

    assert!(u.toggle_block(datetime!(2025-01-02 09:00)));
    assert!(u.is_blocked);
    assert_eq!(u.status(), AccountStatus::Blocked);
    assert_eq!(u.block_action(), BlockAction::Unblock);
    assert_eq!(u.updated_at, datetime!(2025-01-02 09:00));

    assert!(!u.toggle_block(datetime!(2025-01-03 09:00)));
    assert_eq!(u.block_action().label(), "Block");
}

#[test]
fn blocked_filter_lists_only_unblock_actions() {
    let mut table = Table::new(vec![
        user(1, "Asha", Role::Patient, datetime!(2025-01-01 10:00)),
        user(2, "Ravi", Role::Expert, datetime!(2025-01-02 10:00)),
    ]);
    table
        .update(Uuid::from_u128(2), |u| {
            u.toggle_block(datetime!(2025-01-05 10:00));
            Ok(())
        })
        .unwrap();

    let mut state: ViewState<UserFilters, UserSortKey> = ViewState::new(None);
    state.update_filters(|f| f.status = Facet::Only(AccountStatus::Blocked));
    let view = state.view(table.rows());
    assert_eq!(view.filtered_count(), 1);
    assert!(view.page().iter().all(|u| u.block_action() == BlockAction::Unblock));
}

#[test]
fn status_prefers_blocked_over_inactive() {
    let mut u = user(1, "Asha", Role::Clinic, datetime!(2025-01-01 10:00));
    u.toggle_active(datetime!(2025-01-01 11:00));
    assert_eq!(u.status(), AccountStatus::Inactive);
    u.toggle_block(datetime!(2025-01-01 12:00));
    assert_eq!(u.status(), AccountStatus::Blocked);
}

#[test]
fn search_covers_name_email_and_phone() {
    let u = user(7, "Kiran", Role::Admin, datetime!(2025-01-01 10:00));
    assert!(Search::new("kir").matches(&u));
    assert!(Search::new("@EXAMPLE").matches(&u));
    assert!(Search::new("9876543207").matches(&u));
    assert!(!Search::new("+91").matches(&u));
}

#[test]
fn filters_combine_role_and_joined_range() {
    let users = vec![
        user(1, "Asha", Role::Patient, datetime!(2025-01-01 10:00)),
        user(2, "Ravi", Role::Patient, datetime!(2025-02-01 10:00)),
        user(3, "Meera", Role::Expert, datetime!(2025-02-01 10:00)),
    ];
    let filters = UserFilters {
        role: Facet::Only(Role::Patient),
        joined: DateRange::new(Some(time::macros::date!(2025 - 01 - 15)), None),
        ..UserFilters::default()
    };
    let matched: Vec<_> = users.iter().filter(|u| filters.matches(u)).map(|u| u.name.as_str()).collect();
    assert_eq!(matched, vec!["Ravi"]);
}

#[test]
fn name_sort_is_case_insensitive() {
    let users = vec![
        user(1, "bala", Role::Patient, datetime!(2025-01-01 10:00)),
        user(2, "Anu", Role::Patient, datetime!(2025-01-01 10:00)),
    ];
    let state: ViewState<UserFilters, UserSortKey> = ViewState::new(Some(SortSpec::asc(UserSortKey::Name)));
    let names: Vec<_> = state.view(&users).matched.iter().map(|u| u.name.as_str()).collect();
    assert_eq!(names, vec!["Anu", "bala"]);
}

#[test]
fn draft_validation_reports_bad_fields() {
    let draft = UserDraft {
        name: String::new(),
        email: "bad".to_owned(),
        country_code: "91".to_owned(),
        phone: "12".to_owned(),
        ..UserDraft::default()
    };
    let err = draft.validate().unwrap_err();
    let fields: Vec<_> = err.fields().iter().map(|e| e.field).collect();
    assert_eq!(fields, vec!["name", "email", "country_code", "phone"]);
}

#[test]
fn draft_create_normalizes_fields() {
    let draft = UserDraft {
        name: "  Dr. Rao ".to_owned(),
        email: "Rao@Clinic.IN".to_owned(),
        phone: "9876543210".to_owned(),
        role: Role::Expert,
        ..UserDraft::default()
    };
    let now = datetime!(2025-03-01 08:30);
    let created = draft.create(Uuid::from_u128(5), now).unwrap();
    assert_eq!(created.name, "Dr. Rao");
    assert_eq!(created.email, "rao@clinic.in");
    assert_eq!(created.role, Role::Expert);
    assert!(!created.is_blocked);
    assert_eq!(created.created_at, now);
}

#[test]
fn draft_apply_leaves_user_untouched_on_error() {
    let mut u = user(1, "Asha", Role::Patient, datetime!(2025-01-01 10:00));
    let before = u.clone();
    let mut draft = UserDraft::from(&u);
    draft.email = "broken".to_owned();
    assert!(draft.apply(&mut u, datetime!(2025-01-09 10:00)).is_err());
    assert_eq!(u, before);

    draft.email = "asha.new@example.com".to_owned();
    draft.apply(&mut u, datetime!(2025-01-09 10:00)).unwrap();
    assert_eq!(u.email, "asha.new@example.com");
    assert_eq!(u.updated_at, datetime!(2025-01-09 10:00));
}
