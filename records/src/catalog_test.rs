use time::macros::datetime;

use super::*;

fn service(n: u128, name: &str, category: ServiceCategory, active: bool) -> CatalogService {
    CatalogService {
        id: Uuid::from_u128(n),
        name: name.to_owned(),
        category,
        description: format!("{name} for all ages"),
        is_active: active,
        created_at: datetime!(2025-01-01 09:00),
    }
}

#[test]
fn duplicate_names_are_rejected_except_for_self() {
    let existing = [service(1, "Blood Test", ServiceCategory::Diagnostics, true)];
    let draft = CatalogDraft { name: " blood test ".to_owned(), ..CatalogDraft::default() };

    let err = draft.validate(&existing, None).unwrap_err();
    assert_eq!(err.message_for("name"), Some("A service with this name already exists"));

    assert!(draft.validate(&existing, Some(Uuid::from_u128(1))).is_ok());
}

#[test]
fn long_description_is_rejected() {
    let draft = CatalogDraft {
        name: "Dental Cleaning".to_owned(),
        description: "x".repeat(MAX_DESCRIPTION_LEN + 1),
        ..CatalogDraft::default()
    };
    let err = draft.validate(&[], None).unwrap_err();
    assert!(err.message_for("description").is_some());
}

#[test]
fn filters_by_category_and_availability() {
    let services = [
        service(1, "Blood Test", ServiceCategory::Diagnostics, true),
        service(2, "X-Ray", ServiceCategory::Diagnostics, false),
        service(3, "Yoga", ServiceCategory::Wellness, true),
    ];
    let filters = CatalogFilters {
        category: Facet::Only(ServiceCategory::Diagnostics),
        availability: Facet::Only(Availability::Active),
    };
    let names: Vec<_> = services.iter().filter(|s| filters.matches(s)).map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Blood Test"]);
}

#[test]
fn build_and_apply_trim_input() {
    let draft = CatalogDraft {
        name: "  Teeth Whitening ".to_owned(),
        category: ServiceCategory::Dental,
        description: " Cosmetic ".to_owned(),
        is_active: false,
    };
    let built = draft.build(Uuid::from_u128(9), datetime!(2025-02-01 10:00));
    assert_eq!(built.name, "Teeth Whitening");
    assert_eq!(built.description, "Cosmetic");
    assert!(!built.is_active);

    let mut other = service(2, "Old", ServiceCategory::Therapy, true);
    draft.apply(&mut other);
    assert_eq!(other.name, "Teeth Whitening");
    assert_eq!(other.category, ServiceCategory::Dental);
    assert_eq!(other.id, Uuid::from_u128(2));
}

#[test]
fn toggle_active_flips_flag() {
    let mut s = service(1, "Yoga", ServiceCategory::Wellness, true);
    assert!(!s.toggle_active());
    assert!(s.toggle_active());
}
