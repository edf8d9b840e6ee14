use records::catalog::{CatalogFilters, CatalogService, CatalogSortKey, ServiceCategory};
use records::export::ExportFormat;
use records::{Facet, SortSpec};
use time::macros::{date, datetime};
use uuid::Uuid;

use crate::util::form::InputError;

use super::*;

fn entry(n: u128, name: &str, category: ServiceCategory) -> CatalogService {
    CatalogService {
        id: Uuid::from_u128(n),
        name: name.to_owned(),
        category,
        description: String::new(),
        is_active: true,
        created_at: datetime!(2025-01-01 09:00),
    }
}

fn collection(count: u128) -> Collection<CatalogService, CatalogFilters> {
    let rows = (1..=count).map(|n| entry(n, &format!("Service {n:03}"), ServiceCategory::Therapy)).collect();
    Collection::new(rows, Some(SortSpec::asc(CatalogSortKey::Name)))
}

// =============================================================================
// VIEW
// =============================================================================

#[test]
fn page_rows_follow_the_window() {
    let mut c = collection(30);
    assert_eq!(c.page_rows().len(), 12);
    c.view_state_mut().set_page(3);
    let window = c.window();
    assert_eq!(window.page, 3);
    assert_eq!(c.page_rows().len(), 6);
    assert_eq!(window.label(), "Showing 25–30 of 30");
}

#[test]
fn filter_change_returns_to_first_page() {
    let mut c = collection(30);
    c.view_state_mut().set_page(2);
    c.view_state_mut().update_filters(|f| f.category = Facet::Only(ServiceCategory::Therapy));
    assert_eq!(c.window().page, 1);
}

#[test]
fn reload_keeps_filters_and_drops_pending_delete() {
    let mut c = collection(30);
    c.view_state_mut().set_search("service 0");
    c.view_state_mut().set_page(2);
    c.request_delete(Uuid::from_u128(4));

    c.reload((1..=3).map(|n| entry(n, &format!("Service {n:03}"), ServiceCategory::Therapy)).collect());
    assert_eq!(c.table().len(), 3);
    assert_eq!(c.view_state().search().raw(), "service 0");
    assert_eq!(c.window().page, 1);
    assert!(c.pending_delete().is_none());
}

// =============================================================================
// DELETE
// =============================================================================

#[test]
fn confirm_delete_removes_only_the_pending_row() {
    let mut c = collection(5);
    c.request_delete(Uuid::from_u128(3));
    assert_eq!(c.pending_delete().map(|s| s.name.as_str()), Some("Service 003"));

    let removed = c.confirm_delete().unwrap();
    assert_eq!(removed.id, Uuid::from_u128(3));
    let ids: Vec<u128> = c.table().rows().iter().map(|s| s.id.as_u128()).collect();
    assert_eq!(ids, vec![1, 2, 4, 5]);
    assert!(c.pending_delete().is_none());
}

#[test]
fn confirm_without_request_is_rejected() {
    let mut c = collection(2);
    assert!(matches!(c.confirm_delete(), Err(ActionError::NoForm)));
    c.request_delete(Uuid::from_u128(1));
    c.cancel_delete();
    assert!(c.confirm_delete().is_err());
    assert_eq!(c.table().len(), 2);
}

#[test]
fn deleting_last_row_on_last_page_clamps_window() {
    let mut c = collection(13);
    c.view_state_mut().set_page(2);
    c.request_delete(Uuid::from_u128(13));
    c.confirm_delete().unwrap();
    assert_eq!(c.window().page, 1);
    assert_eq!(c.page_rows().len(), 12);
}

// =============================================================================
// EXPORT
// =============================================================================

#[test]
fn export_covers_all_filtered_rows() {
    let mut c = collection(30);
    c.table_mut().insert(entry(99, "Yoga", ServiceCategory::Wellness));
    c.view_state_mut().update_filters(|f| f.category = Facet::Only(ServiceCategory::Therapy));

    let file = c.export(ExportFormat::Csv, date!(2025 - 05 - 01)).unwrap();
    assert_eq!(file.filename, "catalog-2025-05-01.csv");
    assert_eq!(file.body.lines().count(), 31);
    assert!(!file.body.contains("Yoga"));
}

// =============================================================================
// FORM
// =============================================================================

#[test]
fn settle_form_closes_on_success_and_keeps_error_on_failure() {
    let mut form = Some(Form::create("draft".to_owned()));
    let err = settle_form(&mut form, Err(ActionError::Input(InputError::Number { label: "Rank" })));
    assert!(err.is_err());
    assert_eq!(form.as_ref().and_then(|f| f.error.as_deref()), Some("Rank must be a whole number"));

    let ok = settle_form(&mut form, Ok("Saved".to_owned()));
    assert_eq!(ok.unwrap(), "Saved");
    assert!(form.is_none());
}

#[test]
fn form_title_reflects_mode() {
    assert_eq!(Form::create(()).title("user"), "Add user");
    let edit = Form::edit(Uuid::from_u128(1), ());
    assert!(edit.is_edit());
    assert_eq!(edit.title("slot"), "Edit slot");
}
