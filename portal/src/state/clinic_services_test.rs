use records::Money;
use time::macros::{date, datetime};

use super::*;

const TODAY: Date = date!(2025 - 06 - 02);
const NOW: PrimitiveDateTime = datetime!(2025-06-02 12:00);

fn state() -> ClinicServicesState {
    ClinicServicesState::from_fixtures()
}

#[test]
fn only_the_current_clinics_services_are_listed() {
    let s = state();
    assert!(!s.services.table().is_empty());
    assert!(s.services.table().rows().iter().all(|r| r.clinic_id == s.clinic.id));
    assert!(s.catalog.iter().all(|c| c.is_active));
}

#[test]
fn create_submits_pending_listing() {
    let mut s = state();
    let entry = s.catalog[0].clone();
    s.open_create(TODAY);
    {
        let input = &mut s.form.as_mut().unwrap().draft;
        input.choose_catalog(&entry);
        input.video = "450".to_owned();
        input.rank = "5".to_owned();
    }
    let message = s.submit(Uuid::from_u128(1), TODAY, NOW).unwrap();
    assert_eq!(message, format!("Submitted {} for review", entry.name));

    let created = s.services.get(Uuid::from_u128(1)).unwrap();
    assert_eq!(created.approval, ApprovalStatus::Pending);
    assert_eq!(created.charges.video, Some(Money::from_major(450)));
    assert_eq!(created.charges.physical, None);
    assert_eq!(created.clinic_name, s.clinic.name);
}

#[test]
fn unparsable_charge_stays_in_form() {
    let mut s = state();
    s.open_create(TODAY);
    s.form.as_mut().unwrap().draft.home = "lots".to_owned();
    let err = s.submit(Uuid::from_u128(1), TODAY, NOW).unwrap_err();
    assert_eq!(err.to_string(), "Home visit charge: amount must be a number");
    assert_eq!(s.form.as_ref().unwrap().error.as_deref(), Some("Home visit charge: amount must be a number"));
}

#[test]
fn past_display_date_is_rejected_on_create() {
    let mut s = state();
    let entry = s.catalog[0].clone();
    s.open_create(TODAY);
    {
        let input = &mut s.form.as_mut().unwrap().draft;
        input.choose_catalog(&entry);
        input.physical = "800".to_owned();
        input.display_date = "2025-06-01".to_owned();
    }
    let err = s.submit(Uuid::from_u128(1), TODAY, NOW).unwrap_err();
    assert_eq!(err.to_string(), "Display date cannot be in the past");
}

#[test]
fn repricing_an_approved_listing_sends_it_back_to_review() {
    let mut s = state();
    let approved = s
        .services
        .table()
        .rows()
        .iter()
        .find(|r| r.approval == ApprovalStatus::Approved)
        .unwrap()
        .clone();

    s.open_edit(approved.id).unwrap();
    s.form.as_mut().unwrap().draft.rank = "1".to_owned();
    assert_eq!(s.submit(Uuid::nil(), TODAY, NOW).unwrap(), format!("Updated {}", approved.name));
    assert_eq!(s.services.get(approved.id).unwrap().approval, ApprovalStatus::Approved);

    s.open_edit(approved.id).unwrap();
    s.form.as_mut().unwrap().draft.physical = "9999".to_owned();
    let message = s.submit(Uuid::nil(), TODAY, NOW).unwrap();
    assert!(message.ends_with("pending review again"));
    assert_eq!(s.services.get(approved.id).unwrap().approval, ApprovalStatus::Pending);
}
