use std::collections::HashSet;

use super::*;
use crate::slot::SlotStatus;
use crate::validate::{is_email, is_phone};

#[test]
fn generators_are_deterministic() {
    assert_eq!(users(30), users(30));
    assert_eq!(bookings(20), bookings(20));
    assert_eq!(clinic_services(), clinic_services());
    assert_eq!(dues(), dues());
    assert_eq!(expert_slots(), expert_slots());
}

#[test]
fn ids_are_unique_across_a_collection() {
    let users = users(200);
    let ids: HashSet<_> = users.iter().map(|u| u.id).collect();
    assert_eq!(ids.len(), users.len());

    let bookings = bookings(200);
    let ids: HashSet<_> = bookings.iter().map(|b| b.id).collect();
    assert_eq!(ids.len(), bookings.len());
}

#[test]
fn users_pass_their_own_validation() {
    for user in users(100) {
        assert!(is_email(&user.email), "{}", user.email);
        assert!(is_phone(&user.phone), "{}", user.phone);
        assert!(user.created_at <= ANCHOR);
        assert!(user.updated_at >= user.created_at);
    }
}

#[test]
fn bookings_respect_the_lifecycle_around_the_anchor() {
    for booking in bookings(150) {
        assert!(booking.end_time > booking.start_time);
        assert!(booking.charge.is_positive());
        if booking.start_time < ANCHOR {
            assert!(matches!(booking.status, BookingStatus::Completed | BookingStatus::Canceled));
        } else {
            assert!(matches!(booking.status, BookingStatus::Pending | BookingStatus::Confirmed));
        }
    }
}

#[test]
fn clinic_services_reference_catalog_and_offer_a_mode() {
    let catalog_ids: HashSet<_> = catalog().iter().map(|c| c.id).collect();
    let services = clinic_services();
    assert!(!services.is_empty());
    assert!(services.iter().any(|s| s.clinic_id == current_clinic().id));
    for service in &services {
        assert!(catalog_ids.contains(&service.catalog_service_id));
        assert!(service.charges.lowest().is_some());
    }
}

#[test]
fn slots_keep_capacity_invariant() {
    let services = clinic_services();
    let slots: Vec<_> = clinic_slots(&services).into_iter().chain(expert_slots()).collect();
    assert!(!slots.is_empty());
    for slot in &slots {
        assert!(slot.available_slots <= slot.max_bookings);
    }
    assert!(slots.iter().any(|s| s.status() == SlotStatus::Available));
}

#[test]
fn dues_totals_match_transactions() {
    let all = dues();
    assert_eq!(all.len(), clinics().len());
    for clinic in &all {
        let paid: Money = clinic.transactions.iter().map(|t| t.amount).sum();
        assert_eq!(paid, clinic.amount_paid);
        assert!(clinic.amount_paid <= clinic.platform_fee);
        assert!(clinic.transactions.windows(2).all(|w| w[0].paid_at >= w[1].paid_at));
    }
}

#[test]
fn clinic_services_cover_every_approval_state() {
    let services = clinic_services();
    for status in ApprovalStatus::ALL {
        assert!(services.iter().any(|s| s.approval == *status), "{status:?}");
    }
}

#[test]
fn current_clinic_has_approved_services_with_slots() {
    let services = clinic_services();
    let clinic = current_clinic();
    assert!(services.iter().any(|s| s.clinic_id == clinic.id && s.approval == ApprovalStatus::Approved));
    assert!(!clinic_slots(&services).is_empty());
}

#[test]
fn current_expert_has_open_and_settled_bookings() {
    let expert = current_expert();
    let own: Vec<_> = bookings(240).into_iter().filter(|b| b.provider.id() == expert.id).collect();
    for status in [BookingStatus::Pending, BookingStatus::Confirmed, BookingStatus::Completed] {
        assert!(own.iter().any(|b| b.status == status), "{status:?}");
    }
}

#[test]
fn dues_include_settled_and_owing_clinics() {
    use crate::dues::DuesStatus;

    let all = dues();
    assert!(all.iter().any(|c| c.status() == DuesStatus::Clear));
    assert!(all.iter().any(|c| c.status() != DuesStatus::Clear));
}
