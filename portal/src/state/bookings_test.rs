use records::Facet;

use super::*;

fn with_status(state: &BookingsState, status: BookingStatus) -> Uuid {
    state.bookings.table().rows().iter().find(|b| b.status == status).unwrap().id
}

#[test]
fn portal_lists_only_the_experts_bookings() {
    let s = BookingsState::from_fixtures();
    assert!(!s.bookings.table().is_empty());
    assert!(s.bookings.table().rows().iter().all(|b| b.provider.id() == s.expert.id));
    assert_eq!(s.counts().total(), s.bookings.table().len());
}

#[test]
fn confirming_a_pending_booking_updates_counts() {
    let mut s = BookingsState::from_fixtures();
    let before = s.counts();
    let id = with_status(&s, BookingStatus::Pending);

    let message = s.transition(id, BookingStatus::Confirmed).unwrap();
    assert!(message.starts_with("Confirmed booking for "));
    assert_eq!(s.counts().pending, before.pending - 1);
    assert_eq!(s.counts().confirmed, before.confirmed + 1);
}

#[test]
fn completing_adds_to_earnings() {
    let mut s = BookingsState::from_fixtures();
    let before = s.counts();
    let id = with_status(&s, BookingStatus::Confirmed);
    let charge = s.bookings.get(id).unwrap().charge;

    s.transition(id, BookingStatus::Completed).unwrap();
    assert_eq!(s.counts().earned, before.earned + charge);
}

#[test]
fn settled_bookings_reject_further_moves() {
    let mut s = BookingsState::from_fixtures();
    let id = with_status(&s, BookingStatus::Completed);

    assert!(s.transition(id, BookingStatus::Canceled).is_err());
    assert_eq!(s.error.as_deref(), Some("cannot move from Completed to Canceled"));
    assert_eq!(s.bookings.get(id).unwrap().status, BookingStatus::Completed);

    s.dismiss_error();
    assert!(s.error.is_none());
}

#[test]
fn status_facet_narrows_the_table() {
    let mut s = BookingsState::from_fixtures();
    s.bookings.view_state_mut().update_filters(|f| f.status = Facet::Only(BookingStatus::Pending));
    assert_eq!(s.bookings.visible().filtered_count(), s.counts().pending);
}

#[test]
fn refresh_discards_local_moves_and_keeps_ownership() {
    let mut s = BookingsState::from_fixtures();
    let before = s.counts();
    let id = with_status(&s, BookingStatus::Pending);
    s.transition(id, BookingStatus::Canceled).unwrap();
    s.error = Some("stale".to_owned());

    let message = s.refresh();
    assert_eq!(message, format!("Loaded {} bookings", before.total()));
    assert_eq!(s.counts(), before);
    assert!(s.error.is_none());
    assert!(s.bookings.table().rows().iter().all(|b| b.provider.id() == s.expert.id));
}

#[test]
fn reload_filters_out_other_providers() {
    let mut s = BookingsState::from_fixtures();
    let all = records::fixtures::bookings(240);
    let own = all.iter().filter(|b| b.provider.id() == s.expert.id).count();
    assert!(own < all.len());

    s.reload(all);
    assert_eq!(s.bookings.table().len(), own);
}
