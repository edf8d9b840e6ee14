use time::macros::{date, datetime};

use super::*;

fn booking(n: u128, status: BookingStatus, start: PrimitiveDateTime, charge: i64) -> Booking {
    Booking {
        id: Uuid::from_u128(n),
        patient_name: format!("Patient {n}"),
        provider: Provider::Expert { id: Uuid::from_u128(100), name: "Dr. Iyer".to_owned() },
        service_name: "Physiotherapy".to_owned(),
        mode: ConsultationMode::Video,
        start_time: start,
        end_time: start + time::Duration::minutes(30),
        charge: Money::from_major(charge),
        status,
        created_at: datetime!(2025-01-01 08:00),
    }
}

#[test]
fn forward_transitions_are_allowed() {
    let mut b = booking(1, BookingStatus::Pending, datetime!(2025-01-10 09:00), 500);
    b.transition(BookingStatus::Confirmed).unwrap();
    b.transition(BookingStatus::Completed).unwrap();
    assert_eq!(b.status, BookingStatus::Completed);
}

#[test]
fn cancel_allowed_only_from_open_states() {
    for open in [BookingStatus::Pending, BookingStatus::Confirmed] {
        let mut b = booking(1, open, datetime!(2025-01-10 09:00), 500);
        assert!(b.transition(BookingStatus::Canceled).is_ok());
    }
    let mut done = booking(2, BookingStatus::Completed, datetime!(2025-01-10 09:00), 500);
    assert_eq!(
        done.transition(BookingStatus::Canceled),
        Err(RecordError::InvalidTransition { from: "Completed", to: "Canceled" })
    );
    assert_eq!(done.status, BookingStatus::Completed);
}

#[test]
fn terminal_states_offer_no_next_steps() {
    assert!(BookingStatus::Completed.next_steps().is_empty());
    assert!(BookingStatus::Canceled.next_steps().is_empty());
    assert_eq!(BookingStatus::Pending.next_steps(), &[BookingStatus::Confirmed, BookingStatus::Canceled]);
    for status in BookingStatus::ALL {
        for next in status.next_steps() {
            assert!(status.can_move_to(*next));
        }
    }
}

#[test]
fn pending_cannot_skip_to_completed() {
    let mut b = booking(1, BookingStatus::Pending, datetime!(2025-01-10 09:00), 500);
    assert!(b.transition(BookingStatus::Completed).is_err());
}

#[test]
fn filters_by_status_mode_date_and_provider() {
    let mut physical = booking(2, BookingStatus::Pending, datetime!(2025-01-12 09:00), 800);
    physical.mode = ConsultationMode::Physical;
    let bookings = [
        booking(1, BookingStatus::Pending, datetime!(2025-01-10 09:00), 500),
        physical,
        booking(3, BookingStatus::Confirmed, datetime!(2025-01-11 09:00), 500),
    ];

    let filters = BookingFilters {
        status: Facet::Only(BookingStatus::Pending),
        mode: Facet::Only(ConsultationMode::Video),
        dates: DateRange::new(Some(date!(2025 - 01 - 10)), Some(date!(2025 - 01 - 10))),
        provider: Some(Uuid::from_u128(100)),
    };
    let ids: Vec<_> = bookings.iter().filter(|b| filters.matches(b)).map(|b| b.id.as_u128()).collect();
    assert_eq!(ids, vec![1]);

    let other_provider = BookingFilters { provider: Some(Uuid::from_u128(7)), ..BookingFilters::default() };
    assert!(bookings.iter().all(|b| !other_provider.matches(b)));
}

#[test]
fn counts_tally_statuses_and_completed_earnings() {
    let bookings = [
        booking(1, BookingStatus::Pending, datetime!(2025-01-10 09:00), 500),
        booking(2, BookingStatus::Completed, datetime!(2025-01-10 10:00), 700),
        booking(3, BookingStatus::Completed, datetime!(2025-01-10 11:00), 300),
        booking(4, BookingStatus::Canceled, datetime!(2025-01-10 12:00), 900),
    ];
    let counts = BookingCounts::tally(&bookings);
    assert_eq!(counts.pending, 1);
    assert_eq!(counts.completed, 2);
    assert_eq!(counts.canceled, 1);
    assert_eq!(counts.total(), 4);
    assert_eq!(counts.earned, Money::from_major(1000));
}

#[test]
fn duration_from_window() {
    let b = booking(1, BookingStatus::Pending, datetime!(2025-01-10 09:00), 500);
    assert_eq!(b.duration_minutes(), 30);
}

#[test]
fn provider_serializes_with_kind_tag() {
    let provider = Provider::Clinic { id: Uuid::nil(), name: "Sunrise Clinic".to_owned() };
    let json = serde_json::to_value(&provider).unwrap();
    assert_eq!(json["kind"], "CLINIC");
    assert_eq!(json["name"], "Sunrise Clinic");
}
