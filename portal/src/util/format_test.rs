use time::macros::{date, datetime};

use super::*;

#[test]
fn money_uses_rupee_sign_and_grouping() {
    assert_eq!(rupees(Money::from_minor(123_456)), "₹1,234.56");
    assert_eq!(charge(None), "Not offered");
    assert_eq!(charge(Some(Money::from_major(500))), "₹500.00");
}

#[test]
fn dates_and_times() {
    assert_eq!(date(date!(2025 - 01 - 07)), "07 Jan 2025");
    let at = datetime!(2025-06-02 09:05);
    assert_eq!(date_time(at), "Mon, 02 Jun 2025 09:05");
    assert_eq!(time_range(at, datetime!(2025-06-02 09:50)), "09:05–09:50");
}

#[test]
fn durations_and_counts() {
    assert_eq!(duration(45), "45 min");
    assert_eq!(duration(60), "1 h");
    assert_eq!(duration(90), "1 h 30 min");
    assert_eq!(count(1, "slot"), "1 slot");
    assert_eq!(count(6, "slot"), "6 slots");
}
