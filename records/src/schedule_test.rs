use time::macros::{date, datetime, time};

use super::*;

fn template(start: Date, end: Date, days: &[u8], times: &[&str]) -> SlotTemplate {
    SlotTemplate {
        start_date: start,
        end_date: end,
        weekdays: WeekdaySet::from_iso(days.iter().copied()).unwrap(),
        times: times.iter().map(|t| (*t).to_owned()).collect(),
    }
}

// =============================================================================
// EXPANSION
// =============================================================================

#[test]
fn first_week_of_2025_mon_wed_fri() {
    let t = template(date!(2025 - 01 - 01), date!(2025 - 01 - 07), &[1, 3, 5], &["09:00", "14:00"]);
    let starts = t.expand().unwrap();
    assert_eq!(
        starts,
        vec![
            datetime!(2025-01-01 09:00),
            datetime!(2025-01-01 14:00),
            datetime!(2025-01-03 09:00),
            datetime!(2025-01-03 14:00),
            datetime!(2025-01-06 09:00),
            datetime!(2025-01-06 14:00),
        ]
    );
}

#[test]
fn count_is_matching_days_times_distinct_times() {
    let t = template(date!(2025 - 02 - 01), date!(2025 - 03 - 31), &[2, 4, 6], &["08:30", "12:00", "17:15"]);
    let days = t.matching_days();
    assert!(days.iter().all(|d| matches!(d.weekday(), Weekday::Tuesday | Weekday::Thursday | Weekday::Saturday)));
    assert_eq!(t.expand().unwrap().len(), days.len() * 3);
}

#[test]
fn duplicate_and_unordered_times_are_normalised() {
    let t = template(date!(2025 - 01 - 06), date!(2025 - 01 - 06), &[1], &["14:00", "09:00", " 14:00 ", ""]);
    assert_eq!(t.parsed_times().unwrap(), vec![time!(09:00), time!(14:00)]);
    assert_eq!(t.expand().unwrap().len(), 2);
}

#[test]
fn single_day_range_without_matching_weekday_is_empty() {
    // 2025-01-04 is a Saturday.
    let t = template(date!(2025 - 01 - 04), date!(2025 - 01 - 04), &[1, 2, 3, 4, 5], &["10:00"]);
    assert!(t.expand().unwrap().is_empty());
}

#[test]
fn output_is_ordered_by_date_then_time() {
    let t = template(date!(2025 - 01 - 01), date!(2025 - 01 - 31), &[1, 2, 3, 4, 5, 6, 7], &["18:00", "07:00"]);
    let starts = t.expand().unwrap();
    assert!(starts.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(starts.len(), 62);
}

// =============================================================================
// VALIDATION
// =============================================================================

#[test]
fn end_before_start_is_rejected() {
    let t = template(date!(2025 - 01 - 07), date!(2025 - 01 - 01), &[1], &["09:00"]);
    assert!(matches!(t.expand(), Err(ScheduleError::EndBeforeStart { .. })));
}

#[test]
fn empty_weekdays_and_times_are_rejected() {
    let t = template(date!(2025 - 01 - 01), date!(2025 - 01 - 07), &[], &["09:00"]);
    assert_eq!(t.expand(), Err(ScheduleError::NoWeekdays));

    let t = template(date!(2025 - 01 - 01), date!(2025 - 01 - 07), &[1], &[" "]);
    assert_eq!(t.expand(), Err(ScheduleError::NoTimes));
}

#[test]
fn range_longer_than_limit_is_rejected() {
    let t = template(date!(2025 - 01 - 01), date!(2026 - 01 - 02), &[1], &["09:00"]);
    assert_eq!(t.expand(), Err(ScheduleError::RangeTooLong { days: 367 }));

    let leap = template(date!(2024 - 01 - 01), date!(2024 - 12 - 31), &[1], &["09:00"]);
    assert!(leap.expand().is_ok());
}

#[test]
fn times_must_be_two_digit_24_hour() {
    for bad in ["9:00", "24:00", "12:60", "noon", "12-30", "12:30:00"] {
        assert_eq!(parse_time(bad), Err(ScheduleError::InvalidTime(bad.to_owned())), "{bad}");
    }
    assert_eq!(parse_time("23:59"), Ok(time!(23:59)));
    assert_eq!(format_time(time!(07:05)), "07:05");
}

// =============================================================================
// WEEKDAY SET
// =============================================================================

#[test]
fn weekday_set_rejects_out_of_range_numbers() {
    assert_eq!(WeekdaySet::from_iso([0]), Err(ScheduleError::InvalidWeekday(0)));
    assert_eq!(WeekdaySet::from_iso([8]), Err(ScheduleError::InvalidWeekday(8)));
}

#[test]
fn weekday_set_toggle_and_listing() {
    let mut set = WeekdaySet::EMPTY;
    set.toggle(Weekday::Sunday);
    set.insert(Weekday::Monday);
    assert_eq!(set, WeekdaySet::from_iso([1, 7]).unwrap());
    set.toggle(Weekday::Sunday);
    assert!(!set.contains(Weekday::Sunday));
    assert_eq!(set.len(), 1);
    assert_eq!(WeekdaySet::WEEKDAYS.len(), 5);
    assert_eq!(WeekdaySet::EVERY_DAY, WeekdaySet::from_iso(1..=7).unwrap());
}
