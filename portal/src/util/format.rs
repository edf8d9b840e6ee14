//! Display formatting for table cells and cards.

#[cfg(test)]
#[path = "format_test.rs"]
mod format_test;

use records::Money;
use time::{Date, Month, PrimitiveDateTime, Weekday};

const CURRENCY: &str = "₹";

#[must_use]
pub fn rupees(amount: Money) -> String {
    format!("{CURRENCY}{amount}")
}

/// A per-mode charge; `None` means the mode is not offered.
#[must_use]
pub fn charge(amount: Option<Money>) -> String {
    amount.map_or_else(|| "Not offered".to_owned(), rupees)
}

fn short_month(month: Month) -> &'static str {
    match month {
        Month::January => "Jan",
        Month::February => "Feb",
        Month::March => "Mar",
        Month::April => "Apr",
        Month::May => "May",
        Month::June => "Jun",
        Month::July => "Jul",
        Month::August => "Aug",
        Month::September => "Sep",
        Month::October => "Oct",
        Month::November => "Nov",
        Month::December => "Dec",
    }
}

#[must_use]
pub fn weekday(day: Weekday) -> &'static str {
    match day {
        Weekday::Monday => "Mon",
        Weekday::Tuesday => "Tue",
        Weekday::Wednesday => "Wed",
        Weekday::Thursday => "Thu",
        Weekday::Friday => "Fri",
        Weekday::Saturday => "Sat",
        Weekday::Sunday => "Sun",
    }
}

/// `02 Jun 2025`
#[must_use]
pub fn date(date: Date) -> String {
    format!("{:02} {} {}", date.day(), short_month(date.month()), date.year())
}

/// `09:30`
#[must_use]
pub fn time(at: PrimitiveDateTime) -> String {
    format!("{:02}:{:02}", at.hour(), at.minute())
}

/// `Mon, 02 Jun 2025 09:30`
#[must_use]
pub fn date_time(at: PrimitiveDateTime) -> String {
    format!("{}, {} {}", weekday(at.weekday()), date(at.date()), time(at))
}

/// `09:30–10:00`; the end date is omitted.
#[must_use]
pub fn time_range(start: PrimitiveDateTime, end: PrimitiveDateTime) -> String {
    format!("{}–{}", time(start), time(end))
}

/// `45 min`, `1 h`, `1 h 30 min`
#[must_use]
pub fn duration(minutes: i64) -> String {
    match (minutes / 60, minutes % 60) {
        (0, m) => format!("{m} min"),
        (h, 0) => format!("{h} h"),
        (h, m) => format!("{h} h {m} min"),
    }
}

/// `3 slots`, `1 slot`
#[must_use]
pub fn count(n: usize, noun: &str) -> String {
    if n == 1 { format!("1 {noun}") } else { format!("{n} {noun}s") }
}
