//! Bulk date/time expansion for slot generation.
//!
//! DESIGN
//! ======
//! A [`SlotTemplate`] names a date range, a set of ISO weekdays and a list of
//! `HH:MM` times. Expansion walks every calendar day in the range and emits
//! one start time per listed time on each matching day, ordered by date and
//! then time. Times are local; no timezone is attached.
//!
//! TRADE-OFFS
//! ==========
//! The range is capped at [`MAX_RANGE_DAYS`] so a mistyped year cannot
//! produce tens of thousands of rows in one click.

#[cfg(test)]
#[path = "schedule_test.rs"]
mod schedule_test;

use std::collections::BTreeSet;

use time::macros::format_description;
use time::{Date, PrimitiveDateTime, Time, Weekday};

/// Longest range, in days (inclusive), a template may cover.
pub const MAX_RANGE_DAYS: i64 = 366;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScheduleError {
    #[error("end date {end} is before start date {start}")]
    EndBeforeStart { start: Date, end: Date },
    #[error("date range covers {days} days; the limit is 366")]
    RangeTooLong { days: i64 },
    #[error("select at least one weekday")]
    NoWeekdays,
    #[error("weekday {0} is not between 1 (Monday) and 7 (Sunday)")]
    InvalidWeekday(u8),
    #[error("add at least one time slot")]
    NoTimes,
    #[error("time {0:?} is not a valid HH:MM time")]
    InvalidTime(String),
}

// =============================================================================
// WEEKDAYS
// =============================================================================

/// A set of weekdays, stored as one bit per ISO weekday.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WeekdaySet(u8);

impl WeekdaySet {
    pub const EMPTY: Self = Self(0);
    pub const WEEKDAYS: Self = Self(0b001_1111);
    pub const EVERY_DAY: Self = Self(0b111_1111);

    /// Build from ISO weekday numbers (Monday = 1 … Sunday = 7).
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::InvalidWeekday`] for a number outside 1..=7.
    pub fn from_iso(days: impl IntoIterator<Item = u8>) -> Result<Self, ScheduleError> {
        let mut set = Self::EMPTY;
        for day in days {
            if !(1..=7).contains(&day) {
                return Err(ScheduleError::InvalidWeekday(day));
            }
            set.0 |= 1 << (day - 1);
        }
        Ok(set)
    }

    #[must_use]
    pub fn contains(self, day: Weekday) -> bool {
        self.0 & Self::bit(day) != 0
    }

    pub fn insert(&mut self, day: Weekday) {
        self.0 |= Self::bit(day);
    }

    /// Add `day` if absent, remove it if present.
    pub fn toggle(&mut self, day: Weekday) {
        self.0 ^= Self::bit(day);
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    fn bit(day: Weekday) -> u8 {
        1 << (day.number_from_monday() - 1)
    }
}

// =============================================================================
// TIMES
// =============================================================================

/// Parse a 24-hour `HH:MM` time.
///
/// # Errors
///
/// Returns [`ScheduleError::InvalidTime`] unless `raw` is two-digit hours and
/// minutes separated by a colon.
pub fn parse_time(raw: &str) -> Result<Time, ScheduleError> {
    let raw = raw.trim();
    Time::parse(raw, format_description!("[hour]:[minute]"))
        .map_err(|_| ScheduleError::InvalidTime(raw.to_owned()))
}

/// Format a time as `HH:MM`.
#[must_use]
pub fn format_time(time: Time) -> String {
    format!("{:02}:{:02}", time.hour(), time.minute())
}

// =============================================================================
// TEMPLATE
// =============================================================================

/// Recurring schedule definition used by bulk slot generation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlotTemplate {
    pub start_date: Date,
    pub end_date: Date,
    pub weekdays: WeekdaySet,
    pub times: Vec<String>,
}

impl SlotTemplate {
    /// Validate and return the distinct times in ascending order.
    ///
    /// # Errors
    ///
    /// Returns the first problem found with the template.
    pub fn parsed_times(&self) -> Result<Vec<Time>, ScheduleError> {
        if self.end_date < self.start_date {
            return Err(ScheduleError::EndBeforeStart { start: self.start_date, end: self.end_date });
        }
        let days = (self.end_date - self.start_date).whole_days() + 1;
        if days > MAX_RANGE_DAYS {
            return Err(ScheduleError::RangeTooLong { days });
        }
        if self.weekdays.is_empty() {
            return Err(ScheduleError::NoWeekdays);
        }

        let times = self
            .times
            .iter()
            .filter(|raw| !raw.trim().is_empty())
            .map(|raw| parse_time(raw))
            .collect::<Result<BTreeSet<_>, _>>()?;
        if times.is_empty() {
            return Err(ScheduleError::NoTimes);
        }
        Ok(times.into_iter().collect())
    }

    /// Every day in the range whose weekday is selected.
    #[must_use]
    pub fn matching_days(&self) -> Vec<Date> {
        let mut days = Vec::new();
        let mut day = self.start_date;
        while day <= self.end_date {
            if self.weekdays.contains(day.weekday()) {
                days.push(day);
            }
            match day.next_day() {
                Some(next) => day = next,
                None => break,
            }
        }
        days
    }

    /// Expand into start times, ordered by date then time.
    ///
    /// # Errors
    ///
    /// Returns the first problem found with the template.
    pub fn expand(&self) -> Result<Vec<PrimitiveDateTime>, ScheduleError> {
        let times = self.parsed_times()?;
        Ok(self
            .matching_days()
            .into_iter()
            .flat_map(|day| times.iter().map(move |time| PrimitiveDateTime::new(day, *time)))
            .collect())
    }
}
