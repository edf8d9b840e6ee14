//! Appointment bookings and their status lifecycle.
//!
//! DESIGN
//! ======
//! `PENDING → CONFIRMED → COMPLETED`, with cancellation allowed from either
//! open state. Completed and canceled bookings are terminal; anything else
//! is rejected with [`RecordError::InvalidTransition`] so a stale button
//! click cannot resurrect a closed appointment.

#[cfg(test)]
#[path = "booking_test.rs"]
mod booking_test;

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use time::PrimitiveDateTime;
use uuid::Uuid;

use crate::RecordError;
use crate::money::Money;
use crate::query::{Choice, DateRange, Facet, FilterSet, Record};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Completed,
    Canceled,
}

impl Choice for BookingStatus {
    const ALL: &'static [Self] = &[Self::Pending, Self::Confirmed, Self::Completed, Self::Canceled];

    fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Confirmed => "CONFIRMED",
            Self::Completed => "COMPLETED",
            Self::Canceled => "CANCELED",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Confirmed => "Confirmed",
            Self::Completed => "Completed",
            Self::Canceled => "Canceled",
        }
    }
}

impl BookingStatus {
    #[must_use]
    pub fn can_move_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Confirmed)
                | (Self::Confirmed, Self::Completed)
                | (Self::Pending | Self::Confirmed, Self::Canceled)
        )
    }

    /// Statuses reachable from this one, in button order.
    #[must_use]
    pub fn next_steps(self) -> &'static [Self] {
        match self {
            Self::Pending => &[Self::Confirmed, Self::Canceled],
            Self::Confirmed => &[Self::Completed, Self::Canceled],
            Self::Completed | Self::Canceled => &[],
        }
    }
}

/// How the consultation is delivered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConsultationMode {
    Video,
    Physical,
    Home,
}

impl Choice for ConsultationMode {
    const ALL: &'static [Self] = &[Self::Video, Self::Physical, Self::Home];

    fn as_str(self) -> &'static str {
        match self {
            Self::Video => "VIDEO",
            Self::Physical => "PHYSICAL",
            Self::Home => "HOME",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Video => "Video",
            Self::Physical => "In clinic",
            Self::Home => "Home visit",
        }
    }
}

/// Who delivers the booked service.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Provider {
    Clinic { id: Uuid, name: String },
    Expert { id: Uuid, name: String },
}

impl Provider {
    #[must_use]
    pub fn id(&self) -> Uuid {
        match self {
            Self::Clinic { id, .. } | Self::Expert { id, .. } => *id,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Clinic { name, .. } | Self::Expert { name, .. } => name,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub patient_name: String,
    pub provider: Provider,
    pub service_name: String,
    pub mode: ConsultationMode,
    pub start_time: PrimitiveDateTime,
    pub end_time: PrimitiveDateTime,
    pub charge: Money,
    pub status: BookingStatus,
    pub created_at: PrimitiveDateTime,
}

impl Booking {
    /// Move to `next`, or fail if the lifecycle forbids it.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::InvalidTransition`] for a disallowed move.
    pub fn transition(&mut self, next: BookingStatus) -> Result<(), RecordError> {
        if !self.status.can_move_to(next) {
            return Err(RecordError::InvalidTransition { from: self.status.label(), to: next.label() });
        }
        self.status = next;
        Ok(())
    }

    /// Length of the appointment in minutes.
    #[must_use]
    pub fn duration_minutes(&self) -> i64 {
        (self.end_time - self.start_time).whole_minutes()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BookingSortKey {
    StartTime,
    Charge,
    Patient,
    Created,
}

impl Record for Booking {
    type SortKey = BookingSortKey;

    fn id(&self) -> Uuid {
        self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.patient_name, &self.service_name, self.provider.name()]
    }

    fn compare_by(&self, other: &Self, key: BookingSortKey) -> Ordering {
        match key {
            BookingSortKey::StartTime => self.start_time.cmp(&other.start_time),
            BookingSortKey::Charge => self.charge.cmp(&other.charge),
            BookingSortKey::Patient => self.patient_name.to_lowercase().cmp(&other.patient_name.to_lowercase()),
            BookingSortKey::Created => self.created_at.cmp(&other.created_at),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BookingFilters {
    pub status: Facet<BookingStatus>,
    pub mode: Facet<ConsultationMode>,
    pub dates: DateRange,
    /// Restrict to one provider (the expert portal shows only its own bookings).
    pub provider: Option<Uuid>,
}

impl FilterSet<Booking> for BookingFilters {
    fn matches(&self, booking: &Booking) -> bool {
        self.status.matches(&booking.status)
            && self.mode.matches(&booking.mode)
            && self.dates.contains(booking.start_time.date())
            && self.provider.is_none_or(|id| booking.provider.id() == id)
    }
}

/// Per-status counts shown in the summary cards above a bookings table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BookingCounts {
    pub pending: usize,
    pub confirmed: usize,
    pub completed: usize,
    pub canceled: usize,
    /// Sum of charges over completed bookings.
    pub earned: Money,
}

impl BookingCounts {
    pub fn tally<'a>(bookings: impl IntoIterator<Item = &'a Booking>) -> Self {
        let mut counts = Self::default();
        for booking in bookings {
            match booking.status {
                BookingStatus::Pending => counts.pending += 1,
                BookingStatus::Confirmed => counts.confirmed += 1,
                BookingStatus::Completed => {
                    counts.completed += 1;
                    counts.earned += booking.charge;
                }
                BookingStatus::Canceled => counts.canceled += 1,
            }
        }
        counts
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.pending + self.confirmed + self.completed + self.canceled
    }
}
