//! An expert's bookings.

#[cfg(test)]
#[path = "bookings_test.rs"]
mod bookings_test;

use records::booking::{Booking, BookingCounts, BookingFilters, BookingSortKey, BookingStatus};
use records::fixtures::{self, Party};
use records::query::Choice;
use records::SortSpec;
use uuid::Uuid;

use super::ActionError;
use super::collection::Collection;

/// Bookings generated across every provider; the portal keeps its own.
const FIXTURE_BOOKINGS: usize = 240;

#[derive(Clone, Debug, PartialEq)]
pub struct BookingsState {
    pub expert: Party,
    pub bookings: Collection<Booking, BookingFilters>,
    /// Last rejected transition, shown inline above the table.
    pub error: Option<String>,
}

impl BookingsState {
    #[must_use]
    pub fn new(expert: Party, rows: Vec<Booking>) -> Self {
        let own = rows.into_iter().filter(|b| b.provider.id() == expert.id).collect();
        Self { expert, bookings: Collection::new(own, Some(SortSpec::desc(BookingSortKey::StartTime))), error: None }
    }

    #[must_use]
    pub fn from_fixtures() -> Self {
        Self::new(fixtures::current_expert(), fixtures::bookings(FIXTURE_BOOKINGS))
    }

    #[must_use]
    pub fn counts(&self) -> BookingCounts {
        BookingCounts::tally(self.bookings.table().rows())
    }

    /// Move booking `id` to `next`. A rejected move is kept in `error`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` or `InvalidTransition`.
    pub fn transition(&mut self, id: Uuid, next: BookingStatus) -> Result<String, ActionError> {
        let outcome = self.bookings.table_mut().update(id, |booking| {
            booking.transition(next)?;
            Ok(format!("{} booking for {}", next.label(), booking.patient_name))
        });
        match outcome {
            Ok(message) => {
                log::info!("{message}");
                self.error = None;
                Ok(message)
            }
            Err(err) => {
                log::warn!("booking {id}: {err}");
                self.error = Some(err.to_string());
                Err(err.into())
            }
        }
    }

    /// Replace the table with `rows`, keeping only this expert's bookings.
    pub fn reload(&mut self, rows: Vec<Booking>) -> String {
        let expert = self.expert.id;
        let own: Vec<Booking> = rows.into_iter().filter(|b| b.provider.id() == expert).collect();
        let message = format!("Loaded {} bookings", own.len());
        self.bookings.reload(own);
        self.error = None;
        log::info!("{message}");
        message
    }

    /// Reload from the fixture source, discarding local status changes.
    pub fn refresh(&mut self) -> String {
        self.reload(fixtures::bookings(FIXTURE_BOOKINGS))
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }
}
