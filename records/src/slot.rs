//! Bookable time slots for clinic services and experts.
//!
//! DESIGN
//! ======
//! A slot's status is derived, never stored: blocked wins, otherwise a slot
//! with no remaining capacity is `FULL`, otherwise `AVAILABLE`. Every path
//! that changes capacity goes through [`SlotEdit`] so
//! `available_slots <= max_bookings` always holds.

#[cfg(test)]
#[path = "slot_test.rs"]
mod slot_test;

use std::cmp::Ordering;
use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use time::{Date, Duration, PrimitiveDateTime};
use uuid::Uuid;

use crate::RecordError;
use crate::query::{Choice, DateRange, Facet, FilterSet, Record};
use crate::schedule::{self, SlotTemplate};
use crate::validate::{ValidationErrors, Validator};

pub const MIN_DURATION_MINUTES: u32 = 5;
pub const MAX_DURATION_MINUTES: u32 = 240;
pub const MAX_CAPACITY: u32 = 50;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SlotStatus {
    Available,
    Full,
    Blocked,
}

impl Choice for SlotStatus {
    const ALL: &'static [Self] = &[Self::Available, Self::Full, Self::Blocked];

    fn as_str(self) -> &'static str {
        match self {
            Self::Available => "AVAILABLE",
            Self::Full => "FULL",
            Self::Blocked => "BLOCKED",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::Full => "Full",
            Self::Blocked => "Blocked",
        }
    }
}

/// Whose calendar the slot belongs to.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SlotOwner {
    ClinicService { id: Uuid, name: String },
    Expert { id: Uuid, name: String },
}

impl SlotOwner {
    #[must_use]
    pub fn id(&self) -> Uuid {
        match self {
            Self::ClinicService { id, .. } | Self::Expert { id, .. } => *id,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::ClinicService { name, .. } | Self::Expert { name, .. } => name,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub id: Uuid,
    pub owner: SlotOwner,
    pub start_time: PrimitiveDateTime,
    pub duration_minutes: u32,
    pub max_bookings: u32,
    pub available_slots: u32,
    pub is_blocked: bool,
    pub created_at: PrimitiveDateTime,
}

impl Slot {
    #[must_use]
    pub fn status(&self) -> SlotStatus {
        if self.is_blocked {
            SlotStatus::Blocked
        } else if self.available_slots == 0 {
            SlotStatus::Full
        } else {
            SlotStatus::Available
        }
    }

    #[must_use]
    pub fn end_time(&self) -> PrimitiveDateTime {
        self.start_time + Duration::minutes(i64::from(self.duration_minutes))
    }

    #[must_use]
    pub fn booked(&self) -> u32 {
        self.max_bookings.saturating_sub(self.available_slots)
    }

    /// Flip the blocked flag and return the new value.
    pub fn toggle_block(&mut self) -> bool {
        self.is_blocked = !self.is_blocked;
        self.is_blocked
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlotSortKey {
    StartTime,
    Available,
}

impl Record for Slot {
    type SortKey = SlotSortKey;

    fn id(&self) -> Uuid {
        self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.owner.name()]
    }

    fn compare_by(&self, other: &Self, key: SlotSortKey) -> Ordering {
        match key {
            SlotSortKey::StartTime => self.start_time.cmp(&other.start_time),
            SlotSortKey::Available => self.available_slots.cmp(&other.available_slots),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SlotFilters {
    pub status: Facet<SlotStatus>,
    pub dates: DateRange,
    pub owner: Option<Uuid>,
}

impl FilterSet<Slot> for SlotFilters {
    fn matches(&self, slot: &Slot) -> bool {
        self.status.matches(&slot.status())
            && self.dates.contains(slot.start_time.date())
            && self.owner.is_none_or(|id| slot.owner.id() == id)
    }
}

fn check_shape(v: &mut Validator, duration_minutes: u32, max_bookings: u32) {
    v.range("duration_minutes", "Duration", duration_minutes, MIN_DURATION_MINUTES, MAX_DURATION_MINUTES)
        .range("max_bookings", "Capacity", max_bookings, 1, MAX_CAPACITY);
}

// =============================================================================
// EDIT
// =============================================================================

/// Capacity/duration edit for an existing slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SlotEdit {
    pub duration_minutes: u32,
    pub max_bookings: u32,
    pub available_slots: u32,
}

impl From<&Slot> for SlotEdit {
    fn from(slot: &Slot) -> Self {
        Self {
            duration_minutes: slot.duration_minutes,
            max_bookings: slot.max_bookings,
            available_slots: slot.available_slots,
        }
    }
}

impl SlotEdit {
    /// # Errors
    ///
    /// Returns every invalid field, including remaining capacity above the
    /// new maximum.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut v = Validator::new();
        check_shape(&mut v, self.duration_minutes, self.max_bookings);
        v.check(
            self.available_slots <= self.max_bookings,
            "available_slots",
            "Available slots cannot exceed capacity",
        )
        .finish()
    }

    /// # Errors
    ///
    /// Returns every invalid field; `slot` is left untouched.
    pub fn apply(&self, slot: &mut Slot) -> Result<(), ValidationErrors> {
        self.validate()?;
        slot.duration_minutes = self.duration_minutes;
        slot.max_bookings = self.max_bookings;
        slot.available_slots = self.available_slots;
        Ok(())
    }
}

// =============================================================================
// SINGLE CREATE
// =============================================================================

/// Form contents for adding one slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlotDraft {
    pub date: Date,
    pub time: String,
    pub duration_minutes: u32,
    pub capacity: u32,
}

impl SlotDraft {
    /// # Errors
    ///
    /// Returns every invalid field.
    pub fn create(&self, id: Uuid, owner: SlotOwner, now: PrimitiveDateTime) -> Result<Slot, ValidationErrors> {
        let time = schedule::parse_time(&self.time);
        let mut v = Validator::new();
        v.check(time.is_ok(), "time", "Enter a time as HH:MM");
        check_shape(&mut v, self.duration_minutes, self.capacity);
        v.finish()?;
        let time = time.map_err(|e| ValidationErrors::single("time", e.to_string()))?;

        Ok(Slot {
            id,
            owner,
            start_time: PrimitiveDateTime::new(self.date, time),
            duration_minutes: self.duration_minutes,
            max_bookings: self.capacity,
            available_slots: self.capacity,
            is_blocked: false,
            created_at: now,
        })
    }
}

// =============================================================================
// BULK GENERATE
// =============================================================================

/// A recurring template plus the shape every generated slot shares.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlotBatch {
    pub template: SlotTemplate,
    pub owner: SlotOwner,
    pub duration_minutes: u32,
    pub capacity: u32,
}

impl SlotBatch {
    /// Expand the template into available slots, ordered by start time.
    /// Start times the owner already has a slot at are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::Validation`] for a bad duration or capacity and
    /// [`RecordError::Schedule`] for a bad template.
    pub fn generate(
        &self,
        existing: &[Slot],
        mut next_id: impl FnMut() -> Uuid,
        now: PrimitiveDateTime,
    ) -> Result<Vec<Slot>, RecordError> {
        let mut v = Validator::new();
        check_shape(&mut v, self.duration_minutes, self.capacity);
        v.finish()?;

        let owner_id = self.owner.id();
        let taken: HashSet<PrimitiveDateTime> =
            existing.iter().filter(|s| s.owner.id() == owner_id).map(|s| s.start_time).collect();

        Ok(self
            .template
            .expand()?
            .into_iter()
            .filter(|start| !taken.contains(start))
            .map(|start_time| Slot {
                id: next_id(),
                owner: self.owner.clone(),
                start_time,
                duration_minutes: self.duration_minutes,
                max_bookings: self.capacity,
                available_slots: self.capacity,
                is_blocked: false,
                created_at: now,
            })
            .collect())
    }
}
