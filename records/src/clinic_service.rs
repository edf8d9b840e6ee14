//! Clinic-priced service offerings and their approval review.
//!
//! A clinic service references a catalog entry and adds the clinic's own
//! per-modality charges plus a manually maintained `rank` and
//! `display_date` used only to order listings.

#[cfg(test)]
#[path = "clinic_service_test.rs"]
mod clinic_service_test;

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use time::{Date, PrimitiveDateTime};
use uuid::Uuid;

use crate::RecordError;
use crate::booking::ConsultationMode;
use crate::money::Money;
use crate::query::{Choice, Facet, FilterSet, Record};
use crate::validate::{ValidationErrors, Validator};

pub const MIN_RANK: u32 = 1;
pub const MAX_RANK: u32 = 999;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApprovalStatus {
    Approved,
    Pending,
    Rejected,
}

impl Choice for ApprovalStatus {
    const ALL: &'static [Self] = &[Self::Approved, Self::Pending, Self::Rejected];

    fn as_str(self) -> &'static str {
        match self {
            Self::Approved => "APPROVED",
            Self::Pending => "PENDING",
            Self::Rejected => "REJECTED",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Approved => "Approved",
            Self::Pending => "Pending",
            Self::Rejected => "Rejected",
        }
    }
}

/// Per-modality prices; `None` means the clinic does not offer that mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Charges {
    pub video: Option<Money>,
    pub physical: Option<Money>,
    pub home: Option<Money>,
}

impl Charges {
    #[must_use]
    pub fn for_mode(&self, mode: ConsultationMode) -> Option<Money> {
        match mode {
            ConsultationMode::Video => self.video,
            ConsultationMode::Physical => self.physical,
            ConsultationMode::Home => self.home,
        }
    }

    #[must_use]
    pub fn offers(&self, mode: ConsultationMode) -> bool {
        self.for_mode(mode).is_some()
    }

    /// Cheapest offered price, used for "from" labels and sorting.
    #[must_use]
    pub fn lowest(&self) -> Option<Money> {
        [self.video, self.physical, self.home].into_iter().flatten().min()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClinicService {
    pub id: Uuid,
    pub clinic_id: Uuid,
    pub clinic_name: String,
    pub catalog_service_id: Uuid,
    pub name: String,
    pub charges: Charges,
    pub approval: ApprovalStatus,
    pub rank: u32,
    pub display_date: Date,
    pub created_at: PrimitiveDateTime,
}

/// Admin verdict on a pending clinic service.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReviewDecision {
    Approve,
    Reject,
}

impl ClinicService {
    /// Record an admin review. Only pending services can be reviewed.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::InvalidTransition`] unless the service is pending.
    pub fn review(&mut self, decision: ReviewDecision) -> Result<(), RecordError> {
        let next = match decision {
            ReviewDecision::Approve => ApprovalStatus::Approved,
            ReviewDecision::Reject => ApprovalStatus::Rejected,
        };
        if self.approval != ApprovalStatus::Pending {
            return Err(RecordError::InvalidTransition { from: self.approval.label(), to: next.label() });
        }
        self.approval = next;
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClinicServiceSortKey {
    Rank,
    DisplayDate,
    Name,
    LowestCharge,
    Created,
}

impl Record for ClinicService {
    type SortKey = ClinicServiceSortKey;

    fn id(&self) -> Uuid {
        self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.name, &self.clinic_name]
    }

    fn compare_by(&self, other: &Self, key: ClinicServiceSortKey) -> Ordering {
        match key {
            ClinicServiceSortKey::Rank => self.rank.cmp(&other.rank),
            ClinicServiceSortKey::DisplayDate => self.display_date.cmp(&other.display_date),
            ClinicServiceSortKey::Name => self.name.to_lowercase().cmp(&other.name.to_lowercase()),
            ClinicServiceSortKey::LowestCharge => self.charges.lowest().cmp(&other.charges.lowest()),
            ClinicServiceSortKey::Created => self.created_at.cmp(&other.created_at),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClinicServiceFilters {
    pub approval: Facet<ApprovalStatus>,
    /// Keep services that offer this modality.
    pub mode: Facet<ConsultationMode>,
    /// Restrict to one clinic (the clinic portal shows only its own services).
    pub clinic: Option<Uuid>,
}

impl FilterSet<ClinicService> for ClinicServiceFilters {
    fn matches(&self, service: &ClinicService) -> bool {
        let mode_ok = match self.mode {
            Facet::All => true,
            Facet::Only(mode) => service.charges.offers(mode),
        };
        self.approval.matches(&service.approval)
            && mode_ok
            && self.clinic.is_none_or(|id| service.clinic_id == id)
    }
}

/// Create/edit form contents for a clinic service.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClinicServiceDraft {
    pub catalog_service_id: Option<Uuid>,
    pub name: String,
    pub charges: Charges,
    pub rank: u32,
    pub display_date: Date,
}

impl ClinicServiceDraft {
    #[must_use]
    pub fn new(display_date: Date) -> Self {
        Self { catalog_service_id: None, name: String::new(), charges: Charges::default(), rank: MIN_RANK, display_date }
    }
}

impl From<&ClinicService> for ClinicServiceDraft {
    fn from(service: &ClinicService) -> Self {
        Self {
            catalog_service_id: Some(service.catalog_service_id),
            name: service.name.clone(),
            charges: service.charges,
            rank: service.rank,
            display_date: service.display_date,
        }
    }
}

impl ClinicServiceDraft {
    /// Validate against `today`. A display date that is already in the past
    /// is only accepted when it is unchanged from `current` (editing an old
    /// listing without moving it).
    ///
    /// # Errors
    ///
    /// Returns every invalid field.
    pub fn validate(&self, today: Date, current: Option<Date>) -> Result<(), ValidationErrors> {
        let date_ok = self.display_date >= today || current == Some(self.display_date);
        let charges_ok = [self.charges.video, self.charges.physical, self.charges.home]
            .into_iter()
            .flatten()
            .all(Money::is_positive);

        Validator::new()
            .check(self.catalog_service_id.is_some(), "catalog_service_id", "Choose a catalog service")
            .required("name", "Display name", &self.name)
            .check(self.charges.lowest().is_some(), "charges", "Offer at least one consultation mode")
            .check(charges_ok, "charges", "Charges must be greater than zero")
            .range("rank", "Rank", self.rank, MIN_RANK, MAX_RANK)
            .check(date_ok, "display_date", "Display date cannot be in the past")
            .finish()
    }

    /// Build a new, pending clinic service.
    ///
    /// # Errors
    ///
    /// Returns every invalid field.
    pub fn create(
        &self,
        id: Uuid,
        clinic_id: Uuid,
        clinic_name: &str,
        today: Date,
        now: PrimitiveDateTime,
    ) -> Result<ClinicService, ValidationErrors> {
        self.validate(today, None)?;
        let catalog_service_id = self
            .catalog_service_id
            .ok_or_else(|| ValidationErrors::single("catalog_service_id", "Choose a catalog service"))?;
        Ok(ClinicService {
            id,
            clinic_id,
            clinic_name: clinic_name.to_owned(),
            catalog_service_id,
            name: self.name.trim().to_owned(),
            charges: self.charges,
            approval: ApprovalStatus::Pending,
            rank: self.rank,
            display_date: self.display_date,
            created_at: now,
        })
    }

    /// Apply an edit. Pricing or naming changes send a reviewed service back
    /// to `PENDING`; a rank/date-only change keeps its approval.
    ///
    /// # Errors
    ///
    /// Returns every invalid field; `service` is left untouched.
    pub fn apply(&self, service: &mut ClinicService, today: Date) -> Result<(), ValidationErrors> {
        self.validate(today, Some(service.display_date))?;
        let catalog_service_id = self
            .catalog_service_id
            .ok_or_else(|| ValidationErrors::single("catalog_service_id", "Choose a catalog service"))?;
        let name = self.name.trim().to_owned();
        let needs_review =
            service.charges != self.charges || service.name != name || service.catalog_service_id != catalog_service_id;

        service.catalog_service_id = catalog_service_id;
        service.name = name;
        service.charges = self.charges;
        service.rank = self.rank;
        service.display_date = self.display_date;
        if needs_review {
            service.approval = ApprovalStatus::Pending;
        }
        Ok(())
    }
}
