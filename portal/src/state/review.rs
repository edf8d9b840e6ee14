//! Admin review queue for clinic-listed services.

#[cfg(test)]
#[path = "review_test.rs"]
mod review_test;

use records::clinic_service::{ApprovalStatus, ClinicService, ClinicServiceFilters, ClinicServiceSortKey, ReviewDecision};
use records::{SortSpec, fixtures};
use uuid::Uuid;

use super::ActionError;
use super::collection::Collection;

#[derive(Clone, Debug, PartialEq)]
pub struct ReviewState {
    pub services: Collection<ClinicService, ClinicServiceFilters>,
}

impl ReviewState {
    #[must_use]
    pub fn new(rows: Vec<ClinicService>) -> Self {
        Self { services: Collection::new(rows, Some(SortSpec::desc(ClinicServiceSortKey::Created))) }
    }

    #[must_use]
    pub fn from_fixtures() -> Self {
        Self::new(fixtures::clinic_services())
    }

    /// Services still awaiting a decision.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.services.table().rows().iter().filter(|s| s.approval == ApprovalStatus::Pending).count()
    }

    /// # Errors
    ///
    /// Returns `NotFound` for a missing service and `InvalidTransition` if it
    /// was already reviewed.
    pub fn review(&mut self, id: Uuid, decision: ReviewDecision) -> Result<String, ActionError> {
        let message = self.services.table_mut().update(id, |service| {
            service.review(decision)?;
            let verb = match decision {
                ReviewDecision::Approve => "Approved",
                ReviewDecision::Reject => "Rejected",
            };
            Ok(format!("{verb} {} from {}", service.name, service.clinic_name))
        })?;
        log::info!("{message}");
        Ok(message)
    }
}
