//! A clinic's own service listings.
//!
//! The form keeps charges, rank and display date as typed text and parses
//! them on submit. Any change to pricing or naming sends an approved listing
//! back to the admin review queue.

#[cfg(test)]
#[path = "clinic_services_test.rs"]
mod clinic_services_test;

use records::catalog::CatalogService;
use records::clinic_service::{
    ApprovalStatus, Charges, ClinicService, ClinicServiceDraft, ClinicServiceFilters, ClinicServiceSortKey,
};
use records::fixtures::{self, Party};
use records::{RecordError, SortSpec};
use time::{Date, PrimitiveDateTime};
use uuid::Uuid;

use super::ActionError;
use super::collection::{Collection, Form, FormMode, settle_form};
use crate::util::form::{self, InputError};

/// Raw contents of the service modal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServiceInput {
    pub catalog_service_id: Option<Uuid>,
    pub name: String,
    pub video: String,
    pub physical: String,
    pub home: String,
    pub rank: String,
    pub display_date: String,
}

impl ServiceInput {
    #[must_use]
    pub fn blank(today: Date) -> Self {
        let draft = ClinicServiceDraft::new(today);
        Self {
            catalog_service_id: None,
            name: String::new(),
            video: String::new(),
            physical: String::new(),
            home: String::new(),
            rank: draft.rank.to_string(),
            display_date: form::date_value(today),
        }
    }

    /// Select a catalog entry, using its name unless one was typed.
    pub fn choose_catalog(&mut self, entry: &CatalogService) {
        self.catalog_service_id = Some(entry.id);
        if self.name.trim().is_empty() {
            self.name.clone_from(&entry.name);
        }
    }

    /// # Errors
    ///
    /// Returns the first field that does not parse.
    pub fn parse(&self) -> Result<ClinicServiceDraft, InputError> {
        Ok(ClinicServiceDraft {
            catalog_service_id: self.catalog_service_id,
            name: self.name.clone(),
            charges: Charges {
                video: form::optional_money("Video charge", &self.video)?,
                physical: form::optional_money("In-clinic charge", &self.physical)?,
                home: form::optional_money("Home visit charge", &self.home)?,
            },
            rank: form::whole_number("Rank", &self.rank)?,
            display_date: form::date("Display date", &self.display_date)?,
        })
    }
}

impl From<&ClinicService> for ServiceInput {
    fn from(service: &ClinicService) -> Self {
        Self {
            catalog_service_id: Some(service.catalog_service_id),
            name: service.name.clone(),
            video: form::money_value(service.charges.video),
            physical: form::money_value(service.charges.physical),
            home: form::money_value(service.charges.home),
            rank: service.rank.to_string(),
            display_date: form::date_value(service.display_date),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ClinicServicesState {
    pub clinic: Party,
    /// Active catalog entries offered in the form's select.
    pub catalog: Vec<CatalogService>,
    pub services: Collection<ClinicService, ClinicServiceFilters>,
    pub form: Option<Form<ServiceInput>>,
}

impl ClinicServicesState {
    #[must_use]
    pub fn new(clinic: Party, catalog: Vec<CatalogService>, services: Vec<ClinicService>) -> Self {
        let own = services.into_iter().filter(|s| s.clinic_id == clinic.id).collect();
        Self {
            clinic,
            catalog: catalog.into_iter().filter(|c| c.is_active).collect(),
            services: Collection::new(own, Some(SortSpec::asc(ClinicServiceSortKey::Rank))),
            form: None,
        }
    }

    #[must_use]
    pub fn from_fixtures() -> Self {
        Self::new(fixtures::current_clinic(), fixtures::catalog(), fixtures::clinic_services())
    }

    #[must_use]
    pub fn catalog_entry(&self, id: Uuid) -> Option<&CatalogService> {
        self.catalog.iter().find(|c| c.id == id)
    }

    pub fn open_create(&mut self, today: Date) {
        self.form = Some(Form::create(ServiceInput::blank(today)));
    }

    /// # Errors
    ///
    /// Returns `NotFound` if the listing no longer exists.
    pub fn open_edit(&mut self, id: Uuid) -> Result<(), ActionError> {
        let service = self.services.get(id).ok_or(RecordError::NotFound(id))?;
        self.form = Some(Form::edit(id, ServiceInput::from(service)));
        Ok(())
    }

    pub fn close(&mut self) {
        self.form = None;
    }

    /// Save the open form. `id` is used only when creating; `today` bounds
    /// the display date.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::NoForm`] when no form is open, otherwise the
    /// parse or validation failure, which is also kept on the form.
    pub fn submit(&mut self, id: Uuid, today: Date, now: PrimitiveDateTime) -> Result<String, ActionError> {
        let Some(open) = self.form.as_ref() else {
            return Err(ActionError::NoForm);
        };
        let mode = open.mode;
        let outcome = match open.draft.parse() {
            Ok(draft) => self.save(mode, &draft, id, today, now),
            Err(err) => Err(err.into()),
        };
        settle_form(&mut self.form, outcome)
    }

    fn save(
        &mut self,
        mode: FormMode,
        draft: &ClinicServiceDraft,
        id: Uuid,
        today: Date,
        now: PrimitiveDateTime,
    ) -> Result<String, ActionError> {
        match mode {
            FormMode::Create => {
                let service = draft.create(id, self.clinic.id, &self.clinic.name, today, now)?;
                let message = format!("Submitted {} for review", service.name);
                self.services.table_mut().insert(service);
                Ok(message)
            }
            FormMode::Edit(id) => {
                let message = self.services.table_mut().update(id, |service| {
                    let was_reviewed = service.approval != ApprovalStatus::Pending;
                    draft.apply(service, today)?;
                    if was_reviewed && service.approval == ApprovalStatus::Pending {
                        Ok(format!("Updated {}; it is pending review again", service.name))
                    } else {
                        Ok(format!("Updated {}", service.name))
                    }
                })?;
                Ok(message)
            }
        }
    }

    /// # Errors
    ///
    /// See [`Collection::confirm_delete`].
    pub fn confirm_delete(&mut self) -> Result<String, ActionError> {
        let service = self.services.confirm_delete()?;
        log::info!("deleted clinic service {}", service.id);
        Ok(format!("Deleted {}", service.name))
    }
}
