//! Admin service catalog.

#[cfg(test)]
#[path = "catalog_test.rs"]
mod catalog_test;

use records::catalog::{CatalogDraft, CatalogFilters, CatalogService, CatalogSortKey};
use records::{RecordError, SortSpec, fixtures};
use time::PrimitiveDateTime;
use uuid::Uuid;

use super::ActionError;
use super::collection::{Collection, Form, FormMode, settle_form};

#[derive(Clone, Debug, PartialEq)]
pub struct CatalogState {
    pub services: Collection<CatalogService, CatalogFilters>,
    pub form: Option<Form<CatalogDraft>>,
}

impl CatalogState {
    #[must_use]
    pub fn new(rows: Vec<CatalogService>) -> Self {
        Self { services: Collection::new(rows, Some(SortSpec::asc(CatalogSortKey::Name))), form: None }
    }

    #[must_use]
    pub fn from_fixtures() -> Self {
        Self::new(fixtures::catalog())
    }

    /// Entries a clinic may list, for the clinic service form.
    #[must_use]
    pub fn active(&self) -> Vec<&CatalogService> {
        self.services.table().rows().iter().filter(|s| s.is_active).collect()
    }

    pub fn open_create(&mut self) {
        self.form = Some(Form::create(CatalogDraft::default()));
    }

    /// # Errors
    ///
    /// Returns `NotFound` if the entry no longer exists.
    pub fn open_edit(&mut self, id: Uuid) -> Result<(), ActionError> {
        let service = self.services.get(id).ok_or(RecordError::NotFound(id))?;
        self.form = Some(Form::edit(id, CatalogDraft::from(service)));
        Ok(())
    }

    pub fn close(&mut self) {
        self.form = None;
    }

    /// Save the open form. `id` is used only when creating.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::NoForm`] when no form is open, otherwise the
    /// validation failure, which is also kept on the form.
    pub fn submit(&mut self, id: Uuid, now: PrimitiveDateTime) -> Result<String, ActionError> {
        let Some(form) = self.form.as_ref() else {
            return Err(ActionError::NoForm);
        };
        let (mode, draft) = (form.mode, form.draft.clone());
        let outcome = self.save(mode, &draft, id, now);
        settle_form(&mut self.form, outcome)
    }

    fn save(&mut self, mode: FormMode, draft: &CatalogDraft, id: Uuid, now: PrimitiveDateTime) -> Result<String, ActionError> {
        let editing = match mode {
            FormMode::Create => None,
            FormMode::Edit(id) => Some(id),
        };
        draft.validate(self.services.table().rows(), editing)?;

        match mode {
            FormMode::Create => {
                let service = draft.build(id, now);
                let message = format!("Added {} to the catalog", service.name);
                self.services.table_mut().insert(service);
                Ok(message)
            }
            FormMode::Edit(id) => {
                let name = self.services.table_mut().update(id, |service| {
                    draft.apply(service);
                    Ok(service.name.clone())
                })?;
                Ok(format!("Updated {name}"))
            }
        }
    }

    /// # Errors
    ///
    /// Returns `NotFound` if the entry no longer exists.
    pub fn toggle_active(&mut self, id: Uuid) -> Result<String, ActionError> {
        let message = self.services.table_mut().update(id, |service| {
            let verb = if service.toggle_active() { "Enabled" } else { "Disabled" };
            Ok(format!("{verb} {}", service.name))
        })?;
        log::info!("{message}");
        Ok(message)
    }

    /// # Errors
    ///
    /// See [`Collection::confirm_delete`].
    pub fn confirm_delete(&mut self) -> Result<String, ActionError> {
        let service = self.services.confirm_delete()?;
        log::info!("deleted catalog entry {}", service.id);
        Ok(format!("Removed {} from the catalog", service.name))
    }
}
