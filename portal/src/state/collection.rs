//! A record table plus the user's view over it.
//!
//! Every dashboard table is a [`Collection`]: the rows, the search/facet/
//! sort/page selection, and the row awaiting delete confirmation. Pages add
//! their entity-specific actions on top.

#[cfg(test)]
#[path = "collection_test.rs"]
mod collection_test;

use records::export::{self, ExportFile, ExportFormat, Exportable};
use records::query::FilterSet;
use records::{PageWindow, Record, SortSpec, Table, View, ViewState};
use time::Date;
use uuid::Uuid;

use super::ActionError;

#[derive(Clone, Debug, PartialEq)]
pub struct Collection<T: Record, F> {
    table: Table<T>,
    view: ViewState<F, T::SortKey>,
    pending_delete: Option<Uuid>,
}

impl<T, F> Collection<T, F>
where
    T: Record + Clone,
    F: FilterSet<T> + Default + PartialEq,
{
    #[must_use]
    pub fn new(rows: Vec<T>, sort: Option<SortSpec<T::SortKey>>) -> Self {
        Self { table: Table::new(rows), view: ViewState::new(sort), pending_delete: None }
    }

    #[must_use]
    pub fn table(&self) -> &Table<T> {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut Table<T> {
        &mut self.table
    }

    #[must_use]
    pub fn view_state(&self) -> &ViewState<F, T::SortKey> {
        &self.view
    }

    /// Search, facet, sort and paging controls write through here.
    pub fn view_state_mut(&mut self) -> &mut ViewState<F, T::SortKey> {
        &mut self.view
    }

    #[must_use]
    pub fn visible(&self) -> View<'_, T> {
        self.view.view(self.table.rows())
    }

    /// Rows on the current page, cloned out for rendering.
    #[must_use]
    pub fn page_rows(&self) -> Vec<T> {
        self.visible().page().iter().map(|row| (*row).clone()).collect()
    }

    #[must_use]
    pub fn window(&self) -> PageWindow {
        self.visible().window
    }

    #[must_use]
    pub fn get(&self, id: Uuid) -> Option<&T> {
        self.table.get(id)
    }

    pub fn request_delete(&mut self, id: Uuid) {
        self.pending_delete = Some(id);
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    #[must_use]
    pub fn pending_delete(&self) -> Option<&T> {
        self.pending_delete.and_then(|id| self.table.get(id))
    }

    /// Swap in a fresh set of rows, keeping search, filters and sort.
    /// Paging returns to the first page and any pending delete is dropped.
    pub fn reload(&mut self, rows: Vec<T>) {
        self.table.replace_all(rows);
        self.pending_delete = None;
        self.view.set_page(1);
    }

    /// Remove the row awaiting confirmation.
    ///
    /// # Errors
    ///
    /// Returns [`records::RecordError::NotFound`] if the row disappeared meanwhile, or
    /// [`ActionError::NoForm`] if nothing was pending.
    pub fn confirm_delete(&mut self) -> Result<T, ActionError> {
        let id = self.pending_delete.take().ok_or(ActionError::NoForm)?;
        Ok(self.table.remove(id)?)
    }

    /// Export every filtered, sorted row (not just the current page).
    ///
    /// # Errors
    ///
    /// Propagates writer and serializer failures.
    pub fn export(&self, format: ExportFormat, today: Date) -> Result<ExportFile, ActionError>
    where
        T: Exportable,
    {
        let view = self.visible();
        Ok(export::export(&view.matched, format, today)?)
    }
}

/// Whether a form is adding a new row or editing an existing one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(Uuid),
}

/// An open create/edit modal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Form<D> {
    pub mode: FormMode,
    pub draft: D,
    pub error: Option<String>,
}

impl<D> Form<D> {
    #[must_use]
    pub fn create(draft: D) -> Self {
        Self { mode: FormMode::Create, draft, error: None }
    }

    #[must_use]
    pub fn edit(id: Uuid, draft: D) -> Self {
        Self { mode: FormMode::Edit(id), draft, error: None }
    }

    #[must_use]
    pub fn is_edit(&self) -> bool {
        matches!(self.mode, FormMode::Edit(_))
    }

    /// Modal heading, e.g. `Add user` / `Edit user`.
    #[must_use]
    pub fn title(&self, noun: &str) -> String {
        match self.mode {
            FormMode::Create => format!("Add {noun}"),
            FormMode::Edit(_) => format!("Edit {noun}"),
        }
    }
}

/// Close the form on success, keep it open with the inline error otherwise.
///
/// # Errors
///
/// Passes `outcome`'s error through after recording it on the form.
pub fn settle_form<D>(form: &mut Option<Form<D>>, outcome: Result<String, ActionError>) -> Result<String, ActionError> {
    match &outcome {
        Ok(message) => {
            log::info!("{message}");
            *form = None;
        }
        Err(err) => {
            log::warn!("form rejected: {err}");
            if let Some(open) = form.as_mut() {
                open.error = Some(err.to_string());
            }
        }
    }
    outcome
}
