//! Slot calendar for a clinic's services or a single expert.
//!
//! Three modals share the page: add one slot, generate a recurring batch,
//! and edit capacity. Each keeps its raw inputs until submit.

#[cfg(test)]
#[path = "slots_test.rs"]
mod slots_test;

use records::clinic_service::ApprovalStatus;
use records::fixtures;
use records::schedule::{SlotTemplate, WeekdaySet};
use records::slot::{Slot, SlotBatch, SlotDraft, SlotEdit, SlotFilters, SlotOwner, SlotSortKey};
use records::{RecordError, SortSpec, ValidationErrors};
use time::{Date, Duration, PrimitiveDateTime};
use uuid::Uuid;

use super::ActionError;
use super::collection::{Collection, Form, FormMode, settle_form};
use crate::util::form::{self, InputError};
use crate::util::format;

pub const DEFAULT_DURATION_MINUTES: u32 = 30;

/// Bulk generation defaults to the coming fortnight.
const DEFAULT_BULK_DAYS: i64 = 13;

fn owner_required() -> ActionError {
    ValidationErrors::single("owner", "Choose who the slot is for").into()
}

/// Raw contents of the single-slot modal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlotInput {
    pub owner: Option<Uuid>,
    pub date: String,
    pub time: String,
    pub duration: String,
    pub capacity: String,
}

impl SlotInput {
    /// # Errors
    ///
    /// Returns the first field that does not parse.
    pub fn parse(&self) -> Result<SlotDraft, InputError> {
        Ok(SlotDraft {
            date: form::date("Date", &self.date)?,
            time: self.time.clone(),
            duration_minutes: form::whole_number("Duration", &self.duration)?,
            capacity: form::whole_number("Capacity", &self.capacity)?,
        })
    }
}

/// Raw contents of the bulk-generation modal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BulkInput {
    pub owner: Option<Uuid>,
    pub start_date: String,
    pub end_date: String,
    pub weekdays: WeekdaySet,
    /// One entry per time row in the modal; blank rows are ignored.
    pub times: Vec<String>,
    pub duration: String,
    pub capacity: String,
}

impl BulkInput {
    /// # Errors
    ///
    /// Returns the first date that does not parse.
    pub fn template(&self) -> Result<SlotTemplate, InputError> {
        Ok(SlotTemplate {
            start_date: form::date("Start date", &self.start_date)?,
            end_date: form::date("End date", &self.end_date)?,
            weekdays: self.weekdays,
            times: self.times.clone(),
        })
    }

    /// How many start times the template expands to, if it is valid so far.
    #[must_use]
    pub fn preview_count(&self) -> Option<usize> {
        let template = self.template().ok()?;
        template.expand().ok().map(|starts| starts.len())
    }

    pub fn add_time(&mut self) {
        self.times.push(String::new());
    }

    pub fn remove_time(&mut self, index: usize) {
        if index < self.times.len() && self.times.len() > 1 {
            self.times.remove(index);
        }
    }
}

/// Raw contents of the capacity edit modal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditInput {
    pub duration: String,
    pub max_bookings: String,
    pub available_slots: String,
}

impl EditInput {
    /// # Errors
    ///
    /// Returns the first field that does not parse.
    pub fn parse(&self) -> Result<SlotEdit, InputError> {
        Ok(SlotEdit {
            duration_minutes: form::whole_number("Duration", &self.duration)?,
            max_bookings: form::whole_number("Capacity", &self.max_bookings)?,
            available_slots: form::whole_number("Available slots", &self.available_slots)?,
        })
    }
}

impl From<&Slot> for EditInput {
    fn from(slot: &Slot) -> Self {
        Self {
            duration: slot.duration_minutes.to_string(),
            max_bookings: slot.max_bookings.to_string(),
            available_slots: slot.available_slots.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SlotsState {
    /// Calendars this page may add slots to.
    pub owners: Vec<SlotOwner>,
    pub default_capacity: u32,
    pub slots: Collection<Slot, SlotFilters>,
    pub single: Option<Form<SlotInput>>,
    pub bulk: Option<Form<BulkInput>>,
    pub edit: Option<Form<EditInput>>,
}

impl SlotsState {
    #[must_use]
    pub fn new(owners: Vec<SlotOwner>, default_capacity: u32, rows: Vec<Slot>) -> Self {
        Self {
            owners,
            default_capacity,
            slots: Collection::new(rows, Some(SortSpec::asc(SlotSortKey::StartTime))),
            single: None,
            bulk: None,
            edit: None,
        }
    }

    /// The current clinic's approved services and their slots.
    #[must_use]
    pub fn clinic_fixtures() -> Self {
        let clinic = fixtures::current_clinic();
        let services = fixtures::clinic_services();
        let owners = services
            .iter()
            .filter(|s| s.clinic_id == clinic.id && s.approval == ApprovalStatus::Approved)
            .map(|s| SlotOwner::ClinicService { id: s.id, name: s.name.clone() })
            .collect();
        Self::new(owners, 4, fixtures::clinic_slots(&services))
    }

    /// The current expert's own calendar.
    #[must_use]
    pub fn expert_fixtures() -> Self {
        let expert = fixtures::current_expert();
        Self::new(vec![SlotOwner::Expert { id: expert.id, name: expert.name }], 1, fixtures::expert_slots())
    }

    #[must_use]
    pub fn owner(&self, id: Uuid) -> Option<&SlotOwner> {
        self.owners.iter().find(|o| o.id() == id)
    }

    fn default_owner(&self) -> Option<Uuid> {
        match self.owners.as_slice() {
            [only] => Some(only.id()),
            _ => None,
        }
    }

    fn resolve_owner(&self, id: Option<Uuid>) -> Result<SlotOwner, ActionError> {
        id.and_then(|id| self.owner(id)).cloned().ok_or_else(owner_required)
    }

    // =========================================================================
    // SINGLE
    // =========================================================================

    pub fn open_single(&mut self, today: Date) {
        self.single = Some(Form::create(SlotInput {
            owner: self.default_owner(),
            date: form::date_value(today),
            time: "09:00".to_owned(),
            duration: DEFAULT_DURATION_MINUTES.to_string(),
            capacity: self.default_capacity.to_string(),
        }));
    }

    /// # Errors
    ///
    /// Returns [`ActionError::NoForm`] when the modal is closed, otherwise the
    /// parse or validation failure, which is also kept on the form.
    pub fn submit_single(&mut self, id: Uuid, now: PrimitiveDateTime) -> Result<String, ActionError> {
        let Some(open) = self.single.as_ref() else {
            return Err(ActionError::NoForm);
        };
        let input = open.draft.clone();
        let outcome = self.add_single(&input, id, now);
        settle_form(&mut self.single, outcome)
    }

    fn add_single(&mut self, input: &SlotInput, id: Uuid, now: PrimitiveDateTime) -> Result<String, ActionError> {
        let owner = self.resolve_owner(input.owner)?;
        let slot = input.parse()?.create(id, owner, now)?;
        let clash = self
            .slots
            .table()
            .rows()
            .iter()
            .any(|s| s.owner.id() == slot.owner.id() && s.start_time == slot.start_time);
        if clash {
            return Err(ValidationErrors::single("time", "A slot already starts at this time").into());
        }
        let message = format!("Added slot on {}", format::date_time(slot.start_time));
        self.slots.table_mut().insert(slot);
        Ok(message)
    }

    // =========================================================================
    // BULK
    // =========================================================================

    pub fn open_bulk(&mut self, today: Date) {
        let end = today.checked_add(Duration::days(DEFAULT_BULK_DAYS)).unwrap_or(today);
        self.bulk = Some(Form::create(BulkInput {
            owner: self.default_owner(),
            start_date: form::date_value(today),
            end_date: form::date_value(end),
            weekdays: WeekdaySet::WEEKDAYS,
            times: vec!["09:00".to_owned()],
            duration: DEFAULT_DURATION_MINUTES.to_string(),
            capacity: self.default_capacity.to_string(),
        }));
    }

    /// Generate the batch described by the bulk modal. Start times the
    /// owner already has are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::NoForm`] when the modal is closed, otherwise the
    /// parse, validation or schedule failure, which is also kept on the form.
    pub fn submit_bulk(&mut self, next_id: impl FnMut() -> Uuid, now: PrimitiveDateTime) -> Result<String, ActionError> {
        let Some(open) = self.bulk.as_ref() else {
            return Err(ActionError::NoForm);
        };
        let input = open.draft.clone();
        let outcome = self.generate(&input, next_id, now);
        settle_form(&mut self.bulk, outcome)
    }

    fn generate(&mut self, input: &BulkInput, next_id: impl FnMut() -> Uuid, now: PrimitiveDateTime) -> Result<String, ActionError> {
        let batch = SlotBatch {
            template: input.template()?,
            owner: self.resolve_owner(input.owner)?,
            duration_minutes: form::whole_number("Duration", &input.duration)?,
            capacity: form::whole_number("Capacity", &input.capacity)?,
        };
        let expected = batch.template.expand().map_err(RecordError::from)?.len();
        let created = batch.generate(self.slots.table().rows(), next_id, now)?;
        let skipped = expected.saturating_sub(created.len());
        if created.is_empty() {
            return Err(ValidationErrors::single("times", "Every one of these slots already exists").into());
        }

        let skipped_note = if skipped > 0 { format!(" ({skipped} already existed)") } else { String::new() };
        let message =
            format!("Created {} for {}{skipped_note}", format::count(created.len(), "slot"), batch.owner.name());
        self.slots.table_mut().insert_many(created);
        Ok(message)
    }

    // =========================================================================
    // EDIT / BLOCK / DELETE
    // =========================================================================

    /// # Errors
    ///
    /// Returns `NotFound` if the slot no longer exists.
    pub fn open_edit(&mut self, id: Uuid) -> Result<(), ActionError> {
        let slot = self.slots.get(id).ok_or(RecordError::NotFound(id))?;
        self.edit = Some(Form::edit(id, EditInput::from(slot)));
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`ActionError::NoForm`] when the modal is closed, otherwise the
    /// parse or validation failure, which is also kept on the form.
    pub fn submit_edit(&mut self) -> Result<String, ActionError> {
        let Some(open) = self.edit.as_ref() else {
            return Err(ActionError::NoForm);
        };
        let outcome = match (open.mode, open.draft.parse()) {
            (FormMode::Edit(id), Ok(edit)) => self
                .slots
                .table_mut()
                .update(id, |slot| {
                    edit.apply(slot)?;
                    Ok(format!("Updated slot on {}", format::date_time(slot.start_time)))
                })
                .map_err(ActionError::from),
            (FormMode::Create, _) => Err(ActionError::NoForm),
            (_, Err(err)) => Err(err.into()),
        };
        settle_form(&mut self.edit, outcome)
    }

    /// # Errors
    ///
    /// Returns `NotFound` if the slot no longer exists.
    pub fn toggle_block(&mut self, id: Uuid) -> Result<String, ActionError> {
        let message = self.slots.table_mut().update(id, |slot| {
            let verb = if slot.toggle_block() { "Blocked" } else { "Reopened" };
            Ok(format!("{verb} slot on {}", format::date_time(slot.start_time)))
        })?;
        log::info!("{message}");
        Ok(message)
    }

    /// # Errors
    ///
    /// See [`Collection::confirm_delete`].
    pub fn confirm_delete(&mut self) -> Result<String, ActionError> {
        let slot = self.slots.confirm_delete()?;
        log::info!("deleted slot {}", slot.id);
        Ok(format!("Deleted slot on {}", format::date_time(slot.start_time)))
    }

    pub fn close(&mut self) {
        self.single = None;
        self.bulk = None;
        self.edit = None;
    }
}
