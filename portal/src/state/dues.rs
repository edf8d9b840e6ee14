//! Admin dues tracking: platform fees owed by clinics and payments received.

#[cfg(test)]
#[path = "dues_test.rs"]
mod dues_test;

use records::dues::{ClinicDues, DuesFilters, DuesSortKey, DuesSummary, PaymentDraft, PaymentMethod};
use records::{RecordError, SortSpec, fixtures};
use time::PrimitiveDateTime;
use uuid::Uuid;

use super::ActionError;
use super::collection::{Collection, Form, FormMode, settle_form};
use crate::util::form;
use crate::util::format;

/// Raw contents of the record-payment modal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaymentInput {
    pub amount: String,
    pub method: PaymentMethod,
    pub reference: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DuesState {
    pub clinics: Collection<ClinicDues, DuesFilters>,
    /// Payment modal; its mode carries the clinic being paid for.
    pub payment: Option<Form<PaymentInput>>,
    /// Clinic whose transaction history is open.
    pub history: Option<Uuid>,
}

impl DuesState {
    #[must_use]
    pub fn new(rows: Vec<ClinicDues>) -> Self {
        Self {
            clinics: Collection::new(rows, Some(SortSpec::desc(DuesSortKey::Outstanding))),
            payment: None,
            history: None,
        }
    }

    #[must_use]
    pub fn from_fixtures() -> Self {
        Self::new(fixtures::dues())
    }

    /// Totals over every clinic, recomputed from the current rows.
    #[must_use]
    pub fn summary(&self) -> DuesSummary {
        DuesSummary::from_clinics(self.clinics.table().rows())
    }

    /// Open the payment modal prefilled with the clinic's outstanding amount.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the clinic no longer exists.
    pub fn open_payment(&mut self, clinic_id: Uuid) -> Result<(), ActionError> {
        let clinic = self.clinics.get(clinic_id).ok_or(RecordError::NotFound(clinic_id))?;
        let input = PaymentInput {
            amount: form::money_value(Some(clinic.outstanding())),
            method: PaymentMethod::BankTransfer,
            reference: String::new(),
        };
        self.payment = Some(Form::edit(clinic_id, input));
        Ok(())
    }

    pub fn close_payment(&mut self) {
        self.payment = None;
    }

    /// Record the payment described by the open modal.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::NoForm`] when the modal is closed, otherwise the
    /// parse, validation or overpayment failure, which is also kept on the form.
    pub fn submit_payment(&mut self, id: Uuid, now: PrimitiveDateTime) -> Result<String, ActionError> {
        let Some(open) = self.payment.as_ref() else {
            return Err(ActionError::NoForm);
        };
        let FormMode::Edit(clinic_id) = open.mode else {
            return Err(ActionError::NoForm);
        };
        let outcome = match form::money("Amount", &open.draft.amount) {
            Ok(amount) => {
                let draft = PaymentDraft { amount, method: open.draft.method, reference: open.draft.reference.clone() };
                self.record(clinic_id, &draft, id, now)
            }
            Err(err) => Err(err.into()),
        };
        settle_form(&mut self.payment, outcome)
    }

    fn record(&mut self, clinic_id: Uuid, draft: &PaymentDraft, id: Uuid, now: PrimitiveDateTime) -> Result<String, ActionError> {
        let message = self.clinics.table_mut().update(clinic_id, |clinic| {
            let amount = clinic.record_payment(draft, id, now)?.amount;
            Ok(format!("Recorded {} from {}", format::rupees(amount), clinic.clinic_name))
        })?;
        Ok(message)
    }

    pub fn open_history(&mut self, clinic_id: Uuid) {
        self.history = Some(clinic_id);
    }

    pub fn close_history(&mut self) {
        self.history = None;
    }

    #[must_use]
    pub fn history(&self) -> Option<&ClinicDues> {
        self.history.and_then(|id| self.clinics.get(id))
    }
}
