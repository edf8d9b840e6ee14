//! Platform-fee dues owed by clinics and the payments recorded against them.
//!
//! DESIGN
//! ======
//! Each clinic carries its running totals (bookings, gross earned, platform
//! fee owed, amount paid) plus its payment history. Outstanding dues and
//! the clear/partial/outstanding status are derived from those totals.
//! [`DuesSummary`] is recomputed from the whole clinic list after every
//! change rather than patched incrementally, so it cannot drift.
//!
//! ERROR HANDLING
//! ==============
//! A payment must be positive and may not exceed what is outstanding;
//! the latter is reported as [`RecordError::Overpayment`] with both amounts.

#[cfg(test)]
#[path = "dues_test.rs"]
mod dues_test;

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use time::PrimitiveDateTime;
use uuid::Uuid;

use crate::RecordError;
use crate::money::Money;
use crate::query::{Choice, Facet, FilterSet, Record};
use crate::validate::Validator;

/// Platform commission on gross clinic earnings, in basis points.
pub const PLATFORM_FEE_BPS: u32 = 1_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    BankTransfer,
    Upi,
    Card,
    Cash,
}

impl Choice for PaymentMethod {
    const ALL: &'static [Self] = &[Self::BankTransfer, Self::Upi, Self::Card, Self::Cash];

    fn as_str(self) -> &'static str {
        match self {
            Self::BankTransfer => "BANK_TRANSFER",
            Self::Upi => "UPI",
            Self::Card => "CARD",
            Self::Cash => "CASH",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::BankTransfer => "Bank transfer",
            Self::Upi => "UPI",
            Self::Card => "Card",
            Self::Cash => "Cash",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DuesStatus {
    Clear,
    Partial,
    Outstanding,
}

impl Choice for DuesStatus {
    const ALL: &'static [Self] = &[Self::Clear, Self::Partial, Self::Outstanding];

    fn as_str(self) -> &'static str {
        match self {
            Self::Clear => "CLEAR",
            Self::Partial => "PARTIAL",
            Self::Outstanding => "OUTSTANDING",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Clear => "Clear",
            Self::Partial => "Partially paid",
            Self::Outstanding => "Outstanding",
        }
    }
}

/// One payment received from a clinic.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,
    pub clinic_id: Uuid,
    pub amount: Money,
    pub method: PaymentMethod,
    pub reference: String,
    pub paid_at: PrimitiveDateTime,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClinicDues {
    /// The clinic's id; one dues record per clinic.
    pub id: Uuid,
    pub clinic_name: String,
    pub total_bookings: u32,
    pub total_earned: Money,
    pub platform_fee: Money,
    pub amount_paid: Money,
    pub last_payment_at: Option<PrimitiveDateTime>,
    /// Newest first.
    pub transactions: Vec<Transaction>,
}

impl ClinicDues {
    /// A clinic with no payments yet, owing the standard fee on `total_earned`.
    #[must_use]
    pub fn new(id: Uuid, clinic_name: &str, total_bookings: u32, total_earned: Money) -> Self {
        Self {
            id,
            clinic_name: clinic_name.to_owned(),
            total_bookings,
            total_earned,
            platform_fee: total_earned.basis_points(PLATFORM_FEE_BPS),
            amount_paid: Money::ZERO,
            last_payment_at: None,
            transactions: Vec::new(),
        }
    }

    #[must_use]
    pub fn outstanding(&self) -> Money {
        self.platform_fee.saturating_sub(self.amount_paid)
    }

    #[must_use]
    pub fn status(&self) -> DuesStatus {
        if !self.outstanding().is_positive() {
            DuesStatus::Clear
        } else if self.amount_paid.is_positive() {
            DuesStatus::Partial
        } else {
            DuesStatus::Outstanding
        }
    }

    /// Validate and record a payment, returning the new transaction.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::Validation`] for a non-positive amount or a
    /// missing reference, and [`RecordError::Overpayment`] when the amount
    /// exceeds the outstanding dues. The record is unchanged on error.
    pub fn record_payment(
        &mut self,
        payment: &PaymentDraft,
        id: Uuid,
        now: PrimitiveDateTime,
    ) -> Result<&Transaction, RecordError> {
        payment.validate()?;
        let outstanding = self.outstanding();
        if payment.amount > outstanding {
            return Err(RecordError::Overpayment { amount: payment.amount, outstanding });
        }

        self.amount_paid += payment.amount;
        self.last_payment_at = Some(now);
        self.transactions.insert(
            0,
            Transaction {
                id,
                clinic_id: self.id,
                amount: payment.amount,
                method: payment.method,
                reference: payment.reference.trim().to_owned(),
                paid_at: now,
            },
        );
        Ok(&self.transactions[0])
    }
}

/// Payment form contents.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaymentDraft {
    pub amount: Money,
    pub method: PaymentMethod,
    pub reference: String,
}

impl PaymentDraft {
    /// # Errors
    ///
    /// Returns every invalid field. Cash payments need no reference.
    pub fn validate(&self) -> Result<(), crate::ValidationErrors> {
        let mut v = Validator::new();
        v.check(self.amount.is_positive(), "amount", "Amount must be greater than zero");
        if self.method != PaymentMethod::Cash {
            v.required("reference", "Reference", &self.reference);
        }
        v.finish()
    }
}

// =============================================================================
// TABLE
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DuesSortKey {
    ClinicName,
    Outstanding,
    TotalEarned,
    LastPayment,
}

impl Record for ClinicDues {
    type SortKey = DuesSortKey;

    fn id(&self) -> Uuid {
        self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.clinic_name]
    }

    fn compare_by(&self, other: &Self, key: DuesSortKey) -> Ordering {
        match key {
            DuesSortKey::ClinicName => self.clinic_name.to_lowercase().cmp(&other.clinic_name.to_lowercase()),
            DuesSortKey::Outstanding => self.outstanding().cmp(&other.outstanding()),
            DuesSortKey::TotalEarned => self.total_earned.cmp(&other.total_earned),
            DuesSortKey::LastPayment => self.last_payment_at.cmp(&other.last_payment_at),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DuesFilters {
    pub status: Facet<DuesStatus>,
}

impl FilterSet<ClinicDues> for DuesFilters {
    fn matches(&self, dues: &ClinicDues) -> bool {
        self.status.matches(&dues.status())
    }
}

// =============================================================================
// SUMMARY
// =============================================================================

/// Totals across every clinic, shown in the cards above the dues table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct DuesSummary {
    pub clinics: usize,
    pub total_bookings: u64,
    pub total_earned: Money,
    pub platform_fee: Money,
    pub amount_paid: Money,
    pub outstanding: Money,
    pub clear: usize,
    pub partial: usize,
    pub unpaid: usize,
}

impl DuesSummary {
    pub fn from_clinics<'a>(clinics: impl IntoIterator<Item = &'a ClinicDues>) -> Self {
        let mut summary = Self::default();
        for clinic in clinics {
            summary.clinics += 1;
            summary.total_bookings += u64::from(clinic.total_bookings);
            summary.total_earned += clinic.total_earned;
            summary.platform_fee += clinic.platform_fee;
            summary.amount_paid += clinic.amount_paid;
            summary.outstanding += clinic.outstanding();
            match clinic.status() {
                DuesStatus::Clear => summary.clear += 1,
                DuesStatus::Partial => summary.partial += 1,
                DuesStatus::Outstanding => summary.unpaid += 1,
            }
        }
        summary
    }

    /// Share of platform fees collected, in whole percent.
    #[must_use]
    pub fn collected_percent(&self) -> u8 {
        if !self.platform_fee.is_positive() {
            return 100;
        }
        let pct = self.amount_paid.minor().saturating_mul(100) / self.platform_fee.minor();
        u8::try_from(pct.clamp(0, 100)).unwrap_or(100)
    }
}
