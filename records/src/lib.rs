//! Typed records and collection helpers for the CareHub dashboards.
//!
//! This crate is UI-framework agnostic: it owns the record shapes, the
//! search/filter/sort/paginate pipeline shared by every dashboard table,
//! bulk slot generation, form validation, dues aggregation, and export.
//! The `portal` crate renders these; nothing here touches the DOM.

pub mod booking;
pub mod catalog;
pub mod clinic_service;
pub mod dues;
pub mod export;
pub mod fixtures;
pub mod money;
pub mod query;
pub mod schedule;
pub mod slot;
pub mod table;
pub mod user;
pub mod validate;

use uuid::Uuid;

pub use money::Money;
pub use query::{DateRange, Facet, PageWindow, Pagination, Record, Search, SortOrder, SortSpec, View, ViewState};
pub use table::Table;
pub use validate::ValidationErrors;

/// Error returned by record mutations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    /// No record with this id exists in the table.
    #[error("record not found: {0}")]
    NotFound(Uuid),
    /// A status change that the record's lifecycle does not allow.
    #[error("cannot move from {from} to {to}")]
    InvalidTransition { from: &'static str, to: &'static str },
    /// One or more form fields failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
    /// A bulk schedule template could not be expanded.
    #[error(transparent)]
    Schedule(#[from] schedule::ScheduleError),
    /// A payment larger than what the clinic still owes.
    #[error("payment of {amount} exceeds outstanding dues of {outstanding}")]
    Overpayment { amount: Money, outstanding: Money },
}
