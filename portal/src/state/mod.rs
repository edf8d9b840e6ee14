//! Page state models.
//!
//! DESIGN
//! ======
//! Each dashboard page owns one plain struct wrapped in an `RwSignal`. The
//! structs hold no Leptos types so every mutation is unit-testable; a click
//! handler runs exactly one `update` and reports the outcome to
//! [`notice::Notices`].
//!
//! ERROR HANDLING
//! ==============
//! Operations return `Result<String, ActionError>`: the `Ok` string is the
//! success toast, the error's `Display` is the failure toast and, for forms,
//! the inline message.

pub mod bookings;
pub mod catalog;
pub mod clinic_services;
pub mod collection;
pub mod dues;
pub mod notice;
pub mod review;
pub mod slots;
pub mod users;

use records::RecordError;
use records::ValidationErrors;
use records::export::ExportError;

use crate::util::download::DownloadError;
use crate::util::form::InputError;

/// Why a page action did not happen.
#[derive(Debug, thiserror::Error)]
pub enum ActionError {
    #[error(transparent)]
    Record(#[from] RecordError),
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Download(#[from] DownloadError),
    #[error("no form is open")]
    NoForm,
}
