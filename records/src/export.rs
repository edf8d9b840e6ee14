//! CSV and JSON export of a filtered, sorted table.
//!
//! Export always covers every matching row, not just the visible page. The
//! browser side only has to turn an [`ExportFile`] into a download.
//!
//! Both formats are rendered from the same [`Exportable::row`] cells, so a
//! JSON object carries exactly the CSV columns (derived ones included) and
//! amounts read the same in either file.

#[cfg(test)]
#[path = "export_test.rs"]
mod export_test;

use serde::ser::{Serialize, SerializeMap, Serializer};
use time::{Date, PrimitiveDateTime};

use crate::booking::Booking;
use crate::catalog::CatalogService;
use crate::clinic_service::ClinicService;
use crate::dues::ClinicDues;
use crate::query::Choice;
use crate::schedule::format_time;
use crate::slot::Slot;
use crate::user::User;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("csv export failed: {0}")]
    Csv(#[from] csv::Error),
    #[error("json export failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("export buffer failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("export produced invalid utf-8")]
    Utf8(#[from] std::string::FromUtf8Error),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }

    #[must_use]
    pub fn mime(self) -> &'static str {
        match self {
            Self::Csv => "text/csv;charset=utf-8",
            Self::Json => "application/json",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Csv => "CSV",
            Self::Json => "JSON",
        }
    }
}

/// A record type with a flat tabular shape.
pub trait Exportable {
    /// File name prefix, e.g. `users`.
    const STEM: &'static str;

    fn headers() -> &'static [&'static str];

    /// One cell per header, already formatted for a spreadsheet.
    fn row(&self) -> Vec<String>;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportFile {
    pub filename: String,
    pub mime: &'static str,
    pub body: String,
}

/// Render `rows` in `format`, named after `today`.
///
/// # Errors
///
/// Returns an [`ExportError`] if the writer or serializer fails.
pub fn export<T: Exportable>(rows: &[&T], format: ExportFormat, today: Date) -> Result<ExportFile, ExportError> {
    let body = match format {
        ExportFormat::Csv => to_csv(rows)?,
        ExportFormat::Json => to_json(rows)?,
    };
    Ok(ExportFile {
        filename: format!("{}-{today}.{}", T::STEM, format.extension()),
        mime: format.mime(),
        body,
    })
}

fn to_csv<T: Exportable>(rows: &[&T]) -> Result<String, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(T::headers())?;
    for row in rows {
        writer.write_record(row.row())?;
    }
    let bytes = writer.into_inner().map_err(csv::IntoInnerError::into_error)?;
    Ok(String::from_utf8(bytes)?)
}

fn to_json<T: Exportable>(rows: &[&T]) -> Result<String, ExportError> {
    let objects: Vec<JsonRow> = rows.iter().map(|row| JsonRow { headers: T::headers(), cells: row.row() }).collect();
    Ok(serde_json::to_string_pretty(&objects)?)
}

/// One exported row as a JSON object keyed by header, in header order.
struct JsonRow {
    headers: &'static [&'static str],
    cells: Vec<String>,
}

impl Serialize for JsonRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.headers.len()))?;
        for (header, cell) in self.headers.iter().zip(&self.cells) {
            map.serialize_entry(header, cell)?;
        }
        map.end()
    }
}

fn stamp(at: PrimitiveDateTime) -> String {
    format!("{} {}", at.date(), format_time(at.time()))
}

fn yes_no(flag: bool) -> String {
    if flag { "yes" } else { "no" }.to_owned()
}

fn optional(amount: Option<crate::Money>) -> String {
    amount.map(crate::Money::decimal).unwrap_or_default()
}

// =============================================================================
// RECORD SHAPES
// =============================================================================

impl Exportable for User {
    const STEM: &'static str = "users";

    fn headers() -> &'static [&'static str] {
        &["id", "name", "email", "phone", "role", "status", "joined"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.email.clone(),
            self.full_phone(),
            self.role.as_str().to_owned(),
            self.status().as_str().to_owned(),
            stamp(self.created_at),
        ]
    }
}

impl Exportable for Booking {
    const STEM: &'static str = "bookings";

    fn headers() -> &'static [&'static str] {
        &["id", "patient", "provider", "service", "mode", "start", "end", "charge", "status"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.patient_name.clone(),
            self.provider.name().to_owned(),
            self.service_name.clone(),
            self.mode.as_str().to_owned(),
            stamp(self.start_time),
            stamp(self.end_time),
            self.charge.decimal(),
            self.status.as_str().to_owned(),
        ]
    }
}

impl Exportable for CatalogService {
    const STEM: &'static str = "catalog";

    fn headers() -> &'static [&'static str] {
        &["id", "name", "category", "description", "active", "created"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.category.as_str().to_owned(),
            self.description.clone(),
            yes_no(self.is_active),
            stamp(self.created_at),
        ]
    }
}

impl Exportable for ClinicService {
    const STEM: &'static str = "clinic-services";

    fn headers() -> &'static [&'static str] {
        &["id", "clinic", "name", "video", "physical", "home", "approval", "rank", "display_date"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.clinic_name.clone(),
            self.name.clone(),
            optional(self.charges.video),
            optional(self.charges.physical),
            optional(self.charges.home),
            self.approval.as_str().to_owned(),
            self.rank.to_string(),
            self.display_date.to_string(),
        ]
    }
}

impl Exportable for Slot {
    const STEM: &'static str = "slots";

    fn headers() -> &'static [&'static str] {
        &["id", "owner", "start", "duration_minutes", "max_bookings", "available_slots", "status"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.owner.name().to_owned(),
            stamp(self.start_time),
            self.duration_minutes.to_string(),
            self.max_bookings.to_string(),
            self.available_slots.to_string(),
            self.status().as_str().to_owned(),
        ]
    }
}

impl Exportable for ClinicDues {
    const STEM: &'static str = "dues";

    fn headers() -> &'static [&'static str] {
        &["clinic_id", "clinic", "bookings", "earned", "platform_fee", "paid", "outstanding", "status", "last_payment"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.clinic_name.clone(),
            self.total_bookings.to_string(),
            self.total_earned.decimal(),
            self.platform_fee.decimal(),
            self.amount_paid.decimal(),
            self.outstanding().decimal(),
            self.status().as_str().to_owned(),
            self.last_payment_at.map(stamp).unwrap_or_default(),
        ]
    }
}
