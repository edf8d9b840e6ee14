//! Parsing raw form input.
//!
//! Inputs stay as the strings the user typed until submit, so a half-typed
//! amount never snaps back. These helpers turn them into typed values with a
//! message naming the field.

#[cfg(test)]
#[path = "form_test.rs"]
mod form_test;

use records::Money;
use records::money::MoneyParseError;
use time::Date;
use time::macros::format_description;

/// A form field that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("{label}: {source}")]
    Money { label: &'static str, source: MoneyParseError },
    #[error("{label} must be a whole number")]
    Number { label: &'static str },
    #[error("{label} must be a date (YYYY-MM-DD)")]
    Date { label: &'static str },
}

/// # Errors
///
/// Returns [`InputError::Money`] for anything [`Money::parse`] rejects.
pub fn money(label: &'static str, raw: &str) -> Result<Money, InputError> {
    Money::parse(raw).map_err(|source| InputError::Money { label, source })
}

/// A blank input means "not offered".
///
/// # Errors
///
/// Returns [`InputError::Money`] for non-blank input that is not an amount.
pub fn optional_money(label: &'static str, raw: &str) -> Result<Option<Money>, InputError> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    money(label, raw).map(Some)
}

/// # Errors
///
/// Returns [`InputError::Number`] unless `raw` is a non-negative integer.
pub fn whole_number(label: &'static str, raw: &str) -> Result<u32, InputError> {
    raw.trim().parse().map_err(|_| InputError::Number { label })
}

/// Parse the value of an `<input type="date">`.
///
/// # Errors
///
/// Returns [`InputError::Date`] unless `raw` is `YYYY-MM-DD`.
pub fn date(label: &'static str, raw: &str) -> Result<Date, InputError> {
    Date::parse(raw.trim(), format_description!("[year]-[month]-[day]")).map_err(|_| InputError::Date { label })
}

/// Date filter inputs: blank or unparsable means unbounded.
#[must_use]
pub fn optional_date(raw: &str) -> Option<Date> {
    date("date", raw).ok()
}

/// Render a date as an `<input type="date">` value.
#[must_use]
pub fn date_value(date: Date) -> String {
    format!("{:04}-{:02}-{:02}", date.year(), u8::from(date.month()), date.day())
}

/// Render an optional amount as an editable input value.
#[must_use]
pub fn money_value(amount: Option<Money>) -> String {
    amount.map(|m| format!("{}.{:02}", m.minor() / 100, m.minor() % 100)).unwrap_or_default()
}
