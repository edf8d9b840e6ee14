//! Form field validation.
//!
//! Checks accumulate into a [`Validator`] so a form can report every bad
//! field at once; the first message is what the toast banner shows.

#[cfg(test)]
#[path = "validate_test.rs"]
mod validate_test;

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

// Patterns are literals; a failure here is a programming error caught by tests.
static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]{2,}$").expect("email pattern"));
static PHONE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{6,15}$").expect("phone pattern"));
static COUNTRY_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+\d{1,4}$").expect("country code pattern"));

/// One failed field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Every field that failed, in the order checks ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    #[must_use]
    pub fn single(field: &'static str, message: impl Into<String>) -> Self {
        Self(vec![FieldError { field, message: message.into() }])
    }

    #[must_use]
    pub fn fields(&self) -> &[FieldError] {
        &self.0
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.first() {
            Some(first) if self.0.len() > 1 => {
                write!(f, "{} (and {} more)", first.message, self.0.len() - 1)
            }
            Some(first) => f.write_str(&first.message),
            None => f.write_str("invalid input"),
        }
    }
}

impl std::error::Error for ValidationErrors {}

/// Accumulates field checks.
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail(&mut self, field: &'static str, message: impl Into<String>) -> &mut Self {
        self.errors.push(FieldError { field, message: message.into() });
        self
    }

    pub fn check(&mut self, ok: bool, field: &'static str, message: &str) -> &mut Self {
        if !ok {
            self.fail(field, message);
        }
        self
    }

    pub fn required(&mut self, field: &'static str, label: &str, value: &str) -> &mut Self {
        self.check(!value.trim().is_empty(), field, &format!("{label} is required"))
    }

    pub fn email(&mut self, field: &'static str, value: &str) -> &mut Self {
        self.check(is_email(value), field, "Enter a valid email address")
    }

    pub fn phone(&mut self, field: &'static str, value: &str) -> &mut Self {
        self.check(is_phone(value), field, "Phone number must be 6 to 15 digits")
    }

    pub fn country_code(&mut self, field: &'static str, value: &str) -> &mut Self {
        self.check(is_country_code(value), field, "Country code must look like +91")
    }

    pub fn range<T>(&mut self, field: &'static str, label: &str, value: T, min: T, max: T) -> &mut Self
    where
        T: PartialOrd + fmt::Display,
    {
        self.check(
            value >= min && value <= max,
            field,
            &format!("{label} must be between {min} and {max}"),
        )
    }

    /// # Errors
    ///
    /// Returns every failed check.
    pub fn finish(&mut self) -> Result<(), ValidationErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors(std::mem::take(&mut self.errors)))
        }
    }
}

#[must_use]
pub fn is_email(value: &str) -> bool {
    EMAIL.is_match(value.trim())
}

#[must_use]
pub fn is_phone(value: &str) -> bool {
    PHONE.is_match(value.trim())
}

#[must_use]
pub fn is_country_code(value: &str) -> bool {
    COUNTRY_CODE.is_match(value.trim())
}
