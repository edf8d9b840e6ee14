//! Fixed-point money amounts.
//!
//! Amounts are kept in minor units (two decimal places) so sums over dues
//! and charges never drift.

#[cfg(test)]
#[path = "money_test.rs"]
mod money_test;

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};

use serde::{Deserialize, Serialize};

/// A non-fractional count of minor currency units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

/// Error returned by [`Money::parse`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoneyParseError {
    #[error("amount is required")]
    Empty,
    #[error("amount must be a number")]
    NotANumber,
    #[error("amount cannot have more than two decimal places")]
    TooPrecise,
    #[error("amount cannot be negative")]
    Negative,
}

impl Money {
    pub const ZERO: Self = Self(0);

    #[must_use]
    pub const fn from_minor(minor: i64) -> Self {
        Self(minor)
    }

    #[must_use]
    pub const fn from_major(major: i64) -> Self {
        Self(major * 100)
    }

    #[must_use]
    pub const fn minor(self) -> i64 {
        self.0
    }

    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Subtract, flooring at zero.
    #[must_use]
    pub const fn saturating_sub(self, rhs: Self) -> Self {
        let diff = self.0 - rhs.0;
        if diff < 0 { Self(0) } else { Self(diff) }
    }

    /// Share of this amount in basis points (1/100 of a percent), rounded down.
    #[must_use]
    pub const fn basis_points(self, bps: u32) -> Self {
        Self(self.0 * bps as i64 / 10_000)
    }

    /// Parse user input such as `1250`, `1,250.5` or `1250.50`.
    ///
    /// # Errors
    ///
    /// Returns a [`MoneyParseError`] for empty, negative, non-numeric, or
    /// over-precise input.
    pub fn parse(raw: &str) -> Result<Self, MoneyParseError> {
        let cleaned: String = raw.trim().chars().filter(|c| *c != ',').collect();
        if cleaned.is_empty() {
            return Err(MoneyParseError::Empty);
        }
        if cleaned.starts_with('-') {
            return Err(MoneyParseError::Negative);
        }

        let (whole, fraction) = match cleaned.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (cleaned.as_str(), ""),
        };
        if fraction.contains('.') {
            return Err(MoneyParseError::NotANumber);
        }
        if fraction.len() > 2 {
            return Err(MoneyParseError::TooPrecise);
        }
        let all_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
        if (whole.is_empty() && fraction.is_empty()) || !all_digits(whole) || !all_digits(fraction) {
            return Err(MoneyParseError::NotANumber);
        }

        let whole: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| MoneyParseError::NotANumber)?
        };
        let fraction: i64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().map_err(|_| MoneyParseError::NotANumber)? * 10,
            _ => fraction.parse().map_err(|_| MoneyParseError::NotANumber)?,
        };

        whole
            .checked_mul(100)
            .and_then(|minor| minor.checked_add(fraction))
            .map(Self)
            .ok_or(MoneyParseError::NotANumber)
    }

    /// Plain decimal form for machine-readable output: `74400.00`, no grouping.
    #[must_use]
    pub fn decimal(self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        format!("{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let whole = (abs / 100).to_string();
        let cents = abs % 100;

        let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
        for (i, ch) in whole.chars().enumerate() {
            if i > 0 && (whole.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }
        write!(f, "{sign}{grouped}.{cents:02}")
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}
