//! Money as integer cents
//!
//! Every monetary amount in the ledger is a whole number of cents. Integer
//! arithmetic keeps splits and balance aggregation exact: there is no
//! floating point and no rounding anywhere in the core.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use thiserror::Error;

/// Errors that can occur during money operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyError {
    #[error("Overflow during calculation")]
    Overflow,

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
}

/// A monetary amount in whole cents
///
/// Signed: positive amounts are credits (owed money), negative amounts are
/// debts. The newtype serializes as a bare integer, matching the
/// `amountCents`/`netCents` representation of the wire models.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Cents(i64);

impl Cents {
    /// Zero cents
    pub const ZERO: Cents = Cents(0);

    /// Creates a new amount from a signed cent count
    pub fn new(cents: i64) -> Self {
        Self(cents)
    }

    /// Returns the raw cent count
    pub fn amount(&self) -> i64 {
        self.0
    }

    /// Returns true if the amount is zero
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Returns true if the amount is strictly positive
    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Returns true if the amount is strictly negative
    pub fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute magnitude
    pub fn abs(&self) -> Cents {
        Cents(self.0.abs())
    }

    /// Overflow-checked addition
    pub fn checked_add(&self, other: Cents) -> Result<Cents, MoneyError> {
        self.0
            .checked_add(other.0)
            .map(Cents)
            .ok_or(MoneyError::Overflow)
    }

    /// Overflow-checked subtraction
    pub fn checked_sub(&self, other: Cents) -> Result<Cents, MoneyError> {
        self.0
            .checked_sub(other.0)
            .map(Cents)
            .ok_or(MoneyError::Overflow)
    }

    /// Returns the smaller of two amounts
    pub fn min(self, other: Cents) -> Cents {
        Cents(self.0.min(other.0))
    }
}

impl Add for Cents {
    type Output = Cents;

    fn add(self, rhs: Cents) -> Cents {
        Cents(self.0 + rhs.0)
    }
}

impl AddAssign for Cents {
    fn add_assign(&mut self, rhs: Cents) {
        self.0 += rhs.0;
    }
}

impl Sub for Cents {
    type Output = Cents;

    fn sub(self, rhs: Cents) -> Cents {
        Cents(self.0 - rhs.0)
    }
}

impl SubAssign for Cents {
    fn sub_assign(&mut self, rhs: Cents) {
        self.0 -= rhs.0;
    }
}

impl Neg for Cents {
    type Output = Cents;

    fn neg(self) -> Cents {
        Cents(-self.0)
    }
}

impl Sum for Cents {
    fn sum<I: Iterator<Item = Cents>>(iter: I) -> Cents {
        iter.fold(Cents::ZERO, |acc, c| acc + c)
    }
}

impl From<i64> for Cents {
    fn from(cents: i64) -> Self {
        Cents(cents)
    }
}

impl From<Cents> for i64 {
    fn from(cents: Cents) -> i64 {
        cents.0
    }
}

impl fmt::Display for Cents {
    /// Formats as dollars, e.g. `-3.07` for `Cents(-307)`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let magnitude = self.0.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, magnitude / 100, magnitude % 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_predicates() {
        assert!(Cents::ZERO.is_zero());
        assert!(Cents::new(1).is_positive());
        assert!(Cents::new(-1).is_negative());
        assert!(!Cents::new(-1).is_positive());
    }

    #[test]
    fn test_checked_add_overflow() {
        let max = Cents::new(i64::MAX);
        assert_eq!(max.checked_add(Cents::new(1)), Err(MoneyError::Overflow));
        assert_eq!(
            Cents::new(100).checked_add(Cents::new(250)),
            Ok(Cents::new(350))
        );
    }

    #[test]
    fn test_display_formats_dollars() {
        assert_eq!(Cents::new(1234).to_string(), "12.34");
        assert_eq!(Cents::new(-307).to_string(), "-3.07");
        assert_eq!(Cents::new(5).to_string(), "0.05");
        assert_eq!(Cents::ZERO.to_string(), "0.00");
    }
}
