//! Rupee amounts held as integer paise.

use core::fmt;
use core::iter::Sum;
use core::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_object::ValueObject;

const PAISE_PER_RUPEE: u64 = 100;

/// Non-negative amount of money in the smallest currency unit (paise).
///
/// Catalog files express prices as decimals (`12.5`), so the serde form is a
/// plain number in rupees.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Money(u64);

impl ValueObject for Money {}

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_paise(paise: u64) -> Self {
        Self(paise)
    }

    pub const fn from_rupees(rupees: u64) -> Self {
        Self(rupees * PAISE_PER_RUPEE)
    }

    /// Convert a decimal rupee amount, rounding half-up to the paisa.
    pub fn from_decimal(rupees: f64) -> Result<Self, DomainError> {
        if !rupees.is_finite() || rupees < 0.0 {
            return Err(DomainError::invalid_value(format!(
                "amount must be a finite, non-negative number (got {rupees})"
            )));
        }
        let paise = (rupees * PAISE_PER_RUPEE as f64).round();
        if paise > u64::MAX as f64 {
            return Err(DomainError::invalid_value(format!("amount too large: {rupees}")));
        }
        Ok(Self(paise as u64))
    }

    pub fn paise(self) -> u64 {
        self.0
    }

    pub fn to_decimal(self) -> f64 {
        self.0 as f64 / PAISE_PER_RUPEE as f64
    }

    /// `self * quantity`, saturating at the representable maximum.
    pub fn times(self, quantity: u32) -> Money {
        Money(self.0.saturating_mul(u64::from(quantity)))
    }

    /// `percent`% of this amount, rounded half-up to the paisa.
    pub fn percent(self, percent: u32) -> Money {
        let scaled = u128::from(self.0) * u128::from(percent);
        let rounded = (scaled + 50) / 100;
        Money(u64::try_from(rounded).unwrap_or(u64::MAX))
    }

    /// Plain two-decimal form without the currency sign (`"135.00"`).
    pub fn to_plain_string(self) -> String {
        format!("{}.{:02}", self.0 / PAISE_PER_RUPEE, self.0 % PAISE_PER_RUPEE)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "₹{}", self.to_plain_string())
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Money {
        Money(self.0.saturating_sub(rhs.0))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl TryFrom<f64> for Money {
    type Error = DomainError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Money::from_decimal(value)
    }
}

impl From<Money> for f64 {
    fn from(value: Money) -> Self {
        value.to_decimal()
    }
}
