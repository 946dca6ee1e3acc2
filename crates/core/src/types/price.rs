//! Type-safe price representation using decimal arithmetic.
//!
//! A `Price` is never negative. Spreadsheet input is parsed into a `Price`
//! at the edge so the cart and checkout only ever see valid amounts.

use core::fmt;
use core::iter::Sum;
use core::ops::Add;
use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors that can occur when building a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The amount is below zero.
    #[error("price cannot be negative (got {0})")]
    Negative(Decimal),
    /// The input is not a decimal number.
    #[error("'{0}' is not a valid price")]
    Invalid(String),
}

/// A non-negative price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "PriceRepr", into = "PriceRepr")]
pub struct Price {
    amount: Decimal,
    currency_code: CurrencyCode,
}

/// Wire form of [`Price`]; validated on the way in.
#[derive(Serialize, Deserialize)]
struct PriceRepr {
    #[serde(with = "rust_decimal::serde::float")]
    amount: Decimal,
    #[serde(default)]
    currency_code: CurrencyCode,
}

impl TryFrom<PriceRepr> for Price {
    type Error = PriceError;

    fn try_from(repr: PriceRepr) -> Result<Self, Self::Error> {
        Self::new(repr.amount, repr.currency_code)
    }
}

impl From<Price> for PriceRepr {
    fn from(price: Price) -> Self {
        Self {
            amount: price.amount,
            currency_code: price.currency_code,
        }
    }
}

impl Price {
    /// Create a new price.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] if `amount` is below zero.
    pub fn new(amount: Decimal, currency_code: CurrencyCode) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative(amount));
        }
        Ok(Self {
            amount,
            currency_code,
        })
    }

    /// Whole-unit price in the default currency, for static catalog data.
    #[must_use]
    pub fn whole(units: u32) -> Self {
        Self {
            amount: Decimal::from(units),
            currency_code: CurrencyCode::default(),
        }
    }

    /// A zero price in the default currency.
    #[must_use]
    pub const fn zero() -> Self {
        Self {
            amount: Decimal::ZERO,
            currency_code: CurrencyCode::USD,
        }
    }

    /// The amount in the currency's standard unit (dollars, not cents).
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.amount
    }

    #[must_use]
    pub const fn currency_code(&self) -> CurrencyCode {
        self.currency_code
    }

    /// Price of `quantity` units, saturating at `Decimal::MAX`.
    #[must_use]
    pub fn times(&self, quantity: u32) -> Self {
        Self {
            amount: self
                .amount
                .checked_mul(Decimal::from(quantity))
                .unwrap_or(Decimal::MAX),
            currency_code: self.currency_code,
        }
    }

    /// Format for display (e.g., "$280.00").
    #[must_use]
    pub fn display(&self) -> String {
        format!("{}{:.2}", self.currency_code.symbol(), self.amount)
    }
}

impl Default for Price {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

impl FromStr for Price {
    type Err = PriceError;

    /// Parse a spreadsheet cell such as `"280"`, `" 350.50 "` or `"$420"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed.strip_prefix('$').unwrap_or(trimmed).trim();
        let amount =
            Decimal::from_str(digits).map_err(|_| PriceError::Invalid(s.to_string()))?;
        Self::new(amount, CurrencyCode::default())
    }
}

impl Add for Price {
    type Output = Self;

    /// Adds amounts, saturating at `Decimal::MAX`; the left-hand currency
    /// wins (catalogs are single-currency).
    fn add(self, rhs: Self) -> Self {
        Self {
            amount: self
                .amount
                .checked_add(rhs.amount)
                .unwrap_or(Decimal::MAX),
            currency_code: self.currency_code,
        }
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), Add::add)
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    USD,
    THB,
}

impl CurrencyCode {
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::USD => "$",
            Self::THB => "฿",
        }
    }
}
