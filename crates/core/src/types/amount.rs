//! Non-negative monetary amounts using decimal arithmetic.
//!
//! All prices handled by the admin (base prices, variant surcharges, POS
//! totals, coupon discounts) are [`Amount`]s. They are stored as
//! [`Decimal`] to avoid float drift and are serialized as plain JSON numbers,
//! which is what the backend expects. On input both numbers and numeric
//! strings are accepted, since the backend returns `DECIMAL` columns as
//! strings.

use core::fmt;
use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Errors that can occur when parsing an [`Amount`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AmountError {
    /// The input string is empty or whitespace.
    #[error("amount cannot be empty")]
    Empty,
    /// The input is not a decimal number.
    #[error("{0:?} is not a number")]
    NotANumber(String),
    /// The input is a number below zero.
    #[error("amount must not be negative (got {0})")]
    Negative(Decimal),
}

/// A non-negative monetary amount.
///
/// ## Examples
///
/// ```
/// use signshop_core::Amount;
///
/// assert!(Amount::parse("12.50").is_ok());
/// assert!(Amount::parse("0").is_ok());
///
/// assert!(Amount::parse("").is_err());
/// assert!(Amount::parse("-5").is_err());
/// assert!(Amount::parse("NaN").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount(Decimal);

impl Amount {
    /// The zero amount.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// The largest representable amount. Sums and products clamp here.
    pub const MAX: Self = Self(Decimal::MAX);

    /// Parse an `Amount` from user input.
    ///
    /// Surrounding whitespace is ignored. Scientific notation is accepted
    /// (`"1e2"`), non-finite values are not.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, not a number, or negative.
    pub fn parse(s: &str) -> Result<Self, AmountError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(AmountError::Empty);
        }

        let value = Decimal::from_str(trimmed)
            .or_else(|_| Decimal::from_scientific(trimmed))
            .map_err(|_| AmountError::NotANumber(trimmed.to_owned()))?;

        Self::new(value)
    }

    /// Wrap a decimal, rejecting negative values.
    ///
    /// # Errors
    ///
    /// Returns [`AmountError::Negative`] if `value < 0`.
    pub fn new(value: Decimal) -> Result<Self, AmountError> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(AmountError::Negative(value));
        }
        // Normalise -0 to 0.
        Ok(Self(value.abs()))
    }

    /// Build an amount from whole units, e.g. `Amount::from_units(150)`.
    #[must_use]
    pub fn from_units(units: u32) -> Self {
        Self(Decimal::from(units))
    }

    /// Get the underlying decimal value.
    #[must_use]
    pub const fn value(&self) -> Decimal {
        self.0
    }

    /// Returns `true` for the zero amount.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Subtract, clamping at zero.
    #[must_use]
    pub fn saturating_sub(self, other: Self) -> Self {
        if other.0 >= self.0 {
            Self::ZERO
        } else {
            Self(self.0 - other.0)
        }
    }

    /// Format for the POS screens, e.g. `"1250.00 Tk"`.
    #[must_use]
    pub fn display_taka(&self) -> String {
        format!("{:.2} Tk", self.0)
    }
}

/// Saturates at [`Amount::MAX`].
impl core::ops::Add for Amount {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

/// Saturates at [`Amount::MAX`].
impl core::ops::Mul for Amount {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_mul(rhs.0))
    }
}

impl core::iter::Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, a| acc + a)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = AmountError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        rust_decimal::serde::float::serialize(&self.0.normalize(), serializer)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Decimal's own impl accepts both JSON numbers and numeric strings.
        let value = <Decimal as Deserialize>::deserialize(deserializer)?;
        Self::new(value).map_err(serde::de::Error::custom)
    }
}
