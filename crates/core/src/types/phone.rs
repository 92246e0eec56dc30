//! Phone number type for POS customers.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Phone`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PhoneError {
    /// The input string is empty.
    #[error("phone cannot be empty")]
    Empty,
    /// The input has too few or too many characters.
    #[error("phone must be between {min} and {max} characters")]
    BadLength {
        /// Minimum allowed length.
        min: usize,
        /// Maximum allowed length.
        max: usize,
    },
    /// The input contains something other than digits, spaces, dashes or a
    /// leading `+`.
    #[error("phone contains invalid character {0:?}")]
    InvalidCharacter(char),
}

/// A customer phone number as typed at the counter.
///
/// ## Constraints
///
/// - Surrounding whitespace is trimmed
/// - Length: 6-20 characters after trimming
/// - Digits, spaces and dashes, with an optional leading `+`
///
/// ## Examples
///
/// ```
/// use signshop_core::Phone;
///
/// assert!(Phone::parse("01711-223344").is_ok());
/// assert!(Phone::parse("+880 1711 223344").is_ok());
///
/// assert!(Phone::parse("").is_err());
/// assert!(Phone::parse("call me").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Phone(String);

impl Phone {
    /// Minimum length of a phone number.
    pub const MIN_LENGTH: usize = 6;
    /// Maximum length of a phone number.
    pub const MAX_LENGTH: usize = 20;

    /// Parse a `Phone` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the trimmed input is empty, outside the allowed
    /// length, or contains characters other than digits, spaces, dashes and
    /// a leading `+`.
    pub fn parse(s: &str) -> Result<Self, PhoneError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(PhoneError::Empty);
        }

        let len = trimmed.chars().count();
        if !(Self::MIN_LENGTH..=Self::MAX_LENGTH).contains(&len) {
            return Err(PhoneError::BadLength {
                min: Self::MIN_LENGTH,
                max: Self::MAX_LENGTH,
            });
        }

        for (i, c) in trimmed.chars().enumerate() {
            let allowed = c.is_ascii_digit() || c == ' ' || c == '-' || (c == '+' && i == 0);
            if !allowed {
                return Err(PhoneError::InvalidCharacter(c));
            }
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the phone number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns only the digits, e.g. for matching against stored customers.
    #[must_use]
    pub fn digits(&self) -> String {
        digits(&self.0)
    }
}

/// The ASCII digits of `s`, in order.
pub(crate) fn digits(s: &str) -> String {
    s.chars().filter(char::is_ascii_digit).collect()
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Phone {
    type Err = PhoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Phone {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
