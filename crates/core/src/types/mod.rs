//! Core value types for the sign-shop admin.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod amount;
pub mod id;
pub mod phone;
pub mod status;

pub use amount::{Amount, AmountError};
pub use id::*;
pub use phone::{Phone, PhoneError};
pub use status::*;
