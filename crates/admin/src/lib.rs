//! Sign-shop admin library.
//!
//! Talks to the sign-shop backend on behalf of the admin tools:
//! - [`api`] - typed HTTP client for products, categories, coupons,
//!   customers and orders
//! - [`services`] - product edit sessions and the POS session built on the
//!   core reducer
//! - [`config`] - environment-based configuration
//! - [`credentials`] - the bearer token passed to authenticated calls
//! - [`alert`] / [`error`] - how failures reach the operator
//!
//! # Security
//!
//! Authenticated calls take a [`Credentials`] argument; nothing in this crate
//! keeps a token in global state.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod alert;
pub mod api;
pub mod config;
pub mod credentials;
pub mod error;
pub mod services;

pub use alert::{Alert, AlertLevel};
pub use api::{ApiClient, ApiError};
pub use config::{AdminConfig, ConfigError};
pub use credentials::Credentials;
pub use error::AppError;
pub use services::{OrderReceipt, PosSession, ProductEditor};
