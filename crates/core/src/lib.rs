//! Sign-shop core: the product editor's domain model.
//!
//! This crate holds everything the admin tools compute locally:
//! - [`variation`] - variations, variation items and cross-product variant
//!   generation
//! - [`product`] - the product form and its message-driven reducer
//! - [`codec`] - conversion between backend product records and the form
//! - [`category`] - the two-level category picker
//! - [`pos`] - POS line totals, tiered pricing and coupon outcomes
//! - [`order`] - the POS order body
//! - [`customer`] - customer records, search and quick-add validation
//! - [`types`] - typed ids, non-negative amounts, phone numbers and option
//!   enums
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O and no HTTP
//! clients. Every edit takes the current state by reference and returns a new
//! state or an [`EditError`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod category;
pub mod codec;
pub mod customer;
pub mod error;
pub mod order;
pub mod pos;
pub mod product;
pub mod types;
pub mod variation;

pub use category::{Category, CategorySelection};
pub use codec::{ProductPayload, ProductRecord};
pub use customer::{Customer, NewCustomer};
pub use error::{Collection, EditError, ValidationError};
pub use order::{OrderOptions, OrderRef, OrderRequest};
pub use pos::{
    CouponQuote, CouponState, LineItem, Measure, OrderTotals, PriceQuote, TieredPricing,
};
pub use product::{
    Attribute, AttributeField, AttributeRow, BasicField, BasicInfo, ProductForm, ProductImage,
    ProductMessage,
};
pub use types::*;
pub use variation::{Variant, VariantDetail, Variation, VariationField, VariationItem};
