//! Response envelopes for the sign-shop backend.

use serde::Deserialize;
use signshop_core::{Category, Customer, OrderRef, ProductRecord};

/// `{ "data": ... }` wrapper around every successful response.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    pub data: T,
}

/// Informational body of write endpoints and error responses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ApiMessage {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProductData {
    pub product: ProductRecord,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CategoriesData {
    #[serde(default)]
    pub categories: Vec<Category>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CustomerData {
    pub customer: Customer,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CustomersData {
    #[serde(default)]
    pub customers: Vec<Customer>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OrderData {
    pub order: OrderRef,
}
