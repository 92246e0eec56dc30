//! Customer endpoints.

use signshop_core::{Customer, NewCustomer};
use tracing::instrument;

use super::{ApiClient, ApiError, CustomerData, CustomersData};
use crate::credentials::Credentials;

impl ApiClient {
    /// List every customer (`GET /api/customer`).
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport failure, non-success status or an
    /// undecodable body.
    #[instrument(skip_all)]
    pub async fn list_customers(
        &self,
        credentials: &Credentials,
    ) -> Result<Vec<Customer>, ApiError> {
        let url = self.endpoint("api/customer")?;
        let data: CustomersData = self.get(url, Some(credentials)).await?;
        tracing::debug!(count = data.customers.len(), "Fetched customers");
        Ok(data.customers)
    }

    /// Create a customer from the POS quick-add form (`POST /api/quick-add`).
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport failure, non-success status or an
    /// undecodable body.
    #[instrument(skip(self, customer, credentials))]
    pub async fn quick_add_customer(
        &self,
        customer: &NewCustomer,
        credentials: &Credentials,
    ) -> Result<Customer, ApiError> {
        let url = self.endpoint("api/quick-add")?;
        let data: CustomerData = self.post(url, customer, credentials).await?;
        tracing::info!(customer_id = %data.customer.customer_id, "Customer added");
        Ok(data.customer)
    }
}
