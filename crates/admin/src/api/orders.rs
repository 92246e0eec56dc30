//! Order endpoints.

use signshop_core::{OrderId, OrderRequest};
use tracing::instrument;

use super::{ApiClient, ApiError, OrderData};
use crate::credentials::Credentials;

impl ApiClient {
    /// Create an order from the POS screen (`POST /api/order/create`).
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport failure, non-success status or an
    /// undecodable body.
    #[instrument(skip_all, fields(customer_id = %order.customer_id, items = order.order_items.len()))]
    pub async fn create_order(
        &self,
        order: &OrderRequest,
        credentials: &Credentials,
    ) -> Result<OrderId, ApiError> {
        let url = self.endpoint("api/order/create")?;
        let data: OrderData = self.post(url, order, credentials).await?;
        tracing::info!(order_id = %data.order.order_id, "Order created");
        Ok(data.order.order_id)
    }
}
