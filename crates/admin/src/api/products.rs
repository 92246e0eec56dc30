//! Product endpoints.

use signshop_core::{ProductId, ProductPayload, ProductRecord};
use tracing::instrument;

use super::{ApiClient, ApiError, ApiMessage, ProductData};
use crate::credentials::Credentials;

impl ApiClient {
    /// Fetch a product (`GET /api/product/{id}`).
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport failure, non-success status or an
    /// undecodable body.
    #[instrument(skip_all, fields(product_id = %id))]
    pub async fn get_product(
        &self,
        id: ProductId,
        credentials: &Credentials,
    ) -> Result<ProductRecord, ApiError> {
        let url = self.endpoint(&format!("api/product/{id}"))?;
        let data: ProductData = self.get(url, Some(credentials)).await?;
        tracing::debug!(
            variations = data.product.variations.len(),
            variants = data.product.variants.len(),
            "Fetched product"
        );
        Ok(data.product)
    }

    /// Save a product (`PUT /api/product/{id}`).
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport failure or non-success status.
    #[instrument(skip_all, fields(product_id = %id))]
    pub async fn update_product(
        &self,
        id: ProductId,
        payload: &ProductPayload,
        credentials: &Credentials,
    ) -> Result<ApiMessage, ApiError> {
        let url = self.endpoint(&format!("api/product/{id}"))?;
        let message = self.put(url, payload, credentials).await?;
        tracing::info!(variants = payload.variants.len(), "Product updated");
        Ok(message)
    }
}
