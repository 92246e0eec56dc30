//! Category endpoint.

use signshop_core::Category;
use tracing::instrument;

use super::{ApiClient, ApiError, CategoriesData};

impl ApiClient {
    /// Fetch all product categories (`GET /api/product-category`).
    ///
    /// Public endpoint; no credentials are sent.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport failure, non-success status or an
    /// undecodable body.
    #[instrument(skip(self))]
    pub async fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
        let url = self.endpoint("api/product-category")?;
        let data: CategoriesData = self.get(url, None).await?;
        tracing::debug!(count = data.categories.len(), "Fetched categories");
        Ok(data.categories)
    }
}
