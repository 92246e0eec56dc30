//! Coupon lookup.

use signshop_core::CouponQuote;
use tracing::instrument;

use super::{ApiClient, ApiError};

impl ApiClient {
    /// Look up a coupon (`GET /api/coupon?code=...`).
    ///
    /// Public endpoint; no credentials are sent.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport failure, non-success status (an
    /// unknown code is typically a 404) or an undecodable body.
    #[instrument(skip(self))]
    pub async fn lookup_coupon(&self, code: &str) -> Result<CouponQuote, ApiError> {
        let mut url = self.endpoint("api/coupon")?;
        url.query_pairs_mut().append_pair("code", code);
        self.get(url, None).await
    }
}
