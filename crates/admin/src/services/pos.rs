//! Point-of-sale session: cart, coupon, customer selection and order
//! submission.

use signshop_core::customer::search_customers;
use signshop_core::{
    Amount, CouponState, Customer, CustomerId, LineItem, NewCustomer, OrderId, OrderOptions,
    OrderRequest, OrderTotals, ProductId, ValidationError,
};
use tracing::instrument;

use crate::api::ApiClient;
use crate::credentials::Credentials;
use crate::error::AppError;

/// What the backend and the counter agreed on for a saved order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderReceipt {
    pub order_id: OrderId,
    pub totals: OrderTotals,
    /// Gross total minus the advance.
    pub amount_due: Amount,
}

/// The POS screen's state for one order.
#[derive(Debug, Clone)]
pub struct PosSession {
    client: ApiClient,
    items: Vec<LineItem>,
    coupon: CouponState,
    customers: Vec<Customer>,
    customer: Option<Customer>,
}

impl PosSession {
    #[must_use]
    pub const fn new(client: ApiClient) -> Self {
        Self {
            client,
            items: Vec::new(),
            coupon: CouponState::NotApplied,
            customers: Vec::new(),
            customer: None,
        }
    }

    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    #[must_use]
    pub const fn coupon(&self) -> &CouponState {
        &self.coupon
    }

    #[must_use]
    pub const fn customer(&self) -> Option<&Customer> {
        self.customer.as_ref()
    }

    /// Add a line, or replace the existing line for the same product.
    pub fn upsert_item(&mut self, item: LineItem) {
        match self
            .items
            .iter_mut()
            .find(|i| i.product_id == item.product_id)
        {
            Some(existing) => *existing = item,
            None => self.items.push(item),
        }
    }

    /// Remove the line for `product_id`; returns whether one was removed.
    pub fn remove_item(&mut self, product_id: ProductId) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i.product_id != product_id);
        self.items.len() != before
    }

    /// Totals with the current coupon discount applied.
    #[must_use]
    pub fn totals(&self) -> OrderTotals {
        OrderTotals::compute(&self.items, self.coupon.discount())
    }

    /// Look up and apply a coupon code.
    ///
    /// Never fails: a blank code, a failed lookup or a coupon without a
    /// discount all end as [`CouponState::Rejected`] with the message to show.
    #[instrument(skip(self))]
    pub async fn apply_coupon(&mut self, code: &str) -> &CouponState {
        self.coupon = match CouponState::check_code(code) {
            Err(rejected) => rejected,
            Ok(code) => match self.client.lookup_coupon(code).await {
                Ok(quote) => CouponState::from_lookup(Some(quote)),
                Err(e) => {
                    tracing::warn!(error = %e, "Coupon lookup failed");
                    CouponState::from_lookup(None)
                }
            },
        };

        if let CouponState::Applied { discount, .. } = &self.coupon {
            tracing::info!(discount = %discount, "Coupon applied");
        }
        &self.coupon
    }

    /// Drop the applied coupon.
    pub fn clear_coupon(&mut self) {
        self.coupon = CouponState::NotApplied;
    }

    /// Customers loaded by [`PosSession::load_customers`].
    #[must_use]
    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    /// Fetch the customer list used by search and selection.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Api`] if the backend call fails; the previous list
    /// is kept.
    #[instrument(skip_all)]
    pub async fn load_customers(&mut self, credentials: &Credentials) -> Result<usize, AppError> {
        self.customers = self.client.list_customers(credentials).await?;
        Ok(self.customers.len())
    }

    /// Loaded customers matching a name or phone fragment.
    #[must_use]
    pub fn search_customers(&self, query: &str) -> Vec<&Customer> {
        search_customers(&self.customers, query)
    }

    /// Select a loaded customer for the order.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnknownCustomer`] if `id` is not in the
    /// loaded list. The current selection is kept.
    pub fn select_customer(&mut self, id: CustomerId) -> Result<&Customer, AppError> {
        let customer = self
            .customers
            .iter()
            .find(|c| c.customer_id == id)
            .cloned()
            .ok_or(ValidationError::UnknownCustomer(id))?;
        Ok(self.customer.insert(customer))
    }

    pub fn unselect_customer(&mut self) {
        self.customer = None;
    }

    /// Create a customer from the quick-add form and select it.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] without calling the backend if name
    /// or phone is missing or malformed, or [`AppError::Api`] if the backend
    /// call fails.
    #[instrument(skip(self, phone, credentials))]
    pub async fn quick_add_customer(
        &mut self,
        name: &str,
        phone: &str,
        credentials: &Credentials,
    ) -> Result<&Customer, AppError> {
        let new_customer = NewCustomer::new(name, phone)?;
        let customer = self
            .client
            .quick_add_customer(&new_customer, credentials)
            .await?;
        self.customers.push(customer.clone());
        Ok(self.customer.insert(customer))
    }

    /// Amount still owed after an advance payment.
    #[must_use]
    pub fn amount_due(&self, advance: Amount) -> Amount {
        self.totals().gross_total.saturating_sub(advance)
    }

    /// Save the order for the selected customer.
    ///
    /// On success the cart, coupon and customer selection are cleared for
    /// the next order. On failure nothing changes.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] without calling the backend if no
    /// customer is selected, the cart is empty or a courier delivery has no
    /// courier, or [`AppError::Api`] if the backend call fails.
    #[instrument(skip_all, fields(items = self.items.len()))]
    pub async fn place_order(
        &mut self,
        options: &OrderOptions,
        credentials: &Credentials,
    ) -> Result<OrderReceipt, AppError> {
        let totals = self.totals();
        let coupon_id = match &self.coupon {
            CouponState::Applied { coupon, .. } => Some(coupon.coupon_id),
            CouponState::NotApplied | CouponState::Rejected { .. } => None,
        };
        let order = OrderRequest::build(
            self.customer.as_ref(),
            &self.items,
            coupon_id,
            &totals,
            options,
        )?;

        let order_id = self.client.create_order(&order, credentials).await?;
        let receipt = OrderReceipt {
            order_id,
            totals,
            amount_due: self.amount_due(options.advance),
        };

        self.items.clear();
        self.coupon = CouponState::NotApplied;
        self.customer = None;
        Ok(receipt)
    }
}
