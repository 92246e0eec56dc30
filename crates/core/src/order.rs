//! POS order submission.
//!
//! [`OrderRequest::build`] turns the selected customer, the cart and the
//! counter options into the body of `POST /api/order/create`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::customer::Customer;
use crate::error::ValidationError;
use crate::pos::{LineItem, OrderTotals};
use crate::types::{
    Amount, CouponId, CourierId, CustomerId, DeliveryMethod, OrderId, PaymentMethod,
    PaymentStatus, ProductId, ProductVariantId,
};

/// Status of every order created at the counter.
pub const ORDER_REQUEST_RECEIVED: &str = "order-request-received";

/// Courier address sent when none applies.
const NO_ADDRESS: &str = "N/A";

/// Choices made on the POS screen before saving the order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderOptions {
    pub payment_method: PaymentMethod,
    pub delivery_method: DeliveryMethod,
    /// Required when `delivery_method` is [`DeliveryMethod::Courier`].
    pub courier_id: Option<CourierId>,
    pub courier_address: Option<String>,
    pub additional_notes: String,
    pub delivery_date: NaiveDate,
    /// Amount received at the counter. Decides the payment status.
    pub advance: Amount,
}

impl OrderOptions {
    /// Cash at the counter, picked up from the shop, nothing paid yet.
    #[must_use]
    pub fn counter(delivery_date: NaiveDate) -> Self {
        Self {
            payment_method: PaymentMethod::default(),
            delivery_method: DeliveryMethod::default(),
            courier_id: None,
            courier_address: None,
            additional_notes: String::new(),
            delivery_date,
            advance: Amount::ZERO,
        }
    }
}

/// One cart line as the order endpoint expects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemRequest {
    pub product_id: ProductId,
    pub product_variant_id: Option<ProductVariantId>,
    pub quantity: u32,
    pub width_inch: Option<Amount>,
    pub height_inch: Option<Amount>,
    /// Unit price charged at the counter.
    pub price: Amount,
}

impl From<&LineItem> for OrderItemRequest {
    fn from(item: &LineItem) -> Self {
        Self {
            product_id: item.product_id,
            product_variant_id: item.product_variant_id,
            quantity: item.quantity,
            width_inch: item.width_inch,
            height_inch: item.height_inch,
            price: item.unit_price,
        }
    }
}

/// Body of `POST /api/order/create`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub customer_id: CustomerId,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub billing_address: String,
    /// `"online"` or `"offline"`, derived from the payment method.
    pub method: &'static str,
    pub status: &'static str,
    pub current_status: &'static str,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub delivery_method: DeliveryMethod,
    pub delivery_date: NaiveDate,
    pub courier_id: Option<CourierId>,
    pub courier_address: String,
    pub additional_notes: String,
    pub coupon_id: Option<CouponId>,
    pub order_items: Vec<OrderItemRequest>,
}

impl OrderRequest {
    /// Assemble the order body.
    ///
    /// The payment status follows the advance: nothing paid is
    /// [`PaymentStatus::Pending`], less than the gross total is
    /// [`PaymentStatus::Partial`], the whole gross total is
    /// [`PaymentStatus::Paid`].
    ///
    /// # Errors
    ///
    /// [`ValidationError::NoCustomerSelected`] without a customer,
    /// [`ValidationError::EmptyCart`] without items and
    /// [`ValidationError::MissingCourier`] for courier delivery without a
    /// courier.
    pub fn build(
        customer: Option<&Customer>,
        items: &[LineItem],
        coupon_id: Option<CouponId>,
        totals: &OrderTotals,
        options: &OrderOptions,
    ) -> Result<Self, ValidationError> {
        let customer = customer.ok_or(ValidationError::NoCustomerSelected)?;
        if items.is_empty() {
            return Err(ValidationError::EmptyCart);
        }

        let courier = options.delivery_method == DeliveryMethod::Courier;
        let courier_id = if courier {
            Some(options.courier_id.ok_or(ValidationError::MissingCourier)?)
        } else {
            None
        };
        let courier_address = options
            .courier_address
            .as_deref()
            .map(str::trim)
            .filter(|a| courier && !a.is_empty())
            .unwrap_or(NO_ADDRESS)
            .to_owned();

        Ok(Self {
            customer_id: customer.customer_id,
            customer_name: customer.name.clone(),
            customer_email: customer.email.clone().unwrap_or_default(),
            customer_phone: customer.phone.clone(),
            billing_address: customer
                .billing_address
                .clone()
                .unwrap_or_else(|| NO_ADDRESS.to_owned()),
            method: options.payment_method.channel(),
            status: ORDER_REQUEST_RECEIVED,
            current_status: ORDER_REQUEST_RECEIVED,
            payment_method: options.payment_method,
            payment_status: PaymentStatus::for_advance(totals.gross_total, options.advance),
            delivery_method: options.delivery_method,
            delivery_date: options.delivery_date,
            courier_id,
            courier_address,
            additional_notes: options.additional_notes.trim().to_owned(),
            coupon_id,
            order_items: items.iter().map(OrderItemRequest::from).collect(),
        })
    }
}

/// The order reference returned by `POST /api/order/create`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRef {
    pub order_id: OrderId,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::types::PricingType;

    fn customer() -> Customer {
        Customer {
            customer_id: CustomerId::new(12),
            name: "Karim".to_owned(),
            phone: "01811000000".to_owned(),
            email: None,
            billing_address: None,
        }
    }

    fn line() -> LineItem {
        LineItem {
            product_id: ProductId::new(7),
            product_variant_id: Some(ProductVariantId::new(70)),
            quantity: 2,
            unit_price: Amount::from_units(35),
            pricing_type: PricingType::SquareFeet,
            width_inch: Some(Amount::from_units(3)),
            height_inch: Some(Amount::from_units(6)),
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 7, 2).unwrap()
    }

    fn build(options: &OrderOptions) -> Result<OrderRequest, ValidationError> {
        let items = [line()];
        let totals = OrderTotals::compute(&items, Amount::ZERO);
        OrderRequest::build(Some(&customer()), &items, None, &totals, options)
    }

    #[test]
    fn test_counter_order_body() {
        let order = build(&OrderOptions::counter(date())).unwrap();
        let body = serde_json::to_value(&order).unwrap();

        assert_eq!(body["customerId"], 12);
        assert_eq!(body["customerEmail"], "");
        assert_eq!(body["billingAddress"], "N/A");
        assert_eq!(body["method"], "offline");
        assert_eq!(body["status"], "order-request-received");
        assert_eq!(body["paymentMethod"], "cod-payment");
        assert_eq!(body["paymentStatus"], "pending");
        assert_eq!(body["deliveryMethod"], "shop-pickup");
        assert_eq!(body["deliveryDate"], "2025-07-02");
        assert_eq!(body["courierId"], json!(null));
        assert_eq!(body["courierAddress"], "N/A");
        assert_eq!(body["couponId"], json!(null));
        assert_eq!(
            body["orderItems"],
            json!([{
                "productId": 7,
                "productVariantId": 70,
                "quantity": 2,
                "widthInch": 3.0,
                "heightInch": 6.0,
                "price": 35.0
            }])
        );
    }

    #[test]
    fn test_payment_status_follows_advance() {
        // Gross total is 3 * 6 * 35 * 2 = 1260.
        let mut options = OrderOptions::counter(date());
        options.advance = Amount::from_units(500);
        assert_eq!(build(&options).unwrap().payment_status, PaymentStatus::Partial);

        options.advance = Amount::from_units(1260);
        assert_eq!(build(&options).unwrap().payment_status, PaymentStatus::Paid);
    }

    #[test]
    fn test_courier_needs_courier() {
        let mut options = OrderOptions::counter(date());
        options.delivery_method = DeliveryMethod::Courier;
        assert_eq!(build(&options).unwrap_err(), ValidationError::MissingCourier);

        options.courier_id = Some(CourierId::new(3));
        options.courier_address = Some("  House 4, Road 2, Dhaka ".to_owned());
        let order = build(&options).unwrap();
        assert_eq!(order.courier_id, Some(CourierId::new(3)));
        assert_eq!(order.courier_address, "House 4, Road 2, Dhaka");
    }

    #[test]
    fn test_requires_customer_and_items() {
        let options = OrderOptions::counter(date());
        let totals = OrderTotals::default();
        assert_eq!(
            OrderRequest::build(None, &[line()], None, &totals, &options).unwrap_err(),
            ValidationError::NoCustomerSelected
        );
        assert_eq!(
            OrderRequest::build(Some(&customer()), &[], None, &totals, &options).unwrap_err(),
            ValidationError::EmptyCart
        );
    }
}
