//! POS commands: customers, coupons and orders.

use std::path::Path;

use serde_json::json;
use signshop_admin::{AdminConfig, ApiClient, PosSession};
use signshop_core::{CouponState, CustomerId, LineItem, OrderOptions};
use tracing::info;

use super::{print_json, read_json};

/// Quick-add a customer.
///
/// # Errors
///
/// Returns an error if configuration is incomplete, the input is invalid or
/// the backend rejects the request.
pub async fn add_customer(name: &str, phone: &str) -> Result<(), Box<dyn std::error::Error>> {
    let config = AdminConfig::from_env()?;
    let credentials = config.require_credentials()?;
    let mut session = PosSession::new(ApiClient::new(&config)?);

    match session.quick_add_customer(name, phone, &credentials).await {
        Ok(customer) => {
            info!(customer_id = %customer.customer_id, "Customer added");
            print_json(customer)
        }
        Err(e) => Err(e.alert().to_string().into()),
    }
}

/// Look up a coupon and report the discount it gives.
///
/// # Errors
///
/// Returns an error if configuration is incomplete or the coupon is rejected.
pub async fn check_coupon(code: &str) -> Result<(), Box<dyn std::error::Error>> {
    let config = AdminConfig::from_env()?;
    let mut session = PosSession::new(ApiClient::new(&config)?);

    match session.apply_coupon(code).await {
        CouponState::Applied { coupon, discount } => {
            info!(code = %coupon.code, discount = %discount.display_taka(), "Coupon applied");
            Ok(())
        }
        CouponState::Rejected { message } => Err(message.clone().into()),
        CouponState::NotApplied => Ok(()),
    }
}

/// Print customers whose name or phone matches `query`.
///
/// # Errors
///
/// Returns an error if configuration is incomplete or the list cannot be
/// loaded.
pub async fn search_customers(query: &str) -> Result<(), Box<dyn std::error::Error>> {
    let config = AdminConfig::from_env()?;
    let credentials = config.require_credentials()?;
    let mut session = PosSession::new(ApiClient::new(&config)?);

    session
        .load_customers(&credentials)
        .await
        .map_err(|e| e.alert().to_string())?;
    let found = session.search_customers(query);
    info!(matches = found.len(), total = session.customers().len(), "Customer search");
    print_json(&found)
}

/// Place an order for a stored customer from a JSON array of cart lines.
///
/// # Errors
///
/// Returns an error if the cart file cannot be read, the customer is unknown,
/// the coupon is rejected or the backend refuses the order.
pub async fn place_order(
    customer: CustomerId,
    items_file: &Path,
    coupon: Option<&str>,
    options: &OrderOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let items: Vec<LineItem> = read_json(items_file).await?;

    let config = AdminConfig::from_env()?;
    let credentials = config.require_credentials()?;
    let mut session = PosSession::new(ApiClient::new(&config)?);

    for item in items {
        session.upsert_item(item);
    }
    session
        .load_customers(&credentials)
        .await
        .map_err(|e| e.alert().to_string())?;
    session
        .select_customer(customer)
        .map_err(|e| e.alert().to_string())?;

    if let Some(code) = coupon {
        if let CouponState::Rejected { message } = session.apply_coupon(code).await {
            return Err(message.clone().into());
        }
    }

    let receipt = session
        .place_order(options, &credentials)
        .await
        .map_err(|e| e.alert().to_string())?;
    info!(order_id = %receipt.order_id, "Order placed");
    print_json(&json!({
        "orderId": receipt.order_id,
        "subTotal": receipt.totals.sub_total,
        "couponDiscount": receipt.totals.coupon_discount,
        "grossTotal": receipt.totals.gross_total,
        "amountDue": receipt.amount_due,
    }))
}
