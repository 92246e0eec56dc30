//! Point-of-sale arithmetic: line totals, order totals, tiered pricing and
//! coupon outcomes.
//!
//! All amounts are [`Amount`]s, so totals can never go negative.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::product::BasicInfo;
use crate::types::{Amount, CouponId, PricingType, ProductId, ProductVariantId};

/// Shown when "Apply Coupon" is pressed with an empty code.
pub const BLANK_COUPON_MESSAGE: &str = "Please enter a coupon code.";

/// Shown when the coupon lookup fails or yields no discount.
pub const INVALID_COUPON_MESSAGE: &str = "Invalid or expired coupon.";

const SQUARE_INCHES_PER_SQUARE_FOOT: Decimal = Decimal::from_parts(144, 0, 0, false, 0);
const INCHES_PER_FOOT: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

// =============================================================================
// Cart
// =============================================================================

/// One product in the POS cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub product_id: ProductId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_variant_id: Option<ProductVariantId>,
    pub quantity: u32,
    /// Price per unit, or per square foot for `square-feet` products.
    pub unit_price: Amount,
    #[serde(default)]
    pub pricing_type: PricingType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width_inch: Option<Amount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height_inch: Option<Amount>,
}

impl LineItem {
    /// Price of this line.
    ///
    /// Square-feet lines multiply the entered width and height; a missing or
    /// zero dimension makes the line total zero.
    #[must_use]
    pub fn total(&self) -> Amount {
        let quantity = Amount::from_units(self.quantity);
        match self.pricing_type {
            PricingType::Flat => self.unit_price * quantity,
            PricingType::SquareFeet => match (self.width_inch, self.height_inch) {
                (Some(w), Some(h)) if !w.is_zero() && !h.is_zero() => {
                    w * h * self.unit_price * quantity
                }
                _ => Amount::ZERO,
            },
        }
    }
}

/// Totals shown under the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderTotals {
    pub sub_total: Amount,
    pub coupon_discount: Amount,
    /// `sub_total - coupon_discount`, never below zero.
    pub gross_total: Amount,
}

impl OrderTotals {
    #[must_use]
    pub fn compute(items: &[LineItem], coupon_discount: Amount) -> Self {
        let sub_total: Amount = items.iter().map(LineItem::total).sum();
        Self {
            sub_total,
            coupon_discount,
            gross_total: sub_total.saturating_sub(coupon_discount),
        }
    }
}

// =============================================================================
// Tiered pricing
// =============================================================================

/// What the customer is ordering: a count or a printed area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Measure {
    Quantity(u32),
    /// Width and height, each as feet plus inches.
    Area {
        width_feet: Amount,
        width_inches: Amount,
        height_feet: Amount,
        height_inches: Amount,
    },
}

impl Measure {
    /// Quantity, or area in square feet.
    #[must_use]
    pub fn units(&self) -> Decimal {
        match *self {
            Self::Quantity(q) => Decimal::from(q),
            Self::Area {
                width_feet,
                width_inches,
                height_feet,
                height_inches,
            } => {
                let width = width_feet.value().saturating_mul(INCHES_PER_FOOT);
                let width = width.saturating_add(width_inches.value());
                let height = height_feet.value().saturating_mul(INCHES_PER_FOOT);
                let height = height.saturating_add(height_inches.value());
                width.saturating_mul(height) / SQUARE_INCHES_PER_SQUARE_FOOT
            }
        }
    }
}

/// A product's pricing rule: base price plus a linear volume discount.
///
/// Below `discount_start` there is no discount. Between `discount_start` and
/// `discount_end` the discount grows linearly up to
/// `max_discount_percentage`, and stays there above `discount_end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TieredPricing {
    pub base_price: Amount,
    pub discount_start: Decimal,
    pub discount_end: Decimal,
    pub max_discount_percentage: Decimal,
}

impl From<&BasicInfo> for TieredPricing {
    fn from(basic: &BasicInfo) -> Self {
        Self {
            base_price: basic.base_price,
            discount_start: basic.discount_start.map_or(Decimal::ZERO, |a| a.value()),
            discount_end: basic.discount_end.map_or(Decimal::ZERO, |a| a.value()),
            max_discount_percentage: basic.max_discount_percentage.unwrap_or_default(),
        }
    }
}

/// Result of [`TieredPricing::quote`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceQuote {
    /// Quantity or square feet.
    #[serde(with = "rust_decimal::serde::float")]
    pub units: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub price_before_discount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub discount_percentage: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub discount_amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub final_price: Decimal,
}

impl TieredPricing {
    /// Discount percentage for `units`.
    #[must_use]
    pub fn discount_percentage(&self, units: Decimal) -> Decimal {
        let (start, end, max) = (
            self.discount_start,
            self.discount_end,
            self.max_discount_percentage,
        );
        if units < start {
            Decimal::ZERO
        } else if units <= end && end > start {
            // The ratio is at most one, so neither step can overflow.
            max * (units.saturating_sub(start) / end.saturating_sub(start))
        } else {
            max
        }
    }

    /// Price `measure` units, adding the selected variant's surcharge to the
    /// base price first.
    #[must_use]
    pub fn quote(&self, additional_price: Amount, measure: Measure) -> PriceQuote {
        let units = measure.units();
        let unit_price = (self.base_price + additional_price).value();
        let price_before_discount = units.saturating_mul(unit_price);
        let discount_percentage = self.discount_percentage(units);
        let discount_amount =
            price_before_discount.saturating_mul(discount_percentage / Decimal::ONE_HUNDRED);

        PriceQuote {
            units,
            price_before_discount,
            discount_percentage,
            discount_amount,
            final_price: price_before_discount.saturating_sub(discount_amount),
        }
    }
}

// =============================================================================
// Coupons
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coupon {
    pub coupon_id: CouponId,
    pub code: String,
}

/// Response of `GET /api/coupon?code=...`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponQuote {
    pub total_price: Decimal,
    pub discounted_price: Decimal,
    pub coupon: Coupon,
}

impl CouponQuote {
    /// `total_price - discounted_price`, if positive.
    #[must_use]
    pub fn discount(&self) -> Option<Amount> {
        self.total_price
            .checked_sub(self.discounted_price)
            .filter(|d| *d > Decimal::ZERO)
            .and_then(|d| Amount::new(d).ok())
    }
}

/// Coupon box state on the POS screen.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CouponState {
    #[default]
    NotApplied,
    Applied { coupon: Coupon, discount: Amount },
    Rejected { message: String },
}

impl CouponState {
    /// Trimmed coupon code, or the rejection for a blank one.
    ///
    /// # Errors
    ///
    /// Returns [`CouponState::Rejected`] with [`BLANK_COUPON_MESSAGE`] when the
    /// code is empty after trimming.
    pub fn check_code(code: &str) -> Result<&str, Self> {
        let code = code.trim();
        if code.is_empty() {
            Err(Self::Rejected {
                message: BLANK_COUPON_MESSAGE.to_owned(),
            })
        } else {
            Ok(code)
        }
    }

    /// State after a lookup. `None` means the lookup failed.
    #[must_use]
    pub fn from_lookup(quote: Option<CouponQuote>) -> Self {
        match quote {
            Some(quote) => match quote.discount() {
                Some(discount) => Self::Applied {
                    coupon: quote.coupon,
                    discount,
                },
                None => Self::invalid(),
            },
            None => Self::invalid(),
        }
    }

    fn invalid() -> Self {
        Self::Rejected {
            message: INVALID_COUPON_MESSAGE.to_owned(),
        }
    }

    /// Discount to subtract from the sub-total.
    #[must_use]
    pub fn discount(&self) -> Amount {
        match self {
            Self::Applied { discount, .. } => *discount,
            Self::NotApplied | Self::Rejected { .. } => Amount::ZERO,
        }
    }

    /// Error text for the coupon box, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Rejected { message } => Some(message),
            Self::NotApplied | Self::Applied { .. } => None,
        }
    }
}
