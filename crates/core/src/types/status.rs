//! Enumerated option values shared by the product form and the POS screen.
//!
//! Wire names match the backend's kebab-case option values.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use super::Amount;

/// Error returned when an option value is not one of the known variants.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind} {value:?}")]
pub struct UnknownOption {
    /// Which option set was being parsed.
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}

macro_rules! wire_enum {
    ($(#[$meta:meta])* $name:ident, $kind:literal { $($(#[$vmeta:meta])* $variant:ident => $wire:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            /// The backend's wire name for this value.
            #[must_use]
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $wire,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownOption;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim() {
                    $($wire => Ok(Self::$variant),)+
                    other => Err(UnknownOption {
                        kind: $kind,
                        value: other.to_owned(),
                    }),
                }
            }
        }
    };
}

wire_enum! {
    /// How a product is priced.
    #[derive(Default)]
    PricingType, "pricing type" {
        /// Unit price times quantity.
        #[default]
        Flat => "flat",
        /// Unit price per square foot of the printed area.
        SquareFeet => "square-feet",
    }
}

wire_enum! {
    /// POS payment method.
    #[derive(Default)]
    PaymentMethod, "payment method" {
        /// Paid through the online gateway.
        Online => "online-payment",
        /// Cash on delivery or at the counter.
        #[default]
        Cod => "cod-payment",
    }
}

wire_enum! {
    /// How the order leaves the shop.
    #[derive(Default)]
    DeliveryMethod, "delivery method" {
        /// Customer collects from the shop.
        #[default]
        ShopPickup => "shop-pickup",
        /// Sent through a courier.
        Courier => "courier",
    }
}

wire_enum! {
    /// POS payment status.
    #[derive(Default)]
    PaymentStatus, "payment status" {
        /// Nothing paid yet.
        #[default]
        Pending => "pending",
        /// Advance received.
        Partial => "partial",
        /// Fully paid.
        Paid => "paid",
    }
}

impl PaymentMethod {
    /// The order's `method` field: `"online"` or `"offline"`.
    #[must_use]
    pub const fn channel(&self) -> &'static str {
        match self {
            Self::Online => "online",
            Self::Cod => "offline",
        }
    }
}

impl PaymentStatus {
    /// Status for an order with `gross_total` of which `advance` was paid.
    #[must_use]
    pub fn for_advance(gross_total: Amount, advance: Amount) -> Self {
        if advance >= gross_total {
            Self::Paid
        } else if advance.is_zero() {
            Self::Pending
        } else {
            Self::Partial
        }
    }
}
