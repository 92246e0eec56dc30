//! Error types for form editing and variant generation.

use core::fmt;

use thiserror::Error;

use crate::types::{CustomerId, ImageId, PhoneError, UnknownOption};

/// The list an index-based edit was aimed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Variations,
    VariationItems,
    Variants,
    Tags,
    Attributes,
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Variations => "variation",
            Self::VariationItems => "variation item",
            Self::Variants => "variant",
            Self::Tags => "tag",
            Self::Attributes => "attribute",
        })
    }
}

/// Required data is missing or malformed.
///
/// Variation errors carry 0-based indices; the messages are what the admin
/// shows in its warning dialog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("add at least one variation before creating variants")]
    NoVariations,

    #[error("variation #{} needs a name", .variation + 1)]
    MissingVariationName { variation: usize },

    #[error("variation {name:?} needs at least one item")]
    NoVariationItems { variation: usize, name: String },

    #[error("variation {name:?} item #{} needs a value", .item + 1)]
    EmptyItemValue {
        variation: usize,
        name: String,
        item: usize,
    },

    /// `count` is `None` when the number of combinations overflows.
    #[error("these variations would produce more than {max} variants")]
    TooManyVariants { count: Option<usize>, max: usize },

    #[error("product name must be at least {min} characters")]
    NameTooShort { min: usize },

    #[error("minimum order quantity must be at least 1")]
    ZeroMinOrderQuantity,

    #[error("Name and Phone are required")]
    MissingCustomerDetails,

    #[error("Please select a customer")]
    NoCustomerSelected,

    #[error("customer {0} is not in the customer list")]
    UnknownCustomer(CustomerId),

    #[error("No products selected")]
    EmptyCart,

    #[error("Please select a courier")]
    MissingCourier,

    #[error("invalid phone number: {0}")]
    Phone(#[from] PhoneError),
}

/// Errors produced by the variation engine and the product form reducer.
///
/// Every edit either returns a new state or one of these; the input state is
/// never touched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{collection} index {index} is out of range (length {len})")]
    IndexOutOfRange {
        collection: Collection,
        index: usize,
        len: usize,
    },

    #[error("{field}: {input:?} is not a valid number ({reason})")]
    InvalidNumber {
        field: &'static str,
        input: String,
        reason: String,
    },

    #[error("{0}")]
    InvalidOption(#[from] UnknownOption),

    #[error("unknown field {0:?}")]
    UnknownField(String),

    #[error("field {0:?} is read-only")]
    ReadOnlyField(&'static str),

    #[error("image {0} is not attached to this product")]
    UnknownImage(ImageId),
}

impl EditError {
    pub(crate) fn invalid_number(
        field: &'static str,
        input: &str,
        reason: impl fmt::Display,
    ) -> Self {
        Self::InvalidNumber {
            field,
            input: input.to_owned(),
            reason: reason.to_string(),
        }
    }

    /// Returns `true` for the index-out-of-range kind.
    #[must_use]
    pub const fn is_index_out_of_range(&self) -> bool {
        matches!(self, Self::IndexOutOfRange { .. })
    }

    /// Returns `true` for the invalid-number kind.
    #[must_use]
    pub const fn is_invalid_number(&self) -> bool {
        matches!(self, Self::InvalidNumber { .. })
    }
}

/// Return a copy of `items` with the element at `index` edited by `edit`.
pub(crate) fn update_at<T: Clone>(
    items: &[T],
    index: usize,
    collection: Collection,
    edit: impl FnOnce(&mut T) -> Result<(), EditError>,
) -> Result<Vec<T>, EditError> {
    let mut next = items.to_vec();
    let len = next.len();
    let slot = next.get_mut(index).ok_or(EditError::IndexOutOfRange {
        collection,
        index,
        len,
    })?;
    edit(slot)?;
    Ok(next)
}

/// Return a copy of `items` without the element at `index`.
pub(crate) fn remove_at<T: Clone>(
    items: &[T],
    index: usize,
    collection: Collection,
) -> Result<Vec<T>, EditError> {
    if index >= items.len() {
        return Err(EditError::IndexOutOfRange {
            collection,
            index,
            len: items.len(),
        });
    }
    let mut next = items.to_vec();
    next.remove(index);
    Ok(next)
}
