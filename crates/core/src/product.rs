//! Product form state and its reducer.
//!
//! The product-management screen is modelled as a [`ProductForm`] value and a
//! set of [`ProductMessage`]s. Every input on the screen emits a message;
//! [`ProductForm::update`] turns the current form plus a message into the next
//! form. The current form is never modified, so a rejected edit leaves the
//! caller's state exactly as it was.

use core::fmt;
use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Collection, EditError, ValidationError, remove_at, update_at};
use crate::types::{Amount, AttributeId, CategoryId, ImageId, PricingType, UnknownOption};
use crate::variation::{self, Variant, Variation, VariationField};

/// Minimum length of a product name.
pub const MIN_NAME_LENGTH: usize = 5;

/// Upper bound for `maxDiscountPercentage`.
const MAX_DISCOUNT_PERCENTAGE: Decimal = Decimal::ONE_HUNDRED;

// =============================================================================
// Form state
// =============================================================================

/// The "Basic Information" section of the product form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicInfo {
    pub name: String,
    pub description: String,
    /// Assigned by the backend; shown but never edited.
    pub sku: String,
    pub base_price: Amount,
    pub min_order_quantity: u32,
    pub pricing_type: PricingType,
    pub is_active: bool,
    /// Top-level category.
    pub category_id: Option<CategoryId>,
    /// Sub-category of `category_id`, if one is chosen.
    pub sub_category_id: Option<CategoryId>,
    /// Quantity (or square feet) at which the tiered discount starts.
    pub discount_start: Option<Amount>,
    /// Quantity (or square feet) at which the tiered discount reaches its
    /// maximum.
    pub discount_end: Option<Amount>,
    /// Largest discount in percent (0-100).
    pub max_discount_percentage: Option<Decimal>,
}

impl Default for BasicInfo {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            sku: String::new(),
            base_price: Amount::ZERO,
            min_order_quantity: 1,
            pricing_type: PricingType::Flat,
            is_active: true,
            category_id: None,
            sub_category_id: None,
            discount_start: None,
            discount_end: None,
            max_discount_percentage: None,
        }
    }
}

impl BasicInfo {
    /// The category the product is filed under: the sub-category when one is
    /// chosen, otherwise the top-level category.
    #[must_use]
    pub fn effective_category_id(&self) -> Option<CategoryId> {
        self.sub_category_id.or(self.category_id)
    }
}

/// A free-form `property: description` row, e.g. `Material: Vinyl`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attribute {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute_id: Option<AttributeId>,
    pub property: String,
    #[serde(default, deserialize_with = "crate::codec::nullable")]
    pub description: String,
}

impl Attribute {
    #[must_use]
    pub fn new(property: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            attribute_id: None,
            property: property.into(),
            description: description.into(),
        }
    }
}

/// An image already stored on the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductImage {
    pub image_id: ImageId,
    #[serde(default)]
    pub image_name: String,
}

/// Everything the product-management screen edits.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProductForm {
    pub basic: BasicInfo,
    pub tags: Vec<String>,
    pub attributes: Vec<Attribute>,
    pub variations: Vec<Variation>,
    pub variants: Vec<Variant>,
    /// Existing images that will be kept on save.
    pub images: Vec<ProductImage>,
}

// =============================================================================
// Messages
// =============================================================================

/// Editable basic-info fields, named as the backend names them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BasicField {
    Name,
    Description,
    BasePrice,
    MinOrderQuantity,
    PricingType,
    IsActive,
    CategoryId,
    SubCategoryId,
    DiscountStart,
    DiscountEnd,
    MaxDiscountPercentage,
}

impl BasicField {
    /// Wire name of the field.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Description => "description",
            Self::BasePrice => "basePrice",
            Self::MinOrderQuantity => "minOrderQuantity",
            Self::PricingType => "pricingType",
            Self::IsActive => "isActive",
            Self::CategoryId => "categoryId",
            Self::SubCategoryId => "subCategoryId",
            Self::DiscountStart => "discountStart",
            Self::DiscountEnd => "discountEnd",
            Self::MaxDiscountPercentage => "maxDiscountPercentage",
        }
    }
}

impl fmt::Display for BasicField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BasicField {
    type Err = EditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "name" => Self::Name,
            "description" => Self::Description,
            "basePrice" => Self::BasePrice,
            "minOrderQuantity" => Self::MinOrderQuantity,
            "pricingType" => Self::PricingType,
            "isActive" => Self::IsActive,
            "categoryId" => Self::CategoryId,
            "subCategoryId" => Self::SubCategoryId,
            "discountStart" => Self::DiscountStart,
            "discountEnd" => Self::DiscountEnd,
            "maxDiscountPercentage" => Self::MaxDiscountPercentage,
            "sku" => return Err(EditError::ReadOnlyField("sku")),
            other => return Err(EditError::UnknownField(other.to_owned())),
        })
    }
}

/// Editable fields of an [`Attribute`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeField {
    Property,
    Description,
}

impl FromStr for AttributeField {
    type Err = EditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "property" => Ok(Self::Property),
            "description" => Ok(Self::Description),
            other => Err(EditError::UnknownField(other.to_owned())),
        }
    }
}

/// One row handed over by the spreadsheet importer.
///
/// Column headers are `Property` and `Description`. Cells may be text or
/// numbers; missing or empty cells drop the row on import.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct AttributeRow {
    #[serde(rename = "Property", default, deserialize_with = "cell_text")]
    pub property: Option<String>,
    #[serde(rename = "Description", default, deserialize_with = "cell_text")]
    pub description: Option<String>,
}

fn cell_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    use serde_json::Value;

    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    })
}

impl AttributeRow {
    fn into_attribute(self) -> Option<Attribute> {
        match (self.property, self.description) {
            (Some(p), Some(d)) if !p.is_empty() && !d.is_empty() => Some(Attribute::new(p, d)),
            _ => None,
        }
    }
}

/// A single user action on the product form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductMessage {
    /// A basic-info input changed.
    FieldChanged { name: BasicField, value: String },

    AddTag,
    UpdateTag { index: usize, value: String },
    RemoveTag { index: usize },

    AddAttribute,
    UpdateAttribute {
        index: usize,
        field: AttributeField,
        value: String,
    },
    RemoveAttribute { index: usize },
    /// Append rows from the spreadsheet importer.
    ImportAttributes(Vec<AttributeRow>),

    AddVariation,
    UpdateVariation {
        index: usize,
        field: VariationField,
        value: String,
    },
    RemoveVariation { index: usize },
    AddVariationItem { variation: usize },
    UpdateVariationItem {
        variation: usize,
        item: usize,
        value: String,
    },
    RemoveVariationItem { variation: usize, item: usize },

    /// Replace the variant list with a fresh generation.
    GenerateVariants,
    UpdateVariantPrice { index: usize, value: String },
    RemoveVariant { index: usize },

    RemoveExistingImage(ImageId),
}

impl ProductMessage {
    /// Convenience constructor for [`ProductMessage::FieldChanged`].
    #[must_use]
    pub fn field(name: BasicField, value: impl Into<String>) -> Self {
        Self::FieldChanged {
            name,
            value: value.into(),
        }
    }
}

// =============================================================================
// Reducer
// =============================================================================

impl ProductForm {
    /// Apply a message and return the resulting form.
    ///
    /// # Errors
    ///
    /// Returns an [`EditError`] when the message cannot be applied (bad index,
    /// unparsable number, incomplete variations on generate, ...). `self` is
    /// unchanged either way.
    pub fn update(&self, message: ProductMessage) -> Result<Self, EditError> {
        let mut next = self.clone();

        match message {
            ProductMessage::FieldChanged { name, value } => {
                next.basic = apply_basic_field(&self.basic, name, &value)?;
            }

            ProductMessage::AddTag => next.tags.push(String::new()),
            ProductMessage::UpdateTag { index, value } => {
                next.tags = update_at(&self.tags, index, Collection::Tags, |t| {
                    *t = value;
                    Ok(())
                })?;
            }
            ProductMessage::RemoveTag { index } => {
                next.tags = remove_at(&self.tags, index, Collection::Tags)?;
            }

            ProductMessage::AddAttribute => next.attributes.push(Attribute::default()),
            ProductMessage::UpdateAttribute { index, field, value } => {
                next.attributes = update_at(&self.attributes, index, Collection::Attributes, |a| {
                    match field {
                        AttributeField::Property => a.property = value,
                        AttributeField::Description => a.description = value,
                    }
                    Ok(())
                })?;
            }
            ProductMessage::RemoveAttribute { index } => {
                next.attributes = remove_at(&self.attributes, index, Collection::Attributes)?;
            }
            ProductMessage::ImportAttributes(rows) => {
                next.attributes
                    .extend(rows.into_iter().filter_map(AttributeRow::into_attribute));
            }

            ProductMessage::AddVariation => {
                next.variations = variation::add_variation(&self.variations);
            }
            ProductMessage::UpdateVariation {
                index,
                field,
                value,
            } => {
                next.variations = variation::update_variation(&self.variations, index, field, &value)?;
            }
            ProductMessage::RemoveVariation { index } => {
                next.variations = variation::remove_variation(&self.variations, index)?;
            }
            ProductMessage::AddVariationItem { variation } => {
                next.variations = variation::add_variation_item(&self.variations, variation)?;
            }
            ProductMessage::UpdateVariationItem {
                variation,
                item,
                value,
            } => {
                next.variations =
                    variation::update_variation_item(&self.variations, variation, item, &value)?;
            }
            ProductMessage::RemoveVariationItem { variation, item } => {
                next.variations =
                    variation::remove_variation_item(&self.variations, variation, item)?;
            }

            ProductMessage::GenerateVariants => {
                next.variants = variation::generate_variants(&self.variations)?;
            }
            ProductMessage::UpdateVariantPrice { index, value } => {
                next.variants = variation::update_variant_price(&self.variants, index, &value)?;
            }
            ProductMessage::RemoveVariant { index } => {
                next.variants = variation::remove_variant(&self.variants, index)?;
            }

            ProductMessage::RemoveExistingImage(image_id) => {
                let before = next.images.len();
                next.images.retain(|img| img.image_id != image_id);
                if next.images.len() == before {
                    return Err(EditError::UnknownImage(image_id));
                }
            }
        }

        Ok(next)
    }

    /// Apply several messages in order, stopping at the first error.
    ///
    /// # Errors
    ///
    /// Returns the first [`EditError`]; `self` is unchanged.
    pub fn update_all(
        &self,
        messages: impl IntoIterator<Item = ProductMessage>,
    ) -> Result<Self, EditError> {
        messages
            .into_iter()
            .try_fold(self.clone(), |form, msg| form.update(msg))
    }

    /// Whether the "Create Variants" button is enabled.
    #[must_use]
    pub fn can_generate_variants(&self) -> bool {
        variation::can_generate_variants(&self.variations)
    }

    /// Variants that no longer match the current variations.
    #[must_use]
    pub fn stale_variants(&self) -> Vec<usize> {
        variation::find_stale_variants(&self.variations, &self.variants)
    }

    /// Check save-time requirements.
    ///
    /// # Errors
    ///
    /// Returns the first failed requirement.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.basic.name.trim().chars().count() < MIN_NAME_LENGTH {
            return Err(ValidationError::NameTooShort {
                min: MIN_NAME_LENGTH,
            });
        }
        if self.basic.min_order_quantity == 0 {
            return Err(ValidationError::ZeroMinOrderQuantity);
        }
        Ok(())
    }
}

fn apply_basic_field(basic: &BasicInfo, field: BasicField, value: &str) -> Result<BasicInfo, EditError> {
    let mut next = basic.clone();
    let name = field.as_str();

    match field {
        BasicField::Name => value.clone_into(&mut next.name),
        BasicField::Description => value.clone_into(&mut next.description),
        BasicField::BasePrice => {
            next.base_price =
                Amount::parse(value).map_err(|e| EditError::invalid_number(name, value, e))?;
        }
        BasicField::MinOrderQuantity => {
            next.min_order_quantity = parse_count(name, value)?;
        }
        BasicField::PricingType => next.pricing_type = value.parse()?,
        BasicField::IsActive => next.is_active = parse_flag(value)?,
        BasicField::CategoryId => {
            next.category_id = parse_optional_id(name, value)?;
            // A new parent invalidates whatever sub-category was picked.
            next.sub_category_id = None;
        }
        BasicField::SubCategoryId => next.sub_category_id = parse_optional_id(name, value)?,
        BasicField::DiscountStart => next.discount_start = parse_optional_amount(name, value)?,
        BasicField::DiscountEnd => next.discount_end = parse_optional_amount(name, value)?,
        BasicField::MaxDiscountPercentage => {
            next.max_discount_percentage = match parse_optional_amount(name, value)? {
                Some(pct) if pct.value() > MAX_DISCOUNT_PERCENTAGE => {
                    return Err(EditError::invalid_number(name, value, "must be at most 100"));
                }
                pct => pct.map(|p| p.value()),
            };
        }
    }

    Ok(next)
}

fn parse_count(field: &'static str, value: &str) -> Result<u32, EditError> {
    value
        .trim()
        .parse::<u32>()
        .map_err(|e| EditError::invalid_number(field, value, e))
}

fn parse_optional_amount(field: &'static str, value: &str) -> Result<Option<Amount>, EditError> {
    if value.trim().is_empty() {
        return Ok(None);
    }
    Amount::parse(value)
        .map(Some)
        .map_err(|e| EditError::invalid_number(field, value, e))
}

fn parse_optional_id(field: &'static str, value: &str) -> Result<Option<CategoryId>, EditError> {
    if value.trim().is_empty() {
        return Ok(None);
    }
    value
        .parse::<CategoryId>()
        .map(Some)
        .map_err(|e| EditError::invalid_number(field, value, e))
}

fn parse_flag(value: &str) -> Result<bool, EditError> {
    match value.trim() {
        "true" | "on" | "1" => Ok(true),
        "false" | "off" | "0" => Ok(false),
        other => Err(EditError::InvalidOption(UnknownOption {
            kind: "checkbox value",
            value: other.to_owned(),
        })),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::variation::VariationItem;

    fn form_with_variations() -> ProductForm {
        ProductForm::default()
            .update_all([
                ProductMessage::AddVariation,
                ProductMessage::UpdateVariation {
                    index: 0,
                    field: VariationField::Name,
                    value: "Size".to_string(),
                },
                ProductMessage::AddVariationItem { variation: 0 },
                ProductMessage::UpdateVariationItem {
                    variation: 0,
                    item: 0,
                    value: "A4".to_string(),
                },
                ProductMessage::AddVariationItem { variation: 0 },
                ProductMessage::UpdateVariationItem {
                    variation: 0,
                    item: 1,
                    value: "A3".to_string(),
                },
            ])
            .unwrap()
    }

    #[test]
    fn test_field_changed_updates_basic_info() {
        let form = ProductForm::default()
            .update_all([
                ProductMessage::field(BasicField::Name, "Vinyl Banner"),
                ProductMessage::field(BasicField::BasePrice, "450"),
                ProductMessage::field(BasicField::MinOrderQuantity, "2"),
                ProductMessage::field(BasicField::PricingType, "square-feet"),
                ProductMessage::field(BasicField::IsActive, "false"),
                ProductMessage::field(BasicField::MaxDiscountPercentage, "15.5"),
            ])
            .unwrap();

        assert_eq!(form.basic.name, "Vinyl Banner");
        assert_eq!(form.basic.base_price, Amount::from_units(450));
        assert_eq!(form.basic.min_order_quantity, 2);
        assert_eq!(form.basic.pricing_type, PricingType::SquareFeet);
        assert!(!form.basic.is_active);
        assert_eq!(form.basic.max_discount_percentage, Some(Decimal::new(155, 1)));
    }

    #[test]
    fn test_bad_numbers_are_rejected_and_state_kept() {
        let form = ProductForm::default();

        for (field, value) in [
            (BasicField::BasePrice, "-1"),
            (BasicField::BasePrice, "ten"),
            (BasicField::MinOrderQuantity, "1.5"),
            (BasicField::DiscountStart, "-3"),
            (BasicField::MaxDiscountPercentage, "120"),
            (BasicField::CategoryId, "abc"),
        ] {
            let err = form.update(ProductMessage::field(field, value)).unwrap_err();
            assert!(err.is_invalid_number(), "{field}={value:?} gave {err}");
        }
        assert_eq!(form, ProductForm::default());
    }

    #[test]
    fn test_optional_fields_accept_blank() {
        let form = ProductForm::default()
            .update_all([
                ProductMessage::field(BasicField::DiscountStart, "10"),
                ProductMessage::field(BasicField::DiscountStart, ""),
                ProductMessage::field(BasicField::MaxDiscountPercentage, " "),
            ])
            .unwrap();
        assert_eq!(form.basic.discount_start, None);
        assert_eq!(form.basic.max_discount_percentage, None);
    }

    #[test]
    fn test_category_change_resets_sub_category() {
        let form = ProductForm::default()
            .update_all([
                ProductMessage::field(BasicField::CategoryId, "3"),
                ProductMessage::field(BasicField::SubCategoryId, "11"),
            ])
            .unwrap();
        assert_eq!(form.basic.effective_category_id(), Some(CategoryId::new(11)));

        let moved = form
            .update(ProductMessage::field(BasicField::CategoryId, "4"))
            .unwrap();
        assert_eq!(moved.basic.category_id, Some(CategoryId::new(4)));
        assert_eq!(moved.basic.sub_category_id, None);
        assert_eq!(moved.basic.effective_category_id(), Some(CategoryId::new(4)));
    }

    #[test]
    fn test_basic_field_names() {
        assert_eq!("basePrice".parse::<BasicField>().unwrap(), BasicField::BasePrice);
        assert_eq!(
            "sku".parse::<BasicField>().unwrap_err(),
            EditError::ReadOnlyField("sku")
        );
        assert!(matches!(
            "colour".parse::<BasicField>(),
            Err(EditError::UnknownField(_))
        ));
        assert!(matches!(
            ProductForm::default().update(ProductMessage::field(BasicField::IsActive, "maybe")),
            Err(EditError::InvalidOption(_))
        ));
    }

    #[test]
    fn test_tags() {
        let form = ProductForm::default()
            .update_all([
                ProductMessage::AddTag,
                ProductMessage::AddTag,
                ProductMessage::UpdateTag {
                    index: 0,
                    value: "banner".to_string(),
                },
                ProductMessage::UpdateTag {
                    index: 1,
                    value: "outdoor".to_string(),
                },
                ProductMessage::RemoveTag { index: 0 },
            ])
            .unwrap();
        assert_eq!(form.tags, vec!["outdoor".to_string()]);

        let err = form.update(ProductMessage::RemoveTag { index: 1 }).unwrap_err();
        assert_eq!(
            err,
            EditError::IndexOutOfRange {
                collection: Collection::Tags,
                index: 1,
                len: 1,
            }
        );
    }

    #[test]
    fn test_attributes_and_import() {
        let form = ProductForm::default()
            .update_all([
                ProductMessage::AddAttribute,
                ProductMessage::UpdateAttribute {
                    index: 0,
                    field: AttributeField::Property,
                    value: "Material".to_string(),
                },
                ProductMessage::UpdateAttribute {
                    index: 0,
                    field: AttributeField::Description,
                    value: "Vinyl".to_string(),
                },
            ])
            .unwrap();

        let rows: Vec<AttributeRow> = serde_json::from_value(serde_json::json!([
            {"Property": "Thickness", "Description": 13},
            {"Property": "Finish"},
            {"Property": "", "Description": "Gloss"},
            {"Property": "Lamination", "Description": "Matte"},
            {"Other": "ignored"}
        ]))
        .unwrap();

        let imported = form.update(ProductMessage::ImportAttributes(rows)).unwrap();
        assert_eq!(
            imported.attributes,
            vec![
                Attribute::new("Material", "Vinyl"),
                Attribute::new("Thickness", "13"),
                Attribute::new("Lamination", "Matte"),
            ]
        );

        let removed = imported
            .update(ProductMessage::RemoveAttribute { index: 1 })
            .unwrap();
        assert_eq!(removed.attributes.len(), 2);
    }

    #[test]
    fn test_generate_variants_message() {
        let form = form_with_variations();
        assert!(form.can_generate_variants());

        let generated = form.update(ProductMessage::GenerateVariants).unwrap();
        assert_eq!(generated.variants.len(), 2);
        assert_eq!(generated.variants[0].label(), "Size: A4");

        let priced = generated
            .update(ProductMessage::UpdateVariantPrice {
                index: 1,
                value: "40".to_string(),
            })
            .unwrap();
        assert_eq!(priced.variants[1].additional_price, Amount::from_units(40));

        // Regenerating discards prices: variants are a fresh snapshot.
        let regenerated = priced.update(ProductMessage::GenerateVariants).unwrap();
        assert_eq!(regenerated.variants, generated.variants);
    }

    #[test]
    fn test_generate_with_incomplete_variations_keeps_variants() {
        let generated = form_with_variations()
            .update(ProductMessage::GenerateVariants)
            .unwrap();
        let incomplete = generated.update(ProductMessage::AddVariation).unwrap();

        assert!(!incomplete.can_generate_variants());
        let err = incomplete.update(ProductMessage::GenerateVariants).unwrap_err();
        assert!(matches!(err, EditError::Validation(_)));
        assert_eq!(incomplete.variants.len(), 2);
        assert_eq!(incomplete.stale_variants(), vec![0, 1]);
    }

    #[test]
    fn test_variant_price_rejects_negative() {
        let generated = form_with_variations()
            .update(ProductMessage::GenerateVariants)
            .unwrap();
        let err = generated
            .update(ProductMessage::UpdateVariantPrice {
                index: 0,
                value: "-5".to_string(),
            })
            .unwrap_err();
        assert!(err.is_invalid_number());
    }

    #[test]
    fn test_remove_variation_item_message() {
        let form = form_with_variations()
            .update(ProductMessage::RemoveVariationItem {
                variation: 0,
                item: 0,
            })
            .unwrap();
        assert_eq!(form.variations[0].variation_items, vec![VariationItem::new("A3")]);

        let form = form.update(ProductMessage::RemoveVariation { index: 0 }).unwrap();
        assert!(form.variations.is_empty());
        assert!(!form.can_generate_variants());
    }

    #[test]
    fn test_remove_existing_image() {
        let form = ProductForm {
            images: vec![
                ProductImage {
                    image_id: ImageId::new(1),
                    image_name: "front.jpg".to_string(),
                },
                ProductImage {
                    image_id: ImageId::new(2),
                    image_name: "back.jpg".to_string(),
                },
            ],
            ..ProductForm::default()
        };

        let next = form
            .update(ProductMessage::RemoveExistingImage(ImageId::new(1)))
            .unwrap();
        assert_eq!(next.images.len(), 1);
        assert_eq!(next.images[0].image_id, ImageId::new(2));

        assert_eq!(
            next.update(ProductMessage::RemoveExistingImage(ImageId::new(1)))
                .unwrap_err(),
            EditError::UnknownImage(ImageId::new(1))
        );
    }

    #[test]
    fn test_validate() {
        let mut form = ProductForm::default();
        assert_eq!(
            form.validate(),
            Err(ValidationError::NameTooShort { min: MIN_NAME_LENGTH })
        );

        form.basic.name = "Flyer".to_string();
        assert!(form.validate().is_ok());

        form.basic.min_order_quantity = 0;
        assert_eq!(form.validate(), Err(ValidationError::ZeroMinOrderQuantity));
    }
}
