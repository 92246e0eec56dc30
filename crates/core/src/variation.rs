//! Product variations and generated variants.
//!
//! A product has an ordered list of [`Variation`]s ("Size", "Color"), each
//! with an ordered list of [`VariationItem`]s ("S", "M", "Red"). The variant
//! list is the Cartesian product of all items, materialised on demand by
//! [`generate_variants`] and edited independently afterwards.
//!
//! Every operation takes the current list by reference and returns a new
//! list. Variants are snapshots: editing or removing a variation does not
//! touch variants that were generated earlier. Use [`find_stale_variants`]
//! to report which ones no longer match.
//!
//! ```
//! use signshop_core::variation::{self, VariationField};
//!
//! let v = variation::add_variation(&[]);
//! let v = variation::update_variation(&v, 0, VariationField::Name, "Size").unwrap();
//! let v = variation::add_variation_item(&v, 0).unwrap();
//! let v = variation::update_variation_item(&v, 0, 0, "A4").unwrap();
//!
//! assert!(variation::can_generate_variants(&v));
//! let variants = variation::generate_variants(&v).unwrap();
//! assert_eq!(variants.len(), 1);
//! ```

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Collection, EditError, ValidationError, remove_at, update_at};
use crate::types::{
    Amount, ProductVariantDetailId, ProductVariantId, VariationId, VariationItemId,
};

/// A named product dimension with a unit and selectable values.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variation {
    /// Backend id, present for variations loaded from an existing product.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variation_id: Option<VariationId>,
    pub name: String,
    #[serde(default, deserialize_with = "crate::codec::nullable")]
    pub unit: String,
    #[serde(default, deserialize_with = "crate::codec::nullable")]
    pub variation_items: Vec<VariationItem>,
}

/// One selectable value of a [`Variation`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariationItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variation_item_id: Option<VariationItemId>,
    pub value: String,
}

/// One concrete combination of variation items with its price adjustment.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variant {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_variant_id: Option<ProductVariantId>,
    pub variant_details: Vec<VariantDetail>,
    #[serde(default)]
    pub additional_price: Amount,
}

/// Denormalised `variation name → item value` pair inside a [`Variant`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantDetail {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_variant_detail_id: Option<ProductVariantDetailId>,
    pub variation_name: String,
    pub variation_item_value: String,
}

impl VariationItem {
    /// An item with the given value and no backend id.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            variation_item_id: None,
            value: value.into(),
        }
    }
}

impl Variation {
    /// A variation with the given name and item values and an empty unit.
    #[must_use]
    pub fn new<I, S>(name: impl Into<String>, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            variation_id: None,
            name: name.into(),
            unit: String::new(),
            variation_items: items.into_iter().map(VariationItem::new).collect(),
        }
    }
}

impl VariantDetail {
    #[must_use]
    pub fn new(variation_name: impl Into<String>, variation_item_value: impl Into<String>) -> Self {
        Self {
            product_variant_detail_id: None,
            variation_name: variation_name.into(),
            variation_item_value: variation_item_value.into(),
        }
    }
}

impl Variant {
    /// Human-readable label, e.g. `"Size: S / Color: Red"`.
    #[must_use]
    pub fn label(&self) -> String {
        self.variant_details
            .iter()
            .map(|d| format!("{}: {}", d.variation_name, d.variation_item_value))
            .collect::<Vec<_>>()
            .join(" / ")
    }
}

/// Editable text fields of a [`Variation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariationField {
    Name,
    Unit,
}

impl VariationField {
    /// Wire name of the field.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Unit => "unit",
        }
    }
}

impl fmt::Display for VariationField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VariationField {
    type Err = EditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(Self::Name),
            "unit" => Ok(Self::Unit),
            other => Err(EditError::UnknownField(other.to_owned())),
        }
    }
}

// =============================================================================
// Variation edits
// =============================================================================

/// Append an empty variation.
#[must_use]
pub fn add_variation(variations: &[Variation]) -> Vec<Variation> {
    let mut next = variations.to_vec();
    next.push(Variation::default());
    next
}

/// Set the name or unit of the variation at `index`.
///
/// # Errors
///
/// Returns [`EditError::IndexOutOfRange`] if `index` is not in bounds.
pub fn update_variation(
    variations: &[Variation],
    index: usize,
    field: VariationField,
    value: &str,
) -> Result<Vec<Variation>, EditError> {
    update_at(variations, index, Collection::Variations, |v| {
        match field {
            VariationField::Name => value.clone_into(&mut v.name),
            VariationField::Unit => value.clone_into(&mut v.unit),
        }
        Ok(())
    })
}

/// Remove the variation at `index`. Existing variants are left alone.
///
/// # Errors
///
/// Returns [`EditError::IndexOutOfRange`] if `index` is not in bounds.
pub fn remove_variation(variations: &[Variation], index: usize) -> Result<Vec<Variation>, EditError> {
    remove_at(variations, index, Collection::Variations)
}

/// Append an empty item to the variation at `variation_index`.
///
/// # Errors
///
/// Returns [`EditError::IndexOutOfRange`] if `variation_index` is not in bounds.
pub fn add_variation_item(
    variations: &[Variation],
    variation_index: usize,
) -> Result<Vec<Variation>, EditError> {
    update_at(variations, variation_index, Collection::Variations, |v| {
        v.variation_items.push(VariationItem::default());
        Ok(())
    })
}

/// Set the value of one variation item.
///
/// # Errors
///
/// Returns [`EditError::IndexOutOfRange`] if either index is not in bounds.
pub fn update_variation_item(
    variations: &[Variation],
    variation_index: usize,
    item_index: usize,
    value: &str,
) -> Result<Vec<Variation>, EditError> {
    update_at(variations, variation_index, Collection::Variations, |v| {
        v.variation_items = update_at(
            &v.variation_items,
            item_index,
            Collection::VariationItems,
            |item| {
                value.clone_into(&mut item.value);
                Ok(())
            },
        )?;
        Ok(())
    })
}

/// Remove one variation item.
///
/// # Errors
///
/// Returns [`EditError::IndexOutOfRange`] if either index is not in bounds.
pub fn remove_variation_item(
    variations: &[Variation],
    variation_index: usize,
    item_index: usize,
) -> Result<Vec<Variation>, EditError> {
    update_at(variations, variation_index, Collection::Variations, |v| {
        v.variation_items = remove_at(&v.variation_items, item_index, Collection::VariationItems)?;
        Ok(())
    })
}

// =============================================================================
// Generation
// =============================================================================

/// Upper bound on the number of variants one generation may produce.
pub const MAX_VARIANTS: usize = 1_000;

/// Check that every variation is complete enough to generate variants from.
///
/// # Errors
///
/// Returns the first problem found, scanning variations in order and items
/// in order within each variation, or [`ValidationError::TooManyVariants`]
/// if the combinations would exceed [`MAX_VARIANTS`].
pub fn validate_for_generation(variations: &[Variation]) -> Result<(), ValidationError> {
    if variations.is_empty() {
        return Err(ValidationError::NoVariations);
    }

    for (i, v) in variations.iter().enumerate() {
        if v.name.is_empty() {
            return Err(ValidationError::MissingVariationName { variation: i });
        }
        if v.variation_items.is_empty() {
            return Err(ValidationError::NoVariationItems {
                variation: i,
                name: v.name.clone(),
            });
        }
        if let Some(j) = v.variation_items.iter().position(|item| item.value.is_empty()) {
            return Err(ValidationError::EmptyItemValue {
                variation: i,
                name: v.name.clone(),
                item: j,
            });
        }
    }

    match variant_count(variations) {
        Some(count) if count <= MAX_VARIANTS => Ok(()),
        count => Err(ValidationError::TooManyVariants {
            count,
            max: MAX_VARIANTS,
        }),
    }
}

/// Whether the "Create Variants" action is available.
///
/// True iff there is at least one variation, every variation has a name and
/// at least one item, and every item has a value.
#[must_use]
pub fn can_generate_variants(variations: &[Variation]) -> bool {
    validate_for_generation(variations).is_ok()
}

/// Build the full variant list from the current variations.
///
/// Combinations are enumerated in variation order, then item order, with the
/// last variation varying fastest. Every variant starts with an additional
/// price of zero and no backend ids.
///
/// An empty variation list yields an empty variant list.
///
/// # Errors
///
/// Returns [`EditError::Validation`] if the list is non-empty but
/// [`can_generate_variants`] is false.
pub fn generate_variants(variations: &[Variation]) -> Result<Vec<Variant>, EditError> {
    if variations.is_empty() {
        return Ok(Vec::new());
    }
    validate_for_generation(variations)?;

    let mut combinations: Vec<Vec<VariantDetail>> = vec![Vec::new()];
    for variation in variations {
        let mut next =
            Vec::with_capacity(combinations.len().saturating_mul(variation.variation_items.len()));
        for prefix in &combinations {
            for item in &variation.variation_items {
                let mut details = Vec::with_capacity(prefix.len() + 1);
                details.extend_from_slice(prefix);
                details.push(VariantDetail::new(&variation.name, &item.value));
                next.push(details);
            }
        }
        combinations = next;
    }

    Ok(combinations
        .into_iter()
        .map(|variant_details| Variant {
            product_variant_id: None,
            variant_details,
            additional_price: Amount::ZERO,
        })
        .collect())
}

/// Number of variants [`generate_variants`] would produce, or `None` if it
/// does not fit in a `usize`.
#[must_use]
pub fn variant_count(variations: &[Variation]) -> Option<usize> {
    if variations.is_empty() {
        return Some(0);
    }
    variations
        .iter()
        .try_fold(1_usize, |acc, v| acc.checked_mul(v.variation_items.len()))
}

/// Indices of variants whose details no longer describe a combination of the
/// current variations.
///
/// A variant is stale when its detail count differs from the number of
/// variations, or when any detail's name or value does not match the
/// variation at the same position. Nothing is removed; callers decide what to
/// do with the report.
#[must_use]
pub fn find_stale_variants(variations: &[Variation], variants: &[Variant]) -> Vec<usize> {
    variants
        .iter()
        .enumerate()
        .filter(|(_, variant)| !matches_variations(variant, variations))
        .map(|(i, _)| i)
        .collect()
}

fn matches_variations(variant: &Variant, variations: &[Variation]) -> bool {
    variant.variant_details.len() == variations.len()
        && variant
            .variant_details
            .iter()
            .zip(variations)
            .all(|(detail, variation)| {
                detail.variation_name == variation.name
                    && variation
                        .variation_items
                        .iter()
                        .any(|item| item.value == detail.variation_item_value)
            })
}

// =============================================================================
// Variant edits
// =============================================================================

/// Set the additional price of the variant at `index` from user input.
///
/// # Errors
///
/// Returns [`EditError::InvalidNumber`] if `value` is empty, not a number or
/// negative, and [`EditError::IndexOutOfRange`] if `index` is not in bounds.
pub fn update_variant_price(
    variants: &[Variant],
    index: usize,
    value: &str,
) -> Result<Vec<Variant>, EditError> {
    let price = Amount::parse(value)
        .map_err(|e| EditError::invalid_number("additionalPrice", value, e))?;
    update_at(variants, index, Collection::Variants, |v| {
        v.additional_price = price;
        Ok(())
    })
}

/// Remove the variant at `index`.
///
/// # Errors
///
/// Returns [`EditError::IndexOutOfRange`] if `index` is not in bounds.
pub fn remove_variant(variants: &[Variant], index: usize) -> Result<Vec<Variant>, EditError> {
    remove_at(variants, index, Collection::Variants)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn size_and_color() -> Vec<Variation> {
        vec![
            Variation::new("Size", ["S", "M"]),
            Variation::new("Color", ["Red"]),
        ]
    }

    fn details(variant: &Variant) -> Vec<(&str, &str)> {
        variant
            .variant_details
            .iter()
            .map(|d| (d.variation_name.as_str(), d.variation_item_value.as_str()))
            .collect()
    }

    #[test]
    fn test_empty_variations_cannot_generate() {
        assert!(!can_generate_variants(&[]));
        assert_eq!(generate_variants(&[]).unwrap(), Vec::<Variant>::new());
        assert_eq!(variant_count(&[]), Some(0));
    }

    #[test]
    fn test_generate_size_and_color() {
        let variants = generate_variants(&size_and_color()).unwrap();

        assert_eq!(variants.len(), 2);
        assert_eq!(details(&variants[0]), vec![("Size", "S"), ("Color", "Red")]);
        assert_eq!(details(&variants[1]), vec![("Size", "M"), ("Color", "Red")]);
        assert!(variants.iter().all(|v| v.additional_price == Amount::ZERO));
        assert!(variants.iter().all(|v| v.product_variant_id.is_none()));
    }

    #[test]
    fn test_too_many_variants_rejected_before_generation() {
        let variations: Vec<Variation> = (0..70)
            .map(|i| Variation::new(format!("V{i}"), ["a", "b"]))
            .collect();

        assert_eq!(variant_count(&variations), None);
        assert!(!can_generate_variants(&variations));
        assert_eq!(
            generate_variants(&variations).unwrap_err(),
            EditError::Validation(ValidationError::TooManyVariants {
                count: None,
                max: MAX_VARIANTS,
            })
        );

        // 2^10 = 1024 fits in a usize but is over the limit.
        assert_eq!(variant_count(&variations[..10]), Some(1024));
        assert!(matches!(
            validate_for_generation(&variations[..10]),
            Err(ValidationError::TooManyVariants {
                count: Some(1024),
                ..
            })
        ));
        assert!(can_generate_variants(&variations[..9]));
    }

    #[test]
    fn test_last_variation_varies_fastest() {
        let variations = vec![
            Variation::new("Size", ["S", "M"]),
            Variation::new("Color", ["Red", "Blue"]),
            Variation::new("Finish", ["Matte", "Gloss"]),
        ];
        let variants = generate_variants(&variations).unwrap();
        let labels: Vec<String> = variants.iter().map(Variant::label).collect();

        assert_eq!(variant_count(&variations), Some(variants.len()));
        assert_eq!(
            labels,
            vec![
                "Size: S / Color: Red / Finish: Matte",
                "Size: S / Color: Red / Finish: Gloss",
                "Size: S / Color: Blue / Finish: Matte",
                "Size: S / Color: Blue / Finish: Gloss",
                "Size: M / Color: Red / Finish: Matte",
                "Size: M / Color: Red / Finish: Gloss",
                "Size: M / Color: Blue / Finish: Matte",
                "Size: M / Color: Blue / Finish: Gloss",
            ]
        );
        assert!(variants.iter().all(|v| v.variant_details.len() == 3));
    }

    #[test]
    fn test_generation_is_idempotent() {
        let variations = size_and_color();
        let first = generate_variants(&variations).unwrap();
        let second = generate_variants(&variations).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_any_empty_item_blocks_generation() {
        let mut variations = size_and_color();
        variations[0].variation_items.push(VariationItem::new(""));

        assert!(!can_generate_variants(&variations));
        assert_eq!(
            generate_variants(&variations).unwrap_err(),
            EditError::Validation(ValidationError::EmptyItemValue {
                variation: 0,
                name: "Size".to_string(),
                item: 2,
            })
        );
    }

    #[test]
    fn test_missing_name_or_items_blocks_generation() {
        let unnamed = vec![Variation::new("", ["S"])];
        assert!(!can_generate_variants(&unnamed));
        assert!(matches!(
            validate_for_generation(&unnamed),
            Err(ValidationError::MissingVariationName { variation: 0 })
        ));

        let no_items = add_variation(&[Variation::new("Size", ["S"])]);
        let no_items = update_variation(&no_items, 1, VariationField::Name, "Color").unwrap();
        assert!(!can_generate_variants(&no_items));
        assert!(matches!(
            validate_for_generation(&no_items),
            Err(ValidationError::NoVariationItems { variation: 1, .. })
        ));
    }

    #[test]
    fn test_unit_is_not_required() {
        let variations = vec![Variation::new("Size", ["A4"])];
        assert!(variations[0].unit.is_empty());
        assert!(can_generate_variants(&variations));
    }

    #[test]
    fn test_variation_edits_return_new_state() {
        let original = size_and_color();

        let renamed = update_variation(&original, 1, VariationField::Name, "Colour").unwrap();
        assert_eq!(original[1].name, "Color");
        assert_eq!(renamed[1].name, "Colour");

        let with_unit = update_variation(&original, 0, VariationField::Unit, "inch").unwrap();
        assert_eq!(with_unit[0].unit, "inch");

        let with_item = add_variation_item(&original, 1).unwrap();
        assert_eq!(with_item[1].variation_items.len(), 2);
        assert_eq!(with_item[1].variation_items[1], VariationItem::default());

        let blue = update_variation_item(&with_item, 1, 1, "Blue").unwrap();
        assert_eq!(blue[1].variation_items[1].value, "Blue");

        let no_s = remove_variation_item(&original, 0, 0).unwrap();
        assert_eq!(no_s[0].variation_items, vec![VariationItem::new("M")]);

        assert_eq!(original, size_and_color());
    }

    #[test]
    fn test_out_of_range_edits() {
        let variations = size_and_color();

        assert!(
            update_variation(&variations, 2, VariationField::Name, "x")
                .unwrap_err()
                .is_index_out_of_range()
        );
        assert!(remove_variation(&variations, 5).unwrap_err().is_index_out_of_range());
        assert!(add_variation_item(&variations, 2).unwrap_err().is_index_out_of_range());
        assert_eq!(
            update_variation_item(&variations, 1, 3, "x").unwrap_err(),
            EditError::IndexOutOfRange {
                collection: Collection::VariationItems,
                index: 3,
                len: 1,
            }
        );
        assert!(
            remove_variation_item(&variations, 0, 2)
                .unwrap_err()
                .is_index_out_of_range()
        );
    }

    #[test]
    fn test_remove_variation_does_not_touch_variants() {
        let variations = size_and_color();
        let variants = generate_variants(&variations).unwrap();

        let fewer = remove_variation(&variations, 1).unwrap();
        assert_eq!(fewer.len(), 1);
        assert!(variants.iter().all(|v| v.variant_details.len() == 2));
        assert_eq!(find_stale_variants(&fewer, &variants), vec![0, 1]);

        let regenerated = generate_variants(&fewer).unwrap();
        assert_eq!(regenerated.len(), 2);
        assert_eq!(details(&regenerated[0]), vec![("Size", "S")]);
        assert_eq!(details(&regenerated[1]), vec![("Size", "M")]);
        assert!(find_stale_variants(&fewer, &regenerated).is_empty());
    }

    #[test]
    fn test_renaming_marks_variants_stale() {
        let variations = size_and_color();
        let variants = generate_variants(&variations).unwrap();
        assert!(find_stale_variants(&variations, &variants).is_empty());

        let renamed = update_variation(&variations, 0, VariationField::Name, "Dimension").unwrap();
        assert_eq!(find_stale_variants(&renamed, &variants), vec![0, 1]);

        let no_m = remove_variation_item(&variations, 0, 1).unwrap();
        assert_eq!(find_stale_variants(&no_m, &variants), vec![1]);
    }

    #[test]
    fn test_update_variant_price() {
        let variants = generate_variants(&size_and_color()).unwrap();

        let priced = update_variant_price(&variants, 1, "25.50").unwrap();
        assert_eq!(priced[1].additional_price, Amount::parse("25.5").unwrap());
        assert_eq!(priced[0].additional_price, Amount::ZERO);
        assert_eq!(variants[1].additional_price, Amount::ZERO);
    }

    #[test]
    fn test_update_variant_price_rejects_negative() {
        let variants = generate_variants(&size_and_color()).unwrap();
        let err = update_variant_price(&variants, 0, "-5").unwrap_err();
        assert!(err.is_invalid_number());
    }

    #[test]
    fn test_update_variant_price_rejects_garbage() {
        let variants = generate_variants(&size_and_color()).unwrap();
        for input in ["", "abc", "NaN", "  "] {
            assert!(
                update_variant_price(&variants, 0, input)
                    .unwrap_err()
                    .is_invalid_number(),
                "{input:?} should be rejected"
            );
        }
        assert!(
            update_variant_price(&variants, 9, "5")
                .unwrap_err()
                .is_index_out_of_range()
        );
    }

    #[test]
    fn test_remove_variant() {
        let variants = generate_variants(&size_and_color()).unwrap();
        let remaining = remove_variant(&variants, 0).unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(details(&remaining[0]), vec![("Size", "M"), ("Color", "Red")]);
        assert!(remove_variant(&remaining, 1).unwrap_err().is_index_out_of_range());
    }

    #[test]
    fn test_variation_field_from_str() {
        assert_eq!("name".parse::<VariationField>().unwrap(), VariationField::Name);
        assert_eq!("unit".parse::<VariationField>().unwrap(), VariationField::Unit);
        assert_eq!(
            "colour".parse::<VariationField>().unwrap_err(),
            EditError::UnknownField("colour".to_string())
        );
    }

    #[test]
    fn test_variant_wire_format() {
        let variants = generate_variants(&[Variation::new("Size", ["S"])]).unwrap();
        let json = serde_json::to_value(&variants).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{
                "variantDetails": [{"variationName": "Size", "variationItemValue": "S"}],
                "additionalPrice": 0.0
            }])
        );
    }
}
