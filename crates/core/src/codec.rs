//! Backend product representation and the conversions to and from
//! [`ProductForm`].
//!
//! The backend nests variant details under the variation item they were built
//! from and wraps tags in objects; the form keeps the flat, denormalized shape
//! the editor works with.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use crate::category::{Category, resolve_category};
use crate::product::{Attribute, BasicInfo, ProductForm, ProductImage};
use crate::types::{
    Amount, CategoryId, ImageId, PricingType, ProductId, ProductVariantDetailId, ProductVariantId,
};
use crate::variation::{Variant, VariantDetail, Variation};

/// Treat an explicit `null` like a missing field.
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

const fn default_min_order_quantity() -> u32 {
    1
}

const fn default_true() -> bool {
    true
}

/// A product as returned by `GET /api/product/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    pub product_id: ProductId,
    pub name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub description: String,
    #[serde(default, deserialize_with = "nullable")]
    pub sku: String,
    pub base_price: Amount,
    #[serde(default = "default_min_order_quantity")]
    pub min_order_quantity: u32,
    #[serde(default)]
    pub pricing_type: PricingType,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    #[serde(default)]
    pub discount_start: Option<Amount>,
    #[serde(default)]
    pub discount_end: Option<Amount>,
    #[serde(default)]
    pub max_discount_percentage: Option<Decimal>,
    #[serde(default, deserialize_with = "nullable")]
    pub tags: Vec<TagRecord>,
    #[serde(default, deserialize_with = "nullable")]
    pub attributes: Vec<Attribute>,
    #[serde(default, deserialize_with = "nullable")]
    pub variations: Vec<Variation>,
    #[serde(default, deserialize_with = "nullable")]
    pub variants: Vec<VariantRecord>,
    #[serde(default, deserialize_with = "nullable")]
    pub images: Vec<ProductImage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TagRecord {
    pub tag: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantRecord {
    #[serde(default)]
    pub product_variant_id: Option<ProductVariantId>,
    #[serde(default)]
    pub additional_price: Amount,
    #[serde(default, deserialize_with = "nullable")]
    pub variant_details: Vec<VariantDetailRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantDetailRecord {
    #[serde(default)]
    pub product_variant_detail_id: Option<ProductVariantDetailId>,
    #[serde(default)]
    pub variation_item: Option<VariationItemRef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VariationItemRef {
    #[serde(default, deserialize_with = "nullable")]
    pub value: String,
    #[serde(default)]
    pub variation: Option<VariationRef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VariationRef {
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
}

impl From<VariantDetailRecord> for VariantDetail {
    fn from(record: VariantDetailRecord) -> Self {
        let (variation_name, variation_item_value) = record
            .variation_item
            .map(|item| {
                let name = item.variation.map(|v| v.name).unwrap_or_default();
                (name, item.value)
            })
            .unwrap_or_default();

        Self {
            product_variant_detail_id: record.product_variant_detail_id,
            variation_name,
            variation_item_value,
        }
    }
}

impl From<VariantRecord> for Variant {
    fn from(record: VariantRecord) -> Self {
        Self {
            product_variant_id: record.product_variant_id,
            variant_details: record.variant_details.into_iter().map(Into::into).collect(),
            additional_price: record.additional_price,
        }
    }
}

impl ProductForm {
    /// Build the editor state for a product loaded from the backend.
    ///
    /// `categories` is the full category list; it is used to split the
    /// product's category into the category / sub-category pair.
    #[must_use]
    pub fn from_record(record: ProductRecord, categories: &[Category]) -> Self {
        let selection = resolve_category(categories, record.category_id);

        Self {
            basic: BasicInfo {
                name: record.name,
                description: record.description,
                sku: record.sku,
                base_price: record.base_price,
                min_order_quantity: record.min_order_quantity,
                pricing_type: record.pricing_type,
                is_active: record.is_active,
                category_id: selection.category_id,
                sub_category_id: selection.sub_category_id,
                discount_start: record.discount_start,
                discount_end: record.discount_end,
                max_discount_percentage: record.max_discount_percentage,
            },
            tags: record.tags.into_iter().map(|t| t.tag).collect(),
            attributes: record.attributes,
            variations: record.variations,
            variants: record.variants.into_iter().map(Into::into).collect(),
            images: record.images,
        }
    }
}

/// Body of `PUT /api/product/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    pub product_id: ProductId,
    pub name: String,
    pub description: String,
    pub sku: String,
    pub base_price: Amount,
    pub min_order_quantity: u32,
    pub pricing_type: PricingType,
    pub is_active: bool,
    pub category_id: Option<CategoryId>,
    pub discount_start: Option<Amount>,
    pub discount_end: Option<Amount>,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub max_discount_percentage: Option<Decimal>,
    pub tags: Vec<String>,
    pub attributes: Vec<Attribute>,
    pub variations: Vec<Variation>,
    pub variants: Vec<Variant>,
    /// Existing images to keep.
    pub images: Vec<ImageId>,
}

impl ProductPayload {
    /// Serialize the editor state for saving.
    #[must_use]
    pub fn from_form(product_id: ProductId, form: &ProductForm) -> Self {
        let basic = &form.basic;
        Self {
            product_id,
            name: basic.name.clone(),
            description: basic.description.clone(),
            sku: basic.sku.clone(),
            base_price: basic.base_price,
            min_order_quantity: basic.min_order_quantity,
            pricing_type: basic.pricing_type,
            is_active: basic.is_active,
            category_id: basic.effective_category_id(),
            discount_start: basic.discount_start,
            discount_end: basic.discount_end,
            max_discount_percentage: basic.max_discount_percentage,
            tags: form.tags.clone(),
            attributes: form.attributes.clone(),
            variations: form.variations.clone(),
            variants: form.variants.clone(),
            images: form.images.iter().map(|img| img.image_id).collect(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::types::{AttributeId, VariationId, VariationItemId};
    use serde_json::json;

    fn categories() -> Vec<Category> {
        serde_json::from_value(json!([
            {"categoryId": 1, "name": "Banners"},
            {"categoryId": 10, "name": "PVC Banners", "parentCategoryId": 1}
        ]))
        .unwrap()
    }

    fn record_json() -> serde_json::Value {
        json!({
            "productId": 7,
            "name": "PVC Banner",
            "description": null,
            "sku": "BN-007",
            "basePrice": "35.50",
            "minOrderQuantity": 1,
            "pricingType": "square-feet",
            "isActive": true,
            "categoryId": 10,
            "discountStart": 20,
            "discountEnd": "100",
            "maxDiscountPercentage": 12.5,
            "tags": [{"tag": "banner"}, {"tag": "outdoor"}],
            "attributes": [
                {"attributeId": 3, "property": "Material", "description": "PVC"}
            ],
            "variations": [{
                "variationId": 5,
                "name": "Finish",
                "unit": "",
                "variationItems": [
                    {"variationItemId": 50, "value": "Matte"},
                    {"variationItemId": 51, "value": "Gloss"}
                ]
            }],
            "variants": [{
                "productVariantId": 70,
                "additionalPrice": "5",
                "variantDetails": [{
                    "productVariantDetailId": 700,
                    "variationItem": {"value": "Gloss", "variation": {"name": "Finish"}}
                }]
            }],
            "images": [{"imageId": 9, "imageName": "pvc.jpg"}]
        })
    }

    #[test]
    fn test_from_record() {
        let record: ProductRecord = serde_json::from_value(record_json()).unwrap();
        let form = ProductForm::from_record(record, &categories());

        assert_eq!(form.basic.name, "PVC Banner");
        assert_eq!(form.basic.description, "");
        assert_eq!(form.basic.base_price, Amount::parse("35.5").unwrap());
        assert_eq!(form.basic.pricing_type, PricingType::SquareFeet);
        assert_eq!(form.basic.category_id, Some(CategoryId::new(1)));
        assert_eq!(form.basic.sub_category_id, Some(CategoryId::new(10)));
        assert_eq!(form.basic.discount_end, Some(Amount::from_units(100)));
        assert_eq!(form.tags, ["banner", "outdoor"]);
        assert_eq!(form.attributes[0].attribute_id, Some(AttributeId::new(3)));
        assert_eq!(form.variations[0].variation_id, Some(VariationId::new(5)));
        assert_eq!(
            form.variations[0].variation_items[1].variation_item_id,
            Some(VariationItemId::new(51))
        );

        let variant = &form.variants[0];
        assert_eq!(variant.product_variant_id, Some(ProductVariantId::new(70)));
        assert_eq!(variant.additional_price, Amount::from_units(5));
        assert_eq!(variant.label(), "Finish: Gloss");
        assert_eq!(
            variant.variant_details[0].product_variant_detail_id,
            Some(ProductVariantDetailId::new(700))
        );
        assert!(form.stale_variants().is_empty());
    }

    #[test]
    fn test_minimal_record_uses_defaults() {
        let record: ProductRecord = serde_json::from_value(json!({
            "productId": 1,
            "name": "Sticker",
            "basePrice": 3,
            "tags": null,
            "variants": null
        }))
        .unwrap();
        let form = ProductForm::from_record(record, &[]);

        assert_eq!(form.basic.min_order_quantity, 1);
        assert_eq!(form.basic.pricing_type, PricingType::Flat);
        assert!(form.basic.is_active);
        assert!(form.tags.is_empty());
        assert!(form.variants.is_empty());
    }

    #[test]
    fn test_null_nested_fields() {
        let record: ProductRecord = serde_json::from_value(json!({
            "productId": 2,
            "name": "Vinyl Sticker",
            "basePrice": 3,
            "attributes": [{"property": "Finish", "description": null}],
            "variations": [
                {"name": "Size", "unit": null, "variationItems": [{"value": "A4"}]},
                {"name": "Shape", "unit": "", "variationItems": null}
            ]
        }))
        .unwrap();
        let form = ProductForm::from_record(record, &[]);

        assert_eq!(form.attributes[0].description, "");
        assert_eq!(form.variations[0].unit, "");
        assert_eq!(form.variations[0].variation_items.len(), 1);
        assert!(form.variations[1].variation_items.is_empty());
    }

    #[test]
    fn test_payload_shape() {
        let record: ProductRecord = serde_json::from_value(record_json()).unwrap();
        let mut form = ProductForm::from_record(record, &categories());
        form.variations[0]
            .variation_items
            .push(crate::variation::VariationItem::new("Satin"));

        let payload = ProductPayload::from_form(ProductId::new(7), &form);
        let value = serde_json::to_value(&payload).unwrap();

        assert_eq!(value["productId"], 7);
        assert_eq!(value["categoryId"], 10);
        assert_eq!(value["basePrice"], 35.5);
        assert_eq!(value["pricingType"], "square-feet");
        assert_eq!(value["maxDiscountPercentage"], 12.5);
        assert_eq!(value["tags"], json!(["banner", "outdoor"]));
        assert_eq!(value["images"], json!([9]));
        assert_eq!(
            value["attributes"][0],
            json!({"attributeId": 3, "property": "Material", "description": "PVC"})
        );

        // New items carry no id.
        assert_eq!(
            value["variations"][0]["variationItems"][2],
            json!({"value": "Satin"})
        );
        assert_eq!(
            value["variants"][0],
            json!({
                "productVariantId": 70,
                "variantDetails": [{
                    "productVariantDetailId": 700,
                    "variationName": "Finish",
                    "variationItemValue": "Gloss"
                }],
                "additionalPrice": 5.0
            })
        );
    }

    #[test]
    fn test_payload_without_sub_category() {
        let mut form = ProductForm::default();
        form.basic.category_id = Some(CategoryId::new(1));
        let payload = ProductPayload::from_form(ProductId::new(2), &form);
        assert_eq!(payload.category_id, Some(CategoryId::new(1)));

        form.basic.category_id = None;
        let value = serde_json::to_value(ProductPayload::from_form(ProductId::new(2), &form)).unwrap();
        assert!(value["categoryId"].is_null());
        assert!(value["maxDiscountPercentage"].is_null());
    }
}
