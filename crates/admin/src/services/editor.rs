//! Product editor service.
//!
//! Holds one product's form while it is being edited, applies
//! [`ProductMessage`]s through the core reducer and saves it back.

use signshop_core::category::{sub_categories_of, top_level};
use signshop_core::{
    Amount, Category, Collection, EditError, Measure, PriceQuote, ProductForm, ProductId,
    ProductMessage, ProductPayload, TieredPricing,
};
use tracing::instrument;

use crate::alert::Alert;
use crate::api::ApiClient;
use crate::credentials::Credentials;
use crate::error::AppError;

const SAVED_MESSAGE: &str = "Product updated successfully";

/// An open product-edit session.
#[derive(Debug, Clone)]
pub struct ProductEditor {
    client: ApiClient,
    product_id: ProductId,
    categories: Vec<Category>,
    form: ProductForm,
}

impl ProductEditor {
    /// Load categories, then the product, and build the form.
    ///
    /// Categories come first because splitting the product's category into
    /// category and sub-category needs the full list.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Api`] if either request fails.
    #[instrument(skip_all, fields(product_id = %product_id))]
    pub async fn load(
        client: ApiClient,
        product_id: ProductId,
        credentials: &Credentials,
    ) -> Result<Self, AppError> {
        let categories = client.list_categories().await?;
        let record = client.get_product(product_id, credentials).await?;
        let form = ProductForm::from_record(record, &categories);

        tracing::info!(
            variations = form.variations.len(),
            variants = form.variants.len(),
            "Product loaded for editing"
        );

        Ok(Self {
            client,
            product_id,
            categories,
            form,
        })
    }

    /// Start a session from an already-built form.
    #[must_use]
    pub const fn from_parts(
        client: ApiClient,
        product_id: ProductId,
        categories: Vec<Category>,
        form: ProductForm,
    ) -> Self {
        Self {
            client,
            product_id,
            categories,
            form,
        }
    }

    #[must_use]
    pub const fn product_id(&self) -> ProductId {
        self.product_id
    }

    #[must_use]
    pub const fn form(&self) -> &ProductForm {
        &self.form
    }

    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Options for the category dropdown.
    #[must_use]
    pub fn category_choices(&self) -> Vec<&Category> {
        top_level(&self.categories).collect()
    }

    /// Options for the sub-category dropdown under the selected category.
    #[must_use]
    pub fn sub_category_choices(&self) -> Vec<&Category> {
        self.form
            .basic
            .category_id
            .map(|id| sub_categories_of(&self.categories, id))
            .unwrap_or_default()
    }

    /// Price `measure` with the form's current pricing, adding the surcharge
    /// of variant `variant` when one is given.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::IndexOutOfRange`] if `variant` is not in bounds.
    pub fn quote(
        &self,
        variant: Option<usize>,
        measure: Measure,
    ) -> Result<PriceQuote, EditError> {
        let additional_price = match variant {
            None => Amount::ZERO,
            Some(index) => {
                self.form
                    .variants
                    .get(index)
                    .ok_or(EditError::IndexOutOfRange {
                        collection: Collection::Variants,
                        index,
                        len: self.form.variants.len(),
                    })?
                    .additional_price
            }
        };
        Ok(TieredPricing::from(&self.form.basic).quote(additional_price, measure))
    }

    /// Apply one message. On error the form is left as it was.
    ///
    /// # Errors
    ///
    /// Returns the reducer's [`EditError`].
    pub fn apply(&mut self, message: ProductMessage) -> Result<(), EditError> {
        self.form = self.form.update(message)?;
        Ok(())
    }

    /// Apply several messages atomically: either all apply or none do.
    ///
    /// # Errors
    ///
    /// Returns the first [`EditError`].
    pub fn apply_all(
        &mut self,
        messages: impl IntoIterator<Item = ProductMessage>,
    ) -> Result<(), EditError> {
        self.form = self.form.update_all(messages)?;
        Ok(())
    }

    /// The body that [`save`](Self::save) would send.
    #[must_use]
    pub fn payload(&self) -> ProductPayload {
        ProductPayload::from_form(self.product_id, &self.form)
    }

    /// Validate and save the form.
    ///
    /// The local form is never modified here, so a failed save leaves it
    /// exactly as it was for the operator to retry.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] before sending anything if the form is
    /// incomplete, or [`AppError::Api`] if the backend rejects the save.
    #[instrument(skip(self, credentials), fields(product_id = %self.product_id))]
    pub async fn save(&self, credentials: &Credentials) -> Result<Alert, AppError> {
        self.form.validate()?;

        let stale = self.form.stale_variants();
        if !stale.is_empty() {
            tracing::warn!(
                stale = stale.len(),
                "Saving variants that no longer match the current variations"
            );
        }

        let payload = self.payload();
        let response = self
            .client
            .update_product(self.product_id, &payload, credentials)
            .await?;

        Ok(Alert::success(
            response
                .message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| SAVED_MESSAGE.to_string()),
        ))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use super::*;
    use signshop_core::BasicField;

    fn editor() -> ProductEditor {
        let client = ApiClient::with_base_url(
            "http://127.0.0.1:9".parse().unwrap(),
            Duration::from_secs(1),
        )
        .unwrap();
        ProductEditor::from_parts(client, ProductId::new(3), Vec::new(), ProductForm::default())
    }

    #[test]
    fn test_apply_updates_form() {
        let mut editor = editor();
        editor
            .apply(ProductMessage::field(BasicField::Name, "Acrylic Sign"))
            .unwrap();
        assert_eq!(editor.form().basic.name, "Acrylic Sign");
        assert_eq!(editor.payload().name, "Acrylic Sign");
    }

    #[test]
    fn test_apply_all_is_atomic() {
        let mut editor = editor();
        let err = editor
            .apply_all([
                ProductMessage::AddTag,
                ProductMessage::RemoveTag { index: 4 },
            ])
            .unwrap_err();
        assert!(matches!(err, EditError::IndexOutOfRange { .. }));
        assert!(editor.form().tags.is_empty());
    }

    #[test]
    fn test_quote_checks_variant_index() {
        let mut editor = editor();
        editor
            .apply(ProductMessage::field(BasicField::BasePrice, "10"))
            .unwrap();

        let quote = editor.quote(None, Measure::Quantity(3)).unwrap();
        assert_eq!(quote.final_price, Amount::from_units(30).value());

        let err = editor.quote(Some(0), Measure::Quantity(3)).unwrap_err();
        assert!(matches!(
            err,
            EditError::IndexOutOfRange {
                collection: Collection::Variants,
                index: 0,
                len: 0
            }
        ));
    }

    #[tokio::test]
    async fn test_save_validates_before_sending() {
        // Nothing listens on the discard port; validation must fail first.
        let editor = editor();
        let err = editor
            .save(&Credentials::bearer("t0k3n-abc"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(editor.form(), &ProductForm::default());
    }
}
