//! Product commands.
//!
//! Every command loads the product into a [`ProductEditor`], applies its
//! messages and prints the resulting save payload. With `--save` the payload
//! is sent to the backend.
//!
//! # Environment Variables
//!
//! - `SIGNSHOP_API_TOKEN` - required; product endpoints are authenticated

use std::path::Path;

use signshop_admin::{AdminConfig, ApiClient, AppError, Credentials, ProductEditor};
use signshop_core::{AttributeRow, BasicField, Measure, ProductId, ProductMessage};
use tracing::{info, warn};

use super::{print_json, read_json};

async fn open(id: ProductId) -> Result<(ProductEditor, Credentials), Box<dyn std::error::Error>> {
    let config = AdminConfig::from_env()?;
    let credentials = config.require_credentials()?;
    let client = ApiClient::new(&config)?;

    info!(product_id = %id, base_url = %client.base_url(), "Loading product");
    let editor = ProductEditor::load(client, id, &credentials)
        .await
        .map_err(|e| e.alert().to_string())?;
    Ok((editor, credentials))
}

async fn apply_and_finish(
    mut editor: ProductEditor,
    credentials: &Credentials,
    messages: Vec<ProductMessage>,
    save: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    editor
        .apply_all(messages)
        .map_err(|e| AppError::from(e).alert().to_string())?;

    let stale = editor.form().stale_variants();
    if !stale.is_empty() {
        warn!(
            stale = ?stale,
            "Some variants no longer match the variations; run `product regenerate`"
        );
    }

    print_json(&editor.payload())?;

    if save {
        let alert = editor
            .save(credentials)
            .await
            .map_err(|e| e.alert().to_string())?;
        info!("{alert}");
    }
    Ok(())
}

/// Print a product's save payload.
///
/// # Errors
///
/// Returns an error if configuration is incomplete or loading fails.
pub async fn show(id: ProductId) -> Result<(), Box<dyn std::error::Error>> {
    let (editor, credentials) = open(id).await?;
    apply_and_finish(editor, &credentials, Vec::new(), false).await
}

/// Regenerate the variant list from the current variations.
///
/// # Errors
///
/// Returns an error if loading fails, the variations are incomplete or the
/// save is rejected.
pub async fn regenerate(id: ProductId, save: bool) -> Result<(), Box<dyn std::error::Error>> {
    let (editor, credentials) = open(id).await?;
    let before = editor.form().variants.len();
    info!(variants = before, "Regenerating variants; existing prices are reset");
    apply_and_finish(
        editor,
        &credentials,
        vec![ProductMessage::GenerateVariants],
        save,
    )
    .await
}

/// Set one basic-info field.
///
/// # Errors
///
/// Returns an error if the field is unknown or read-only, the value does not
/// parse, loading fails or the save is rejected.
pub async fn set_field(
    id: ProductId,
    field: &str,
    value: String,
    save: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let name: BasicField = field.parse()?;
    let (editor, credentials) = open(id).await?;
    apply_and_finish(
        editor,
        &credentials,
        vec![ProductMessage::FieldChanged { name, value }],
        save,
    )
    .await
}

/// Set one variant's additional price.
///
/// # Errors
///
/// Returns an error if the index is out of range, the price is not a
/// non-negative number, loading fails or the save is rejected.
pub async fn set_price(
    id: ProductId,
    index: usize,
    value: String,
    save: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let (editor, credentials) = open(id).await?;
    apply_and_finish(
        editor,
        &credentials,
        vec![ProductMessage::UpdateVariantPrice { index, value }],
        save,
    )
    .await
}

/// Append attribute rows from a spreadsheet export.
///
/// # Errors
///
/// Returns an error if the file cannot be read, loading fails or the save is
/// rejected.
pub async fn import_attributes(
    id: ProductId,
    file: &Path,
    save: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let rows: Vec<AttributeRow> = read_json(file).await?;
    info!(rows = rows.len(), path = %file.display(), "Importing attributes");

    let (editor, credentials) = open(id).await?;
    apply_and_finish(
        editor,
        &credentials,
        vec![ProductMessage::ImportAttributes(rows)],
        save,
    )
    .await
}

/// Price an order of this product with its tiered discount.
///
/// # Errors
///
/// Returns an error if loading fails or `variant` is out of range.
pub async fn quote(
    id: ProductId,
    variant: Option<usize>,
    measure: Measure,
) -> Result<(), Box<dyn std::error::Error>> {
    let (editor, _) = open(id).await?;
    let quote = editor
        .quote(variant, measure)
        .map_err(|e| AppError::from(e).alert().to_string())?;
    info!(
        units = %quote.units,
        discount_percentage = %quote.discount_percentage,
        "Quoted"
    );
    print_json(&quote)
}
