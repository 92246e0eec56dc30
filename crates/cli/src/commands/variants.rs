//! Offline variant commands.
//!
//! Both commands read a JSON array of variations in the backend's shape:
//!
//! ```json
//! [{ "name": "Size", "unit": "in", "variationItems": [{ "value": "12x18" }] }]
//! ```

use std::path::Path;

use signshop_core::variation::{
    find_stale_variants, generate_variants, validate_for_generation, variant_count,
};
use signshop_core::{Variant, Variation};
use tracing::{info, warn};

use super::{print_json, read_json};

/// Print the variants `file`'s variations generate.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the variations are
/// incomplete.
pub async fn generate(file: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let variations: Vec<Variation> = read_json(file).await?;
    let variants = generate_variants(&variations)?;
    info!(
        variations = variations.len(),
        variants = variants.len(),
        "Generated variants"
    );
    print_json(&variants)
}

/// Report on `file`'s variations and, optionally, which of `variants_file`'s
/// variants they no longer produce.
///
/// # Errors
///
/// Returns an error if a file cannot be read, or if the variations cannot
/// generate variants.
pub async fn check(
    file: &Path,
    variants_file: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let variations: Vec<Variation> = read_json(file).await?;

    if let Some(path) = variants_file {
        let variants: Vec<Variant> = read_json(path).await?;
        let stale = find_stale_variants(&variations, &variants);
        if stale.is_empty() {
            info!(variants = variants.len(), "All variants match the variations");
        }
        for index in &stale {
            if let Some(variant) = variants.get(*index) {
                warn!(index, variant = %variant.label(), "Stale variant");
            }
        }
    }

    validate_for_generation(&variations)?;
    info!(
        count = variant_count(&variations).unwrap_or_default(),
        "Variations are complete; variants can be generated"
    );
    Ok(())
}
