//! Category listing.

use serde::Serialize;
use signshop_admin::{AdminConfig, ApiClient};
use signshop_core::CategoryId;
use signshop_core::category::{sub_categories_of, top_level};
use tracing::info;

use super::print_json;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CategoryNode<'a> {
    category_id: CategoryId,
    name: &'a str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    sub_categories: Vec<CategoryNode<'a>>,
}

/// Print the two-level category tree used by the product form.
///
/// # Errors
///
/// Returns an error if configuration is invalid or the request fails.
pub async fn list() -> Result<(), Box<dyn std::error::Error>> {
    let config = AdminConfig::from_env()?;
    let client = ApiClient::new(&config)?;
    let categories = client
        .list_categories()
        .await
        .map_err(|e| e.user_message())?;

    let tree: Vec<CategoryNode<'_>> = top_level(&categories)
        .map(|top| CategoryNode {
            category_id: top.category_id,
            name: &top.name,
            sub_categories: sub_categories_of(&categories, top.category_id)
                .into_iter()
                .map(|sub| CategoryNode {
                    category_id: sub.category_id,
                    name: &sub.name,
                    sub_categories: Vec::new(),
                })
                .collect(),
        })
        .collect();

    info!(top_level = tree.len(), total = categories.len(), "Categories loaded");
    print_json(&tree)
}
