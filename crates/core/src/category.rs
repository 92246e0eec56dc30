//! Product categories and the two-level category picker.

use serde::{Deserialize, Serialize};

use crate::types::CategoryId;

/// A product category as returned by `GET /api/product-category`.
///
/// The backend returns a flat list in which sub-categories carry a
/// `parentCategoryId`; some responses also nest them under `subCategories`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub category_id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub parent_category_id: Option<CategoryId>,
    #[serde(default)]
    pub sub_categories: Vec<Self>,
}

/// The pair of ids shown in the category and sub-category dropdowns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CategorySelection {
    pub category_id: Option<CategoryId>,
    pub sub_category_id: Option<CategoryId>,
}

/// Find a category anywhere in `categories`, including nested sub-categories.
#[must_use]
pub fn find_category(categories: &[Category], id: CategoryId) -> Option<&Category> {
    categories.iter().find_map(|c| {
        if c.category_id == id {
            Some(c)
        } else {
            find_category(&c.sub_categories, id)
        }
    })
}

/// Categories without a parent, for the first dropdown.
pub fn top_level(categories: &[Category]) -> impl Iterator<Item = &Category> {
    categories.iter().filter(|c| c.parent_category_id.is_none())
}

/// Children of `parent`, whether listed flat or nested.
#[must_use]
pub fn sub_categories_of(categories: &[Category], parent: CategoryId) -> Vec<&Category> {
    let mut subs: Vec<&Category> = categories
        .iter()
        .filter(|c| c.parent_category_id == Some(parent))
        .collect();

    if let Some(p) = find_category(categories, parent) {
        for nested in &p.sub_categories {
            if !subs.iter().any(|s| s.category_id == nested.category_id) {
                subs.push(nested);
            }
        }
    }
    subs
}

/// Split a product's stored category into dropdown selections.
///
/// A product stores a single category id. When that category has a parent,
/// the parent goes in the first dropdown and the product's own category in
/// the second. Unknown ids are kept as the top-level selection.
#[must_use]
pub fn resolve_category(categories: &[Category], id: Option<CategoryId>) -> CategorySelection {
    let Some(id) = id else {
        return CategorySelection::default();
    };

    let parent = find_category(categories, id)
        .and_then(|c| c.parent_category_id)
        .or_else(|| nested_parent(categories, id));

    match parent {
        Some(parent) => CategorySelection {
            category_id: Some(parent),
            sub_category_id: Some(id),
        },
        None => CategorySelection {
            category_id: Some(id),
            sub_category_id: None,
        },
    }
}

fn nested_parent(categories: &[Category], id: CategoryId) -> Option<CategoryId> {
    categories.iter().find_map(|c| {
        if c.sub_categories.iter().any(|s| s.category_id == id) {
            Some(c.category_id)
        } else {
            nested_parent(&c.sub_categories, id)
        }
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn catalog() -> Vec<Category> {
        serde_json::from_value(serde_json::json!([
            {"categoryId": 1, "name": "Banners", "parentCategoryId": null},
            {"categoryId": 2, "name": "Stickers"},
            {"categoryId": 10, "name": "PVC Banners", "parentCategoryId": 1},
            {"categoryId": 3, "name": "Signage", "subCategories": [
                {"categoryId": 30, "name": "Acrylic", "parentCategoryId": 3},
                {"categoryId": 31, "name": "LED"}
            ]}
        ]))
        .unwrap()
    }

    #[test]
    fn test_resolve_sub_category() {
        let cats = catalog();
        assert_eq!(
            resolve_category(&cats, Some(CategoryId::new(10))),
            CategorySelection {
                category_id: Some(CategoryId::new(1)),
                sub_category_id: Some(CategoryId::new(10)),
            }
        );
        // Nested without an explicit parent id.
        assert_eq!(
            resolve_category(&cats, Some(CategoryId::new(31))).category_id,
            Some(CategoryId::new(3))
        );
    }

    #[test]
    fn test_resolve_top_level_and_unknown() {
        let cats = catalog();
        assert_eq!(
            resolve_category(&cats, Some(CategoryId::new(2))),
            CategorySelection {
                category_id: Some(CategoryId::new(2)),
                sub_category_id: None,
            }
        );
        assert_eq!(
            resolve_category(&cats, Some(CategoryId::new(99))).category_id,
            Some(CategoryId::new(99))
        );
        assert_eq!(resolve_category(&cats, None), CategorySelection::default());
    }

    #[test]
    fn test_dropdown_lists() {
        let cats = catalog();
        let tops: Vec<_> = top_level(&cats).map(|c| c.name.as_str()).collect();
        assert_eq!(tops, ["Banners", "Stickers", "Signage"]);

        let subs: Vec<_> = sub_categories_of(&cats, CategoryId::new(3))
            .into_iter()
            .map(|c| c.category_id.as_i32())
            .collect();
        assert_eq!(subs, [30, 31]);
    }
}
