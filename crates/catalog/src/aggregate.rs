//! Row sets → views.
//!
//! Ordering is the store's: these functions never re-sort, they only reshape
//! and normalize.

use std::collections::HashMap;

use crate::normalize::{Truthy, grid_columns, id_string, parse_amount, try_parse_amount};
use crate::rows::{CategoryRow, ModifierRow, ProductListingRow};
use crate::view::{CategoryView, ModifierGroupView, ModifierView, ProductView};

/// Normalize the active product listing.
pub fn product_views(rows: Vec<ProductListingRow>) -> Vec<ProductView> {
    rows.into_iter()
        .map(|row| ProductView {
            product_id: id_string(row.product_id),
            product_name: row.product_name,
            category_id: id_string(row.category_id),
            category_name: row.category_name,
            category_image: row.category_image,
            grid_column_count: grid_columns(row.grid_column_count),
            description: row.description,
            image_url: row.image_url,
            is_active: row.is_active.truthy(),
            price_value: parse_amount(row.price_value.as_deref()),
            has_modifiers: row.has_modifiers.truthy(),
        })
        .collect()
}

/// Group flat modifier rows under their modifier group.
///
/// Groups come out in first-seen order; a group id seen again later (even
/// non-adjacent) is merged into the existing entry, so the output never
/// contains duplicate groups.
pub fn modifier_group_views(rows: Vec<ModifierRow>) -> Vec<ModifierGroupView> {
    let mut groups: Vec<ModifierGroupView> = Vec::new();
    let mut index: HashMap<i64, usize> = HashMap::new();

    for row in rows {
        let slot = *index.entry(row.group_id).or_insert_with(|| {
            groups.push(ModifierGroupView {
                group_id: id_string(row.group_id),
                group_name: row.group_name.clone(),
                is_multi_select: row.is_multi_select.truthy(),
                is_required: row.is_required.truthy(),
                modifiers: Vec::new(),
            });
            groups.len() - 1
        });

        groups[slot].modifiers.push(ModifierView {
            modifier_id: id_string(row.modifier_id),
            modifier_name: row.modifier_name,
            extra_price: extra_price(row.modifier_id, row.extra_price.as_deref()),
        });
    }

    groups
}

/// Normalize the category listing.
pub fn category_views(rows: Vec<CategoryRow>) -> Vec<CategoryView> {
    rows.into_iter()
        .map(|row| CategoryView {
            category_id: id_string(row.category_id),
            category_name: row.category_name,
            image_url: row.image_url,
            grid_column_count: grid_columns(row.grid_column_count),
        })
        .collect()
}

fn extra_price(modifier_id: i64, raw: Option<&str>) -> f64 {
    match raw {
        Some(text) if try_parse_amount(text).is_none() => {
            tracing::warn!(
                modifier_id,
                extra_price = text,
                "malformed modifier extra price; using 0"
            );
            0.0
        }
        _ => parse_amount(raw),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing_row(product_id: i64, category_id: i64) -> ProductListingRow {
        ProductListingRow {
            product_id,
            product_name: format!("Product {product_id}"),
            category_id,
            category_name: format!("Category {category_id}"),
            category_image: None,
            grid_column_count: None,
            description: None,
            image_url: None,
            is_active: 1,
            price_value: Some("50000.00".to_string()),
            has_modifiers: false,
        }
    }

    fn modifier_row(group_id: i64, modifier_id: i64, extra: &str) -> ModifierRow {
        ModifierRow {
            group_id,
            group_name: format!("Group {group_id}"),
            is_multi_select: 0,
            is_required: 1,
            modifier_id,
            modifier_name: format!("Modifier {modifier_id}"),
            extra_price: Some(extra.to_string()),
        }
    }

    #[test]
    fn product_views_normalize_ids_flags_and_price() {
        let mut row = listing_row(1, 3);
        row.has_modifiers = true;
        let views = product_views(vec![row]);

        assert_eq!(views.len(), 1);
        let v = &views[0];
        assert_eq!(v.product_id, "1");
        assert_eq!(v.category_id, "3");
        assert!(v.is_active);
        assert!(v.has_modifiers);
        assert_eq!(v.price_value, 50000.0);
        assert_eq!(v.grid_column_count, 4);
    }

    #[test]
    fn missing_price_lists_as_zero() {
        let mut row = listing_row(2, 1);
        row.price_value = None;
        let views = product_views(vec![row]);
        assert_eq!(views[0].price_value, 0.0);
    }

    #[test]
    fn product_views_keep_store_order() {
        let rows = vec![listing_row(5, 1), listing_row(2, 1), listing_row(1, 2)];
        let ids: Vec<_> = product_views(rows).into_iter().map(|v| v.product_id).collect();
        assert_eq!(ids, vec!["5", "2", "1"]);
    }

    #[test]
    fn modifier_rows_group_by_group_id_in_first_seen_order() {
        let rows = vec![
            modifier_row(1, 10, "0"),
            modifier_row(1, 11, "5000"),
            modifier_row(2, 20, "3000"),
        ];
        let groups = modifier_group_views(rows);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].group_id, "1");
        assert!(groups[0].is_required);
        assert!(!groups[0].is_multi_select);
        let extras: Vec<_> = groups[0].modifiers.iter().map(|m| m.extra_price).collect();
        assert_eq!(extras, vec![0.0, 5000.0]);
        assert_eq!(groups[1].modifiers[0].modifier_id, "20");
    }

    #[test]
    fn repeated_group_ids_never_duplicate_groups() {
        let rows = vec![
            modifier_row(1, 10, "0"),
            modifier_row(2, 20, "0"),
            modifier_row(1, 12, "0"),
        ];
        let groups = modifier_group_views(rows);

        assert_eq!(groups.len(), 2);
        let ids: Vec<_> = groups[0].modifiers.iter().map(|m| m.modifier_id.as_str()).collect();
        assert_eq!(ids, vec!["10", "12"]);
    }

    #[test]
    fn malformed_extra_price_falls_back_to_zero() {
        let groups = modifier_group_views(vec![modifier_row(1, 10, "n/a")]);
        assert_eq!(groups[0].modifiers[0].extra_price, 0.0);
    }

    #[test]
    fn empty_rows_yield_no_groups() {
        assert!(modifier_group_views(Vec::new()).is_empty());
    }

    #[test]
    fn category_views_apply_grid_default() {
        let views = category_views(vec![
            CategoryRow {
                category_id: 1,
                category_name: "Coffee".to_string(),
                image_url: Some("coffee.png".to_string()),
                grid_column_count: Some(0),
            },
            CategoryRow {
                category_id: 2,
                category_name: "Tea".to_string(),
                image_url: None,
                grid_column_count: Some(3),
            },
        ]);
        assert_eq!(views[0].grid_column_count, 4);
        assert_eq!(views[1].grid_column_count, 3);
    }

    #[test]
    fn product_view_serializes_with_contract_field_names() {
        let json = serde_json::to_value(&product_views(vec![listing_row(1, 1)])[0]).unwrap();
        for key in [
            "product_id",
            "product_name",
            "category_id",
            "category_name",
            "category_image",
            "grid_column_count",
            "description",
            "image_url",
            "is_active",
            "price_value",
            "has_modifiers",
        ] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
    }
}
