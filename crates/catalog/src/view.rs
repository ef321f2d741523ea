//! Transport-ready views.
//!
//! Field names are part of the HTTP contract consumed by the POS frontend.

use serde::{Deserialize, Serialize};

/// Product tile as shown on the POS menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductView {
    pub product_id: String,
    pub product_name: String,
    pub category_id: String,
    pub category_name: String,
    pub category_image: Option<String>,
    pub grid_column_count: i32,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub is_active: bool,
    pub price_value: f64,
    /// Whether the POS should open the modifier picker for this product.
    pub has_modifiers: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModifierView {
    pub modifier_id: String,
    pub modifier_name: String,
    pub extra_price: f64,
}

/// Modifier group with its modifiers, ordered by modifier id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModifierGroupView {
    pub group_id: String,
    pub group_name: String,
    pub is_multi_select: bool,
    pub is_required: bool,
    pub modifiers: Vec<ModifierView>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryView {
    pub category_id: String,
    pub category_name: String,
    pub image_url: Option<String>,
    pub grid_column_count: i32,
}

/// Result of toggling a product's active flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductStatusView {
    pub product_id: String,
    pub is_active: bool,
}
