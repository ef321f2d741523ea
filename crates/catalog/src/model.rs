//! Persisted catalog entities.
//!
//! These mirror the relational schema one-to-one. The aggregation layer never
//! builds them from rows; they exist so store implementations (and tests) can
//! describe a catalog in typed form.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use coffeetek_core::{CategoryId, ModifierGroupId, ModifierId, PriceId, ProductId};

/// Menu category (a tab on the POS screen).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub category_id: CategoryId,
    pub category_name: String,
    pub image_url: Option<String>,
    /// Number of tiles per row on the POS grid; `None` means "use the default".
    pub grid_column_count: Option<i32>,
}

/// Sellable product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub product_id: ProductId,
    pub product_name: String,
    pub category_id: CategoryId,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub is_active: bool,
}

/// Price row for a product.
///
/// Amounts are kept as the decimal text the store returns (`NUMERIC` read as
/// text) so no precision is lost before transport normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    pub price_id: PriceId,
    pub product_id: ProductId,
    pub price_value: String,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
}

/// Group of modifiers offered together (e.g. "Sugar level").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModifierGroup {
    pub group_id: ModifierGroupId,
    pub group_name: String,
    pub is_multi_select: bool,
    pub is_required: bool,
}

/// Single option inside a modifier group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifier {
    pub modifier_id: ModifierId,
    pub group_id: ModifierGroupId,
    pub modifier_name: String,
    /// Decimal text, non-negative.
    pub extra_price: String,
}

/// Direct product → modifier group association.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductModifierLink {
    pub product_id: ProductId,
    pub group_id: ModifierGroupId,
}

/// Category → modifier group association, inherited by every product in the category.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CategoryModifierLink {
    pub category_id: CategoryId,
    pub group_id: ModifierGroupId,
}
