//! Flat row shapes returned by the catalog store.
//!
//! Fields keep the store's own types: `BIGINT` keys, `SMALLINT` flags and
//! `NUMERIC` amounts read back as text. Converting them is the job of
//! [`crate::aggregate`].

/// One row of the active product listing (product ⋈ category ⟕ current price).
#[derive(Debug, Clone, PartialEq)]
pub struct ProductListingRow {
    pub product_id: i64,
    pub product_name: String,
    pub category_id: i64,
    pub category_name: String,
    pub category_image: Option<String>,
    pub grid_column_count: Option<i32>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub is_active: i16,
    /// `None` when the product has no current price.
    pub price_value: Option<String>,
    pub has_modifiers: bool,
}

/// One row of the modifier resolution (modifier group ⋈ modifier).
#[derive(Debug, Clone, PartialEq)]
pub struct ModifierRow {
    pub group_id: i64,
    pub group_name: String,
    pub is_multi_select: i16,
    pub is_required: i16,
    pub modifier_id: i64,
    pub modifier_name: String,
    pub extra_price: Option<String>,
}

/// One row of the category listing.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryRow {
    pub category_id: i64,
    pub category_name: String,
    pub image_url: Option<String>,
    pub grid_column_count: Option<i32>,
}
