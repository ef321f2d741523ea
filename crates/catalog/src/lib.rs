//! Catalog domain module: products, categories, prices and modifier groups.
//!
//! This crate holds the read-side business rules of the POS menu as pure,
//! deterministic logic (no IO, no HTTP, no storage):
//!
//! - `model`: persisted entities as the store keeps them
//! - `rows`: flat row shapes returned by the catalog queries
//! - `view`: transport-ready shapes (string ids, boolean flags, defaulted numbers)
//! - `normalize`: the conversions between the two
//! - `aggregate`: row sets → nested views
//! - `price`: the "current price" rule

pub mod aggregate;
pub mod model;
pub mod normalize;
pub mod price;
pub mod rows;
pub mod view;

pub use aggregate::{category_views, modifier_group_views, product_views};
pub use model::{
    Category, CategoryModifierLink, Modifier, ModifierGroup, Price, Product, ProductModifierLink,
};
pub use normalize::{
    DEFAULT_GRID_COLUMNS, Truthy, grid_columns, id_string, parse_amount, try_parse_amount,
};
pub use price::{is_current, select_current_price};
pub use rows::{CategoryRow, ModifierRow, ProductListingRow};
pub use view::{CategoryView, ModifierGroupView, ModifierView, ProductStatusView, ProductView};
