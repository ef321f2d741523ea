use chrono::{DateTime, Utc};
use thiserror::Error;

use coffeetek_catalog::{CategoryRow, ModifierRow, ProductListingRow};
use coffeetek_core::{CategoryId, ModifierGroupId, ProductId};

/// Failure while talking to the catalog store.
///
/// Carries full detail for server-side logs; it is never shown to clients.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error in {operation}: {message}")]
    Database {
        operation: &'static str,
        message: String,
    },

    #[error("connection pool closed in {0}")]
    PoolClosed(&'static str),

    #[error("failed to decode row in {operation}: {message}")]
    Decode {
        operation: &'static str,
        message: String,
    },

    #[error("{operation} exceeded the query deadline of {timeout_ms} ms")]
    Timeout {
        operation: &'static str,
        timeout_ms: u64,
    },

    #[error("store unavailable in {operation}: {message}")]
    Unavailable {
        operation: &'static str,
        message: String,
    },
}

/// Read access (plus the single status update) over the catalog schema.
///
/// Implementations must bind every argument as a query parameter.
#[async_trait::async_trait]
pub trait CatalogStore: Send + Sync {
    /// Active products joined with their category and at most one current
    /// price as of `as_of`, ordered by category id then product id.
    async fn active_products(
        &self,
        as_of: DateTime<Utc>,
    ) -> Result<Vec<ProductListingRow>, StoreError>;

    /// Category of a product, `None` when the product does not exist.
    async fn product_category(
        &self,
        product_id: ProductId,
    ) -> Result<Option<CategoryId>, StoreError>;

    /// Modifier rows of every group linked to the product or to the category,
    /// each group at most once, ordered by group id then modifier id.
    async fn modifier_rows(
        &self,
        product_id: ProductId,
        category_id: CategoryId,
    ) -> Result<Vec<ModifierRow>, StoreError>;

    /// All categories ordered by id.
    async fn categories(&self) -> Result<Vec<CategoryRow>, StoreError>;

    /// Groups linked directly to the product (category links excluded), ascending.
    async fn product_group_ids(
        &self,
        product_id: ProductId,
    ) -> Result<Vec<ModifierGroupId>, StoreError>;

    /// Set the active flag; returns `false` when no such product exists.
    async fn set_product_active(
        &self,
        product_id: ProductId,
        is_active: bool,
    ) -> Result<bool, StoreError>;
}
