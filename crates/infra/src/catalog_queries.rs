//! Catalog query service: the product listing and modifier resolution
//! aggregators, plus the smaller catalog lookups used by the admin screens.
//!
//! Each operation runs one or two sequential store calls and turns the rows
//! into views. Every store call is bounded by `query_timeout`; a call that
//! runs past it fails the whole operation. Nothing is retried or cached and no
//! partial result is ever returned.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use thiserror::Error;
use tracing::{debug, instrument};

use coffeetek_catalog::{
    CategoryView, ModifierGroupView, ProductStatusView, ProductView, category_views, id_string,
    modifier_group_views, product_views,
};
use coffeetek_core::{CategoryId, ProductId};

use crate::catalog_store::{CatalogStore, StoreError};

#[derive(Debug, Error)]
pub enum CatalogError {
    /// The referenced product does not exist (or its id is not a valid key).
    #[error("product not found: {0}")]
    NotFound(String),

    #[error("store failure: {0}")]
    StoreFailure(#[from] StoreError),
}

/// Aggregators over an injected catalog store.
#[derive(Clone)]
pub struct CatalogQueries {
    store: Arc<dyn CatalogStore>,
    query_timeout: Duration,
}

impl CatalogQueries {
    pub fn new(store: Arc<dyn CatalogStore>, query_timeout: Duration) -> Self {
        Self {
            store,
            query_timeout,
        }
    }

    /// Active products with category, current price and `has_modifiers`.
    #[instrument(skip(self))]
    pub async fn list_active_products(&self) -> Result<Vec<ProductView>, CatalogError> {
        let as_of = Utc::now();
        let rows = self
            .bounded("active_products", self.store.active_products(as_of))
            .await?;
        Ok(product_views(rows))
    }

    /// Modifier groups of a product: its own groups ∪ its category's groups.
    #[instrument(skip(self))]
    pub async fn resolve_modifiers_for_product(
        &self,
        product_id: &str,
    ) -> Result<Vec<ModifierGroupView>, CatalogError> {
        let (product_id, category_id) = self.require_product(product_id).await?;
        let rows = self
            .bounded(
                "modifier_rows",
                self.store.modifier_rows(product_id, category_id),
            )
            .await?;
        Ok(modifier_group_views(rows))
    }

    #[instrument(skip(self))]
    pub async fn list_categories(&self) -> Result<Vec<CategoryView>, CatalogError> {
        let rows = self.bounded("categories", self.store.categories()).await?;
        Ok(category_views(rows))
    }

    /// Ids of the groups linked directly to the product (not via its category).
    #[instrument(skip(self))]
    pub async fn linked_modifier_group_ids(
        &self,
        product_id: &str,
    ) -> Result<Vec<String>, CatalogError> {
        let (product_id, _) = self.require_product(product_id).await?;
        let ids = self
            .bounded(
                "product_group_ids",
                self.store.product_group_ids(product_id),
            )
            .await?;
        Ok(ids.into_iter().map(id_string).collect())
    }

    #[instrument(skip(self))]
    pub async fn set_product_active(
        &self,
        product_id: &str,
        is_active: bool,
    ) -> Result<ProductStatusView, CatalogError> {
        let id = parse_product_id(product_id)?;
        let updated = self
            .bounded(
                "set_product_active",
                self.store.set_product_active(id, is_active),
            )
            .await?;
        if !updated {
            return Err(CatalogError::NotFound(product_id.to_string()));
        }
        Ok(ProductStatusView {
            product_id: id_string(id),
            is_active,
        })
    }

    async fn require_product(
        &self,
        raw: &str,
    ) -> Result<(ProductId, CategoryId), CatalogError> {
        let product_id = parse_product_id(raw)?;
        let category_id = self
            .bounded("product_category", self.store.product_category(product_id))
            .await?
            .ok_or_else(|| CatalogError::NotFound(raw.to_string()))?;
        Ok((product_id, category_id))
    }

    async fn bounded<T, F>(&self, operation: &'static str, call: F) -> Result<T, StoreError>
    where
        F: Future<Output = Result<T, StoreError>>,
    {
        match tokio::time::timeout(self.query_timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(StoreError::Timeout {
                operation,
                timeout_ms: u64::try_from(self.query_timeout.as_millis()).unwrap_or(u64::MAX),
            }),
        }
    }
}

fn parse_product_id(raw: &str) -> Result<ProductId, CatalogError> {
    raw.parse::<ProductId>().map_err(|e| {
        debug!(product_id = raw, "rejecting product id: {e}");
        CatalogError::NotFound(raw.to_string())
    })
}
