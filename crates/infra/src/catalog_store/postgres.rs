//! Postgres-backed catalog store.
//!
//! ## Error Mapping
//!
//! | SQLx Error | StoreError |
//! |------------|------------|
//! | Database | `Database` (message + SQLSTATE) |
//! | PoolClosed | `PoolClosed` |
//! | ColumnDecode / ColumnNotFound / Decode | `Decode` |
//! | Other (I/O, TLS, pool timeout, ...) | `Database` |
//!
//! ## Current price
//!
//! The listing joins prices through a `LATERAL` subquery limited to one row,
//! so a product with overlapping current prices still yields a single row
//! (latest `start_date`, then highest `price_id`).

use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::{Span, instrument};

use coffeetek_catalog::{CategoryRow, ModifierRow, ProductListingRow};
use coffeetek_core::{CategoryId, ModifierGroupId, ProductId};

use super::store::{CatalogStore, StoreError};

/// Postgres catalog store over a shared connection pool.
///
/// `PgPool` is internally reference-counted; clones share connections.
#[derive(Debug, Clone)]
pub struct PostgresCatalogStore {
    pool: PgPool,
}

impl PostgresCatalogStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const ACTIVE_PRODUCTS_SQL: &str = r#"
    SELECT
        p.product_id,
        p.product_name,
        p.category_id,
        c.category_name,
        c.image_url AS category_image,
        c.grid_column_count,
        p.description,
        p.image_url,
        p.is_active,
        pr.price_value::text AS price_value,
        (
            EXISTS (SELECT 1 FROM product_modifier_links pml WHERE pml.product_id = p.product_id)
            OR
            EXISTS (SELECT 1 FROM category_modifier_links cml WHERE cml.category_id = p.category_id)
        ) AS has_modifiers
    FROM products p
    JOIN categories c ON c.category_id = p.category_id
    LEFT JOIN LATERAL (
        SELECT pp.price_value
        FROM product_prices pp
        WHERE pp.product_id = p.product_id
          AND (pp.end_date IS NULL OR pp.end_date > $1)
        ORDER BY pp.start_date DESC, pp.price_id DESC
        LIMIT 1
    ) pr ON TRUE
    WHERE p.is_active <> 0
    ORDER BY p.category_id ASC, p.product_id ASC
"#;

const MODIFIER_ROWS_SQL: &str = r#"
    SELECT
        mg.group_id,
        mg.group_name,
        mg.is_multi_select,
        mg.is_required,
        m.modifier_id,
        m.modifier_name,
        m.extra_price::text AS extra_price
    FROM modifier_groups mg
    JOIN modifiers m ON m.group_id = mg.group_id
    WHERE
        mg.group_id IN (SELECT group_id FROM product_modifier_links WHERE product_id = $1)
        OR
        mg.group_id IN (SELECT group_id FROM category_modifier_links WHERE category_id = $2)
    ORDER BY mg.group_id, m.modifier_id
"#;

#[async_trait::async_trait]
impl CatalogStore for PostgresCatalogStore {
    #[instrument(
        skip(self),
        fields(operation = "active_products", row_count = tracing::field::Empty),
        err
    )]
    async fn active_products(
        &self,
        as_of: DateTime<Utc>,
    ) -> Result<Vec<ProductListingRow>, StoreError> {
        let rows = sqlx::query(ACTIVE_PRODUCTS_SQL)
            .bind(as_of)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("active_products", e))?;

        Span::current().record("row_count", rows.len());

        rows.iter()
            .map(|row| listing_row(row).map_err(|e| map_sqlx_error("active_products", e)))
            .collect()
    }

    #[instrument(skip(self), fields(operation = "product_category"), err)]
    async fn product_category(
        &self,
        product_id: ProductId,
    ) -> Result<Option<CategoryId>, StoreError> {
        let row = sqlx::query("SELECT category_id FROM products WHERE product_id = $1")
            .bind(product_id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("product_category", e))?;

        row.map(|r| r.try_get::<i64, _>("category_id").map(CategoryId::new))
            .transpose()
            .map_err(|e| map_sqlx_error("product_category", e))
    }

    #[instrument(
        skip(self),
        fields(operation = "modifier_rows", row_count = tracing::field::Empty),
        err
    )]
    async fn modifier_rows(
        &self,
        product_id: ProductId,
        category_id: CategoryId,
    ) -> Result<Vec<ModifierRow>, StoreError> {
        let rows = sqlx::query(MODIFIER_ROWS_SQL)
            .bind(product_id.get())
            .bind(category_id.get())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("modifier_rows", e))?;

        Span::current().record("row_count", rows.len());

        rows.iter()
            .map(|row| modifier_row(row).map_err(|e| map_sqlx_error("modifier_rows", e)))
            .collect()
    }

    #[instrument(skip(self), fields(operation = "categories"), err)]
    async fn categories(&self) -> Result<Vec<CategoryRow>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT category_id, category_name, image_url, grid_column_count
            FROM categories
            ORDER BY category_id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("categories", e))?;

        rows.iter()
            .map(|row| category_row(row).map_err(|e| map_sqlx_error("categories", e)))
            .collect()
    }

    #[instrument(skip(self), fields(operation = "product_group_ids"), err)]
    async fn product_group_ids(
        &self,
        product_id: ProductId,
    ) -> Result<Vec<ModifierGroupId>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT group_id
            FROM product_modifier_links
            WHERE product_id = $1
            ORDER BY group_id ASC
            "#,
        )
        .bind(product_id.get())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("product_group_ids", e))?;

        rows.iter()
            .map(|row| {
                row.try_get::<i64, _>("group_id")
                    .map(ModifierGroupId::new)
                    .map_err(|e| map_sqlx_error("product_group_ids", e))
            })
            .collect()
    }

    #[instrument(skip(self), fields(operation = "set_product_active"), err)]
    async fn set_product_active(
        &self,
        product_id: ProductId,
        is_active: bool,
    ) -> Result<bool, StoreError> {
        let result = sqlx::query("UPDATE products SET is_active = $2 WHERE product_id = $1")
            .bind(product_id.get())
            .bind(i16::from(is_active))
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("set_product_active", e))?;

        Ok(result.rows_affected() > 0)
    }
}

fn listing_row(row: &PgRow) -> Result<ProductListingRow, sqlx::Error> {
    Ok(ProductListingRow {
        product_id: row.try_get("product_id")?,
        product_name: row.try_get("product_name")?,
        category_id: row.try_get("category_id")?,
        category_name: row.try_get("category_name")?,
        category_image: row.try_get("category_image")?,
        grid_column_count: row.try_get("grid_column_count")?,
        description: row.try_get("description")?,
        image_url: row.try_get("image_url")?,
        is_active: row.try_get("is_active")?,
        price_value: row.try_get("price_value")?,
        has_modifiers: row.try_get("has_modifiers")?,
    })
}

fn modifier_row(row: &PgRow) -> Result<ModifierRow, sqlx::Error> {
    Ok(ModifierRow {
        group_id: row.try_get("group_id")?,
        group_name: row.try_get("group_name")?,
        is_multi_select: row.try_get("is_multi_select")?,
        is_required: row.try_get("is_required")?,
        modifier_id: row.try_get("modifier_id")?,
        modifier_name: row.try_get("modifier_name")?,
        extra_price: row.try_get("extra_price")?,
    })
}

fn category_row(row: &PgRow) -> Result<CategoryRow, sqlx::Error> {
    Ok(CategoryRow {
        category_id: row.try_get("category_id")?,
        category_name: row.try_get("category_name")?,
        image_url: row.try_get("image_url")?,
        grid_column_count: row.try_get("grid_column_count")?,
    })
}

pub(crate) fn map_sqlx_error(operation: &'static str, err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::Database(db_err) => {
            let message = match db_err.code() {
                Some(code) => format!("{} (SQLSTATE {})", db_err.message(), code),
                None => db_err.message().to_string(),
            };
            StoreError::Database { operation, message }
        }
        sqlx::Error::PoolClosed => StoreError::PoolClosed(operation),
        e @ (sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::Decode(_)) => StoreError::Decode {
            operation,
            message: e.to_string(),
        },
        other => StoreError::Database {
            operation,
            message: other.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_closed_maps_to_pool_closed() {
        let err = map_sqlx_error("categories", sqlx::Error::PoolClosed);
        assert!(matches!(err, StoreError::PoolClosed("categories")));
    }

    #[test]
    fn missing_column_maps_to_decode() {
        let err = map_sqlx_error(
            "active_products",
            sqlx::Error::ColumnNotFound("price_value".to_string()),
        );
        match err {
            StoreError::Decode { operation, message } => {
                assert_eq!(operation, "active_products");
                assert!(message.contains("price_value"));
            }
            other => panic!("Expected Decode, got {other:?}"),
        }
    }

    #[test]
    fn pool_timeout_maps_to_database_error() {
        let err = map_sqlx_error("modifier_rows", sqlx::Error::PoolTimedOut);
        assert!(matches!(err, StoreError::Database { operation: "modifier_rows", .. }));
    }

    #[test]
    fn listing_query_binds_instead_of_formatting() {
        assert!(ACTIVE_PRODUCTS_SQL.contains("$1"));
        assert!(MODIFIER_ROWS_SQL.contains("$1") && MODIFIER_ROWS_SQL.contains("$2"));
    }
}
