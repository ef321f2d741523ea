//! Database adapters: connection pool and schema bootstrap.

use sqlx::{PgPool, postgres::PgPoolOptions};
use tracing::{info, warn};

use crate::config::DatabaseConfig;

/// Catalog schema, idempotent (`CREATE ... IF NOT EXISTS`).
pub const CATALOG_SCHEMA: &str = include_str!("../migrations/0001_catalog.sql");

/// Open the shared connection pool.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    info!(
        database_url = %mask_database_url(&config.database_url),
        max_connections = config.max_connections,
        "connecting to database"
    );

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
        .connect(&config.database_url)
        .await
        .map_err(|e| {
            warn!("failed to connect to database: {e}");
            e
        })?;

    if config.apply_schema {
        apply_schema(&pool).await?;
    }

    Ok(pool)
}

pub async fn apply_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    info!("applying catalog schema");
    sqlx::raw_sql(CATALOG_SCHEMA).execute(pool).await?;
    Ok(())
}

/// Hide the password part of a connection URL for logging.
pub fn mask_database_url(url: &str) -> String {
    let Some((scheme, rest)) = url.split_once("://") else {
        return url.to_string();
    };
    match rest.rsplit_once('@') {
        Some((userinfo, host)) => {
            let user = userinfo.split(':').next().unwrap_or_default();
            format!("{scheme}://{user}:***@{host}")
        }
        None => url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masks_password() {
        assert_eq!(
            mask_database_url("postgres://pos:s3cret@db:5432/coffeetek"),
            "postgres://pos:***@db:5432/coffeetek"
        );
    }

    #[test]
    fn leaves_urls_without_credentials_alone() {
        assert_eq!(
            mask_database_url("postgres://localhost/coffeetek"),
            "postgres://localhost/coffeetek"
        );
    }

    #[test]
    fn schema_creates_every_catalog_table() {
        for table in [
            "categories",
            "products",
            "product_prices",
            "modifier_groups",
            "modifiers",
            "product_modifier_links",
            "category_modifier_links",
        ] {
            assert!(
                CATALOG_SCHEMA.contains(&format!("CREATE TABLE IF NOT EXISTS {table} ")),
                "missing {table}"
            );
        }
    }
}
