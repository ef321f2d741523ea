//! Infrastructure layer: configuration, database pool, catalog store adapters
//! and the catalog query service.

pub mod catalog_queries;
pub mod catalog_store;
pub mod config;
pub mod db;


pub use catalog_queries::{CatalogError, CatalogQueries};
pub use catalog_store::{CatalogStore, InMemoryCatalogStore, PostgresCatalogStore, StoreError};
pub use config::{AppConfig, ConfigError, DatabaseConfig};
