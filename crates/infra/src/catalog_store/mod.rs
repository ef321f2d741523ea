//! Row store access for the catalog.
//!
//! `CatalogStore` is the seam between the query service and the database:
//! every call is a single parameterized statement returning flat rows.

pub mod in_memory;
pub mod postgres;
pub mod store;

pub use in_memory::InMemoryCatalogStore;
pub use postgres::PostgresCatalogStore;
pub use store::{CatalogStore, StoreError};
