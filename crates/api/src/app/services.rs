use std::{sync::Arc, time::Duration};

use coffeetek_infra::{
    AppConfig, CatalogQueries, CatalogStore, InMemoryCatalogStore, PostgresCatalogStore, db,
};

/// Services shared by every handler.
#[derive(Clone)]
pub struct AppServices {
    catalog: CatalogQueries,
}

impl AppServices {
    pub fn new(catalog: CatalogQueries) -> Self {
        Self { catalog }
    }

    pub fn with_store(store: Arc<dyn CatalogStore>, query_timeout: Duration) -> Self {
        Self::new(CatalogQueries::new(store, query_timeout))
    }

    pub fn catalog(&self) -> &CatalogQueries {
        &self.catalog
    }
}

pub async fn build_services(config: &AppConfig) -> Result<AppServices, sqlx::Error> {
    let store: Arc<dyn CatalogStore> = match &config.database {
        Some(database) => {
            let pool = db::connect(database).await?;
            Arc::new(PostgresCatalogStore::new(pool))
        }
        None => {
            tracing::warn!(
                "USE_PERSISTENT_STORES not enabled; serving an empty in-memory catalog"
            );
            Arc::new(InMemoryCatalogStore::new())
        }
    };

    Ok(AppServices::with_store(store, config.query_timeout))
}
