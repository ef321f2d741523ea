//! In-memory catalog store for tests/dev.
//!
//! Answers every query with the same semantics as the Postgres statements:
//! inner join product → category, one current price per product, union of
//! direct and inherited modifier groups, inner join group → modifiers.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{PoisonError, RwLock, RwLockWriteGuard};

use chrono::{DateTime, Utc};

use coffeetek_catalog::{
    Category, CategoryModifierLink, CategoryRow, Modifier, ModifierGroup, ModifierRow, Price,
    Product, ProductListingRow, ProductModifierLink, select_current_price,
};
use coffeetek_core::{CategoryId, ModifierGroupId, ModifierId, ProductId};

use super::store::{CatalogStore, StoreError};

#[derive(Debug, Default)]
struct CatalogTables {
    categories: BTreeMap<CategoryId, Category>,
    products: BTreeMap<ProductId, Product>,
    prices: Vec<Price>,
    groups: BTreeMap<ModifierGroupId, ModifierGroup>,
    modifiers: BTreeMap<ModifierId, Modifier>,
    product_links: BTreeSet<(ProductId, ModifierGroupId)>,
    category_links: BTreeSet<(CategoryId, ModifierGroupId)>,
}

impl CatalogTables {
    fn has_modifiers(&self, product: &Product) -> bool {
        self.product_links.iter().any(|(p, _)| *p == product.product_id)
            || self.category_links.iter().any(|(c, _)| *c == product.category_id)
    }
}

/// Catalog kept in ordered maps behind a lock.
#[derive(Debug, Default)]
pub struct InMemoryCatalogStore {
    inner: RwLock<CatalogTables>,
}

impl InMemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_category(&self, category: Category) {
        let mut t = self.tables_mut();
        t.categories.insert(category.category_id, category);
    }

    pub fn insert_product(&self, product: Product) {
        let mut t = self.tables_mut();
        t.products.insert(product.product_id, product);
    }

    pub fn insert_price(&self, price: Price) {
        let mut t = self.tables_mut();
        t.prices.retain(|p| p.price_id != price.price_id);
        t.prices.push(price);
    }

    pub fn insert_modifier_group(&self, group: ModifierGroup) {
        let mut t = self.tables_mut();
        t.groups.insert(group.group_id, group);
    }

    pub fn insert_modifier(&self, modifier: Modifier) {
        let mut t = self.tables_mut();
        t.modifiers.insert(modifier.modifier_id, modifier);
    }

    pub fn link_product(&self, link: ProductModifierLink) {
        let mut t = self.tables_mut();
        t.product_links.insert((link.product_id, link.group_id));
    }

    pub fn link_category(&self, link: CategoryModifierLink) {
        let mut t = self.tables_mut();
        t.category_links.insert((link.category_id, link.group_id));
    }

    /// Seeding recovers a poisoned lock instead of dropping the write.
    fn tables_mut(&self) -> RwLockWriteGuard<'_, CatalogTables> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn read(
        &self,
        operation: &'static str,
    ) -> Result<std::sync::RwLockReadGuard<'_, CatalogTables>, StoreError> {
        self.inner.read().map_err(|e| StoreError::Unavailable {
            operation,
            message: e.to_string(),
        })
    }
}

#[async_trait::async_trait]
impl CatalogStore for InMemoryCatalogStore {
    async fn active_products(
        &self,
        as_of: DateTime<Utc>,
    ) -> Result<Vec<ProductListingRow>, StoreError> {
        let t = self.read("active_products")?;

        let mut rows: Vec<ProductListingRow> = t
            .products
            .values()
            .filter(|p| p.is_active)
            .filter_map(|p| {
                let category = t.categories.get(&p.category_id)?;
                let price = select_current_price(&t.prices, p.product_id, as_of);
                Some(ProductListingRow {
                    product_id: p.product_id.get(),
                    product_name: p.product_name.clone(),
                    category_id: p.category_id.get(),
                    category_name: category.category_name.clone(),
                    category_image: category.image_url.clone(),
                    grid_column_count: category.grid_column_count,
                    description: p.description.clone(),
                    image_url: p.image_url.clone(),
                    is_active: i16::from(p.is_active),
                    price_value: price.map(|pr| pr.price_value.clone()),
                    has_modifiers: t.has_modifiers(p),
                })
            })
            .collect();

        rows.sort_by_key(|r| (r.category_id, r.product_id));
        Ok(rows)
    }

    async fn product_category(
        &self,
        product_id: ProductId,
    ) -> Result<Option<CategoryId>, StoreError> {
        let t = self.read("product_category")?;
        Ok(t.products.get(&product_id).map(|p| p.category_id))
    }

    async fn modifier_rows(
        &self,
        product_id: ProductId,
        category_id: CategoryId,
    ) -> Result<Vec<ModifierRow>, StoreError> {
        let t = self.read("modifier_rows")?;

        let linked: BTreeSet<ModifierGroupId> = t
            .product_links
            .iter()
            .filter(|(p, _)| *p == product_id)
            .map(|(_, g)| *g)
            .chain(
                t.category_links
                    .iter()
                    .filter(|(c, _)| *c == category_id)
                    .map(|(_, g)| *g),
            )
            .collect();

        let mut rows = Vec::new();
        for group_id in linked {
            let Some(group) = t.groups.get(&group_id) else {
                continue;
            };
            // `modifiers` is keyed by modifier id, so rows come out ascending.
            for m in t.modifiers.values().filter(|m| m.group_id == group_id) {
                rows.push(ModifierRow {
                    group_id: group.group_id.get(),
                    group_name: group.group_name.clone(),
                    is_multi_select: i16::from(group.is_multi_select),
                    is_required: i16::from(group.is_required),
                    modifier_id: m.modifier_id.get(),
                    modifier_name: m.modifier_name.clone(),
                    extra_price: Some(m.extra_price.clone()),
                });
            }
        }

        Ok(rows)
    }

    async fn categories(&self) -> Result<Vec<CategoryRow>, StoreError> {
        let t = self.read("categories")?;
        Ok(t.categories
            .values()
            .map(|c| CategoryRow {
                category_id: c.category_id.get(),
                category_name: c.category_name.clone(),
                image_url: c.image_url.clone(),
                grid_column_count: c.grid_column_count,
            })
            .collect())
    }

    async fn product_group_ids(
        &self,
        product_id: ProductId,
    ) -> Result<Vec<ModifierGroupId>, StoreError> {
        let t = self.read("product_group_ids")?;
        Ok(t.product_links
            .iter()
            .filter(|(p, _)| *p == product_id)
            .map(|(_, g)| *g)
            .collect())
    }

    async fn set_product_active(
        &self,
        product_id: ProductId,
        is_active: bool,
    ) -> Result<bool, StoreError> {
        let mut t = self.inner.write().map_err(|e| StoreError::Unavailable {
            operation: "set_product_active",
            message: e.to_string(),
        })?;

        match t.products.get_mut(&product_id) {
            Some(p) => {
                p.is_active = is_active;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use coffeetek_core::PriceId;
    use std::sync::Arc;

    fn category(id: i64) -> Category {
        Category {
            category_id: CategoryId::new(id),
            category_name: format!("Category {id}"),
            image_url: None,
            grid_column_count: None,
        }
    }

    fn product(id: i64, category_id: i64, is_active: bool) -> Product {
        Product {
            product_id: ProductId::new(id),
            product_name: format!("Product {id}"),
            category_id: CategoryId::new(category_id),
            description: None,
            image_url: None,
            is_active,
        }
    }

    fn group(id: i64) -> ModifierGroup {
        ModifierGroup {
            group_id: ModifierGroupId::new(id),
            group_name: format!("Group {id}"),
            is_multi_select: false,
            is_required: false,
        }
    }

    fn modifier(id: i64, group_id: i64) -> Modifier {
        Modifier {
            modifier_id: ModifierId::new(id),
            group_id: ModifierGroupId::new(group_id),
            modifier_name: format!("Modifier {id}"),
            extra_price: "0".to_string(),
        }
    }

    #[test]
    fn seeding_still_writes_after_the_lock_is_poisoned() {
        let store = Arc::new(InMemoryCatalogStore::new());
        let holder = Arc::clone(&store);
        let _ = std::thread::spawn(move || {
            let _guard = holder.inner.write().unwrap();
            panic!("writer died while holding the lock");
        })
        .join();
        assert!(store.inner.is_poisoned());

        store.insert_category(category(1));
        store.insert_product(product(1, 1, true));
        store.link_category(CategoryModifierLink {
            category_id: CategoryId::new(1),
            group_id: ModifierGroupId::new(1),
        });

        let t = store.inner.read().unwrap_or_else(PoisonError::into_inner);
        assert!(t.categories.contains_key(&CategoryId::new(1)));
        assert!(t.products.contains_key(&ProductId::new(1)));
        assert_eq!(t.category_links.len(), 1);
    }

    #[tokio::test]
    async fn products_without_category_row_are_dropped_by_the_join() {
        let store = InMemoryCatalogStore::new();
        store.insert_category(category(1));
        store.insert_product(product(1, 1, true));
        store.insert_product(product(2, 99, true));

        let rows = store.active_products(Utc::now()).await.unwrap();
        let ids: Vec<_> = rows.iter().map(|r| r.product_id).collect();
        assert_eq!(ids, vec![1]);
    }

    #[tokio::test]
    async fn listing_is_ordered_by_category_then_product() {
        let store = InMemoryCatalogStore::new();
        store.insert_category(category(1));
        store.insert_category(category(2));
        store.insert_product(product(5, 2, true));
        store.insert_product(product(3, 1, true));
        store.insert_product(product(4, 1, true));

        let rows = store.active_products(Utc::now()).await.unwrap();
        let keys: Vec<_> = rows.iter().map(|r| (r.category_id, r.product_id)).collect();
        assert_eq!(keys, vec![(1, 3), (1, 4), (2, 5)]);
    }

    #[tokio::test]
    async fn replacing_a_price_row_keeps_a_single_copy() {
        let store = InMemoryCatalogStore::new();
        store.insert_category(category(1));
        store.insert_product(product(1, 1, true));
        let now = Utc::now();
        let mut price = Price {
            price_id: PriceId::new(1),
            product_id: ProductId::new(1),
            price_value: "10".to_string(),
            start_date: now - Duration::days(1),
            end_date: None,
        };
        store.insert_price(price.clone());
        price.price_value = "12".to_string();
        store.insert_price(price);

        let rows = store.active_products(now).await.unwrap();
        assert_eq!(rows[0].price_value.as_deref(), Some("12"));
    }

    #[tokio::test]
    async fn group_linked_twice_yields_its_modifiers_once() {
        let store = InMemoryCatalogStore::new();
        store.insert_category(category(1));
        store.insert_product(product(1, 1, true));
        store.insert_modifier_group(group(7));
        store.insert_modifier(modifier(70, 7));
        store.insert_modifier(modifier(71, 7));
        store.link_product(ProductModifierLink {
            product_id: ProductId::new(1),
            group_id: ModifierGroupId::new(7),
        });
        store.link_category(CategoryModifierLink {
            category_id: CategoryId::new(1),
            group_id: ModifierGroupId::new(7),
        });

        let rows = store
            .modifier_rows(ProductId::new(1), CategoryId::new(1))
            .await
            .unwrap();
        let ids: Vec<_> = rows.iter().map(|r| r.modifier_id).collect();
        assert_eq!(ids, vec![70, 71]);
    }

    #[tokio::test]
    async fn set_product_active_reports_missing_rows() {
        let store = InMemoryCatalogStore::new();
        store.insert_category(category(1));
        store.insert_product(product(1, 1, true));

        assert!(store.set_product_active(ProductId::new(1), false).await.unwrap());
        assert!(!store.set_product_active(ProductId::new(2), false).await.unwrap());
        assert!(store.active_products(Utc::now()).await.unwrap().is_empty());
    }
}
