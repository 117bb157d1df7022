use std::sync::RwLock;

use async_trait::async_trait;

use startshop_core::ProductId;
use startshop_products::{sample_catalog, NewProduct, Product};

use super::r#trait::{ProductStore, StoreError};

/// In-memory product store seeded from a fixed list.
///
/// Intended for dev and tests. The seed keeps its order; inserted products are
/// appended after it.
#[derive(Debug)]
pub struct FixtureProductStore {
    products: RwLock<Vec<Product>>,
}

impl FixtureProductStore {
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            products: RwLock::new(products),
        }
    }

    /// Store holding the built-in sample catalog.
    pub fn with_sample_catalog() -> Self {
        Self::new(sample_catalog())
    }

    fn poisoned() -> StoreError {
        StoreError::Connection("fixture store lock poisoned".to_string())
    }
}

impl Default for FixtureProductStore {
    fn default() -> Self {
        Self::with_sample_catalog()
    }
}

#[async_trait]
impl ProductStore for FixtureProductStore {
    async fn fetch_all(&self, limit: Option<usize>) -> Result<Vec<Product>, StoreError> {
        let products = self.products.read().map_err(|_| Self::poisoned())?;
        let take = limit.unwrap_or(products.len());
        Ok(products.iter().take(take).cloned().collect())
    }

    async fn fetch_by_id(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        let products = self.products.read().map_err(|_| Self::poisoned())?;
        Ok(products.iter().find(|p| p.id == id).cloned())
    }

    async fn insert(&self, product: NewProduct) -> Result<Option<Product>, StoreError> {
        let mut products = self.products.write().map_err(|_| Self::poisoned())?;
        let stored = Product::from_new(ProductId::new(), product);
        products.push(stored.clone());
        Ok(Some(stored))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use startshop_products::InventoryStatus;

    fn new_product(name: &str) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            description: "desc".to_string(),
            price: Decimal::new(100, 2),
            image: "https://images.example.com/x.jpg".to_string(),
            badge: None,
            rating: 0.0,
            reviews: 0,
            inventory: InventoryStatus::InStock,
        }
    }

    #[tokio::test]
    async fn limit_returns_a_prefix() {
        let store = FixtureProductStore::with_sample_catalog();
        let all = store.fetch_all(None).await.unwrap();
        let first_two = store.fetch_all(Some(2)).await.unwrap();
        assert_eq!(first_two, all[..2].to_vec());
    }

    #[tokio::test]
    async fn limit_larger_than_catalog_returns_everything() {
        let store = FixtureProductStore::with_sample_catalog();
        let all = store.fetch_all(None).await.unwrap();
        assert_eq!(store.fetch_all(Some(all.len() + 10)).await.unwrap(), all);
    }

    #[tokio::test]
    async fn inserted_products_are_appended_and_findable() {
        let store = FixtureProductStore::new(Vec::new());
        let a = store.insert(new_product("a")).await.unwrap().unwrap();
        let b = store.insert(new_product("b")).await.unwrap().unwrap();
        assert_ne!(a.id, b.id);

        let all = store.fetch_all(None).await.unwrap();
        assert_eq!(all, vec![a.clone(), b]);
        assert_eq!(store.fetch_by_id(a.id).await.unwrap(), Some(a));
    }

    #[tokio::test]
    async fn unknown_id_is_none() {
        let store = FixtureProductStore::with_sample_catalog();
        assert_eq!(store.fetch_by_id(ProductId::new()).await.unwrap(), None);
    }
}
