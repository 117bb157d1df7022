use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use startshop_core::ProductId;
use startshop_products::{NewProduct, Product};

/// Store-level failure.
///
/// ## Error Semantics
///
/// - **Connection**: the store could not be reached (pool closed, network, timeout)
/// - **Database**: the store rejected a statement (constraint, syntax, permissions)
/// - **Decode**: a stored row could not be mapped back to a [`Product`]
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Connection(String),

    #[error("database error: {0}")]
    Database(String),

    #[error("invalid stored row: {0}")]
    Decode(String),
}

/// Capability shared by every product store: read products, insert a product.
///
/// ## Ordering
///
/// `fetch_all` returns products in a stable, store-defined order. A `limit` returns
/// the first `limit` products of that same order, so a limited fetch is always a
/// prefix of the unlimited one.
///
/// ## Insert
///
/// `insert` assigns the id and returns the persisted row. `Ok(None)` means the store
/// accepted the statement but handed no row back; callers decide how to treat that.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Products in store order, optionally truncated to the first `limit`.
    async fn fetch_all(&self, limit: Option<usize>) -> Result<Vec<Product>, StoreError>;

    /// The product with `id`, or `None` when there is no such product.
    async fn fetch_by_id(&self, id: ProductId) -> Result<Option<Product>, StoreError>;

    /// Persist a validated product and return the stored row.
    async fn insert(&self, product: NewProduct) -> Result<Option<Product>, StoreError>;
}

#[async_trait]
impl<S> ProductStore for Arc<S>
where
    S: ProductStore + ?Sized,
{
    async fn fetch_all(&self, limit: Option<usize>) -> Result<Vec<Product>, StoreError> {
        (**self).fetch_all(limit).await
    }

    async fn fetch_by_id(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        (**self).fetch_by_id(id).await
    }

    async fn insert(&self, product: NewProduct) -> Result<Option<Product>, StoreError> {
        (**self).insert(product).await
    }
}
