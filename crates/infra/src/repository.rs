//! Product repository: the stateless operation set between page loaders and the store.
//!
//! Reads favour availability: a failing store is logged and reported as "no data"
//! (`[]` or `None`) so a page never fails just because a listing did. The write path
//! favours correctness: every failure reaches the caller.

use std::sync::Arc;

use thiserror::Error;

use startshop_core::ProductId;
use startshop_products::{validate, Product, ProductInput, ValidationErrors};

use crate::store::{ProductStore, StoreError};

/// Default size of the recommended-products slice.
pub const DEFAULT_RECOMMENDED_LIMIT: usize = 3;

/// Failure of [`ProductRepository::create`].
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Input was rejected before reaching the store.
    #[error("invalid product: {0}")]
    Validation(#[from] ValidationErrors),

    /// The store reported success but handed back no row.
    #[error("failed to create product: no product returned from the store")]
    CreationFailure,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Stateless façade over a [`ProductStore`].
#[derive(Clone)]
pub struct ProductRepository {
    store: Arc<dyn ProductStore>,
}

impl core::fmt::Debug for ProductRepository {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ProductRepository").finish_non_exhaustive()
    }
}

impl ProductRepository {
    pub fn new(store: Arc<dyn ProductStore>) -> Self {
        Self { store }
    }

    /// Every product in store order; `[]` if the store fails.
    pub async fn list_all(&self) -> Vec<Product> {
        match self.store.fetch_all(None).await {
            Ok(products) => products,
            Err(e) => {
                tracing::error!(error = %e, "error getting all products");
                Vec::new()
            }
        }
    }

    /// The first `limit` products of [`Self::list_all`]'s order; `[]` if the store fails.
    pub async fn list_recommended(&self, limit: usize) -> Vec<Product> {
        match self.store.fetch_all(Some(limit)).await {
            Ok(mut products) => {
                products.truncate(limit);
                products
            }
            Err(e) => {
                tracing::error!(error = %e, limit, "error getting recommended products");
                Vec::new()
            }
        }
    }

    /// The product with the given id.
    ///
    /// `None` when there is no such product, when `id` is not a well-formed product
    /// id, or when the store fails. Callers branch on `None` to render "not found".
    pub async fn get_by_id(&self, id: &str) -> Option<Product> {
        let product_id: ProductId = match id.parse() {
            Ok(pid) => pid,
            Err(e) => {
                tracing::debug!(id, error = %e, "malformed product id");
                return None;
            }
        };

        match self.store.fetch_by_id(product_id).await {
            Ok(found) => found,
            Err(e) => {
                tracing::error!(error = %e, product_id = %product_id, "error getting product by id");
                None
            }
        }
    }

    /// Validate `input` and persist it, returning the stored product with its id.
    pub async fn create(&self, input: &ProductInput) -> Result<Product, RepositoryError> {
        let new = validate(input)?;

        let created = match self.store.insert(new).await {
            Ok(Some(product)) => product,
            Ok(None) => {
                tracing::error!("error creating product: store returned no row");
                return Err(RepositoryError::CreationFailure);
            }
            Err(e) => {
                tracing::error!(error = %e, "error creating product");
                return Err(e.into());
            }
        };

        tracing::info!(product_id = %created.id, name = %created.name, "product created");
        Ok(created)
    }
}
