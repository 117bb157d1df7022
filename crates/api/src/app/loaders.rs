//! Page loaders.
//!
//! A loader runs once per navigation, before the page renders, and produces exactly
//! the data the page consumes. Loaders never retry and never surface read failures:
//! the repository has already turned those into empty results.

use serde::Serialize;
use tokio::task::JoinHandle;

use startshop_infra::{ProductRepository, DEFAULT_RECOMMENDED_LIMIT};
use startshop_products::{Product, ProductInput};

/// Result of a loader that may address a missing resource.
#[derive(Debug)]
pub enum LoaderOutcome<T> {
    Ready(T),
    /// The framework must answer with a 404 instead of rendering.
    NotFound,
}

/// Listing page payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListingData {
    pub products: Vec<Product>,
}

/// Recommendations fetched independently of the main product.
///
/// The fetch is already running when the detail loader returns; the page joins it
/// only when it renders the recommendations.
#[derive(Debug)]
pub struct PendingRecommendations {
    task: JoinHandle<Vec<Product>>,
}

impl PendingRecommendations {
    fn spawn(repository: ProductRepository, limit: usize) -> Self {
        Self {
            task: tokio::spawn(async move { repository.list_recommended(limit).await }),
        }
    }

    /// Wait for the recommendations. A task that panicked or was cancelled yields `[]`.
    pub async fn resolve(self) -> Vec<Product> {
        match self.task.await {
            Ok(products) => products,
            Err(e) => {
                tracing::warn!(error = %e, "recommendation fetch did not complete");
                Vec::new()
            }
        }
    }
}

/// Detail page payload: the resolved product plus still-pending recommendations.
#[derive(Debug)]
pub struct DetailData {
    pub product: Product,
    pub recommended_products: PendingRecommendations,
}

impl DetailData {
    /// Join the recommendation fetch and produce the presentation contract.
    pub async fn resolve(self) -> DetailPayload {
        DetailPayload {
            product: Some(self.product),
            recommended_products: self.recommended_products.resolve().await,
        }
    }
}

/// What the detail view consumes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailPayload {
    pub product: Option<Product>,
    pub recommended_products: Vec<Product>,
}

/// Create page payload.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateFormData {
    pub values: ProductInput,
}

pub async fn load_listing(repository: &ProductRepository) -> ListingData {
    ListingData {
        products: repository.list_all().await,
    }
}

/// Load the product `id`; start the recommendation fetch only once it exists.
pub async fn load_detail(repository: &ProductRepository, id: &str) -> LoaderOutcome<DetailData> {
    let Some(product) = repository.get_by_id(id).await else {
        tracing::info!(id, "product not found");
        return LoaderOutcome::NotFound;
    };

    LoaderOutcome::Ready(DetailData {
        product,
        recommended_products: PendingRecommendations::spawn(
            repository.clone(),
            DEFAULT_RECOMMENDED_LIMIT,
        ),
    })
}

pub fn load_create_form() -> CreateFormData {
    CreateFormData {
        values: ProductInput::default(),
    }
}
