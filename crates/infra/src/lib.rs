//! Infrastructure layer: product stores, the repository façade, and configuration.

pub mod config;
pub mod repository;
pub mod store;

pub use config::{ConfigError, StoreBackend, StoreConfig};
pub use repository::{ProductRepository, RepositoryError, DEFAULT_RECOMMENDED_LIMIT};
pub use store::{FixtureProductStore, PostgresProductStore, ProductStore, StoreError};
