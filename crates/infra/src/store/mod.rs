//! Product store boundary.
//!
//! A store owns the canonical product collection. The fixture variant keeps it in
//! memory; the Postgres variant keeps it in the `products` table. Both expose the
//! same contract so the repository never knows which one is active.

pub mod fixture;
pub mod postgres;
pub mod r#trait;

pub use fixture::FixtureProductStore;
pub use postgres::PostgresProductStore;
pub use r#trait::{ProductStore, StoreError};
