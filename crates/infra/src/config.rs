//! Store configuration loading and backend selection.
//!
//! The active store is chosen once, at process start, from `PRODUCT_STORE`:
//! `fixture` (default) keeps the sample catalog in memory, `postgres` requires
//! `DATABASE_URL` and refuses to start without it.

use std::sync::Arc;

use thiserror::Error;

use crate::store::{FixtureProductStore, PostgresProductStore, ProductStore, StoreError};

const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Configuration failure. Fatal at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("DATABASE_URL is not set (required when PRODUCT_STORE=postgres)")]
    MissingDatabaseUrl,

    #[error("unknown PRODUCT_STORE value: {0} (expected `fixture` or `postgres`)")]
    UnknownBackend(String),

    #[error("invalid {name}: {value}")]
    InvalidValue { name: &'static str, value: String },

    #[error("failed to open product store: {0}")]
    Store(#[from] StoreError),
}

/// Which store implementation backs the repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreBackend {
    #[default]
    Fixture,
    Postgres,
}

/// Store settings resolved from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    backend: StoreBackend,
    database_url: Option<String>,
    max_connections: u32,
    seed: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::fixture()
    }
}

impl StoreConfig {
    /// In-memory sample catalog, no external dependency.
    pub fn fixture() -> Self {
        Self {
            backend: StoreBackend::Fixture,
            database_url: None,
            max_connections: DEFAULT_MAX_CONNECTIONS,
            seed: false,
        }
    }

    /// Read configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup` (testable without touching the process env).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let backend = match lookup("PRODUCT_STORE").as_deref().map(str::trim) {
            None | Some("") | Some("fixture") => StoreBackend::Fixture,
            Some("postgres") => StoreBackend::Postgres,
            Some(other) => return Err(ConfigError::UnknownBackend(other.to_string())),
        };

        let database_url = lookup("DATABASE_URL").filter(|u| !u.trim().is_empty());
        if backend == StoreBackend::Postgres && database_url.is_none() {
            return Err(ConfigError::MissingDatabaseUrl);
        }

        let max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            None => DEFAULT_MAX_CONNECTIONS,
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        name: "DATABASE_MAX_CONNECTIONS",
                        value: raw,
                    });
                }
            },
        };

        let seed = match lookup("PRODUCT_SEED").as_deref().map(str::trim) {
            None | Some("") | Some("false") | Some("0") => false,
            Some("true") | Some("1") => true,
            Some(other) => {
                return Err(ConfigError::InvalidValue {
                    name: "PRODUCT_SEED",
                    value: other.to_string(),
                });
            }
        };

        Ok(Self {
            backend,
            database_url,
            max_connections,
            seed,
        })
    }

    pub fn backend(&self) -> StoreBackend {
        self.backend
    }

    pub fn database_url(&self) -> Option<&str> {
        self.database_url.as_deref()
    }

    pub fn max_connections(&self) -> u32 {
        self.max_connections
    }

    pub fn seed(&self) -> bool {
        self.seed
    }

    /// Hosted Postgres providers only accept TLS connections.
    pub fn requires_ssl(&self) -> bool {
        self.database_url
            .as_deref()
            .is_some_and(|u| u.contains("supabase"))
    }

    /// Build the configured store.
    ///
    /// For Postgres this opens the pool, bootstraps the schema, and optionally seeds
    /// an empty table with the sample catalog.
    pub async fn open_store(&self) -> Result<Arc<dyn ProductStore>, ConfigError> {
        match self.backend {
            StoreBackend::Fixture => {
                tracing::info!("using in-memory fixture product store");
                Ok(Arc::new(FixtureProductStore::with_sample_catalog()))
            }
            StoreBackend::Postgres => {
                let store = PostgresProductStore::connect(self).await?;
                store.ensure_schema().await?;
                if self.seed {
                    let written = store
                        .seed_if_empty(&startshop_products::sample_catalog())
                        .await?;
                    tracing::info!(written, "seeded products table");
                }
                tracing::info!(max_connections = self.max_connections, "using postgres product store");
                Ok(Arc::new(store))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_to_fixture_store() {
        let cfg = StoreConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg, StoreConfig::fixture());
    }

    #[test]
    fn postgres_without_url_is_fatal() {
        let err = StoreConfig::from_lookup(lookup(&[("PRODUCT_STORE", "postgres")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingDatabaseUrl));
    }

    #[test]
    fn blank_url_counts_as_missing() {
        let err = StoreConfig::from_lookup(lookup(&[
            ("PRODUCT_STORE", "postgres"),
            ("DATABASE_URL", "  "),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::MissingDatabaseUrl));
    }

    #[test]
    fn unknown_backend_is_rejected() {
        let err = StoreConfig::from_lookup(lookup(&[("PRODUCT_STORE", "sqlite")])).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownBackend(v) if v == "sqlite"));
    }

    #[test]
    fn postgres_settings_are_read() {
        let cfg = StoreConfig::from_lookup(lookup(&[
            ("PRODUCT_STORE", "postgres"),
            ("DATABASE_URL", "postgres://u:p@db.abc.supabase.co:5432/postgres"),
            ("DATABASE_MAX_CONNECTIONS", "12"),
            ("PRODUCT_SEED", "true"),
        ]))
        .unwrap();
        assert_eq!(cfg.backend(), StoreBackend::Postgres);
        assert_eq!(cfg.max_connections(), 12);
        assert!(cfg.seed());
        assert!(cfg.requires_ssl());
    }

    #[test]
    fn local_database_does_not_require_ssl() {
        let cfg = StoreConfig::from_lookup(lookup(&[
            ("PRODUCT_STORE", "postgres"),
            ("DATABASE_URL", "postgres://localhost/startshop"),
        ]))
        .unwrap();
        assert!(!cfg.requires_ssl());
    }

    #[test]
    fn zero_connections_is_invalid() {
        let err = StoreConfig::from_lookup(lookup(&[("DATABASE_MAX_CONNECTIONS", "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { name: "DATABASE_MAX_CONNECTIONS", .. }));
    }

    #[tokio::test]
    async fn fixture_backend_opens_without_external_dependencies() {
        let store = StoreConfig::fixture().open_store().await.unwrap();
        assert!(!store.fetch_all(None).await.unwrap().is_empty());
    }
}
