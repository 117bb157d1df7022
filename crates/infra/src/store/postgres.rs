//! Postgres-backed product store.
//!
//! ## Error Mapping
//!
//! | SQLx Error | StoreError | Scenario |
//! |------------|------------|----------|
//! | Database | `Database` | Constraint or statement rejected by Postgres |
//! | PoolClosed / PoolTimedOut / Io / Tls | `Connection` | Store unreachable |
//! | ColumnDecode / ColumnNotFound / Decode | `Decode` | Row does not match the schema |
//! | Other | `Database` | Anything else |
//!
//! ## Thread Safety
//!
//! `PostgresProductStore` is `Send + Sync`; concurrency and queueing are left to the
//! SQLx connection pool shared across requests.

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgSslMode};
use sqlx::{PgPool, Row};
use tracing::{instrument, Span};

use startshop_core::ProductId;
use startshop_products::{Badge, InventoryStatus, NewProduct, Product};

use super::r#trait::{ProductStore, StoreError};
use crate::config::StoreConfig;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS products (
    id          UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    name        TEXT NOT NULL CHECK (length(btrim(name)) > 0),
    description TEXT NOT NULL DEFAULT '',
    price       NUMERIC(10, 2) NOT NULL CHECK (price >= 0),
    image       VARCHAR(512) NOT NULL,
    badge       TEXT CHECK (badge IN ('New', 'Sale', 'Featured', 'Limited')),
    rating      DOUBLE PRECISION NOT NULL DEFAULT 0 CHECK (rating >= 0),
    reviews     INTEGER NOT NULL DEFAULT 0 CHECK (reviews >= 0),
    inventory   TEXT NOT NULL CHECK (inventory IN ('in-stock', 'backorder', 'preorder')),
    created_at  TIMESTAMPTZ NOT NULL DEFAULT NOW()
)
"#;

const COLUMNS: &str = "id, name, description, price, image, badge, rating, reviews, inventory";

/// Postgres-backed product store.
///
/// Store order is insertion order (`created_at`, then `id` as a tie-breaker).
#[derive(Debug, Clone)]
pub struct PostgresProductStore {
    pool: PgPool,
}

impl PostgresProductStore {
    /// Wrap an existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a connection pool for `config`.
    ///
    /// SSL is required for hosted providers (connection strings mentioning
    /// `supabase`) and disabled otherwise.
    pub async fn connect(config: &StoreConfig) -> Result<Self, StoreError> {
        let url = config
            .database_url()
            .ok_or_else(|| StoreError::Connection("no database url configured".to_string()))?;

        let options: PgConnectOptions = url
            .parse()
            .map_err(|e: sqlx::Error| StoreError::Connection(format!("invalid database url: {e}")))?;
        let ssl_mode = if config.requires_ssl() {
            PgSslMode::Require
        } else {
            PgSslMode::Disable
        };

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections())
            .connect_with(options.ssl_mode(ssl_mode))
            .await
            .map_err(|e| map_sqlx_error("connect", e))?;

        Ok(Self::new(pool))
    }

    /// Create the `products` table if it does not exist.
    ///
    /// Relies on the built-in `gen_random_uuid()` (Postgres 13+).
    #[instrument(skip(self), err)]
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(SCHEMA)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("ensure_schema", e))?;
        Ok(())
    }

    /// Insert `products` when the table is empty. Returns how many rows were written.
    #[instrument(skip(self, products), fields(candidates = products.len()), err)]
    pub async fn seed_if_empty(&self, products: &[Product]) -> Result<usize, StoreError> {
        let existing: i64 = sqlx::query("SELECT COUNT(*) AS n FROM products")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("seed_if_empty", e))?
            .try_get("n")
            .map_err(|e| map_sqlx_error("seed_if_empty", e))?;
        if existing > 0 {
            tracing::info!(existing, "products table already populated; skipping seed");
            return Ok(0);
        }

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_sqlx_error("seed_if_empty", e))?;
        for p in products {
            sqlx::query(
                r#"
                INSERT INTO products (id, name, description, price, image, badge, rating, reviews, inventory)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                "#,
            )
            .bind(p.id.as_uuid())
            .bind(&p.name)
            .bind(&p.description)
            .bind(p.price)
            .bind(&p.image)
            .bind(p.badge.map(|b| b.as_str()))
            .bind(p.rating)
            .bind(reviews_to_db(p.reviews)?)
            .bind(p.inventory.as_str())
            .execute(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error("seed_if_empty", e))?;
        }
        tx.commit()
            .await
            .map_err(|e| map_sqlx_error("seed_if_empty", e))?;

        Ok(products.len())
    }
}

#[async_trait]
impl ProductStore for PostgresProductStore {
    #[instrument(skip(self), fields(operation = "fetch_all", row_count = tracing::field::Empty), err)]
    async fn fetch_all(&self, limit: Option<usize>) -> Result<Vec<Product>, StoreError> {
        let rows = match limit {
            Some(n) => {
                let n = i64::try_from(n).unwrap_or(i64::MAX);
                sqlx::query(&format!(
                    "SELECT {COLUMNS} FROM products ORDER BY created_at ASC, id ASC LIMIT $1"
                ))
                .bind(n)
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query(&format!(
                    "SELECT {COLUMNS} FROM products ORDER BY created_at ASC, id ASC"
                ))
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(|e| map_sqlx_error("fetch_all", e))?;

        let products = rows
            .iter()
            .map(|row| ProductRow::from_row(row).and_then(Product::try_from))
            .collect::<Result<Vec<_>, _>>()?;

        Span::current().record("row_count", products.len());
        Ok(products)
    }

    #[instrument(skip(self), fields(operation = "fetch_by_id", product_id = %id), err)]
    async fn fetch_by_id(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        let row = sqlx::query(&format!("SELECT {COLUMNS} FROM products WHERE id = $1 LIMIT 1"))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("fetch_by_id", e))?;

        row.as_ref()
            .map(|r| ProductRow::from_row(r).and_then(Product::try_from))
            .transpose()
    }

    #[instrument(skip(self, product), fields(operation = "insert", name = %product.name), err)]
    async fn insert(&self, product: NewProduct) -> Result<Option<Product>, StoreError> {
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO products (name, description, price, image, badge, rating, reviews, inventory)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(&product.image)
        .bind(product.badge.map(|b| b.as_str()))
        .bind(product.rating)
        .bind(reviews_to_db(product.reviews)?)
        .bind(product.inventory.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("insert", e))?;

        row.as_ref()
            .map(|r| ProductRow::from_row(r).and_then(Product::try_from))
            .transpose()
    }
}

struct ProductRow {
    id: uuid::Uuid,
    name: String,
    description: String,
    price: Decimal,
    image: String,
    badge: Option<String>,
    rating: f64,
    reviews: i32,
    inventory: String,
}

impl ProductRow {
    fn from_row(row: &sqlx::postgres::PgRow) -> Result<Self, StoreError> {
        let decode = |e: sqlx::Error| map_sqlx_error("decode", e);
        Ok(ProductRow {
            id: row.try_get("id").map_err(decode)?,
            name: row.try_get("name").map_err(decode)?,
            description: row.try_get("description").map_err(decode)?,
            price: row.try_get("price").map_err(decode)?,
            image: row.try_get("image").map_err(decode)?,
            badge: row.try_get("badge").map_err(decode)?,
            rating: row.try_get("rating").map_err(decode)?,
            reviews: row.try_get("reviews").map_err(decode)?,
            inventory: row.try_get("inventory").map_err(decode)?,
        })
    }
}

impl TryFrom<ProductRow> for Product {
    type Error = StoreError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        let badge = row
            .badge
            .as_deref()
            .map(str::parse::<Badge>)
            .transpose()
            .map_err(|e| StoreError::Decode(format!("product {}: {e}", row.id)))?;
        let inventory = row
            .inventory
            .parse::<InventoryStatus>()
            .map_err(|e| StoreError::Decode(format!("product {}: {e}", row.id)))?;
        let reviews = u32::try_from(row.reviews)
            .map_err(|_| StoreError::Decode(format!("product {}: negative reviews", row.id)))?;

        Ok(Product {
            id: ProductId::from_uuid(row.id),
            name: row.name,
            description: row.description,
            price: row.price,
            image: row.image,
            badge,
            rating: row.rating,
            reviews,
            inventory,
        })
    }
}

fn reviews_to_db(reviews: u32) -> Result<i32, StoreError> {
    i32::try_from(reviews)
        .map_err(|_| StoreError::Database(format!("reviews count {reviews} exceeds column range")))
}

fn map_sqlx_error(operation: &str, err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::Database(db_err) => {
            let code = db_err.code().map(|c| c.to_string()).unwrap_or_default();
            StoreError::Database(format!(
                "{operation}: {} (code {code})",
                db_err.message()
            ))
        }
        sqlx::Error::PoolClosed | sqlx::Error::PoolTimedOut => {
            StoreError::Connection(format!("{operation}: connection pool unavailable"))
        }
        sqlx::Error::Io(e) => StoreError::Connection(format!("{operation}: {e}")),
        sqlx::Error::Tls(e) => StoreError::Connection(format!("{operation}: {e}")),
        e @ (sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::Decode(_)) => StoreError::Decode(format!("{operation}: {e}")),
        e => StoreError::Database(format!("{operation}: {e}")),
    }
}
