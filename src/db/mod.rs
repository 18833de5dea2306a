//! Database module - partner store access.
//!
//! The selector only needs a query executor that returns raw partner rows,
//! so the store sits behind [`PartnerStore`]. [`PgPartnerStore`] is the
//! Postgres implementation over a shared `sqlx` pool.

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;
use thiserror::Error;

use crate::partner::model::RawPartnerRow;

const PARTNER_QUERY: &str = "SELECT razaosocial, cgc, endereco, numero, bairro, cidade, uf, cep, datacancelamento, tipo FROM empresas";

/// Failure to read partner rows from the store.
///
/// Displays exactly the underlying error message.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error(transparent)]
    Database(#[from] sqlx::Error),
    #[error("{0}")]
    Store(String),
}

/// Source of raw partner rows.
#[async_trait]
pub trait PartnerStore: Send + Sync {
    /// Fetch every partner row, in store order.
    async fn fetch_partner_rows(&self) -> Result<Vec<RawPartnerRow>, QueryError>;
}

/// Postgres-backed partner store.
#[derive(Clone)]
pub struct PgPartnerStore {
    pool: PgPool,
}

impl PgPartnerStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Build a pool without opening a connection.
    ///
    /// Only a malformed URL fails here; an unreachable database surfaces
    /// on the first query.
    pub fn connect_lazy(database_url: &str, acquire_timeout: Duration) -> Result<Self, QueryError> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(acquire_timeout)
            .idle_timeout(Duration::from_secs(900))
            .connect_lazy(database_url)?;
        Ok(Self::new(pool))
    }
}

#[async_trait]
impl PartnerStore for PgPartnerStore {
    async fn fetch_partner_rows(&self) -> Result<Vec<RawPartnerRow>, QueryError> {
        let rows = sqlx::query_as::<_, RawPartnerRow>(PARTNER_QUERY)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }
}
