//! pgvector-backed chunk store
//!
//! Uses the LangChain `PGVector` table layout (`langchain_pg_collection` and
//! `langchain_pg_embedding`) so collections stay readable by other tools.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::DocumentChunk;
use crate::models::SearchResult;
use crate::Result;

mod collection;
mod schema;

/// Stores embedded chunks and answers nearest-neighbour queries
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Insert chunks with their embeddings, returning the new row ids
    async fn add_embedded_chunks(
        &self,
        chunks: &[DocumentChunk],
        embeddings: Vec<Vec<f32>>,
    ) -> Result<Vec<String>>;

    /// The `k` nearest chunks to `embedding`, closest first
    async fn similarity_search_with_score(
        &self,
        embedding: Vec<f32>,
        k: usize,
    ) -> Result<Vec<SearchResult>>;
}

/// Connection pool plus the collection all reads and writes target
#[derive(Debug, Clone)]
pub struct PgVectorStore {
    pool: PgPool,
    collection_name: String,
}

impl PgVectorStore {
    #[must_use]
    pub fn new(pool: PgPool, collection_name: impl Into<String>) -> Self {
        Self {
            pool,
            collection_name: collection_name.into(),
        }
    }

    /// Connect using application configuration
    ///
    /// Connects eagerly so an unreachable database fails here.
    pub async fn from_config(config: &crate::config::AppConfig) -> Result<Self> {
        let pool_options = sqlx::postgres::PgPoolOptions::new()
            .max_connections(config.max_connections())
            .acquire_timeout(std::time::Duration::from_secs(config.connection_timeout()));

        let pool = pool_options.connect(&config.database_url()?).await?;

        tracing::info!(
            "Database pool configured: max_connections={}, collection={}",
            config.max_connections(),
            config.collection_name()
        );

        Ok(Self::new(pool, config.collection_name()))
    }

    /// Build a pool that only connects on first use
    ///
    /// Fails here only for a missing or malformed connection string.
    pub fn connect_lazy(config: &crate::config::AppConfig) -> Result<Self> {
        let pool = sqlx::postgres::PgPoolOptions::new()
            .max_connections(config.max_connections())
            .acquire_timeout(std::time::Duration::from_secs(config.connection_timeout()))
            .connect_lazy(&config.database_url()?)?;

        Ok(Self::new(pool, config.collection_name()))
    }

    /// Get a reference to the database pool for raw queries
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }

    #[must_use]
    pub fn collection_name(&self) -> &str {
        &self.collection_name
    }
}
