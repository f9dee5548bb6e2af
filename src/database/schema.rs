use super::PgVectorStore;
use crate::Result;

impl PgVectorStore {
    /// Check if the vector store tables exist
    pub async fn is_schema_initialized(&self) -> Result<bool> {
        for table_name in ["langchain_pg_collection", "langchain_pg_embedding"] {
            let exists = sqlx::query_scalar::<_, bool>(
                r"
                SELECT EXISTS (
                    SELECT FROM information_schema.tables
                    WHERE table_schema = 'public'
                    AND table_name = $1
                )
                ",
            )
            .bind(table_name)
            .fetch_one(&self.pool)
            .await?;

            if !exists {
                tracing::debug!("Missing required table: {}", table_name);
                return Ok(false);
            }
        }

        Ok(true)
    }

    /// Create the extension, tables and index if they are missing
    ///
    /// Every statement is idempotent, so this runs before each ingestion.
    pub async fn init_schema(&self) -> Result<()> {
        sqlx::query("CREATE EXTENSION IF NOT EXISTS vector")
            .execute(&self.pool)
            .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS langchain_pg_collection (
                uuid UUID PRIMARY KEY,
                name VARCHAR NOT NULL UNIQUE,
                cmetadata JSON
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS langchain_pg_embedding (
                id VARCHAR PRIMARY KEY,
                collection_id UUID REFERENCES langchain_pg_collection (uuid) ON DELETE CASCADE,
                embedding VECTOR,
                document VARCHAR,
                cmetadata JSONB
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE INDEX IF NOT EXISTS ix_cmetadata_gin
            ON langchain_pg_embedding USING gin (cmetadata jsonb_path_ops)
            ",
        )
        .execute(&self.pool)
        .await?;

        tracing::debug!("Vector store schema ready");
        Ok(())
    }
}
