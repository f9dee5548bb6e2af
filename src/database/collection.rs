use async_trait::async_trait;
use pgvector::Vector;
use sqlx::Postgres;
use sqlx::QueryBuilder;
use tracing::debug;
use uuid::Uuid;

use super::PgVectorStore;
use super::VectorStore;
use crate::models::DocumentChunk;
use crate::models::SearchResult;
use crate::PdfRagError;
use crate::Result;

/// Rows per INSERT statement (5 binds each, well under the 65535 bind limit)
const INSERT_BATCH_SIZE: usize = 500;

impl PgVectorStore {
    /// Look up the collection id, creating the collection if needed
    pub async fn get_or_create_collection(&self) -> Result<Uuid> {
        sqlx::query(
            r"
            INSERT INTO langchain_pg_collection (uuid, name, cmetadata)
            VALUES ($1, $2, NULL)
            ON CONFLICT (name) DO NOTHING
            ",
        )
        .bind(Uuid::new_v4())
        .bind(&self.collection_name)
        .execute(&self.pool)
        .await?;

        let uuid = sqlx::query_scalar::<_, Uuid>(
            "SELECT uuid FROM langchain_pg_collection WHERE name = $1",
        )
        .bind(&self.collection_name)
        .fetch_one(&self.pool)
        .await?;

        Ok(uuid)
    }

    /// Number of chunks stored in the collection
    pub async fn count_chunks(&self) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            r"
            SELECT COUNT(*)
            FROM langchain_pg_embedding e
            INNER JOIN langchain_pg_collection c ON e.collection_id = c.uuid
            WHERE c.name = $1
            ",
        )
        .bind(&self.collection_name)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }
}

#[async_trait]
impl VectorStore for PgVectorStore {
    async fn add_embedded_chunks(
        &self,
        chunks: &[DocumentChunk],
        embeddings: Vec<Vec<f32>>,
    ) -> Result<Vec<String>> {
        if chunks.len() != embeddings.len() {
            return Err(PdfRagError::Custom(format!(
                "Got {} chunks but {} embeddings",
                chunks.len(),
                embeddings.len()
            )));
        }
        if chunks.is_empty() {
            return Ok(Vec::new());
        }

        self.init_schema().await?;
        let collection_id = self.get_or_create_collection().await?;

        let mut rows = Vec::with_capacity(chunks.len());
        for (chunk, embedding) in chunks.iter().zip(embeddings) {
            rows.push((
                Uuid::new_v4().to_string(),
                Vector::from(embedding),
                chunk.content.as_str(),
                serde_json::to_value(&chunk.metadata)?,
            ));
        }

        let mut tx = self.pool.begin().await?;
        for batch in rows.chunks(INSERT_BATCH_SIZE) {
            let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
                "INSERT INTO langchain_pg_embedding (id, collection_id, embedding, document, cmetadata) ",
            );
            builder.push_values(batch, |mut row, (id, embedding, document, metadata)| {
                row.push_bind(id)
                    .push_bind(collection_id)
                    .push_bind(embedding)
                    .push_bind(*document)
                    .push_bind(metadata);
            });
            builder.push(
                " ON CONFLICT (id) DO UPDATE SET \
                 embedding = EXCLUDED.embedding, \
                 document = EXCLUDED.document, \
                 cmetadata = EXCLUDED.cmetadata",
            );
            builder.build().execute(&mut *tx).await?;
        }
        tx.commit().await?;

        debug!(
            "Stored {} chunks in collection {}",
            rows.len(),
            self.collection_name
        );

        Ok(rows.into_iter().map(|(id, ..)| id).collect())
    }

    async fn similarity_search_with_score(
        &self,
        embedding: Vec<f32>,
        k: usize,
    ) -> Result<Vec<SearchResult>> {
        #[derive(sqlx::FromRow)]
        struct RawResult {
            document: Option<String>,
            distance: Option<f64>,
        }

        let raw_results = sqlx::query_as::<_, RawResult>(
            r"
            SELECT
                e.document,
                (e.embedding <=> $1) AS distance
            FROM langchain_pg_embedding e
            INNER JOIN langchain_pg_collection c ON e.collection_id = c.uuid
            WHERE c.name = $2
            ORDER BY distance ASC
            LIMIT $3
            ",
        )
        .bind(Vector::from(embedding))
        .bind(&self.collection_name)
        .bind(k as i64)
        .fetch_all(&self.pool)
        .await?;

        Ok(raw_results
            .into_iter()
            .map(|r| SearchResult {
                content: r.document.unwrap_or_default(),
                score: r.distance.unwrap_or(f64::MAX),
            })
            .collect())
    }
}
