//! Retrieval of the chunks nearest to a query

use std::sync::Arc;

use tracing::debug;
use tracing::info;

use crate::database::VectorStore;
use crate::embeddings::Embedder;
use crate::errors::Result;
use crate::models::SearchResult;
use crate::rag::Retrieval;

/// Embeds queries and looks up their nearest chunks
pub struct Retriever {
    embedder: Arc<dyn Embedder>,
    store: Arc<dyn VectorStore>,
}

impl Retriever {
    /// Create a new retriever
    pub fn new(embedder: Arc<dyn Embedder>, store: Arc<dyn VectorStore>) -> Self {
        Self { embedder, store }
    }

    /// Semantic search using vector embeddings
    pub async fn semantic_search(&self, query: &str, limit: usize) -> Result<Vec<SearchResult>> {
        debug!("Performing semantic search: {}", query);

        let query_embedding = self.embedder.embed_query(query).await?;
        self.store
            .similarity_search_with_score(query_embedding, limit)
            .await
    }

    /// Semantic search with failures folded into the outcome
    pub async fn retrieve(&self, query: &str, limit: usize) -> Retrieval {
        match self.semantic_search(query, limit).await {
            Ok(results) => {
                debug!("Retrieved {} results", results.len());
                Retrieval::from_results(results)
            }
            Err(e) => {
                info!("Search failed: {}", e);
                Retrieval::Failed(e.to_string())
            }
        }
    }
}
