//! Complete RAG pipeline: Retrieve -> Assemble -> Generate

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;
use tracing::info;
use tracing::warn;

use crate::config::AppConfig;
use crate::database::PgVectorStore;
use crate::database::VectorStore;
use crate::embeddings::Embedder;
use crate::embeddings::EmbeddingClient;
use crate::errors::Result;
use crate::llm::ChatModel;
use crate::llm::LlmService;
use crate::llm::RagPrompts;
use crate::models::SearchResult;
use crate::rag::Answer;
use crate::rag::ContextAssembler;
use crate::rag::Generation;
use crate::rag::QuestionAnswerer;
use crate::rag::Retrieval;
use crate::rag::Retriever;

/// Question answering over the ingested collection
pub struct SemanticSearch {
    retriever: Retriever,
    context_assembler: ContextAssembler,
    llm: Arc<dyn ChatModel>,
    top_k: usize,
}

impl SemanticSearch {
    /// Build the embedding client, connect to the store and set up the chat model
    ///
    /// # Errors
    /// - Missing `OPENAI_API_KEY` or `PGVECTOR_CONNECTION_STRING`
    /// - Database connection errors
    pub async fn from_config(config: &AppConfig) -> Result<Self> {
        let embedder = Arc::new(EmbeddingClient::from_config(config)?);
        let store = Arc::new(PgVectorStore::from_config(config).await?);
        if store.is_schema_initialized().await? {
            info!(
                "Collection {} holds {} chunks",
                store.collection_name(),
                store.count_chunks().await?
            );
        } else {
            warn!("Vector store tables are missing; ingest a PDF before asking questions");
        }
        let llm = Arc::new(LlmService::from_config(config)?);

        Ok(Self::from_services(embedder, store, llm, config.top_k()))
    }

    /// Create from existing services
    #[must_use]
    pub fn from_services(
        embedder: Arc<dyn Embedder>,
        store: Arc<dyn VectorStore>,
        llm: Arc<dyn ChatModel>,
        top_k: usize,
    ) -> Self {
        Self {
            retriever: Retriever::new(embedder, store),
            context_assembler: ContextAssembler::new(),
            llm,
            top_k,
        }
    }

    pub const fn top_k(&self) -> usize {
        self.top_k
    }

    /// The `k` chunks most similar to `query`
    pub async fn search_similar_documents(&self, query: &str, k: usize) -> Retrieval {
        self.retriever.retrieve(query, k).await
    }

    /// Ask the chat model to answer `query` from the given chunks only
    pub async fn generate_answer(&self, query: &str, documents: &[SearchResult]) -> Generation {
        let context = self.context_assembler.assemble(documents);
        let prompt = RagPrompts::strict_context_qa(&context, query);
        debug!("=== LLM PROMPT ===\n{}\n=== END PROMPT ===", prompt);

        match self.llm.invoke(&prompt).await {
            Ok(text) => Generation::Ok(text),
            Err(e) => {
                info!("Answer generation failed: {}", e);
                Generation::Failed(e.to_string())
            }
        }
    }

    /// Answer a question from the ingested documents
    ///
    /// Never fails: retrieval problems become [`Answer::NoDocuments`] and model
    /// problems become [`Answer::Failed`].
    pub async fn ask(&self, query: &str) -> Answer {
        info!("Processing RAG query: {}", query);

        let results = match self.search_similar_documents(query, self.top_k).await {
            Retrieval::Found(results) => results,
            Retrieval::Empty => return Answer::NoDocuments { search_error: None },
            Retrieval::Failed(reason) => {
                return Answer::NoDocuments {
                    search_error: Some(reason),
                }
            }
        };

        let answer = Answer::from(self.generate_answer(query, &results).await);
        info!("RAG query completed");
        answer
    }
}

#[async_trait]
impl QuestionAnswerer for SemanticSearch {
    async fn ask(&self, query: &str) -> Answer {
        Self::ask(self, query).await
    }
}
