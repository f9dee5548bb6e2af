//! RAG (Retrieval-Augmented Generation) module
//!
//! Answers questions about ingested PDFs:
//! - Semantic retrieval of the nearest chunks
//! - Context assembly from retrieved chunk texts
//! - LLM answer generation restricted to that context
//!
//! Every step returns a tagged outcome instead of an error so callers decide
//! how failures are shown.
//!
//! # Examples
//!
//! ```rust,no_run
//! use pdfrag::config::AppConfig;
//! use pdfrag::rag::SemanticSearch;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::load()?;
//!     let search = SemanticSearch::from_config(&config).await?;
//!
//!     let answer = search.ask("Qual o faturamento da empresa?").await;
//!     println!("Resposta: {answer}");
//!
//!     Ok(())
//! }
//! ```

pub mod context;
pub mod pipeline;
pub mod retriever;

use std::fmt;

use async_trait::async_trait;
pub use context::ContextAssembler;
pub use pipeline::SemanticSearch;
pub use retriever::Retriever;

use crate::models::SearchResult;

/// Shown when retrieval finds nothing or fails
pub const NO_DOCUMENTS_MESSAGE: &str =
    "❌ Não foi possível encontrar documentos relevantes ou houve um erro na busca.";

/// Prefix of the answer shown when generation fails
pub const GENERATION_ERROR_PREFIX: &str = "❌ Erro ao gerar resposta:";

/// Outcome of the retrieval step
#[derive(Debug, Clone, PartialEq)]
pub enum Retrieval {
    /// Nearest chunks, closest first
    Found(Vec<SearchResult>),
    /// The search ran but matched nothing
    Empty,
    /// The search could not run; treated as an empty result set
    Failed(String),
}

impl Retrieval {
    pub fn from_results(results: Vec<SearchResult>) -> Self {
        if results.is_empty() {
            Self::Empty
        } else {
            Self::Found(results)
        }
    }
}

/// Outcome of the generation step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Generation {
    Ok(String),
    Failed(String),
}

/// Final answer to one question
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    /// Model output, verbatim
    Text(String),
    /// No chunks to answer from; carries the search error if there was one
    NoDocuments { search_error: Option<String> },
    /// The model call failed
    Failed(String),
}

impl From<Generation> for Answer {
    fn from(generation: Generation) -> Self {
        match generation {
            Generation::Ok(text) => Self::Text(text),
            Generation::Failed(reason) => Self::Failed(reason),
        }
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::NoDocuments { .. } => f.write_str(NO_DOCUMENTS_MESSAGE),
            Self::Failed(reason) => write!(f, "{GENERATION_ERROR_PREFIX} {reason}"),
        }
    }
}

/// Anything that can answer a user question
#[async_trait]
pub trait QuestionAnswerer: Send + Sync {
    async fn ask(&self, query: &str) -> Answer;
}
