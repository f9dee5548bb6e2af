//! Embeddings generation module
//!
//! Text is embedded through OpenAI's embeddings API (`text-embedding-3-small`
//! by default). The [`Embedder`] trait is the seam the ingestion and retrieval
//! code depend on.
//!
//! # Examples
//!
//! ```rust,no_run
//! use pdfrag::config::AppConfig;
//! use pdfrag::embeddings::{Embedder, EmbeddingClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::load()?;
//!     let client = EmbeddingClient::from_config(&config)?;
//!
//!     let embedding = client.embed_query("Qual o faturamento da empresa?").await?;
//!     println!("Generated embedding with {} dimensions", embedding.len());
//!
//!     Ok(())
//! }
//! ```

pub mod client;

use async_trait::async_trait;
pub use client::EmbeddingClient;

use crate::errors::Result;

/// Maximum number of inputs sent in one embeddings request
pub const MAX_BATCH_SIZE: usize = 100;

/// Turns text into embedding vectors
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Embed a single search query
    async fn embed_query(&self, text: &str) -> Result<Vec<f32>>;

    /// Embed many texts, returning vectors in input order
    async fn embed_documents(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>>;
}
