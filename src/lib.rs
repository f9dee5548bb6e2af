//! pdfrag: question answering over PDFs with retrieval-augmented generation
//!
//! Ingestion turns a PDF into overlapping text chunks, embeds them and stores
//! them in a pgvector collection. Querying embeds the question, retrieves the
//! nearest chunks and asks a chat model to answer only from them.

pub mod chunking;
pub mod cli;
pub mod config;
pub mod database;
pub mod embeddings;
pub mod errors;
pub mod ingest;
pub mod llm;
pub mod logging;
pub mod models;
pub mod pdf;
pub mod rag;

pub use config::AppConfig;
pub use errors::*;
