//! PDF ingestion command

use std::io;
use std::path::Path;
use std::sync::Arc;

use crate::chunking::RecursiveCharacterTextSplitter;
use crate::cli::output::*;
use crate::config::AppConfig;
use crate::database::PgVectorStore;
use crate::database::VectorStore;
use crate::embeddings::Embedder;
use crate::embeddings::EmbeddingClient;
use crate::ingest::IngestOutcome;
use crate::ingest::Ingestor;
use crate::Result;

/// Build an ingestor wired to OpenAI and the configured pgvector database
///
/// Credentials are only needed once chunks are ready to store, and the pool
/// connects lazily, so both kinds of problem surface at the storing stage.
pub fn build_ingestor(config: &AppConfig) -> Result<Ingestor> {
    let splitter =
        RecursiveCharacterTextSplitter::new(config.chunk_size(), config.chunk_overlap())?;
    let config = config.clone();

    Ok(Ingestor::deferred(splitter, move || {
        let embedder: Arc<dyn Embedder> = Arc::new(EmbeddingClient::from_config(&config)?);
        let store: Arc<dyn VectorStore> = Arc::new(PgVectorStore::connect_lazy(&config)?);
        Ok((embedder, store))
    }))
}

/// Ingest one PDF, printing progress and diagnostics
///
/// Never fails: every problem is reported on the console.
pub async fn handle_ingest(config: &AppConfig, path: &Path) {
    let mut stdout = io::stdout();

    let ingestor = match build_ingestor(config) {
        Ok(ingestor) => ingestor,
        Err(e) => {
            tracing::error!("Ingestion setup failed: {}", e);
            let _ = print_ingest_failure(&mut stdout, &e);
            return;
        }
    };

    let outcome = ingestor
        .ingest(path, |stage| {
            let _ = print_ingest_stage(&mut io::stdout(), &stage);
        })
        .await;

    // Console write failures leave nothing useful to report to
    let _ = match outcome {
        IngestOutcome::FileNotFound(path) => print_file_not_found(&mut stdout, &path),
        IngestOutcome::Completed { chunks, .. } => print_ingest_success(&mut stdout, chunks),
        IngestOutcome::Failed(e) => print_ingest_failure(&mut stdout, &e),
    };
}
