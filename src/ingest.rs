//! PDF ingestion: load -> split -> embed -> store

use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::error;
use tracing::info;

use crate::chunking::RecursiveCharacterTextSplitter;
use crate::database::VectorStore;
use crate::embeddings::Embedder;
use crate::models::DocumentChunk;
use crate::pdf::PdfLoader;
use crate::Result;

/// Progress notifications emitted while ingesting
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestStage {
    Started { path: PathBuf },
    Loading,
    Loaded { pages: usize },
    Splitting,
    Split { chunks: usize },
    Storing,
}

/// Result of one ingestion run
#[derive(Debug)]
pub enum IngestOutcome {
    /// The path does not exist; nothing was written
    FileNotFound(PathBuf),
    /// All chunks were embedded and stored
    Completed { pages: usize, chunks: usize },
    /// Loading, embedding or storage failed
    Failed(crate::PdfRagError),
}

/// Embedding and storage services used by the storing stage
pub type IngestServices = (Arc<dyn Embedder>, Arc<dyn VectorStore>);

type Connector = Box<dyn Fn() -> Result<IngestServices> + Send + Sync>;

enum Services {
    Ready(IngestServices),
    Deferred(Connector),
}

/// Drives one PDF through the ingestion pipeline
pub struct Ingestor {
    splitter: RecursiveCharacterTextSplitter,
    services: Services,
}

impl Ingestor {
    pub fn new(
        splitter: RecursiveCharacterTextSplitter,
        embedder: Arc<dyn Embedder>,
        store: Arc<dyn VectorStore>,
    ) -> Self {
        Self {
            splitter,
            services: Services::Ready((embedder, store)),
        }
    }

    /// Build the services only when the storing stage is reached
    ///
    /// A missing file or an unreadable PDF is then reported even when the
    /// credentials are absent.
    pub fn deferred<F>(splitter: RecursiveCharacterTextSplitter, connect: F) -> Self
    where
        F: Fn() -> Result<IngestServices> + Send + Sync + 'static,
    {
        Self {
            splitter,
            services: Services::Deferred(Box::new(connect)),
        }
    }

    fn services(&self) -> Result<IngestServices> {
        match &self.services {
            Services::Ready((embedder, store)) => Ok((embedder.clone(), store.clone())),
            Services::Deferred(connect) => connect(),
        }
    }

    /// Ingest the PDF at `path`, reporting each stage to `on_stage`
    ///
    /// Failures are returned as [`IngestOutcome`] values, never as errors.
    pub async fn ingest<F>(&self, path: &Path, mut on_stage: F) -> IngestOutcome
    where
        F: FnMut(IngestStage),
    {
        on_stage(IngestStage::Started {
            path: path.to_path_buf(),
        });

        if !path.exists() {
            return IngestOutcome::FileNotFound(path.to_path_buf());
        }

        on_stage(IngestStage::Loading);
        let pages = match PdfLoader::load(path) {
            Ok(pages) => pages,
            Err(e) => {
                error!("Failed to load {}: {}", path.display(), e);
                return IngestOutcome::Failed(e);
            }
        };
        on_stage(IngestStage::Loaded { pages: pages.len() });

        on_stage(IngestStage::Splitting);
        let chunks = self.splitter.split_documents(&pages);
        on_stage(IngestStage::Split {
            chunks: chunks.len(),
        });

        on_stage(IngestStage::Storing);
        match self.store_chunks(&chunks).await {
            Ok(stored) => {
                info!(
                    "Ingested {}: {} pages, {} chunks",
                    path.display(),
                    pages.len(),
                    stored
                );
                IngestOutcome::Completed {
                    pages: pages.len(),
                    chunks: stored,
                }
            }
            Err(e) => {
                error!("Ingestion of {} failed: {}", path.display(), e);
                IngestOutcome::Failed(e)
            }
        }
    }

    /// Embed and store already-split chunks, returning how many were stored
    pub async fn store_chunks(&self, chunks: &[DocumentChunk]) -> Result<usize> {
        if chunks.is_empty() {
            return Ok(0);
        }

        let (embedder, store) = self.services()?;
        let texts: Vec<&str> = chunks.iter().map(|c| c.content.as_str()).collect();
        let embeddings = embedder.embed_documents(&texts).await?;
        let ids = store.add_embedded_chunks(chunks, embeddings).await?;
        Ok(ids.len())
    }
}
