//! Ingest a PDF into the vector store
//!
//! Usage: `ingest [PDF]` (defaults to `document.pdf`). Always exits 0;
//! failures are reported on the console.

use std::path::PathBuf;

use clap::Parser;
use pdfrag::cli::IngestArgs;

#[tokio::main]
async fn main() {
    let args = IngestArgs::parse();

    let (config, _guard) = match pdfrag::cli::init(false) {
        Ok(init) => init,
        Err(e) => {
            println!("❌ Erro durante a ingestão: {e}");
            return;
        }
    };

    let path = args
        .path
        .unwrap_or_else(|| PathBuf::from(config.default_pdf_path()));
    pdfrag::cli::handle_ingest(&config, &path).await;
}
