//! Command line argument definitions

use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;

#[derive(Parser, Debug)]
#[command(name = "pdfrag")]
#[command(about = "Ingest PDFs into pgvector and ask questions about them")]
#[command(version)]
pub struct Cli {
    /// Enable verbose debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load a PDF, split it into chunks, embed them and store them
    Ingest(IngestArgs),
    /// Ask questions interactively about the ingested documents
    Chat,
    /// Ask a single question and print the answer
    Ask {
        /// The question (words are joined with spaces)
        #[arg(required = true, num_args = 1..)]
        question: Vec<String>,
    },
}

/// Arguments of the ingestion entry point
#[derive(Parser, Debug)]
#[command(name = "ingest")]
#[command(about = "Ingest a PDF into the vector store")]
pub struct IngestArgs {
    /// Path of the PDF to ingest (defaults to the configured path, `document.pdf`)
    pub path: Option<PathBuf>,
}
