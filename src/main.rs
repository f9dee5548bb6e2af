use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use pdfrag::cli::Cli;
use pdfrag::cli::Commands;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let (config, _guard) = match pdfrag::cli::init(cli.verbose) {
        Ok(init) => init,
        Err(e) => {
            eprintln!("Erro ao carregar a configuração: {e}");
            return ExitCode::FAILURE;
        }
    };

    match cli.command {
        Commands::Ingest(args) => {
            let path = args
                .path
                .unwrap_or_else(|| PathBuf::from(config.default_pdf_path()));
            pdfrag::cli::handle_ingest(&config, &path).await;
            ExitCode::SUCCESS
        }
        Commands::Chat => pdfrag::cli::handle_chat(&config).await,
        Commands::Ask { question } => pdfrag::cli::handle_ask(&config, &question.join(" ")).await,
    }
}
