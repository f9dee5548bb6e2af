//! Interactive question loop over the ingested PDF
//!
//! Exits 1 if `OPENAI_API_KEY` is missing or the search system cannot start.

use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let (config, _guard) = match pdfrag::cli::init(false) {
        Ok(init) => init,
        Err(e) => {
            eprintln!("Erro ao carregar a configuração: {e}");
            return ExitCode::FAILURE;
        }
    };

    pdfrag::cli::handle_chat(&config).await
}
