//! One-shot question command

use std::process::ExitCode;

use crate::cli::output::print_init_failure;
use crate::cli::output::print_missing_api_key;
use crate::config::AppConfig;
use crate::rag::Answer;
use crate::rag::SemanticSearch;

/// Answer a single question and print it
pub async fn handle_ask(config: &AppConfig, question: &str) -> ExitCode {
    let mut stdout = std::io::stdout();

    if !config.has_api_key() {
        let _ = print_missing_api_key(&mut stdout);
        return ExitCode::FAILURE;
    }

    let search = match SemanticSearch::from_config(config).await {
        Ok(search) => search,
        Err(e) => {
            let _ = print_init_failure(&mut stdout, &e);
            return ExitCode::FAILURE;
        }
    };

    println!("Pergunta: {question}");
    let answer = search.ask(question).await;
    if let Answer::NoDocuments {
        search_error: Some(reason),
    } = &answer
    {
        println!("❌ Erro durante a busca: {reason}");
    }
    println!("Resposta: {answer}");

    ExitCode::SUCCESS
}
