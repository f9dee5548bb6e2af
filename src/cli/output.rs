//! CLI output formatting utilities
//!
//! All user-facing console text lives here so the handlers only decide *what*
//! happened.

use std::io;
use std::io::Write;

use crate::ingest::IngestStage;
use crate::rag::Answer;
use crate::PdfRagError;

const RULE_WIDTH: usize = 50;

/// Words that end the interactive loop (compared case-insensitively)
pub const EXIT_KEYWORDS: [&str; 4] = ["sair", "exit", "quit", "q"];

pub fn is_exit_keyword(input: &str) -> bool {
    EXIT_KEYWORDS
        .iter()
        .any(|keyword| input.eq_ignore_ascii_case(keyword))
}

/// Print the chat banner
pub fn print_banner(out: &mut impl Write) -> io::Result<()> {
    let rule = "=".repeat(RULE_WIDTH);
    writeln!(out, "Sistema de Busca Semântica em PDF")?;
    writeln!(out, "{rule}")?;
    writeln!(out, "Digite suas perguntas sobre o documento PDF ingerido.")?;
    writeln!(out, "Digite 'sair' ou 'exit' para encerrar.")?;
    writeln!(out, "{rule}")
}

pub fn print_missing_api_key(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "Erro: OPENAI_API_KEY não encontrada!")?;
    writeln!(
        out,
        "Crie um arquivo .env baseado no .env.example e configure sua chave da OpenAI."
    )
}

pub fn print_init_failure(out: &mut impl Write, err: &PdfRagError) -> io::Result<()> {
    if matches!(err, PdfRagError::Database(_)) {
        writeln!(out, "❌ Erro ao conectar com o banco de dados: {err}")?;
        writeln!(
            out,
            "Verifique se o Docker Compose está rodando: docker compose up -d"
        )?;
    }
    writeln!(out, "Erro ao inicializar o sistema: {err}")?;
    writeln!(out, "Verifique se:")?;
    writeln!(out, "1. O Docker Compose está rodando: docker compose up -d")?;
    writeln!(out, "2. O PDF foi ingerido: cargo run --bin ingest")?;
    writeln!(out, "3. A variável OPENAI_API_KEY está configurada")
}

pub fn print_question_prompt(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "Faça sua pergunta:")?;
    write!(out, "\nPERGUNTA: ")?;
    out.flush()
}

pub fn print_farewell(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "\n Até logo!")
}

pub fn print_interrupted(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "\n\n Chat interrompido pelo usuário. Até logo!")
}

pub fn print_empty_question(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "Por favor, digite uma pergunta válida.")
}

pub fn print_unexpected_error(out: &mut impl Write, err: &dyn std::fmt::Display) -> io::Result<()> {
    writeln!(out, "Erro inesperado: {err}")?;
    writeln!(out, "Tente novamente ou reinicie o sistema.\n")
}

/// Render one answer, followed by the separator rule
pub fn print_answer(out: &mut impl Write, answer: &Answer) -> io::Result<()> {
    if let Answer::NoDocuments {
        search_error: Some(reason),
    } = answer
    {
        writeln!(out, "❌ Erro durante a busca: {reason}")?;
    }
    writeln!(out, "RESPOSTA: {answer}")?;
    writeln!(out, "\n{}\n", "-".repeat(RULE_WIDTH))
}

/// Render an ingestion progress stage
pub fn print_ingest_stage(out: &mut impl Write, stage: &IngestStage) -> io::Result<()> {
    match stage {
        IngestStage::Started { path } => {
            writeln!(out, "Iniciando ingestão do PDF: {}", path.display())
        }
        IngestStage::Loading => writeln!(out, "Carregando PDF..."),
        IngestStage::Loaded { pages } => writeln!(out, "PDF carregado com {pages} páginas"),
        IngestStage::Splitting => writeln!(out, "Dividindo documento em chunks..."),
        IngestStage::Split { chunks } => writeln!(out, "Documento dividido em {chunks} chunks"),
        IngestStage::Storing => {
            writeln!(out, "Inicializando embeddings OpenAI...")?;
            writeln!(out, "Criando embeddings e salvando no banco de dados...")
        }
    }
}

pub fn print_file_not_found(out: &mut impl Write, path: &std::path::Path) -> io::Result<()> {
    writeln!(out, "Erro: Arquivo PDF não encontrado: {}", path.display())
}

pub fn print_ingest_success(out: &mut impl Write, chunks: usize) -> io::Result<()> {
    writeln!(
        out,
        "✅ Ingestão concluída! {chunks} chunks foram salvos no banco de dados."
    )
}

pub fn print_ingest_failure(out: &mut impl Write, err: &PdfRagError) -> io::Result<()> {
    writeln!(out, "❌ Erro durante a ingestão: {err}")?;
    writeln!(out, "Verifique se:")?;
    writeln!(out, "1. O Docker Compose está rodando (docker compose up -d)")?;
    writeln!(
        out,
        "2. A variável OPENAI_API_KEY está configurada no arquivo .env"
    )?;
    writeln!(out, "3. A conexão com o PostgreSQL está funcionando")
}
