//! Prompt templates for RAG queries

/// Sentence the model must answer with when the context does not cover a question
pub const FALLBACK_ANSWER: &str = "Não tenho informações necessárias para responder sua pergunta.";

/// Standard RAG prompt templates
pub struct RagPrompts;

impl RagPrompts {
    /// Context-restricted QA prompt
    ///
    /// The model is told to answer only from `context` and to reply with
    /// [`FALLBACK_ANSWER`] otherwise. The wording is part of the observable
    /// behaviour and must stay byte-for-byte stable.
    #[must_use]
    pub fn strict_context_qa(context: &str, question: &str) -> String {
        format!(
            r#"CONTEXTO:
{context}

REGRAS:
- Responda somente com base no CONTEXTO.
- Se a informação não estiver explicitamente no CONTEXTO, responda:
  "{FALLBACK_ANSWER}"
- Nunca invente ou use conhecimento externo.
- Nunca produza opiniões ou interpretações além do que está escrito.

EXEMPLOS DE PERGUNTAS FORA DO CONTEXTO:
Pergunta: "Qual é a capital da França?"
Resposta: "{FALLBACK_ANSWER}"

Pergunta: "Quantos clientes temos em 2024?"
Resposta: "{FALLBACK_ANSWER}"

Pergunta: "Você acha isso bom ou ruim?"
Resposta: "{FALLBACK_ANSWER}"

PERGUNTA DO USUÁRIO:
{question}

RESPONDA A "PERGUNTA DO USUÁRIO""#
        )
    }
}
