use std::time::Duration;

use pdfrag::embeddings::Embedder;
use pdfrag::embeddings::EmbeddingClient;
use pdfrag::llm::ChatMessage;
use pdfrag::llm::ChatModel;
use pdfrag::llm::LlmService;
use pdfrag::PdfRagError;
use serde_json::json;
use serde_json::Value;
use wiremock::matchers::body_partial_json;
use wiremock::matchers::header;
use wiremock::matchers::method;
use wiremock::matchers::path;
use wiremock::Mock;
use wiremock::MockServer;
use wiremock::Request;
use wiremock::Respond;
use wiremock::ResponseTemplate;

/// Replies with one embedding per input, listed in reverse index order
struct EmbeddingsEcho;

impl Respond for EmbeddingsEcho {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let body: Value = serde_json::from_slice(&request.body).unwrap();
        let inputs = body["input"].as_array().unwrap();
        let data: Vec<Value> = inputs
            .iter()
            .enumerate()
            .rev()
            .map(|(index, text)| {
                let len = text.as_str().unwrap().len() as f32;
                json!({ "object": "embedding", "index": index, "embedding": [len, index as f32] })
            })
            .collect();
        ResponseTemplate::new(200).set_body_json(json!({ "object": "list", "data": data }))
    }
}

fn embedding_client(server: &MockServer) -> EmbeddingClient {
    EmbeddingClient::new(
        "text-embedding-3-small",
        format!("{}/v1/", server.uri()),
        "sk-test",
        Duration::from_secs(5),
    )
    .unwrap()
}

fn llm(server: &MockServer) -> LlmService {
    LlmService::new(
        "gpt-4o-mini",
        format!("{}/v1", server.uri()),
        "sk-test",
        0.0,
        Duration::from_secs(5),
    )
    .unwrap()
}

#[tokio::test]
async fn test_embed_query_sends_model_and_key() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/embeddings"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_partial_json(json!({ "model": "text-embedding-3-small", "input": ["olá"] })))
        .respond_with(EmbeddingsEcho)
        .expect(1)
        .mount(&server)
        .await;

    let embedding = embedding_client(&server).embed_query("olá").await.unwrap();

    assert_eq!(embedding, vec!["olá".len() as f32, 0.0]);
}

#[tokio::test]
async fn test_embed_documents_keeps_input_order_across_batches() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/embeddings"))
        .respond_with(EmbeddingsEcho)
        .expect(2)
        .mount(&server)
        .await;

    let texts: Vec<String> = (0..150).map(|i| "x".repeat(i + 1)).collect();
    let refs: Vec<&str> = texts.iter().map(String::as_str).collect();

    let embeddings = embedding_client(&server)
        .embed_documents(&refs)
        .await
        .unwrap();

    assert_eq!(embeddings.len(), 150);
    for (i, embedding) in embeddings.iter().enumerate() {
        assert_eq!(embedding[0], (i + 1) as f32);
    }
}

#[tokio::test]
async fn test_embedding_api_error_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/embeddings"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
        .mount(&server)
        .await;

    let err = embedding_client(&server)
        .embed_query("pergunta")
        .await
        .unwrap_err();

    match err {
        PdfRagError::EmbeddingError(msg) => {
            assert!(msg.contains("401"));
            assert!(msg.contains("invalid api key"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_embedding_count_mismatch_is_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/embeddings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .mount(&server)
        .await;

    let result = embedding_client(&server).embed_documents(&["a", "b"]).await;

    assert!(matches!(result, Err(PdfRagError::EmbeddingError(_))));
}

#[tokio::test]
async fn test_invoke_sends_single_user_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_partial_json(json!({
            "model": "gpt-4o-mini",
            "temperature": 0.0,
            "messages": [{ "role": "user", "content": "CONTEXTO:\nabc" }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "index": 0, "message": { "role": "assistant", "content": "R$ 10 milhões" } }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let answer = llm(&server).invoke("CONTEXTO:\nabc").await.unwrap();

    assert_eq!(answer, "R$ 10 milhões");
}

#[tokio::test]
async fn test_chat_error_status_is_llm_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(429).set_body_string("rate limit"))
        .mount(&server)
        .await;

    let err = llm(&server)
        .chat(vec![ChatMessage::user("oi")])
        .await
        .unwrap_err();

    assert!(matches!(err, PdfRagError::LlmError(ref msg) if msg.contains("429")));
}

#[tokio::test]
async fn test_chat_without_choices_is_llm_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
        .mount(&server)
        .await;

    let result = llm(&server).invoke("oi").await;

    assert!(matches!(result, Err(PdfRagError::LlmError(_))));
}
