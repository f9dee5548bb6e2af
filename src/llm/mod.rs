//! Chat model access for answer generation

pub mod prompts;

use std::time::Duration;

use async_trait::async_trait;
pub use prompts::RagPrompts;
use reqwest::Client;
use serde::Deserialize;
use serde::Serialize;
use tracing::debug;

use crate::config::AppConfig;
use crate::errors::PdfRagError;
use crate::errors::Result;

/// Produces a text completion for a prompt
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Send `prompt` as a single user message and return the reply text
    async fn invoke(&self, prompt: &str) -> Result<String>;
}

/// A single chat message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

/// OpenAI chat-completions client
///
/// One request per call; no retries and no streaming.
#[derive(Debug, Clone)]
pub struct LlmService {
    model: String,
    endpoint: String,
    api_key: String,
    temperature: f32,
    client: Client,
}

impl LlmService {
    /// Create a new LLM service
    pub fn new(
        model: impl Into<String>,
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        temperature: f32,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            model: model.into(),
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            temperature,
            client,
        })
    }

    /// Create the service from application configuration
    ///
    /// # Errors
    /// - Missing `OPENAI_API_KEY`
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Self::new(
            config.chat_model(),
            config.openai_endpoint(),
            config.api_key()?,
            config.temperature(),
            Duration::from_secs(config.request_timeout()),
        )
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send a full message list and return the first choice's text
    pub async fn chat(&self, messages: Vec<ChatMessage>) -> Result<String> {
        let url = format!("{}/chat/completions", self.endpoint);
        debug!("Calling chat completions API: {} ({})", url, self.model);

        let request = ChatCompletionRequest {
            model: &self.model,
            messages,
            temperature: self.temperature,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(PdfRagError::LlmError(format!(
                "OpenAI API error ({status}): {error_text}"
            )));
        }

        let result: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| PdfRagError::LlmError(format!("Failed to parse response: {e}")))?;

        result
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content.unwrap_or_default())
            .ok_or_else(|| PdfRagError::LlmError("No choices in response".to_string()))
    }
}

#[async_trait]
impl ChatModel for LlmService {
    async fn invoke(&self, prompt: &str) -> Result<String> {
        self.chat(vec![ChatMessage::user(prompt)]).await
    }
}
