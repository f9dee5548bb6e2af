//! OpenAI embeddings API client

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde::Serialize;
use tracing::debug;

use super::Embedder;
use super::MAX_BATCH_SIZE;
use crate::config::AppConfig;
use crate::errors::PdfRagError;
use crate::errors::Result;

/// Client for the OpenAI `/embeddings` endpoint
#[derive(Debug, Clone)]
pub struct EmbeddingClient {
    model: String,
    endpoint: String,
    api_key: String,
    client: Client,
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    input: &'a [&'a str],
    model: &'a str,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    index: usize,
    embedding: Vec<f32>,
}

impl EmbeddingClient {
    /// Create a new embedding client
    ///
    /// # Errors
    /// - HTTP client build errors (invalid configuration)
    pub fn new(
        model: impl Into<String>,
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            model: model.into(),
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            client,
        })
    }

    /// Create a client from application configuration
    ///
    /// # Errors
    /// - Missing `OPENAI_API_KEY`
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Self::new(
            config.embedding_model(),
            config.openai_endpoint(),
            config.api_key()?,
            Duration::from_secs(config.request_timeout()),
        )
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Call the embeddings endpoint for one batch of texts
    async fn request_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        let url = format!("{}/embeddings", self.endpoint);
        debug!("Calling OpenAI embeddings API: {} items", texts.len());

        let request = EmbeddingRequest {
            input: texts,
            model: &self.model,
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
            return Err(PdfRagError::EmbeddingError(format!(
                "OpenAI API error ({status}): {error_text}"
            )));
        }

        let mut result: EmbeddingResponse = response
            .json()
            .await
            .map_err(|e| PdfRagError::EmbeddingError(format!("Failed to parse response: {e}")))?;

        if result.data.len() != texts.len() {
            return Err(PdfRagError::EmbeddingError(format!(
                "Expected {} embeddings, got {}",
                texts.len(),
                result.data.len()
            )));
        }

        result.data.sort_by_key(|d| d.index);
        Ok(result.data.into_iter().map(|d| d.embedding).collect())
    }
}

#[async_trait]
impl Embedder for EmbeddingClient {
    async fn embed_query(&self, text: &str) -> Result<Vec<f32>> {
        self.request_batch(&[text])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| PdfRagError::EmbeddingError("No embedding in response".to_string()))
    }

    async fn embed_documents(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        let mut embeddings = Vec::with_capacity(texts.len());
        for batch in texts.chunks(MAX_BATCH_SIZE) {
            embeddings.extend(self.request_batch(batch).await?);
        }
        Ok(embeddings)
    }
}
