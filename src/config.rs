use std::path::Path;

use serde::Deserialize;
use serde::Serialize;

/// Environment variable holding the OpenAI API key
pub const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";
/// Environment variable holding the pgvector connection string
pub const PGVECTOR_CONNECTION_STRING_ENV: &str = "PGVECTOR_CONNECTION_STRING";
/// Optional override for the OpenAI-compatible API base URL
pub const OPENAI_BASE_URL_ENV: &str = "OPENAI_BASE_URL";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Usually filled from `PGVECTOR_CONNECTION_STRING`
    pub url: Option<String>,
    pub max_connections: u32,
    pub connection_timeout: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: 5,
            connection_timeout: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenAiConfig {
    /// Usually filled from `OPENAI_API_KEY`; never written back out
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    pub endpoint: String,
    pub embedding_model: String,
    pub chat_model: String,
    pub temperature: f32,
    pub request_timeout: u64,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: "https://api.openai.com/v1".to_string(),
            embedding_model: "text-embedding-3-small".to_string(),
            chat_model: "gpt-4o-mini".to_string(),
            temperature: 0.0,
            request_timeout: 120,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestionConfig {
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    pub default_pdf_path: String,
}

impl Default for IngestionConfig {
    fn default() -> Self {
        Self {
            chunk_size: 1000,
            chunk_overlap: 150,
            default_pdf_path: "document.pdf".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    pub collection_name: String,
    pub top_k: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            collection_name: "pdf_documents".to_string(),
            top_k: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub directory: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: "logs".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub openai: OpenAiConfig,
    pub ingestion: IngestionConfig,
    pub retrieval: RetrievalConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration: `.env`, then `config.toml` if present, then environment overrides
    pub fn load() -> crate::Result<Self> {
        dotenv::dotenv().ok();

        let mut config = if Path::new("config.toml").exists() {
            Self::from_file("config.toml")?
        } else {
            Self::default()
        };

        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Apply environment overrides using the given lookup
    ///
    /// Empty values count as unset, the same way an empty `.env` entry does.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(key) = lookup(OPENAI_API_KEY_ENV) {
            self.openai.api_key = Some(key);
        }
        if let Some(url) = lookup(PGVECTOR_CONNECTION_STRING_ENV) {
            self.database.url = Some(url);
        }
        if let Some(endpoint) = lookup(OPENAI_BASE_URL_ENV) {
            self.openai.endpoint = endpoint;
        }
    }

    /// Whether an OpenAI API key is configured
    pub fn has_api_key(&self) -> bool {
        self.openai.api_key.is_some()
    }

    /// Get the OpenAI API key or a configuration error
    pub fn api_key(&self) -> crate::Result<&str> {
        self.openai.api_key.as_deref().ok_or_else(|| {
            crate::PdfRagError::ConfigError(format!("{OPENAI_API_KEY_ENV} not set"))
        })
    }

    /// Get the database URL in a form sqlx accepts
    pub fn database_url(&self) -> crate::Result<String> {
        self.database
            .url
            .as_deref()
            .map(normalize_connection_string)
            .ok_or_else(|| {
                crate::PdfRagError::ConfigError(format!(
                    "{PGVECTOR_CONNECTION_STRING_ENV} not set"
                ))
            })
    }

    /// Get max connections for database pool
    pub fn max_connections(&self) -> u32 {
        self.database.max_connections
    }

    /// Get connection timeout in seconds
    pub fn connection_timeout(&self) -> u64 {
        self.database.connection_timeout
    }

    /// Get OpenAI endpoint without a trailing slash
    pub fn openai_endpoint(&self) -> &str {
        self.openai.endpoint.trim_end_matches('/')
    }

    /// Get embedding model name
    pub fn embedding_model(&self) -> &str {
        &self.openai.embedding_model
    }

    /// Get chat model name
    pub fn chat_model(&self) -> &str {
        &self.openai.chat_model
    }

    /// Get sampling temperature for the chat model
    pub fn temperature(&self) -> f32 {
        self.openai.temperature
    }

    /// Get HTTP request timeout in seconds
    pub fn request_timeout(&self) -> u64 {
        self.openai.request_timeout
    }

    pub fn chunk_size(&self) -> usize {
        self.ingestion.chunk_size
    }

    pub fn chunk_overlap(&self) -> usize {
        self.ingestion.chunk_overlap
    }

    pub fn default_pdf_path(&self) -> &str {
        &self.ingestion.default_pdf_path
    }

    pub fn collection_name(&self) -> &str {
        &self.retrieval.collection_name
    }

    pub fn top_k(&self) -> usize {
        self.retrieval.top_k
    }
}

/// Strip SQLAlchemy driver suffixes (`postgresql+psycopg://`) that libpq-style URLs don't allow
pub fn normalize_connection_string(url: &str) -> String {
    let url = url.trim();
    match url.split_once("://") {
        Some((scheme, rest)) => {
            let base = scheme.split('+').next().unwrap_or(scheme);
            format!("{base}://{rest}")
        }
        None => url.to_string(),
    }
}
