//! Configuration management

use crate::error::{DocIntelError, Result};
use crate::llm::ProviderKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// LLM providers keyed by the name clients select them with
    #[serde(default = "default_providers")]
    pub providers: BTreeMap<String, ProviderConfig>,

    /// Provider used when a request does not name one
    #[serde(default = "default_provider_name")]
    pub default_provider: String,

    /// Embedding service used by the memory store
    #[serde(default)]
    pub embedding: EmbeddingServiceConfig,

    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// SQLite file holding the memory collection
    #[serde(default)]
    pub database_path: Option<PathBuf>,

    /// Per-call network timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

/// One configured LLM provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Wire protocol spoken by the endpoint
    pub kind: ProviderKind,

    /// Full URL requests are POSTed to
    pub endpoint: String,

    /// Model identifier sent with every request
    pub model: String,

    /// API key (prefer `api_key_env` so keys stay out of config files)
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,

    /// Environment variable the API key is read from at startup
    #[serde(default)]
    pub api_key_env: Option<String>,
}

impl ProviderConfig {
    pub fn new(kind: ProviderKind, endpoint: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            kind,
            endpoint: endpoint.into(),
            model: model.into(),
            api_key: None,
            api_key_env: None,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_api_key_env(mut self, var: impl Into<String>) -> Self {
        self.api_key_env = Some(var.into());
        self
    }

    /// A provider is usable when it has a credential, or needs none
    pub fn is_configured(&self) -> bool {
        !self.kind.requires_api_key() || self.api_key.as_deref().is_some_and(|k| !k.is_empty())
    }

    fn resolve_api_key(&mut self) {
        if self.api_key.is_some() {
            return;
        }
        if let Some(ref var) = self.api_key_env {
            self.api_key = std::env::var(var).ok().filter(|k| !k.is_empty());
        }
    }
}

/// Embedding service configuration (OpenAI-compatible `/v1/embeddings`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingServiceConfig {
    /// Base URL of the embeddings service
    pub url: String,

    /// Model name for embeddings
    #[serde(default = "default_embedding_model")]
    pub model: String,

    /// Embedding dimensions (detected from the first response if not specified)
    #[serde(default)]
    pub dimensions: Option<usize>,

    /// API key (optional, for authenticated services)
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
}

impl Default for EmbeddingServiceConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:11434".to_string(),
            model: default_embedding_model(),
            dimensions: None,
            api_key: None,
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            providers: default_providers(),
            default_provider: default_provider_name(),
            embedding: EmbeddingServiceConfig::default(),
            server: ServerConfig::default(),
            database_path: None,
            timeout_secs: default_timeout(),
        }
    }
}

fn default_providers() -> BTreeMap<String, ProviderConfig> {
    let mut providers = BTreeMap::new();
    providers.insert(
        "groq".to_string(),
        ProviderConfig::new(
            ProviderKind::OpenAiCompatible,
            "https://api.groq.com/openai/v1/chat/completions",
            "llama-3.1-8b-instant",
        )
        .with_api_key_env("GROQ_API_KEY"),
    );
    providers.insert(
        "openai".to_string(),
        ProviderConfig::new(
            ProviderKind::OpenAiCompatible,
            "https://api.openai.com/v1/chat/completions",
            "gpt-3.5-turbo",
        )
        .with_api_key_env("OPENAI_API_KEY"),
    );
    providers.insert(
        "anthropic".to_string(),
        ProviderConfig::new(
            ProviderKind::Anthropic,
            "https://api.anthropic.com/v1/messages",
            "claude-3-haiku-20240307",
        )
        .with_api_key_env("ANTHROPIC_API_KEY"),
    );
    providers.insert(
        "ollama".to_string(),
        ProviderConfig::new(
            ProviderKind::Ollama,
            ollama_endpoint(env_var("OLLAMA_URL").as_deref()),
            "llama3.2",
        ),
    );
    providers
}

/// Generate endpoint under an Ollama base URL (`OLLAMA_URL`), local default otherwise
fn ollama_endpoint(base: Option<&str>) -> String {
    let base = base.unwrap_or("http://localhost:11434");
    format!("{}/api/generate", base.trim_end_matches('/'))
}

fn default_provider_name() -> String {
    "groq".to_string()
}

fn default_embedding_model() -> String {
    "nomic-embed-text".to_string()
}

fn default_timeout() -> u64 {
    60
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

impl Config {
    /// Load config from `DOCINTEL_CONFIG` or the default path, then resolve
    /// API keys from the environment
    pub fn load() -> Result<Self> {
        let path = std::env::var("DOCINTEL_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| Self::default_path());

        let mut config = if path.exists() {
            tracing::debug!("Loading config from {}", path.display());
            let content = std::fs::read_to_string(&path)?;
            serde_yaml::from_str::<Config>(&content)?
        } else {
            Config::default()
        };

        config.resolve_env();
        config.validate()?;
        Ok(config)
    }

    /// Get default config path
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(crate::CONFIG_DIR_NAME)
            .join("config.yml")
    }

    /// Resolve the memory database path (`DOCINTEL_DB` wins over the config file)
    pub fn database_path(&self) -> PathBuf {
        if let Ok(path) = std::env::var("DOCINTEL_DB") {
            return PathBuf::from(path);
        }
        self.database_path.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(crate::DATA_DIR_NAME)
                .join("memory.sqlite")
        })
    }

    /// Apply environment overrides: provider API keys, embedding service
    /// and server bind settings
    pub fn resolve_env(&mut self) {
        for provider in self.providers.values_mut() {
            provider.resolve_api_key();
        }

        if let Some(url) = env_var("DOCINTEL_EMBEDDING_URL") {
            self.embedding.url = url;
        }
        if let Some(model) = env_var("DOCINTEL_EMBEDDING_MODEL") {
            self.embedding.model = model;
        }
        if let Some(key) = env_var("DOCINTEL_EMBEDDING_API_KEY") {
            self.embedding.api_key = Some(key);
        }
        if let Some(dims) = env_var("DOCINTEL_EMBEDDING_DIMS").and_then(|d| d.parse().ok()) {
            self.embedding.dimensions = Some(dims);
        }
        if let Some(host) = env_var("DOCINTEL_HOST") {
            self.server.host = host;
        }
        if let Some(port) = env_var("DOCINTEL_PORT").and_then(|p| p.parse().ok()) {
            self.server.port = port;
        }
    }

    fn validate(&self) -> Result<()> {
        if self.providers.is_empty() {
            return Err(DocIntelError::Config("no providers configured".to_string()));
        }
        if !self.providers.contains_key(&self.default_provider) {
            return Err(DocIntelError::Config(format!(
                "default provider '{}' is not configured",
                self.default_provider
            )));
        }
        if self.timeout_secs == 0 {
            return Err(DocIntelError::Config(
                "timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
