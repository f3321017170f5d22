//! LLM trait definitions

use crate::error::Result;
use async_trait::async_trait;
use serde::Serialize;
use std::collections::BTreeMap;

/// Default sampling temperature when a caller does not choose one
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Default completion budget
pub const DEFAULT_MAX_TOKENS: u32 = 2000;

/// One text generation call against a named provider
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub prompt: String,
    pub provider: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>, provider: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            provider: provider.into(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

/// Availability of one provider, as reported to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderStatus {
    pub configured: bool,
    pub model: String,
}

/// Text generation over a set of named providers
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate a completion for the prompt with the named provider
    async fn generate(&self, request: &GenerationRequest) -> Result<String>;

    /// Provider name -> availability
    fn providers(&self) -> BTreeMap<String, ProviderStatus>;
}

/// Embedding generation trait
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Generate embedding for single text
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Generate embeddings for batch of texts
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    /// Get embedding dimensions (0 until known)
    fn dimensions(&self) -> usize;

    /// Get model name
    fn model_name(&self) -> &str;
}
