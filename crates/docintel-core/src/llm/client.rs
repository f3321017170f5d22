//! HTTP client for external LLM providers (Groq, OpenAI, Anthropic, Ollama)

use super::{GenerationRequest, ProviderStatus, TextGenerator};
use crate::config::{Config, ProviderConfig};
use crate::error::{DocIntelError, Result};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::time::{Duration, Instant};

/// Provider-dispatching client implementing [`TextGenerator`]
pub struct ProviderClient {
    http_client: reqwest::Client,
    providers: BTreeMap<String, ProviderConfig>,
}

impl ProviderClient {
    /// Create a client over an explicit provider table
    pub fn new(providers: BTreeMap<String, ProviderConfig>, timeout: Duration) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(DocIntelError::Http)?;

        Ok(Self {
            http_client,
            providers,
        })
    }

    /// Create from configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            config.providers.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    /// Look up a provider by name
    pub fn provider(&self, name: &str) -> Result<&ProviderConfig> {
        self.providers
            .get(name)
            .ok_or_else(|| DocIntelError::UnknownProvider(name.to_string()))
    }
}

#[async_trait]
impl TextGenerator for ProviderClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<String> {
        let name = request.provider.as_str();
        let config = self.provider(name)?;
        let kind = config.kind;
        let start = Instant::now();

        tracing::debug!(
            provider = name,
            kind = %kind,
            model = %config.model,
            temperature = request.temperature,
            "Sending generation request"
        );

        let response = kind
            .build_request(&self.http_client, config, request)
            .send()
            .await
            .map_err(|e| {
                DocIntelError::upstream(name, kind.describe_failure(format!("Request failed: {}", e)))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(provider = name, %status, "Provider returned an error");
            return Err(DocIntelError::upstream(
                name,
                kind.describe_failure(format!("HTTP {}: {}", status, body)),
            ));
        }

        let body = response.text().await.map_err(|e| {
            DocIntelError::upstream(
                name,
                kind.describe_failure(format!("Failed to read response: {}", e)),
            )
        })?;

        let text = kind
            .parse_response(&body)
            .map_err(|message| DocIntelError::upstream(name, kind.describe_failure(message)))?;

        tracing::debug!(
            provider = name,
            elapsed_ms = start.elapsed().as_millis() as u64,
            chars = text.len(),
            "Generation complete"
        );

        Ok(text)
    }

    fn providers(&self) -> BTreeMap<String, ProviderStatus> {
        self.providers
            .iter()
            .map(|(name, config)| {
                (
                    name.clone(),
                    ProviderStatus {
                        configured: config.is_configured(),
                        model: config.model.clone(),
                    },
                )
            })
            .collect()
    }
}
