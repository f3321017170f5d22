//! HTTP-based embedder using an external OpenAI-compatible service

use super::Embedder;
use crate::config::EmbeddingServiceConfig;
use crate::error::{DocIntelError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Embedder that calls `{url}/v1/embeddings` (Ollama, OpenAI, vLLM, etc.)
pub struct HttpEmbedder {
    http_client: reqwest::Client,
    config: EmbeddingServiceConfig,
    dimensions: AtomicUsize,
}

impl HttpEmbedder {
    /// Create from configuration
    pub fn new(config: EmbeddingServiceConfig, timeout: Duration) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(DocIntelError::Http)?;

        let dimensions = AtomicUsize::new(config.dimensions.unwrap_or(0));

        Ok(Self {
            http_client,
            config,
            dimensions,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/v1/embeddings", self.config.url.trim_end_matches('/'))
    }
}

#[derive(Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Deserialize)]
struct EmbedResponse {
    data: Vec<EmbedData>,
}

#[derive(Deserialize)]
struct EmbedData {
    embedding: Vec<f32>,
}

#[async_trait]
impl Embedder for HttpEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let results = self.embed_batch(&[text.to_string()]).await?;
        results
            .into_iter()
            .next()
            .ok_or_else(|| DocIntelError::upstream("embeddings", "No embedding returned"))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let request = EmbedRequest {
            model: &self.config.model,
            input: texts,
        };

        let mut req = self.http_client.post(self.endpoint()).json(&request);
        if let Some(ref api_key) = self.config.api_key {
            req = req.header("Authorization", format!("Bearer {}", api_key));
        }

        let response = req
            .send()
            .await
            .map_err(|e| DocIntelError::upstream("embeddings", format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(DocIntelError::upstream(
                "embeddings",
                format!("Embedding service error (HTTP {}): {}", status, body),
            ));
        }

        let embed_response: EmbedResponse = response.json().await.map_err(|e| {
            DocIntelError::upstream("embeddings", format!("Invalid response: {}", e))
        })?;

        if embed_response.data.len() != texts.len() {
            return Err(DocIntelError::upstream(
                "embeddings",
                format!(
                    "Expected {} embeddings, got {}",
                    texts.len(),
                    embed_response.data.len()
                ),
            ));
        }

        let embeddings: Vec<Vec<f32>> = embed_response
            .data
            .into_iter()
            .map(|d| d.embedding)
            .collect();

        if let Some(first) = embeddings.first() {
            self.dimensions.store(first.len(), Ordering::Relaxed);
        }

        tracing::debug!("Embedded {} texts with {}", texts.len(), self.config.model);
        Ok(embeddings)
    }

    fn dimensions(&self) -> usize {
        self.dimensions.load(Ordering::Relaxed)
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::{json, Value};

    async fn embeddings_stub(Json(body): Json<Value>) -> Json<Value> {
        let data: Vec<Value> = body["input"]
            .as_array()
            .unwrap()
            .iter()
            .map(|text| {
                let len = text.as_str().unwrap().len() as f32;
                json!({"object": "embedding", "embedding": [len, 1.0, 0.0]})
            })
            .collect();
        Json(json!({"object": "list", "data": data}))
    }

    async fn spawn_embeddings() -> String {
        let app = Router::new().route("/v1/embeddings", post(embeddings_stub));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}/", addr)
    }

    fn config(url: String) -> EmbeddingServiceConfig {
        EmbeddingServiceConfig {
            url,
            model: "test-embed".to_string(),
            dimensions: None,
            api_key: None,
        }
    }

    #[tokio::test]
    async fn test_embed_batch_preserves_order_and_learns_dimensions() {
        let url = spawn_embeddings().await;
        let embedder = HttpEmbedder::new(config(url), Duration::from_secs(5)).unwrap();
        assert_eq!(embedder.dimensions(), 0);

        let vectors = embedder
            .embed_batch(&["a".to_string(), "abcd".to_string()])
            .await
            .unwrap();
        assert_eq!(vectors.len(), 2);
        assert_eq!(vectors[0][0], 1.0);
        assert_eq!(vectors[1][0], 4.0);
        assert_eq!(embedder.dimensions(), 3);
        assert_eq!(embedder.model_name(), "test-embed");
    }

    #[tokio::test]
    async fn test_unreachable_service() {
        let embedder =
            HttpEmbedder::new(config("http://127.0.0.1:9".to_string()), Duration::from_secs(2))
                .unwrap();
        let err = embedder.embed("hello").await.unwrap_err();
        assert!(matches!(err, DocIntelError::Upstream { ref provider, .. } if provider == "embeddings"));
    }
}
