//! Document service: pipeline plus memory behind one handle
//!
//! Shared by the HTTP server and the CLI so both surfaces run identical
//! process/query flows.

use crate::config::Config;
use crate::error::Result;
use crate::llm::{GenerationRequest, HttpEmbedder, ProviderClient, ProviderStatus, TextGenerator};
use crate::memory::{MemoryEntry, MemoryHit, MemoryStats, MemoryStore};
use crate::pipeline::{prompts, DocumentPipeline, Question};
use crate::COLLECTION_NAME;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

/// Result of running a document through the pipeline
#[derive(Debug, Clone, Serialize)]
pub struct ProcessedDocument {
    pub summary: String,
    pub facts: Vec<String>,
    pub questions: Vec<Question>,
    /// Present when the document was stored in memory
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_id: Option<String>,
}

/// Answer generated from retrieved memory entries
#[derive(Debug, Clone, Serialize)]
pub struct QueryAnswer {
    pub answer: String,
    pub sources: Vec<MemoryHit>,
}

#[derive(Clone)]
pub struct DocumentService {
    generator: Arc<dyn TextGenerator>,
    pipeline: Arc<DocumentPipeline>,
    memory: Arc<MemoryStore>,
}

impl DocumentService {
    pub fn new(generator: Arc<dyn TextGenerator>, memory: Arc<MemoryStore>) -> Self {
        let pipeline = Arc::new(DocumentPipeline::new(generator.clone()));
        Self {
            generator,
            pipeline,
            memory,
        }
    }

    /// Wire the HTTP provider client, embedding service and on-disk store
    pub fn from_config(config: &Config) -> Result<Self> {
        let generator = Arc::new(ProviderClient::from_config(config)?);
        let embedder = Arc::new(HttpEmbedder::new(
            config.embedding.clone(),
            Duration::from_secs(config.timeout_secs),
        )?);
        let db_path = config.database_path();
        tracing::debug!(path = %db_path.display(), "Opening memory store");
        let memory = Arc::new(MemoryStore::open(&db_path, COLLECTION_NAME, embedder)?);
        Ok(Self::new(generator, memory))
    }

    /// Run the three stages, then store the result when `use_memory` is set.
    /// Nothing is stored if any stage fails.
    pub async fn process(
        &self,
        text: &str,
        use_memory: bool,
        provider: &str,
    ) -> Result<ProcessedDocument> {
        let output = self.pipeline.run(text, provider).await?;

        let document_id = if use_memory {
            Some(
                self.memory
                    .store(text, &output.summary, &output.facts, &output.questions)
                    .await?,
            )
        } else {
            None
        };

        Ok(ProcessedDocument {
            summary: output.summary,
            facts: output.facts,
            questions: output.questions,
            document_id,
        })
    }

    /// Retrieve the closest entries and answer the question from them
    pub async fn query_memory(
        &self,
        query: &str,
        provider: &str,
        top_k: usize,
    ) -> Result<QueryAnswer> {
        let sources = self.memory.query(query, top_k).await?;
        let context = sources
            .iter()
            .map(|hit| hit.text.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");

        let request = GenerationRequest::new(prompts::answer_prompt(&context, query), provider);
        let answer = self.generator.generate(&request).await?;

        tracing::info!(provider, sources = sources.len(), "Answered memory query");
        Ok(QueryAnswer { answer, sources })
    }

    pub fn stats(&self) -> Result<MemoryStats> {
        self.memory.stats()
    }

    pub fn clear(&self) -> Result<()> {
        self.memory.clear()
    }

    pub fn delete(&self, doc_id: &str) -> bool {
        self.memory.delete(doc_id)
    }

    pub fn get(&self, id: &str) -> Result<Option<MemoryEntry>> {
        self.memory.get(id)
    }

    pub fn providers(&self) -> BTreeMap<String, ProviderStatus> {
        self.generator.providers()
    }
}
