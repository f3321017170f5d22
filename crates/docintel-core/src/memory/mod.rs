//! Semantic memory of processed documents
//!
//! Every stored document becomes two embedded entries in one collection:
//! the full text under the document id, and the summary under
//! `<id>_summary` tagged with `parent_id`. Both carry the same metadata
//! bundle. Storage is SQLite with embeddings kept as BLOBs; nearest
//! neighbours are found by brute-force cosine similarity.

mod entries;
mod schema;
mod stats;
pub mod vectors;

pub use stats::{MemorySample, MemoryStats};

use crate::error::{DocIntelError, Result};
use crate::llm::Embedder;
use crate::pipeline::Question;
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard};

/// Suffix appended to a document id to form its summary entry id
pub const SUMMARY_ID_SUFFIX: &str = "_summary";

/// Vector-store collection of document and summary entries
pub struct MemoryStore {
    conn: Mutex<Connection>,
    embedder: Arc<dyn Embedder>,
    collection: String,
}

impl MemoryStore {
    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| DocIntelError::Store("memory store lock poisoned".to_string()))
    }

    /// Reject vectors that do not match the embedder's declared size
    /// (a declared size of 0 means not yet known)
    fn check_dimensions(&self, embedding: &[f32]) -> Result<()> {
        let expected = self.embedder.dimensions();
        if expected > 0 && embedding.len() != expected {
            return Err(DocIntelError::Store(format!(
                "embedding from {} has {} dimensions, expected {}",
                self.embedder.model_name(),
                embedding.len(),
                expected
            )));
        }
        Ok(())
    }
}

/// Id of the summary entry derived from a document
pub fn summary_entry_id(doc_id: &str) -> String {
    format!("{}{}", doc_id, SUMMARY_ID_SUFFIX)
}

/// Whether an entry holds the full document or its derived summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Document,
    Summary,
}

/// Metadata bundle stored alongside every entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryMetadata {
    pub timestamp: String,
    pub summary: String,
    /// JSON-encoded `Vec<String>`
    pub facts: String,
    /// JSON-encoded `Vec<Question>`
    pub questions: String,
    pub doc_length: usize,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub entry_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
}

impl EntryMetadata {
    pub fn kind(&self) -> EntryKind {
        match self.entry_type.as_deref() {
            Some("summary") => EntryKind::Summary,
            _ => EntryKind::Document,
        }
    }

    pub fn decoded_facts(&self) -> Vec<String> {
        decode_or_default(&self.facts, "facts")
    }

    pub fn decoded_questions(&self) -> Vec<Question> {
        decode_or_default(&self.questions, "questions")
    }
}

fn decode_or_default<T: serde::de::DeserializeOwned + Default>(json: &str, field: &str) -> T {
    serde_json::from_str(json).unwrap_or_else(|e| {
        tracing::warn!("Undecodable {} metadata: {}", field, e);
        T::default()
    })
}

/// One stored entry, as read back by id
#[derive(Debug, Clone, Serialize)]
pub struct MemoryEntry {
    pub id: String,
    pub text: String,
    pub metadata: EntryMetadata,
}

/// One nearest-neighbour result
#[derive(Debug, Clone, Serialize)]
pub struct MemoryHit {
    pub id: String,
    pub kind: EntryKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    pub text: String,
    pub summary: String,
    pub facts: Vec<String>,
    pub questions: Vec<Question>,
    pub timestamp: String,
    pub relevance_score: f32,
}
