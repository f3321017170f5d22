//! Entry storage, similarity query and deletion

use super::vectors::{bytes_to_embedding, embedding_to_bytes, relevance_score};
use super::{summary_entry_id, EntryMetadata, MemoryEntry, MemoryHit, MemoryStore};
use crate::error::{DocIntelError, Result};
use crate::pipeline::Question;
use chrono::Utc;
use rusqlite::{params, OptionalExtension};

impl MemoryStore {
    /// Store a processed document as a document entry plus a summary entry.
    /// Returns the new document id.
    pub async fn store(
        &self,
        text: &str,
        summary: &str,
        facts: &[String],
        questions: &[Question],
    ) -> Result<String> {
        let doc_id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        let metadata = EntryMetadata {
            timestamp: now.clone(),
            summary: summary.to_string(),
            facts: serde_json::to_string(facts)?,
            questions: serde_json::to_string(questions)?,
            doc_length: text.chars().count(),
            entry_type: None,
            parent_id: None,
        };
        let summary_metadata = EntryMetadata {
            entry_type: Some("summary".to_string()),
            parent_id: Some(doc_id.clone()),
            ..metadata.clone()
        };

        let embeddings = self
            .embedder
            .embed_batch(&[text.to_string(), summary.to_string()])
            .await?;
        let [doc_embedding, summary_embedding]: [Vec<f32>; 2] =
            embeddings.try_into().map_err(|v: Vec<Vec<f32>>| {
                DocIntelError::Store(format!("expected 2 embeddings, got {}", v.len()))
            })?;
        self.check_dimensions(&doc_embedding)?;
        self.check_dimensions(&summary_embedding)?;

        let summary_id = summary_entry_id(&doc_id);
        let metadata_json = serde_json::to_string(&metadata)?;
        let summary_metadata_json = serde_json::to_string(&summary_metadata)?;

        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO memory_entries (id, collection, document, embedding, metadata, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )?;
            stmt.execute(params![
                doc_id,
                self.collection,
                text,
                embedding_to_bytes(&doc_embedding),
                metadata_json,
                now
            ])?;
            stmt.execute(params![
                summary_id,
                self.collection,
                summary,
                embedding_to_bytes(&summary_embedding),
                summary_metadata_json,
                now
            ])?;
        }
        tx.commit()?;

        tracing::info!(doc_id = %doc_id, chars = metadata.doc_length, "Stored document in memory");
        Ok(doc_id)
    }

    /// Nearest-neighbour search over all entries, best match first
    pub async fn query(&self, query_text: &str, top_k: usize) -> Result<Vec<MemoryHit>> {
        if top_k == 0 {
            return Ok(Vec::new());
        }

        let query_embedding = self.embedder.embed(query_text).await?;

        let candidates = {
            let conn = self.lock()?;
            let mut stmt = conn.prepare(
                "SELECT id, document, embedding, metadata FROM memory_entries
                 WHERE collection = ?1 ORDER BY seq",
            )?;
            let rows = stmt
                .query_map(params![self.collection], |row| {
                    let id: String = row.get(0)?;
                    let document: String = row.get(1)?;
                    let embedding_bytes: Vec<u8> = row.get(2)?;
                    let metadata: String = row.get(3)?;
                    Ok((id, document, bytes_to_embedding(&embedding_bytes), metadata))
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            rows
        };

        let mut scored: Vec<_> = candidates
            .into_iter()
            .map(|(id, document, embedding, metadata)| {
                let score = relevance_score(&query_embedding, &embedding);
                (score, id, document, metadata)
            })
            .collect();
        scored.sort_by(|a, b| b.0.total_cmp(&a.0));
        scored.truncate(top_k);

        let hits = scored
            .into_iter()
            .map(|(score, id, text, metadata)| -> Result<MemoryHit> {
                let metadata: EntryMetadata = serde_json::from_str(&metadata)?;
                Ok(MemoryHit {
                    kind: metadata.kind(),
                    facts: metadata.decoded_facts(),
                    questions: metadata.decoded_questions(),
                    id,
                    text,
                    summary: metadata.summary,
                    timestamp: metadata.timestamp,
                    parent_id: metadata.parent_id,
                    relevance_score: score,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(results = hits.len(), top_k, "Memory query complete");
        Ok(hits)
    }

    /// Fetch one entry by id
    pub fn get(&self, id: &str) -> Result<Option<MemoryEntry>> {
        let conn = self.lock()?;
        let row = conn
            .query_row(
                "SELECT id, document, metadata FROM memory_entries
                 WHERE collection = ?1 AND id = ?2",
                params![self.collection, id],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                    ))
                },
            )
            .optional()?;

        row.map(|(id, text, metadata)| -> Result<MemoryEntry> {
            Ok(MemoryEntry {
                id,
                text,
                metadata: serde_json::from_str(&metadata)?,
            })
        })
        .transpose()
    }

    /// Delete a document and its summary entry. Returns true if anything
    /// was removed; store failures are logged and reported as false.
    pub fn delete(&self, doc_id: &str) -> bool {
        match self.try_delete(doc_id) {
            Ok(removed) => removed > 0,
            Err(e) => {
                tracing::error!(doc_id, "Error deleting document: {}", e);
                false
            }
        }
    }

    fn try_delete(&self, doc_id: &str) -> Result<usize> {
        let conn = self.lock()?;
        let removed = conn.execute(
            "DELETE FROM memory_entries WHERE collection = ?1 AND id IN (?2, ?3)",
            params![self.collection, doc_id, summary_entry_id(doc_id)],
        )?;
        tracing::debug!(doc_id, removed, "Deleted memory entries");
        Ok(removed)
    }
}
