//! Memory statistics and collection reset

use super::schema::ensure_collection;
use super::{EntryMetadata, MemoryStore};
use crate::error::Result;
use rusqlite::params;
use serde::Serialize;

const SAMPLE_LIMIT: usize = 5;
const PREVIEW_CHARS: usize = 200;
const SUMMARY_PREVIEW_CHARS: usize = 100;

/// Memory stats
#[derive(Debug, Clone, Serialize)]
pub struct MemoryStats {
    /// Number of entries (each stored document contributes two)
    pub total_documents: usize,
    pub collection_name: String,
    pub samples: Vec<MemorySample>,
}

/// Truncated preview of one stored entry
#[derive(Debug, Clone, Serialize)]
pub struct MemorySample {
    pub preview: String,
    pub timestamp: String,
    pub summary: String,
}

impl MemoryStore {
    /// Number of entries in the collection
    pub fn count(&self) -> Result<usize> {
        let conn = self.lock()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM memory_entries WHERE collection = ?1",
            params![self.collection],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }

    /// Total count plus up to five sample previews in insertion order
    pub fn stats(&self) -> Result<MemoryStats> {
        let total_documents = self.count()?;

        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT document, metadata FROM memory_entries
             WHERE collection = ?1 ORDER BY seq LIMIT ?2",
        )?;
        let rows = stmt
            .query_map(params![self.collection, SAMPLE_LIMIT as i64], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let samples = rows
            .into_iter()
            .map(|(document, metadata)| -> Result<MemorySample> {
                let metadata: EntryMetadata = serde_json::from_str(&metadata)?;
                Ok(MemorySample {
                    preview: truncate_with_ellipsis(&document, PREVIEW_CHARS),
                    timestamp: metadata.timestamp,
                    summary: truncate_with_ellipsis(&metadata.summary, SUMMARY_PREVIEW_CHARS),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(MemoryStats {
            total_documents,
            collection_name: self.collection.clone(),
            samples,
        })
    }

    /// Delete the collection with all its entries and recreate it empty
    pub fn clear(&self) -> Result<()> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        tx.execute(
            "DELETE FROM memory_entries WHERE collection = ?1",
            params![self.collection],
        )?;
        tx.execute(
            "DELETE FROM collections WHERE name = ?1",
            params![self.collection],
        )?;
        ensure_collection(&tx, &self.collection)?;
        tx.commit()?;

        tracing::info!(collection = %self.collection, "Memory cleared");
        Ok(())
    }
}

/// First `max_chars` characters, with `...` appended only when cut
fn truncate_with_ellipsis(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}...", &text[..byte_idx]),
        None => text.to_string(),
    }
}
