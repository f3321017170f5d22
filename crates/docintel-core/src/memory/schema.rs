//! Memory store schema and initialization

use super::MemoryStore;
use crate::error::Result;
use crate::llm::Embedder;
use chrono::Utc;
use rusqlite::{params, Connection};
use std::path::Path;
use std::sync::{Arc, Mutex};

const COLLECTION_DESCRIPTION: &str = "Stores processed documents with embeddings";

const CREATE_TABLES: &str = r#"
-- Named collections of entries
CREATE TABLE IF NOT EXISTS collections (
    name TEXT PRIMARY KEY,
    description TEXT NOT NULL,
    created_at TEXT NOT NULL
);

-- Embedded entries (documents and their derived summaries)
CREATE TABLE IF NOT EXISTS memory_entries (
    seq INTEGER PRIMARY KEY AUTOINCREMENT,
    id TEXT NOT NULL,
    collection TEXT NOT NULL REFERENCES collections(name) ON DELETE CASCADE,
    document TEXT NOT NULL,
    embedding BLOB NOT NULL,
    metadata TEXT NOT NULL,
    created_at TEXT NOT NULL,
    UNIQUE(collection, id)
);

CREATE INDEX IF NOT EXISTS idx_memory_entries_collection ON memory_entries(collection);
"#;

impl MemoryStore {
    /// Open store at path, creating the file and schema if necessary
    pub fn open(
        path: impl AsRef<Path>,
        collection: impl Into<String>,
        embedder: Arc<dyn Embedder>,
    ) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        tracing::debug!("Opening memory store at {}", path.display());
        let conn = Connection::open(path)?;
        Self::from_connection(conn, collection.into(), embedder)
    }

    /// Open in-memory store (for testing)
    pub fn open_in_memory(
        collection: impl Into<String>,
        embedder: Arc<dyn Embedder>,
    ) -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::from_connection(conn, collection.into(), embedder)
    }

    fn from_connection(
        conn: Connection,
        collection: String,
        embedder: Arc<dyn Embedder>,
    ) -> Result<Self> {
        initialize(&conn)?;
        ensure_collection(&conn, &collection)?;
        tracing::debug!(
            collection = %collection,
            model = embedder.model_name(),
            dimensions = embedder.dimensions(),
            "Memory store ready"
        );
        Ok(Self {
            conn: Mutex::new(conn),
            embedder,
            collection,
        })
    }
}

fn initialize(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "PRAGMA journal_mode = WAL;
         PRAGMA synchronous = NORMAL;
         PRAGMA foreign_keys = ON;
         PRAGMA busy_timeout = 5000;",
    )?;
    conn.execute_batch(CREATE_TABLES)?;
    Ok(())
}

/// Create the collection row if it does not exist yet
pub(super) fn ensure_collection(conn: &Connection, name: &str) -> Result<()> {
    conn.execute(
        "INSERT OR IGNORE INTO collections (name, description, created_at) VALUES (?1, ?2, ?3)",
        params![name, COLLECTION_DESCRIPTION, Utc::now().to_rfc3339()],
    )?;
    Ok(())
}
