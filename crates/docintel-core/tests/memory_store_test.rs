//! Integration tests for the semantic memory store
//!
//! Uses a deterministic bag-of-words embedder so similarity ranking can be
//! asserted without an embedding service.

mod common;

use async_trait::async_trait;
use common::BagOfWordsEmbedder;
use docintel_core::memory::summary_entry_id;
use docintel_core::{
    DocIntelError, Embedder, EntryKind, MemoryStore, Question, Result, COLLECTION_NAME,
};
use std::sync::Arc;
use tempfile::TempDir;

fn memory_store() -> MemoryStore {
    MemoryStore::open_in_memory(COLLECTION_NAME, Arc::new(BagOfWordsEmbedder)).unwrap()
}

async fn store_sample(store: &MemoryStore, text: &str, summary: &str) -> String {
    store
        .store(
            text,
            summary,
            &["fact one".to_string(), "fact two".to_string()],
            &[Question::new("What is it?", "factual")],
        )
        .await
        .unwrap()
}

#[tokio::test]
async fn test_store_creates_document_and_summary_entries() {
    let store = memory_store();
    let doc_id = store_sample(
        &store,
        "Rust guarantees memory safety through ownership.",
        "Rust ownership",
    )
    .await;

    assert_eq!(store.count().unwrap(), 2);

    let document = store.get(&doc_id).unwrap().expect("document entry");
    let summary = store
        .get(&summary_entry_id(&doc_id))
        .unwrap()
        .expect("summary entry");

    assert_eq!(document.text, "Rust guarantees memory safety through ownership.");
    assert_eq!(document.metadata.kind(), EntryKind::Document);
    assert_eq!(summary.text, "Rust ownership");
    assert_eq!(summary.metadata.kind(), EntryKind::Summary);

    let parent_id = summary.metadata.parent_id.as_deref().unwrap();
    assert_eq!(parent_id, doc_id);
    assert!(store.get(parent_id).unwrap().is_some());

    // Shared bundle
    assert_eq!(document.metadata.timestamp, summary.metadata.timestamp);
    assert_eq!(document.metadata.summary, summary.metadata.summary);
    assert_eq!(document.metadata.facts, summary.metadata.facts);
    assert_eq!(document.metadata.questions, summary.metadata.questions);
    assert_eq!(document.metadata.doc_length, 48);
    assert_eq!(
        document.metadata.decoded_facts(),
        vec!["fact one", "fact two"]
    );
    assert_eq!(
        document.metadata.decoded_questions(),
        vec![Question::new("What is it?", "factual")]
    );
}

/// Declares more dimensions than it produces
struct MisreportingEmbedder;

#[async_trait]
impl Embedder for MisreportingEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        Ok(BagOfWordsEmbedder::vectorize(text))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| BagOfWordsEmbedder::vectorize(t)).collect())
    }

    fn dimensions(&self) -> usize {
        common::DIMS * 2
    }

    fn model_name(&self) -> &str {
        "misreporting"
    }
}

#[tokio::test]
async fn test_store_rejects_embedding_dimension_mismatch() {
    let store = MemoryStore::open_in_memory(COLLECTION_NAME, Arc::new(MisreportingEmbedder)).unwrap();
    let err = store
        .store("text of some length", "summary", &[], &[])
        .await
        .unwrap_err();

    assert!(
        matches!(err, DocIntelError::Store(ref m) if m.contains("misreporting") && m.contains("expected 128")),
        "{}",
        err
    );
    assert_eq!(store.count().unwrap(), 0);
}

#[tokio::test]
async fn test_store_generates_unique_ids() {
    let store = memory_store();
    let a = store_sample(&store, "same text", "same summary").await;
    let b = store_sample(&store, "same text", "same summary").await;
    assert_ne!(a, b);
    assert_eq!(store.count().unwrap(), 4);
}

#[tokio::test]
async fn test_clear_then_stats_reports_zero() {
    let store = memory_store();
    store_sample(&store, "first document text", "first").await;
    store_sample(&store, "second document text", "second").await;
    assert_eq!(store.stats().unwrap().total_documents, 4);

    store.clear().unwrap();

    let stats = store.stats().unwrap();
    assert_eq!(stats.total_documents, 0);
    assert!(stats.samples.is_empty());
    assert_eq!(stats.collection_name, COLLECTION_NAME);

    // Collection is usable again after the reset
    store_sample(&store, "third document text", "third").await;
    assert_eq!(store.count().unwrap(), 2);
}

#[tokio::test]
async fn test_query_scores_bounded_and_descending() {
    let store = memory_store();
    store_sample(
        &store,
        "The tokio runtime schedules async tasks across worker threads.",
        "Tokio async runtime",
    )
    .await;
    store_sample(
        &store,
        "Sourdough bread needs flour, water, salt and a starter.",
        "Baking sourdough bread",
    )
    .await;
    store_sample(
        &store,
        "Async functions in Rust return futures polled by a runtime.",
        "Rust async futures",
    )
    .await;

    let hits = store.query("async runtime tasks", 5).await.unwrap();
    assert_eq!(hits.len(), 5);
    assert!(hits
        .iter()
        .all(|h| (0.0..=1.0).contains(&h.relevance_score)));
    assert!(hits
        .windows(2)
        .all(|w| w[0].relevance_score >= w[1].relevance_score));
    assert!(hits[0].text.to_lowercase().contains("async"));
    assert!(!hits[0].text.contains("Sourdough"));
    assert_eq!(hits[0].facts, vec!["fact one", "fact two"]);
}

#[tokio::test]
async fn test_query_respects_top_k() {
    let store = memory_store();
    for i in 0..4 {
        store_sample(&store, &format!("document number {}", i), "numbered").await;
    }
    assert_eq!(store.query("document", 3).await.unwrap().len(), 3);
    assert_eq!(store.query("document", 100).await.unwrap().len(), 8);
    assert!(store.query("document", 0).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_query_summary_hits_carry_parent() {
    let store = memory_store();
    let doc_id = store_sample(&store, "zzz unrelated body", "penguins antarctica").await;

    let hits = store.query("penguins antarctica", 1).await.unwrap();
    assert_eq!(hits[0].kind, EntryKind::Summary);
    assert_eq!(hits[0].parent_id.as_deref(), Some(doc_id.as_str()));
}

#[tokio::test]
async fn test_query_empty_store() {
    let store = memory_store();
    assert!(store.query("anything", 5).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_removes_both_entries() {
    let store = memory_store();
    let keep = store_sample(&store, "keep me", "kept").await;
    let doc_id = store_sample(&store, "delete me", "deleted").await;

    assert!(store.delete(&doc_id));
    assert_eq!(store.count().unwrap(), 2);
    assert!(store.get(&doc_id).unwrap().is_none());
    assert!(store.get(&summary_entry_id(&doc_id)).unwrap().is_none());
    assert!(store.get(&keep).unwrap().is_some());

    assert!(!store.delete(&doc_id));
    assert!(!store.delete("no-such-id"));
}

#[tokio::test]
async fn test_stats_sample_previews() {
    let store = memory_store();
    let long_text = "x".repeat(250);
    let long_summary = "s".repeat(120);
    store_sample(&store, &long_text, &long_summary).await;

    let stats = store.stats().unwrap();
    assert_eq!(stats.samples.len(), 2);

    let doc_sample = &stats.samples[0];
    assert_eq!(doc_sample.preview, format!("{}...", "x".repeat(200)));
    assert_eq!(doc_sample.summary, format!("{}...", "s".repeat(100)));

    // The summary entry's own text is under the preview limit
    let summary_sample = &stats.samples[1];
    assert_eq!(summary_sample.preview, long_summary);
}

#[tokio::test]
async fn test_stats_caps_samples_at_five() {
    let store = memory_store();
    for i in 0..4 {
        store_sample(&store, &format!("doc {}", i), "short").await;
    }
    let stats = store.stats().unwrap();
    assert_eq!(stats.total_documents, 8);
    assert_eq!(stats.samples.len(), 5);
    assert_eq!(stats.samples[0].summary, "short");
}

#[tokio::test]
async fn test_store_persists_across_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("memory.sqlite");

    let doc_id = {
        let store = MemoryStore::open(&path, COLLECTION_NAME, Arc::new(BagOfWordsEmbedder)).unwrap();
        store_sample(&store, "durable text", "durable").await
    };

    let store = MemoryStore::open(&path, COLLECTION_NAME, Arc::new(BagOfWordsEmbedder)).unwrap();
    assert_eq!(store.count().unwrap(), 2);
    assert!(store.get(&doc_id).unwrap().is_some());
}

#[tokio::test]
async fn test_collections_are_isolated() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("memory.sqlite");

    let main = MemoryStore::open(&path, COLLECTION_NAME, Arc::new(BagOfWordsEmbedder)).unwrap();
    let other = MemoryStore::open(&path, "scratch", Arc::new(BagOfWordsEmbedder)).unwrap();

    store_sample(&main, "main text", "main").await;
    store_sample(&other, "other text", "other").await;

    other.clear().unwrap();
    assert_eq!(main.count().unwrap(), 2);
    assert_eq!(other.count().unwrap(), 0);
}
