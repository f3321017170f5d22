//! Docintel Core Library
//!
//! Core functionality for the docintel document intelligence backend.
//!
//! # Features
//! - Uniform text generation over Groq, OpenAI, Anthropic and Ollama
//! - Three-stage pipeline: summarize, extract facts, generate questions
//! - Semantic memory of processed documents backed by SQLite embeddings
//! - Plain-text extraction from PDF, DOCX and text uploads

pub mod config;
pub mod error;
pub mod extract;
pub mod llm;
pub mod memory;
pub mod pipeline;
pub mod service;

pub use config::{Config, EmbeddingServiceConfig, ProviderConfig, ServerConfig};
pub use error::{DocIntelError, Error, Result};
pub use extract::{extract_text, MIN_EXTRACTED_CHARS};
pub use llm::{
    Embedder, GenerationRequest, HttpEmbedder, ProviderClient, ProviderKind, ProviderStatus,
    TextGenerator,
};
pub use memory::{EntryKind, MemoryEntry, MemoryHit, MemorySample, MemoryStats, MemoryStore};
pub use pipeline::{parse_facts, parse_questions, DocumentPipeline, PipelineOutput, Question};
pub use service::{DocumentService, ProcessedDocument, QueryAnswer};

/// Name of the vector-store collection holding processed documents
pub const COLLECTION_NAME: &str = "document_memory";

/// Default config directory name
pub const CONFIG_DIR_NAME: &str = "docintel";

/// Default data directory name
pub const DATA_DIR_NAME: &str = "docintel";
