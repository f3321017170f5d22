//! LLM integration
//!
//! Provides traits and implementations for:
//! - Text generation over heterogeneous provider APIs
//! - Embedding generation via external services (Ollama, OpenAI, vLLM, etc.)

mod client;
mod http_embedder;
mod provider;
mod traits;

pub use client::ProviderClient;
pub use http_embedder::HttpEmbedder;
pub use provider::{ProviderKind, ANTHROPIC_VERSION};
pub use traits::*;
