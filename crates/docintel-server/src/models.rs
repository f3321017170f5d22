//! Request and response bodies

use docintel_core::{ProcessedDocument, QueryAnswer};
use serde::{Deserialize, Serialize};

pub const DEFAULT_TOP_K: usize = 5;

fn default_true() -> bool {
    true
}

fn default_top_k() -> usize {
    DEFAULT_TOP_K
}

/// Body of `POST /api/process-document`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessRequest {
    pub text: String,
    #[serde(default = "default_true")]
    pub use_memory: bool,
    #[serde(default)]
    pub provider: Option<String>,
}

/// Body of `POST /api/query-memory`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryRequest {
    pub query: String,
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

#[derive(Debug, Serialize)]
pub struct ProcessResponse {
    pub success: bool,
    #[serde(flatten)]
    pub document: ProcessedDocument,
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub success: bool,
    pub filename: String,
    #[serde(flatten)]
    pub document: ProcessedDocument,
}

#[derive(Debug, Serialize)]
pub struct QueryResponse {
    pub success: bool,
    #[serde(flatten)]
    pub answer: QueryAnswer,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ClearResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub success: bool,
}
