//! HTTP handlers

use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use docintel_core::{extract_text, DocumentService, MemoryStats, ProviderStatus};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::ApiError;
use crate::models::*;
use crate::state::AppState;

/// Health check endpoint
pub async fn health() -> &'static str {
    "OK"
}

/// Run raw text through summarize → facts → questions
pub async fn process_document(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ProcessRequest>,
) -> Result<Json<ProcessResponse>, ApiError> {
    let provider = state.provider_or_default(req.provider.as_deref());
    let document = state
        .service
        .process(&req.text, req.use_memory, provider)
        .await?;

    Ok(Json(ProcessResponse {
        success: true,
        document,
    }))
}

/// Extract text from an uploaded PDF/DOCX/TXT file, then process it
pub async fn upload_document(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut file: Option<(String, Vec<u8>)> = None;
    let mut use_memory = true;
    let mut provider: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::InvalidRequest(format!("Invalid multipart body: {}", e)))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let filename = field.file_name().unwrap_or("upload.txt").to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::InvalidRequest(format!("Failed to read file: {}", e)))?;
                file = Some((filename, bytes.to_vec()));
            }
            "use_memory" => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| ApiError::InvalidRequest(e.to_string()))?;
                use_memory = parse_form_bool(&value).ok_or_else(|| {
                    ApiError::InvalidRequest(format!("Invalid use_memory value: {}", value))
                })?;
            }
            "provider" => {
                provider = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| ApiError::InvalidRequest(e.to_string()))?,
                );
            }
            other => tracing::debug!(field = other, "Ignoring unknown multipart field"),
        }
    }

    let (filename, bytes) =
        file.ok_or_else(|| ApiError::InvalidRequest("Missing 'file' field".to_string()))?;
    tracing::info!(filename = %filename, bytes = bytes.len(), "Received upload");

    let name = filename.clone();
    let text = tokio::task::spawn_blocking(move || extract_text(&name, &bytes))
        .await
        .map_err(|e| ApiError::Internal(format!("Extraction task failed: {}", e)))??;

    let provider = state.provider_or_default(provider.as_deref());
    let document = state.service.process(&text, use_memory, provider).await?;

    Ok(Json(UploadResponse {
        success: true,
        filename,
        document,
    }))
}

/// Answer a question from the closest stored documents
pub async fn query_memory(
    State(state): State<Arc<AppState>>,
    Json(req): Json<QueryRequest>,
) -> Result<Json<QueryResponse>, ApiError> {
    let provider = state.provider_or_default(req.provider.as_deref());
    let answer = state
        .service
        .query_memory(&req.query, provider, req.top_k)
        .await?;

    Ok(Json(QueryResponse {
        success: true,
        answer,
    }))
}

pub async fn memory_stats(
    State(state): State<Arc<AppState>>,
) -> Result<Json<MemoryStats>, ApiError> {
    let stats = with_store(&state, |service| service.stats()).await??;
    Ok(Json(stats))
}

pub async fn clear_memory(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ClearResponse>, ApiError> {
    with_store(&state, |service| service.clear()).await??;
    Ok(Json(ClearResponse {
        success: true,
        message: "Memory cleared".to_string(),
    }))
}

pub async fn delete_document(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let success = with_store(&state, move |service| service.delete(&id)).await?;
    Ok(Json(DeleteResponse { success }))
}

/// Run a synchronous memory store call off the async workers
async fn with_store<T, F>(state: &AppState, f: F) -> Result<T, ApiError>
where
    F: FnOnce(&DocumentService) -> T + Send + 'static,
    T: Send + 'static,
{
    let service = state.service.clone();
    tokio::task::spawn_blocking(move || f(&service))
        .await
        .map_err(|e| ApiError::Internal(format!("Memory store task failed: {}", e)))
}

pub async fn providers(State(state): State<Arc<AppState>>) -> Json<BTreeMap<String, ProviderStatus>> {
    Json(state.service.providers())
}

fn parse_form_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
