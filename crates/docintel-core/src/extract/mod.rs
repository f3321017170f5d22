//! Plain-text extraction for uploaded documents (PDF, DOCX, TXT)

mod docx;

use crate::error::{DocIntelError, Result};
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

/// Extractions shorter than this (after trimming) are rejected
pub const MIN_EXTRACTED_CHARS: usize = 10;

/// Supported upload formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Pdf,
    Docx,
    Text,
}

impl FileKind {
    /// Detect from the file extension (case-insensitive)
    pub fn from_filename(filename: &str) -> Option<Self> {
        let ext = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())?
            .to_ascii_lowercase();
        match ext.as_str() {
            "pdf" => Some(Self::Pdf),
            "docx" => Some(Self::Docx),
            "txt" | "md" | "markdown" => Some(Self::Text),
            _ => None,
        }
    }
}

/// Extract plain text from an uploaded file
pub fn extract_text(filename: &str, bytes: &[u8]) -> Result<String> {
    let kind = FileKind::from_filename(filename).ok_or_else(|| {
        DocIntelError::Extraction(format!(
            "Unsupported file type: {} (expected PDF, DOCX or TXT)",
            filename
        ))
    })?;

    let text = match kind {
        FileKind::Pdf => extract_pdf(filename, bytes)?,
        FileKind::Docx => docx::extract_text(bytes).map_err(|e| {
            DocIntelError::Extraction(format!("Failed to read DOCX {}: {}", filename, e))
        })?,
        FileKind::Text => String::from_utf8_lossy(bytes).into_owned(),
    };

    let text = text.trim();
    if text.chars().count() < MIN_EXTRACTED_CHARS {
        return Err(DocIntelError::Extraction(format!(
            "Could not extract enough text from {} (got {} characters)",
            filename,
            text.chars().count()
        )));
    }

    tracing::debug!(filename, ?kind, chars = text.len(), "Extracted text");
    Ok(text.to_string())
}

/// Panics inside pdf-extract (e.g. a font missing from `/Resources`) are
/// reported as extraction errors
fn extract_pdf(filename: &str, bytes: &[u8]) -> Result<String> {
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem(bytes)
    }));

    match outcome {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(e)) => Err(DocIntelError::Extraction(format!(
            "Failed to extract text from PDF {}: {}",
            filename, e
        ))),
        Err(payload) => {
            let reason = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "malformed document".to_string());
            tracing::warn!(filename, %reason, "PDF extraction panicked");
            Err(DocIntelError::Extraction(format!(
                "Failed to extract text from PDF {}: {}",
                filename, reason
            )))
        }
    }
}
