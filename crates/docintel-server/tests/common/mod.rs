//! Test doubles so routes run without network access

#![allow(dead_code)]

use async_trait::async_trait;
use docintel_core::{
    DocIntelError, DocumentService, Embedder, GenerationRequest, MemoryStore, ProviderStatus,
    Result, TextGenerator, COLLECTION_NAME,
};
use docintel_server::{router, AppState};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

pub const SUMMARY: &str = "Stub summary.";
pub const ANSWER: &str = "Stub answer.";

/// Answers by prompt shape; `broken` fails upstream, unknown names are rejected
#[derive(Default)]
pub struct StubGenerator {
    pub seen: Mutex<Vec<GenerationRequest>>,
}

#[async_trait]
impl TextGenerator for StubGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<String> {
        self.seen.lock().unwrap().push(request.clone());
        match request.provider.as_str() {
            "groq" | "openai" | "anthropic" | "ollama" => {}
            "broken" => return Err(DocIntelError::upstream("broken", "HTTP 503: unavailable")),
            other => return Err(DocIntelError::UnknownProvider(other.to_string())),
        }

        let prompt = request.prompt.as_str();
        let response = if prompt.starts_with("Summarize") {
            SUMMARY
        } else if prompt.starts_with("Based on the document and its summary") {
            "- fact a\n- fact b"
        } else if prompt.starts_with("Based on the document, summary") {
            "Q: Why?\nType: analytical"
        } else {
            ANSWER
        };
        Ok(response.to_string())
    }

    fn providers(&self) -> BTreeMap<String, ProviderStatus> {
        ["groq", "ollama"]
            .into_iter()
            .map(|name| {
                (
                    name.to_string(),
                    ProviderStatus {
                        configured: name == "ollama",
                        model: format!("{}-model", name),
                    },
                )
            })
            .collect()
    }
}

/// Character-frequency embedding; deterministic and offline
pub struct CharEmbedder;

#[async_trait]
impl Embedder for CharEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let mut v = vec![0.0f32; 26];
        for c in text.to_ascii_lowercase().bytes().filter(u8::is_ascii_lowercase) {
            v[(c - b'a') as usize] += 1.0;
        }
        Ok(v)
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let mut out = Vec::with_capacity(texts.len());
        for text in texts {
            out.push(self.embed(text).await?);
        }
        Ok(out)
    }

    fn dimensions(&self) -> usize {
        26
    }

    fn model_name(&self) -> &str {
        "char-frequency"
    }
}

pub struct TestApp {
    pub router: axum::Router,
    pub generator: Arc<StubGenerator>,
    pub memory: Arc<MemoryStore>,
}

pub fn test_app() -> TestApp {
    let generator = Arc::new(StubGenerator::default());
    let memory =
        Arc::new(MemoryStore::open_in_memory(COLLECTION_NAME, Arc::new(CharEmbedder)).unwrap());
    let service = DocumentService::new(generator.clone(), memory.clone());
    let router = router(Arc::new(AppState::new(service, "groq")));
    TestApp {
        router,
        generator,
        memory,
    }
}

/// One-page PDF whose content stream selects font `/F9`, which the page
/// resources never define
pub fn pdf_with_undefined_font() -> String {
    let content = "BT /F9 12 Tf 72 720 Td (Orphaned font text) Tj ET";
    let objects = [
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
        "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] /Resources << >> /Contents 4 0 R >>"
            .to_string(),
        format!("<< /Length {} >>\nstream\n{}\nendstream", content.len(), content),
    ];

    let mut pdf = String::from("%PDF-1.4\n");
    let mut offsets = Vec::new();
    for (i, body) in objects.iter().enumerate() {
        offsets.push(pdf.len());
        pdf.push_str(&format!("{} 0 obj\n{}\nendobj\n", i + 1, body));
    }
    let xref_offset = pdf.len();
    pdf.push_str(&format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1));
    for offset in offsets {
        pdf.push_str(&format!("{:010} 00000 n \n", offset));
    }
    pdf.push_str(&format!(
        "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
        objects.len() + 1,
        xref_offset
    ));
    pdf
}
