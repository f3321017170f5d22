//! Shared test doubles: a deterministic embedder and a scripted generator

#![allow(dead_code)]

use async_trait::async_trait;
use docintel_core::{
    DocIntelError, Embedder, GenerationRequest, ProviderStatus, Result, TextGenerator,
};
use std::collections::{BTreeMap, VecDeque};
use std::sync::Mutex;

pub const DIMS: usize = 64;

/// Hashes words into a fixed number of buckets so related texts score higher
pub struct BagOfWordsEmbedder;

impl BagOfWordsEmbedder {
    pub fn vectorize(text: &str) -> Vec<f32> {
        let mut v = vec![0.0f32; DIMS];
        for word in text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
        {
            let word = word.to_lowercase();
            let mut hash: u64 = 0xcbf29ce484222325;
            for byte in word.bytes() {
                hash ^= byte as u64;
                hash = hash.wrapping_mul(0x100000001b3);
            }
            v[(hash % DIMS as u64) as usize] += 1.0;
        }
        v
    }
}

#[async_trait]
impl Embedder for BagOfWordsEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        Ok(Self::vectorize(text))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| Self::vectorize(t)).collect())
    }

    fn dimensions(&self) -> usize {
        DIMS
    }

    fn model_name(&self) -> &str {
        "bag-of-words"
    }
}

/// Replays canned responses in order and records every request.
/// Responses prefixed with `ERR:` become upstream errors.
pub struct ScriptedGenerator {
    responses: Mutex<VecDeque<String>>,
    pub seen: Mutex<Vec<GenerationRequest>>,
}

impl ScriptedGenerator {
    pub fn new(responses: &[&str]) -> Self {
        Self {
            responses: Mutex::new(responses.iter().map(|r| r.to_string()).collect()),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<String> {
        self.seen.lock().unwrap().push(request.clone());
        if request.provider == "nope" {
            return Err(DocIntelError::UnknownProvider(request.provider.clone()));
        }
        let next = self.responses.lock().unwrap().pop_front().unwrap_or_default();
        match next.strip_prefix("ERR:") {
            Some(message) => Err(DocIntelError::upstream(&request.provider, message)),
            None => Ok(next),
        }
    }

    fn providers(&self) -> BTreeMap<String, ProviderStatus> {
        let mut providers = BTreeMap::new();
        providers.insert(
            "groq".to_string(),
            ProviderStatus {
                configured: true,
                model: "scripted".to_string(),
            },
        );
        providers
    }
}
