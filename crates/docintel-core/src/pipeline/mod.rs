//! Three-stage document pipeline
//!
//! Summarize, then extract facts from document + summary, then generate
//! questions from summary + facts. Each stage is one provider call and
//! depends on the previous stage's output; the first failure aborts the run.

mod parse;
pub mod prompts;

pub use parse::{parse_facts, parse_questions};

use crate::error::Result;
use crate::llm::{GenerationRequest, TextGenerator};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub const SUMMARY_TEMPERATURE: f32 = 0.3;
pub const FACTS_TEMPERATURE: f32 = 0.3;
pub const QUESTIONS_TEMPERATURE: f32 = 0.5;

/// A generated question with its type tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub question: String,
    /// factual, analytical, inference or general (other lower-cased tags pass through)
    #[serde(rename = "type")]
    pub kind: String,
}

impl Question {
    pub const GENERAL: &'static str = "general";

    pub fn new(question: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            kind: kind.into(),
        }
    }

    pub fn general(question: impl Into<String>) -> Self {
        Self::new(question, Self::GENERAL)
    }
}

/// Everything the pipeline derives from one document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineOutput {
    pub summary: String,
    pub facts: Vec<String>,
    pub questions: Vec<Question>,
}

/// Runs the summarize → facts → questions stages against a text generator
pub struct DocumentPipeline {
    generator: Arc<dyn TextGenerator>,
}

impl DocumentPipeline {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Run all three stages in order
    pub async fn run(&self, text: &str, provider: &str) -> Result<PipelineOutput> {
        tracing::info!(provider, chars = text.len(), "Processing document");

        let summary = self.summarize(text, provider).await?;
        let facts = self.extract_facts(text, &summary, provider).await?;
        let questions = self.generate_questions(&summary, &facts, provider).await?;

        tracing::info!(
            facts = facts.len(),
            questions = questions.len(),
            "Document processed"
        );

        Ok(PipelineOutput {
            summary,
            facts,
            questions,
        })
    }

    /// Stage 1
    pub async fn summarize(&self, text: &str, provider: &str) -> Result<String> {
        let request = GenerationRequest::new(prompts::summary_prompt(text), provider)
            .temperature(SUMMARY_TEMPERATURE);
        self.generator.generate(&request).await
    }

    /// Stage 2
    pub async fn extract_facts(
        &self,
        text: &str,
        summary: &str,
        provider: &str,
    ) -> Result<Vec<String>> {
        let request = GenerationRequest::new(prompts::facts_prompt(text, summary), provider)
            .temperature(FACTS_TEMPERATURE);
        let response = self.generator.generate(&request).await?;
        Ok(parse_facts(&response))
    }

    /// Stage 3
    pub async fn generate_questions(
        &self,
        summary: &str,
        facts: &[String],
        provider: &str,
    ) -> Result<Vec<Question>> {
        let request = GenerationRequest::new(prompts::questions_prompt(summary, facts), provider)
            .temperature(QUESTIONS_TEMPERATURE);
        let response = self.generator.generate(&request).await?;
        Ok(parse_questions(&response))
    }
}
