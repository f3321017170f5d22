//! Terminal output formatter

use docintel_core::{EntryKind, MemoryStats, ProcessedDocument, ProviderStatus, QueryAnswer};
use std::collections::BTreeMap;

pub fn format_processed(document: &ProcessedDocument, filename: Option<&str>) -> String {
    let mut output = String::new();

    if let Some(name) = filename {
        output.push_str(&format!("File: {}\n\n", name));
    }

    output.push_str("Summary:\n");
    output.push_str(&format!("  {}\n\n", document.summary.trim()));

    output.push_str(&format!("Facts ({}):\n", document.facts.len()));
    for fact in &document.facts {
        output.push_str(&format!("  - {}\n", fact));
    }
    output.push('\n');

    output.push_str(&format!("Questions ({}):\n", document.questions.len()));
    for (i, q) in document.questions.iter().enumerate() {
        output.push_str(&format!("  {:>2}. [{}] {}\n", i + 1, q.kind, q.question));
    }

    if let Some(ref id) = document.document_id {
        output.push_str(&format!("\nStored as {}\n", id));
    }

    output
}

pub fn format_answer(answer: &QueryAnswer) -> String {
    let mut output = format!("{}\n", answer.answer.trim());

    if !answer.sources.is_empty() {
        output.push_str("\nSources:\n");
    }
    for source in &answer.sources {
        let score_pct = (source.relevance_score * 100.0) as u32;
        let id = match (source.kind, source.parent_id.as_deref()) {
            (EntryKind::Summary, Some(parent)) => format!("{} (summary)", parent),
            _ => source.id.clone(),
        };
        output.push_str(&format!("{:>3}% {}\n", score_pct, id));
    }

    output
}

pub fn format_stats(stats: &MemoryStats) -> String {
    let mut output = String::new();
    output.push_str(&format!("Collection:      {}\n", stats.collection_name));
    output.push_str(&format!("Entries:         {}\n", stats.total_documents));

    if !stats.samples.is_empty() {
        output.push_str("\nRecent:\n");
    }
    for sample in &stats.samples {
        let preview = sample.preview.lines().next().unwrap_or_default();
        output.push_str(&format!("  {}  {}\n", sample.timestamp, preview));
    }

    output
}

pub fn format_providers(providers: &BTreeMap<String, ProviderStatus>) -> String {
    providers
        .iter()
        .map(|(name, status)| {
            let state = if status.configured {
                "configured"
            } else {
                "missing key"
            };
            format!("{:<10} {:<28} {}\n", name, status.model, state)
        })
        .collect()
}
