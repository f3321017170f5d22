//! Output formatters

mod terminal;

use crate::app::OutputFormat;
use anyhow::Result;
use docintel_core::{MemoryStats, ProcessedDocument, ProviderStatus, QueryAnswer};
use serde::Serialize;
use std::collections::BTreeMap;

fn json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)? + "\n")
}

pub fn format_processed(
    document: &ProcessedDocument,
    filename: Option<&str>,
    format: OutputFormat,
) -> Result<String> {
    match format {
        OutputFormat::Json => {
            let mut value = serde_json::to_value(document)?;
            if let (Some(name), Some(map)) = (filename, value.as_object_mut()) {
                map.insert("filename".to_string(), name.into());
            }
            json(&value)
        }
        OutputFormat::Cli => Ok(terminal::format_processed(document, filename)),
    }
}

pub fn format_answer(answer: &QueryAnswer, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => json(answer),
        OutputFormat::Cli => Ok(terminal::format_answer(answer)),
    }
}

pub fn format_stats(stats: &MemoryStats, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => json(stats),
        OutputFormat::Cli => Ok(terminal::format_stats(stats)),
    }
}

pub fn format_providers(
    providers: &BTreeMap<String, ProviderStatus>,
    format: OutputFormat,
) -> Result<String> {
    match format {
        OutputFormat::Json => json(providers),
        OutputFormat::Cli => Ok(terminal::format_providers(providers)),
    }
}
