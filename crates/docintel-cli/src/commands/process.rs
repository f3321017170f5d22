//! Process and upload commands

use crate::app::{OutputFormat, ProcessArgs, UploadArgs};
use crate::output;
use anyhow::{bail, Context, Result};
use docintel_core::{extract_text, Config, DocumentService};
use std::io::Read;

pub async fn run(
    args: ProcessArgs,
    config: &Config,
    service: &DocumentService,
    format: OutputFormat,
) -> Result<()> {
    let text = match args.text {
        Some(text) => text,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read document from stdin")?;
            buf
        }
    };
    if text.trim().is_empty() {
        bail!("No document text given");
    }

    let provider = args.provider.as_deref().unwrap_or(&config.default_provider);
    let document = service.process(&text, !args.no_memory, provider).await?;
    print!("{}", output::format_processed(&document, None, format)?);
    Ok(())
}

pub async fn run_upload(
    args: UploadArgs,
    config: &Config,
    service: &DocumentService,
    format: OutputFormat,
) -> Result<()> {
    let bytes = std::fs::read(&args.path)
        .with_context(|| format!("Failed to read {}", args.path.display()))?;
    let filename = args
        .path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_string();

    let text = extract_text(&filename, &bytes)?;

    let provider = args.provider.as_deref().unwrap_or(&config.default_provider);
    let document = service.process(&text, !args.no_memory, provider).await?;
    print!(
        "{}",
        output::format_processed(&document, Some(&filename), format)?
    );
    Ok(())
}
