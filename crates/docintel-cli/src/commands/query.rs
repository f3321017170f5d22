//! Query command

use crate::app::{OutputFormat, QueryArgs};
use crate::output;
use anyhow::Result;
use docintel_core::{Config, DocumentService};

pub async fn run(
    args: QueryArgs,
    config: &Config,
    service: &DocumentService,
    format: OutputFormat,
) -> Result<()> {
    let provider = args.provider.as_deref().unwrap_or(&config.default_provider);
    let answer = service.query_memory(&args.query, provider, args.top_k).await?;
    print!("{}", output::format_answer(&answer, format)?);
    Ok(())
}
