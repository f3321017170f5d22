//! Providers command

use crate::app::OutputFormat;
use crate::output;
use anyhow::Result;
use docintel_core::DocumentService;

pub fn run(service: &DocumentService, format: OutputFormat) -> Result<()> {
    let providers = service.providers();
    print!("{}", output::format_providers(&providers, format)?);
    Ok(())
}
