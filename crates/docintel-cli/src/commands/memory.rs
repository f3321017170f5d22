//! Memory maintenance commands

use crate::app::OutputFormat;
use crate::output;
use anyhow::{bail, Result};
use docintel_core::DocumentService;

pub fn stats(service: &DocumentService, format: OutputFormat) -> Result<()> {
    let stats = service.stats()?;
    print!("{}", output::format_stats(&stats, format)?);
    Ok(())
}

pub fn clear(service: &DocumentService, format: OutputFormat) -> Result<()> {
    service.clear()?;
    match format {
        OutputFormat::Json => println!(
            "{}",
            serde_json::json!({"success": true, "message": "Memory cleared"})
        ),
        OutputFormat::Cli => println!("Memory cleared"),
    }
    Ok(())
}

pub fn delete(service: &DocumentService, id: &str, format: OutputFormat) -> Result<()> {
    let removed = service.delete(id);
    if let OutputFormat::Json = format {
        println!("{}", serde_json::json!({ "success": removed }));
        return Ok(());
    }
    if !removed {
        bail!("No document with id {}", id);
    }
    println!("Deleted {}", id);
    Ok(())
}
