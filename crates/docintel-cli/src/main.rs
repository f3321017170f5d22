//! docintel CLI
//!
//! Document intelligence over Groq, OpenAI, Anthropic or Ollama, with a
//! local semantic memory of everything processed.

use anyhow::Result;
use clap::Parser;
use docintel_core::error::exit_codes;
use docintel_core::{Config, DocIntelError, DocumentService};

mod app;
mod commands;
mod output;

use app::{Cli, Commands};

#[tokio::main]
async fn main() {
    // Provider keys may live in .env
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(exit_code(&e));
    }
}

/// Core errors carry their own exit code; anything else is a general failure
fn exit_code(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<DocIntelError>()
        .map(DocIntelError::exit_code)
        .unwrap_or(exit_codes::GENERAL_ERROR)
}

async fn run(cli: Cli) -> Result<()> {
    init_tracing(&cli)?;

    let config = Config::load()?;
    let service = DocumentService::from_config(&config)?;

    match cli.command {
        Commands::Serve(args) => commands::serve::run(args, config, service).await,
        Commands::Process(args) => {
            commands::process::run(args, &config, &service, cli.format).await
        }
        Commands::Upload(args) => {
            commands::process::run_upload(args, &config, &service, cli.format).await
        }
        Commands::Query(args) => commands::query::run(args, &config, &service, cli.format).await,
        Commands::Stats => commands::memory::stats(&service, cli.format),
        Commands::Clear => commands::memory::clear(&service, cli.format),
        Commands::Delete { id } => commands::memory::delete(&service, &id, cli.format),
        Commands::Providers => commands::providers::run(&service, cli.format),
    }
}

fn init_tracing(cli: &Cli) -> Result<()> {
    let mut filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::WARN.into());
    if cli.verbose {
        filter = filter
            .add_directive("docintel_core=debug".parse()?)
            .add_directive("docintel_server=debug".parse()?);
    } else if matches!(cli.command, Commands::Serve(_)) {
        filter = filter
            .add_directive("docintel_core=info".parse()?)
            .add_directive("docintel_server=info".parse()?)
            .add_directive("tower_http=debug".parse()?);
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}
