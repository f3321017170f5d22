//! CLI argument definitions

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "docintel")]
#[command(
    author,
    version,
    about = "Summarize documents, extract facts, generate questions and query semantic memory"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "cli")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API server
    Serve(ServeArgs),

    /// Run text through the summarize/facts/questions pipeline
    Process(ProcessArgs),

    /// Extract text from a PDF, DOCX or TXT file and process it
    Upload(UploadArgs),

    /// Answer a question from stored documents
    Query(QueryArgs),

    /// Show memory statistics
    Stats,

    /// Delete every stored document
    Clear,

    /// Delete one stored document and its summary
    Delete {
        /// Document id returned by process/upload
        id: String,
    },

    /// List providers and whether they are configured
    Providers,
}

#[derive(Args)]
pub struct ServeArgs {
    /// Bind address (overrides config and DOCINTEL_HOST)
    #[arg(long)]
    pub host: Option<String>,

    /// Port (overrides config and DOCINTEL_PORT)
    #[arg(long, short)]
    pub port: Option<u16>,
}

#[derive(Args)]
pub struct ProcessArgs {
    /// Document text; read from stdin when omitted
    pub text: Option<String>,

    /// Provider name (groq, openai, anthropic, ollama)
    #[arg(long)]
    pub provider: Option<String>,

    /// Do not store the result in memory
    #[arg(long)]
    pub no_memory: bool,
}

#[derive(Args)]
pub struct UploadArgs {
    /// Path to a .pdf, .docx, .txt or .md file
    pub path: PathBuf,

    #[arg(long)]
    pub provider: Option<String>,

    /// Do not store the result in memory
    #[arg(long)]
    pub no_memory: bool,
}

#[derive(Args)]
pub struct QueryArgs {
    /// Question to answer
    pub query: String,

    #[arg(long)]
    pub provider: Option<String>,

    /// Number of memory entries used as context
    #[arg(long, short = 'k', default_value = "5")]
    pub top_k: usize,
}

#[derive(Clone, Copy, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Cli,
    Json,
}
