//! # legalsum: Summarize legal PDFs from the command line
//!
//! This is the main entry point for the `legalsum` command-line interface.

mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use legalsum::{
    export::DOCX_FILE_NAME,
    types::{DEFAULT_MODEL, DEFAULT_PROVIDER},
    ProviderConfig,
};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

// --- CLI Definition ---

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Summarize a PDF and write the summary as a .docx document
    Summarize(SummarizeArgs),
    /// Print the text extracted from a PDF, including form fields
    Extract(DocumentArgs),
    /// Print the prompt that would be sent for a PDF, without calling the model
    Prompt(DocumentArgs),
}

#[derive(Args, Debug)]
struct DocumentArgs {
    /// The PDF document to read
    pdf: PathBuf,
}

#[derive(Args, Debug)]
struct SummarizeArgs {
    /// The PDF document to summarize
    pdf: PathBuf,
    /// Where to write the summary document
    #[arg(long, short, default_value = DOCX_FILE_NAME)]
    output: PathBuf,
    #[command(flatten)]
    provider: ProviderArgs,
}

#[derive(Args, Debug)]
struct ProviderArgs {
    /// The AI provider type ("openai" or "gemini")
    #[arg(long, env = "AI_PROVIDER", default_value = DEFAULT_PROVIDER)]
    provider: String,
    /// Overrides the provider's completion endpoint
    #[arg(long, env = "AI_API_URL")]
    api_url: Option<String>,
    /// The provider API key (falls back to `OPENAI_API_KEY`)
    #[arg(long, env = "AI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,
    /// The model to summarize with
    #[arg(long, env = "AI_MODEL", default_value = DEFAULT_MODEL)]
    model: String,
}

impl From<&ProviderArgs> for ProviderConfig {
    fn from(args: &ProviderArgs) -> Self {
        ProviderConfig {
            provider: args.provider.clone(),
            api_url: args.api_url.clone().filter(|url| !url.is_empty()),
            api_key: args
                .api_key
                .clone()
                .filter(|key| !key.is_empty())
                .or_else(|| std::env::var("OPENAI_API_KEY").ok())
                .filter(|key| !key.is_empty()),
            model_name: args.model.clone(),
        }
    }
}

// --- Main Application Entry ---

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Logs go to stderr so stdout carries only the command's output.
    let subscriber = fmt::Subscriber::builder()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env())
        .compact()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();

    match &cli.command {
        Commands::Summarize(args) => {
            let config = ProviderConfig::from(&args.provider);
            let summary = commands::handle_summarize(&args.pdf, &args.output, &config).await?;
            println!("{summary}");
            eprintln!("Summary document written to {}", args.output.display());
        }
        Commands::Extract(args) => {
            print!("{}", commands::handle_extract(&args.pdf).await?);
        }
        Commands::Prompt(args) => {
            print!("{}", commands::handle_prompt(&args.pdf).await?);
        }
    }

    Ok(())
}
