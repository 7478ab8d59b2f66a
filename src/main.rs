use anyhow::Result;
use clap::{Parser, Subcommand};
use std::process::ExitCode;

#[derive(Parser)]
#[command(
    name = "langsource",
    version,
    about = "CLI tool for language support in development",
    override_usage = "langsource <command> [options]"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate translations for supported languages.
    #[command(alias = "g")]
    Generate,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Load .env file (API key and optional overrides)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("langsource=info")),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Generate => langsource::cli::run_generate().await,
    }
}
