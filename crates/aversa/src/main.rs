//! aversa CLI - turn food photos unappetizing.
//!
//! Runs the deterministic aversive filter over food photos: downscale, edge
//! detection, desaturation, tone-shifted contrast remap, JPEG re-encode. The
//! processed image and a JSON record (with an untouched reference to the
//! original) land wherever you point them.
//!
//! # Usage
//!
//! ```bash
//! # Filter a single photo, result written next to it
//! aversa process burger.jpg
//!
//! # Batch with JSONL records and embedded data URLs
//! aversa process *.jpg --format jsonl --data-url
//!
//! # View configuration
//! aversa config show
//! ```

use clap::{Parser, Subcommand};

mod cli;
mod logging;

/// aversa - deterministic appetite-suppressing image filter.
#[derive(Parser, Debug)]
#[command(name = "aversa")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Apply the unappetizing filter to one or more images
    Process(cli::process::ProcessArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logging isn't initialized yet, so config warnings go to eprintln.
    let config = match aversa_core::Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Failed to load config: {e}\n  \
                 Using default configuration. Check your config file with `aversa config path`."
            );
            aversa_core::Config::default()
        }
    };
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("aversa v{}", aversa_core::VERSION);

    match cli.command {
        Commands::Process(args) => cli::process::execute(args, config).await,
        Commands::Config(args) => cli::config::execute(args).await,
    }
}
