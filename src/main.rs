// Copyright 2026 Veritag Contributors
// SPDX-License-Identifier: Apache-2.0

use anyhow::Result;
use clap::{Parser, Subcommand};
use veritag::cli;

#[derive(Parser)]
#[command(
    name = "veritag",
    about = "Veritag — pair physical NFC tags with artwork certificates",
    version,
    after_help = "Run 'veritag <command> --help' for details on each command."
)]
struct Cli {
    /// Output results as JSON (machine-readable)
    #[arg(long, global = true)]
    json: bool,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Enable verbose/debug logging
    #[arg(long, short, global = true)]
    verbose: bool,

    /// Override the upstream base URL
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the listing and print the catalog
    List,
    /// Pair a tag with one artwork's certificate
    Pair {
        /// Artwork id (as printed by `veritag list`)
        artwork_id: String,
        /// Use the in-process simulated device instead of real hardware
        #[arg(long)]
        simulate: bool,
    },
    /// Check environment and diagnose issues
    Doctor,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global flags via environment variables so all modules can check them
    if cli.json {
        std::env::set_var("VERITAG_JSON", "1");
    }
    if cli.quiet {
        std::env::set_var("VERITAG_QUIET", "1");
    }

    let default_level = if cli.verbose { "veritag=debug" } else { "veritag=info" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(default_level.parse().unwrap()),
        )
        .init();

    let base = cli.base_url.as_deref();
    let result = match cli.command {
        Commands::List => cli::list_cmd::run(base).await,
        Commands::Pair {
            artwork_id,
            simulate,
        } => cli::pair_cmd::run(&artwork_id, base, simulate).await,
        Commands::Doctor => cli::doctor::run(base).await,
    };

    // Consistent exit codes: 0=success, 1=error
    if let Err(e) = &result {
        if !cli::output::is_quiet() && !cli::output::is_json() {
            eprintln!("  Error: {e:#}");
        }
        std::process::exit(1);
    }
    Ok(())
}
