//! sitecfg CLI - Documentation site configuration resolver.
//!
//! Provides commands for:
//! - `resolve`: Print the resolved configuration as generator JSON
//! - `check`: Validate configuration and print a summary
//! - `diff`: Compare the resolved output of two configurations

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CheckArgs, DiffArgs, ResolveArgs};
use output::Output;

/// sitecfg - Documentation site configuration resolver.
#[derive(Parser)]
#[command(name = "sitecfg", version, about)]
struct Cli {
    /// Enable verbose output (show which fragments were loaded).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve configuration and print the generator document.
    Resolve(ResolveArgs),
    /// Validate configuration without writing anything.
    Check(CheckArgs),
    /// Compare the resolved output of two configuration files.
    Diff(DiffArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Resolve(args) => args.execute(),
        Commands::Check(args) => args.execute(),
        Commands::Diff(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
