// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! grimoire - GRIMOIRE system CLI

mod commands;
mod env;
mod output;

use output::OutputFormat;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "grimoire", version, about = "Load, validate, and run GRIMOIRE systems")]
struct Cli {
    /// Output format
    #[arg(short = 'o', long = "output", value_enum, default_value_t, global = true)]
    output: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a system directory and report aggregated validation errors
    Validate(commands::validate::ValidateArgs),
    /// Run a flow to completion, prompting on stdin for input steps
    Execute(commands::execute::ExecuteArgs),
    /// Enumerate a system's compendiums and tables
    Browse(commands::browse::BrowseArgs),
    /// List the ids of one kind of record in a system
    List(commands::list::ListArgs),
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        let msg = format_error(&e);
        if !msg.is_empty() {
            eprintln!("Error: {msg}");
        }
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(env::default_log_level())),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let loader = grimoire_loader::SystemLoader::new();
    match cli.command {
        Commands::Validate(args) => commands::validate::handle(args, cli.output, &loader),
        Commands::Execute(args) => commands::execute::handle(args, cli.output, &loader).await,
        Commands::Browse(args) => commands::browse::handle(args, cli.output, &loader),
        Commands::List(args) => commands::list::handle(args, cli.output, &loader),
    }
}

/// Format an anyhow error, deduplicating the chain when the top-level
/// message already names the cause (thiserror's `#[from]` variants tend to
/// repeat themselves here).
fn format_error(err: &anyhow::Error) -> String {
    let top = err.to_string();
    let chain_redundant = err.chain().skip(1).all(|cause| top.contains(&cause.to_string()));
    if chain_redundant {
        return top;
    }
    let mut buf = top;
    for (i, cause) in err.chain().skip(1).enumerate() {
        buf.push_str(&format!("\n\nCaused by:\n    {i}: {cause}"));
    }
    buf
}
