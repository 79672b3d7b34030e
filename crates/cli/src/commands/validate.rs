// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `grimoire validate`: load a system directory and report aggregated
//! validation errors, exiting 1 if there are any.

use crate::output::OutputFormat;
use anyhow::Result;
use clap::Args;
use grimoire_loader::{LoadError, SystemLoader};
use std::path::PathBuf;

#[derive(Args)]
pub struct ValidateArgs {
    /// Path to the system directory (containing system.yaml)
    pub system_path: PathBuf,
    /// Print record counts for a valid system
    #[arg(short, long)]
    pub verbose: bool,
}

pub fn handle(args: ValidateArgs, format: OutputFormat, loader: &SystemLoader) -> Result<()> {
    match loader.load(&args.system_path) {
        Ok(system) => {
            match format {
                OutputFormat::Json => {
                    println!(
                        "{}",
                        serde_json::to_string_pretty(&serde_json::json!({
                            "valid": true,
                            "system_id": system.id,
                        }))?
                    );
                }
                OutputFormat::Text => {
                    println!("{} is valid", args.system_path.display());
                    if args.verbose {
                        println!(
                            "  flows: {}, models: {}, compendiums: {}, tables: {}, prompts: {}",
                            system.flows.len(),
                            system.models.len(),
                            system.compendiums.len(),
                            system.tables.len(),
                            system.prompts.len(),
                        );
                    }
                }
            }
            Ok(())
        }
        Err(LoadError::Validation(messages)) => {
            match format {
                OutputFormat::Json => {
                    println!(
                        "{}",
                        serde_json::to_string_pretty(&serde_json::json!({
                            "valid": false,
                            "errors": messages,
                        }))?
                    );
                }
                OutputFormat::Text => {
                    eprintln!("{} failed validation:", args.system_path.display());
                    for message in &messages {
                        eprintln!("  {message}");
                    }
                }
            }
            std::process::exit(1);
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
#[path = "validate_tests.rs"]
mod tests;
