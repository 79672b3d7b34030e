// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `grimoire browse`: a read-only listing of a system's compendiums
//! and tables with their entry counts. Not a TUI — just enough to orient
//! someone exploring a system package on disk.

use crate::output::OutputFormat;
use anyhow::Result;
use clap::Args;
use grimoire_loader::SystemLoader;
use serde_json::json;
use std::path::PathBuf;

#[derive(Args)]
pub struct BrowseArgs {
    /// Path to the system directory (containing system.yaml)
    pub system_path: PathBuf,
}

pub fn handle(args: BrowseArgs, format: OutputFormat, loader: &SystemLoader) -> Result<()> {
    let system = loader.load(&args.system_path)?;

    match format {
        OutputFormat::Json => {
            let compendiums: Vec<_> = system
                .compendiums
                .values()
                .map(|c| json!({"id": c.id, "name": c.name, "model": c.model, "entries": c.entries.len()}))
                .collect();
            let tables: Vec<_> = system
                .tables
                .values()
                .map(|t| json!({"id": t.id, "name": t.name, "entries": t.entries.len()}))
                .collect();
            println!(
                "{}",
                serde_json::to_string_pretty(&json!({
                    "system_id": system.id,
                    "compendiums": compendiums,
                    "tables": tables,
                }))?
            );
        }
        OutputFormat::Text => {
            println!("{} ({})", system.name, system.id);
            println!("compendiums:");
            for compendium in system.compendiums.values() {
                println!("  {} — {} entries ({})", compendium.id, compendium.entries.len(), compendium.model);
            }
            println!("tables:");
            for table in system.tables.values() {
                println!("  {} — {} entries", table.id, table.entries.len());
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "browse_tests.rs"]
mod tests;
