// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `grimoire list --type {flows|models|tables|compendiums}`: print the
//! ids of one record kind, sorted for deterministic output.

use crate::output::OutputFormat;
use anyhow::Result;
use clap::{Args, ValueEnum};
use grimoire_loader::SystemLoader;
use std::path::PathBuf;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum RecordType {
    Flows,
    Models,
    Tables,
    Compendiums,
}

#[derive(Args)]
pub struct ListArgs {
    /// Path to the system directory (containing system.yaml)
    pub system_path: PathBuf,
    /// Which kind of record to list
    #[arg(long = "type")]
    pub record_type: RecordType,
}

pub fn handle(args: ListArgs, format: OutputFormat, loader: &SystemLoader) -> Result<()> {
    let system = loader.load(&args.system_path)?;

    let mut ids: Vec<&str> = match args.record_type {
        RecordType::Flows => system.flows.keys().map(String::as_str).collect(),
        RecordType::Models => system.models.keys().map(String::as_str).collect(),
        RecordType::Tables => system.tables.keys().map(String::as_str).collect(),
        RecordType::Compendiums => system.compendiums.keys().map(String::as_str).collect(),
    };
    ids.sort_unstable();

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&ids)?),
        OutputFormat::Text => {
            for id in ids {
                println!("{id}");
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "list_tests.rs"]
mod tests;
