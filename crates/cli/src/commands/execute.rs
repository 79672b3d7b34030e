// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `grimoire execute`: run a flow to completion, prompting on
//! stdin for any step that requires input, unless `--no-interactive` is
//! set — in which case the first such step is a hard failure.

use crate::output::OutputFormat;
use anyhow::{bail, Context, Result};
use clap::Args;
use grimoire_core::id::UuidIdGen;
use grimoire_core::ExecutionContext;
use grimoire_engine::{FlowEngine, StepOutcome};
use grimoire_loader::SystemLoader;
use grimoire_ports::{BuiltinNameGenerator, NoopLlmService, RegexDiceService, TracingLogger};
use grimoire_template::CoreTemplateResolver;
use serde_json::{Map, Value};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

/// Parse a `key=value` string for `--input` arguments.
fn parse_key_value(s: &str) -> Result<(String, String), String> {
    let pos = s
        .find('=')
        .ok_or_else(|| format!("invalid input format '{s}': must be key=value"))?;
    Ok((s[..pos].to_string(), s[pos + 1..].to_string()))
}

#[derive(Args)]
pub struct ExecuteArgs {
    /// Path to the system directory (containing system.yaml)
    pub system_path: PathBuf,
    /// Id of the flow to run
    #[arg(long)]
    pub flow: String,
    /// Write the resulting FlowResult JSON to this file instead of only stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Fail immediately on the first step that requires input, instead of
    /// prompting on stdin
    #[arg(long)]
    pub no_interactive: bool,
    /// Seed flow inputs as key=value pairs (repeatable)
    #[arg(long = "input", value_parser = parse_key_value)]
    pub input: Vec<(String, String)>,
}

/// Prints a prompt (and any choices) and reads one line of input.
fn prompt_for_value(pending: &grimoire_engine::PendingFrame) -> Result<Value> {
    if let Some(prompt) = &pending.prompt {
        println!("{prompt}");
    }
    if let Some(choices) = &pending.choices {
        for choice in choices {
            println!("  [{}] {}", choice.id, choice.label);
        }
    }
    print!("> ");
    std::io::stdout().flush().ok();
    let mut line = String::new();
    std::io::stdin()
        .read_line(&mut line)
        .context("reading input from stdin")?;
    Ok(Value::String(line.trim().to_string()))
}

fn print_result(result: &grimoire_core::FlowResult, format: OutputFormat, output: &Option<PathBuf>) -> Result<()> {
    let json = serde_json::to_string_pretty(result)?;
    match format {
        OutputFormat::Json => println!("{json}"),
        OutputFormat::Text => {
            if result.success {
                println!("flow `{}` completed", result.flow_id);
            } else {
                println!(
                    "flow `{}` failed: {}",
                    result.flow_id,
                    result.error.as_deref().unwrap_or("unknown error")
                );
            }
            println!("outputs: {}", serde_json::to_string_pretty(&result.outputs)?);
        }
    }
    if let Some(path) = output {
        std::fs::write(path, &json).with_context(|| format!("writing output to {}", path.display()))?;
    }
    Ok(())
}

pub async fn handle(args: ExecuteArgs, format: OutputFormat, loader: &SystemLoader) -> Result<()> {
    let system = loader.load(&args.system_path)?;
    if system.flow(&args.flow).is_none() {
        bail!("unknown flow `{}`", args.flow);
    }

    let engine = FlowEngine::new(
        Arc::new(RegexDiceService::new()),
        Arc::new(NoopLlmService::new()),
        Arc::new(BuiltinNameGenerator),
        Arc::new(TracingLogger::new()),
        UuidIdGen,
    );
    let ctrl_c_engine = engine.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c_engine.cancel();
        }
    });
    let mut ctx = ExecutionContext::new(system.metadata(), Arc::new(CoreTemplateResolver::new()));

    let mut inputs = Map::new();
    for (key, value) in &args.input {
        inputs.insert(key.clone(), Value::String(value.clone()));
    }

    let mut outcome = engine
        .execute_flow(&args.flow, Value::Object(inputs), &mut ctx, &system)
        .await?;

    loop {
        match outcome {
            StepOutcome::Completed(result) => {
                let exit_ok = result.success;
                print_result(&result, format, &args.output)?;
                if !exit_ok {
                    std::process::exit(1);
                }
                return Ok(());
            }
            StepOutcome::Pending(pending) => {
                if args.no_interactive {
                    let step = pending
                        .current()
                        .map(|f| f.step_id.as_str())
                        .unwrap_or("<unknown>");
                    bail!("flow `{}` requires input at step `{step}` (running with --no-interactive)", args.flow);
                }
                let value = {
                    let current = pending
                        .current()
                        .context("pending state has no current frame")?;
                    prompt_for_value(current)?
                };
                outcome = engine.resume(pending, value, &mut ctx, &system).await?;
            }
        }
    }
}

#[cfg(test)]
#[path = "execute_tests.rs"]
mod tests;
