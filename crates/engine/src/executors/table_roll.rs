// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `table_roll`, resolving entries per the system's Table definitions.

use super::StepExecutor;
use crate::error::EngineError;
use async_trait::async_trait;
use grimoire_core::{ExecutionContext, StepResult};
use grimoire_model::{Step, StepKind, System, Table, TableEntryValue};
use grimoire_ports::{DiceService, NameGenerator};
use rand::seq::SliceRandom;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;

pub struct TableRollExecutor {
    dice: Arc<dyn DiceService>,
    names: Arc<dyn NameGenerator>,
}

impl TableRollExecutor {
    pub fn new(dice: Arc<dyn DiceService>, names: Arc<dyn NameGenerator>) -> Self {
        Self { dice, names }
    }

    async fn resolve_entry(
        &self,
        entry: &TableEntryValue,
        table: &Table,
        system: &System,
    ) -> Result<Value, EngineError> {
        match entry {
            TableEntryValue::Literal(s) => Ok(Value::String(s.clone())),
            TableEntryValue::Explicit { id, entry_type } => {
                let compendium = system.compendium(entry_type).ok_or_else(|| {
                    EngineError::Table(format!("unknown compendium `{entry_type}`"))
                })?;
                let entry = compendium.entry(id).ok_or_else(|| {
                    EngineError::Table(format!(
                        "unknown compendium entry `{id}` in `{entry_type}`"
                    ))
                })?;
                Ok(Value::Object(entry.clone()))
            }
            TableEntryValue::Random { entry_type } => {
                let compendium = system.compendium(entry_type).ok_or_else(|| {
                    EngineError::Table(format!("unknown compendium `{entry_type}`"))
                })?;
                let ids: Vec<&str> = compendium.entry_ids().collect();
                let chosen = ids.choose(&mut rand::thread_rng()).ok_or_else(|| {
                    EngineError::Table(format!("compendium `{entry_type}` has no entries"))
                })?;
                let entry = compendium
                    .entry(chosen)
                    .expect("chosen id came from entry_ids");
                Ok(Value::Object(entry.clone()))
            }
            TableEntryValue::Generate { entry_type, .. } => {
                let hint = entry_type.clone().unwrap_or_else(|| table.entry_type.clone());
                Ok(Value::String(self.names.generate(&hint, None).await))
            }
        }
    }
}

#[async_trait]
impl StepExecutor for TableRollExecutor {
    async fn execute(
        &self,
        step: &Step,
        ctx: &mut ExecutionContext,
        system: &System,
    ) -> Result<StepResult, EngineError> {
        let StepKind::TableRoll { tables } = &step.kind else {
            return Err(EngineError::Flow(format!(
                "table_roll executor received a `{}` step",
                step.kind.type_name()
            )));
        };

        let mut results = Vec::new();
        for table_ref in tables {
            let table = system.table(&table_ref.table).ok_or_else(|| {
                EngineError::Table(format!("unknown table `{}`", table_ref.table))
            })?;
            let count = table_ref.count.unwrap_or(1).max(1);
            let roll_expr = table.roll.as_deref().unwrap_or("1d20");

            for _ in 0..count {
                let rendered = ctx.resolve_template(roll_expr, None)?;
                let expr = rendered
                    .as_str()
                    .map(str::to_string)
                    .unwrap_or_else(|| rendered.to_string());
                let summary = self.dice.roll(&expr, &HashMap::new()).await.map_err(|e| {
                    EngineError::Table(format!("table `{}` roll failed: {e}", table.id))
                })?;
                let Some(entry) = table.lookup(summary.total) else {
                    continue;
                };
                results.push(self.resolve_entry(entry, table, system).await?);
            }
        }

        let mut data = Map::new();
        data.insert("results".into(), Value::Array(results));
        Ok(StepResult::ok(step.id.clone(), data))
    }
}

#[cfg(test)]
#[path = "table_roll_tests.rs"]
mod tests;
