// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `dice_sequence`.

use super::StepExecutor;
use crate::error::EngineError;
use async_trait::async_trait;
use grimoire_core::{ExecutionContext, StepResult};
use grimoire_model::{Step, StepKind, System};
use grimoire_ports::DiceService;
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use std::sync::Arc;

pub struct DiceSequenceExecutor {
    dice: Arc<dyn DiceService>,
}

impl DiceSequenceExecutor {
    pub fn new(dice: Arc<dyn DiceService>) -> Self {
        Self { dice }
    }
}

#[async_trait]
impl StepExecutor for DiceSequenceExecutor {
    async fn execute(
        &self,
        step: &Step,
        ctx: &mut ExecutionContext,
        _system: &System,
    ) -> Result<StepResult, EngineError> {
        let StepKind::DiceSequence { sequence } = &step.kind else {
            return Err(EngineError::Flow(format!(
                "dice_sequence executor received a `{}` step",
                step.kind.type_name()
            )));
        };

        let mut results = Vec::with_capacity(sequence.items.len());
        for item in &sequence.items {
            let extra = json!({ "item": item });
            let rendered = ctx.resolve_template(&sequence.roll, Some(&extra))?;
            let expr = rendered
                .as_str()
                .map(str::to_string)
                .unwrap_or_else(|| rendered.to_string());
            match self.dice.roll(&expr, &HashMap::new()).await {
                Ok(summary) => results.push(json!({ "item": item, "result": summary.total })),
                Err(e) => {
                    return Ok(StepResult::failed(
                        step.id.clone(),
                        format!("Dice roll failed: {e}"),
                    ))
                }
            }
        }

        let mut data = Map::new();
        data.insert("results".into(), Value::Array(results));
        Ok(StepResult::ok(step.id.clone(), data))
    }
}

#[cfg(test)]
#[path = "dice_sequence_tests.rs"]
mod tests;
