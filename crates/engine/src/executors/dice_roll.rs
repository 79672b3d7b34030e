// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `dice_roll`.

use super::StepExecutor;
use crate::error::EngineError;
use async_trait::async_trait;
use grimoire_core::{ExecutionContext, StepResult};
use grimoire_model::{Step, StepKind, System};
use grimoire_ports::DiceService;
use serde_json::{json, Map};
use std::collections::HashMap;
use std::sync::Arc;

pub struct DiceRollExecutor {
    dice: Arc<dyn DiceService>,
}

impl DiceRollExecutor {
    pub fn new(dice: Arc<dyn DiceService>) -> Self {
        Self { dice }
    }
}

#[async_trait]
impl StepExecutor for DiceRollExecutor {
    async fn execute(
        &self,
        step: &Step,
        ctx: &mut ExecutionContext,
        _system: &System,
    ) -> Result<StepResult, EngineError> {
        let StepKind::DiceRoll { roll } = &step.kind else {
            return Err(EngineError::Flow(format!(
                "dice_roll executor received a `{}` step",
                step.kind.type_name()
            )));
        };
        let rendered = ctx.resolve_template(roll, None)?;
        let expr = rendered
            .as_str()
            .map(str::to_string)
            .unwrap_or_else(|| rendered.to_string());

        match self.dice.roll(&expr, &HashMap::new()).await {
            Ok(summary) => {
                let mut data = Map::new();
                data.insert("result".into(), json!(summary.total));
                data.insert("breakdown".into(), json!(summary.breakdown));
                Ok(StepResult::ok(step.id.clone(), data))
            }
            Err(e) => Ok(StepResult::failed(
                step.id.clone(),
                format!("Dice roll failed: {e}"),
            )),
        }
    }
}

#[cfg(test)]
#[path = "dice_roll_tests.rs"]
mod tests;
