// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `player_input`. Validation of the returned string is left
//! entirely to the actions layer (typically a `set_value` action reading
//! `data.value`).

use super::StepExecutor;
use crate::error::EngineError;
use async_trait::async_trait;
use grimoire_core::result::InputType;
use grimoire_core::{ExecutionContext, StepResult};
use grimoire_model::{Step, StepKind, System};
use serde_json::{Map, Value};

#[derive(Default)]
pub struct PlayerInputExecutor;

impl PlayerInputExecutor {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl StepExecutor for PlayerInputExecutor {
    async fn execute(
        &self,
        step: &Step,
        ctx: &mut ExecutionContext,
        _system: &System,
    ) -> Result<StepResult, EngineError> {
        let StepKind::PlayerInput { prompt } = &step.kind else {
            return Err(EngineError::Flow(format!(
                "player_input executor received a `{}` step",
                step.kind.type_name()
            )));
        };
        let rendered_prompt = match prompt {
            Some(p) => {
                let rendered = ctx.resolve_template(p, None)?;
                Some(
                    rendered
                        .as_str()
                        .map(str::to_string)
                        .unwrap_or_else(|| rendered.to_string()),
                )
            }
            None => None,
        };
        Ok(StepResult::pending(
            step.id.clone(),
            rendered_prompt,
            None,
            Some(InputType::Text),
        ))
    }

    async fn process_input(
        &self,
        input: Value,
        step: &Step,
        _ctx: &mut ExecutionContext,
        _system: &System,
    ) -> Result<StepResult, EngineError> {
        let mut data = Map::new();
        data.insert("value".into(), input);
        Ok(StepResult::ok(step.id.clone(), data))
    }
}

#[cfg(test)]
#[path = "player_input_tests.rs"]
mod tests;
