// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `conditional`: picks one `Vec<Action>` branch. The chosen
//! actions are handed back through `StepResult.data["branch_actions"]`
//! rather than applied here, keeping [`StepExecutor`] a pure function of
//! the current context; the Flow Engine deserializes and applies them
//! alongside the step's own `actions` list.

use super::StepExecutor;
use crate::condition::evaluate_condition_value;
use crate::error::EngineError;
use async_trait::async_trait;
use grimoire_core::{ExecutionContext, StepResult};
use grimoire_model::{Action, ElseBranch, Step, StepKind, System};
use serde_json::Map;

#[derive(Default)]
pub struct ConditionalExecutor;

impl ConditionalExecutor {
    pub fn new() -> Self {
        Self
    }

    fn resolve_else_branch(
        &self,
        branch: &ElseBranch,
        ctx: &ExecutionContext,
    ) -> Result<Vec<Action>, EngineError> {
        match branch {
            ElseBranch::Actions(actions) => Ok(actions.clone()),
            ElseBranch::Elif(nested) => {
                if evaluate_condition_value(&nested.if_condition, ctx)? {
                    Ok(nested.then_actions.clone())
                } else {
                    match &nested.else_actions {
                        Some(next) => self.resolve_else_branch(next, ctx),
                        None => Ok(Vec::new()),
                    }
                }
            }
        }
    }
}

#[async_trait]
impl StepExecutor for ConditionalExecutor {
    async fn execute(
        &self,
        step: &Step,
        ctx: &mut ExecutionContext,
        _system: &System,
    ) -> Result<StepResult, EngineError> {
        let StepKind::Conditional {
            if_condition,
            then_actions,
            else_actions,
        } = &step.kind
        else {
            return Err(EngineError::Flow(format!(
                "conditional executor received a `{}` step",
                step.kind.type_name()
            )));
        };

        let chosen = if evaluate_condition_value(if_condition, ctx)? {
            then_actions.clone()
        } else {
            match else_actions {
                Some(branch) => self.resolve_else_branch(branch, ctx)?,
                None => Vec::new(),
            }
        };

        let mut data = Map::new();
        data.insert(
            "branch_actions".into(),
            serde_json::to_value(chosen).map_err(|e| {
                EngineError::Flow(format!("failed to serialize branch actions: {e}"))
            })?,
        );
        Ok(StepResult::ok(step.id.clone(), data))
    }
}

#[cfg(test)]
#[path = "conditional_tests.rs"]
mod tests;
