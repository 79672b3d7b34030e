// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `completion`: terminates a flow. Stopping `run_loop` regardless
//! of `next_step` is the Flow Engine's job; this executor only renders the
//! closing prompt.

use super::StepExecutor;
use crate::error::EngineError;
use async_trait::async_trait;
use grimoire_core::{ExecutionContext, StepResult};
use grimoire_model::{Step, StepKind, System};
use serde_json::Map;

#[derive(Default)]
pub struct CompletionExecutor;

impl CompletionExecutor {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl StepExecutor for CompletionExecutor {
    async fn execute(
        &self,
        step: &Step,
        ctx: &mut ExecutionContext,
        _system: &System,
    ) -> Result<StepResult, EngineError> {
        let StepKind::Completion { prompt } = &step.kind else {
            return Err(EngineError::Flow(format!(
                "completion executor received a `{}` step",
                step.kind.type_name()
            )));
        };

        let mut data = Map::new();
        if let Some(p) = prompt {
            let rendered = ctx.resolve_template(p, None)?;
            data.insert("prompt".into(), rendered);
        }
        Ok(StepResult::ok(step.id.clone(), data))
    }
}

#[cfg(test)]
#[path = "completion_tests.rs"]
mod tests;
