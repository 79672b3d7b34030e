// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `set_value`: writes a rendered value into the context through
//! the set-cascade, so any derived field depending on `path`
//! recomputes immediately.

use super::{render_action_value, ActionStrategy};
use crate::error::EngineError;
use async_trait::async_trait;
use grimoire_core::{ExecutionContext, StepResult};
use grimoire_model::{Action, System};

#[derive(Default)]
pub struct SetValueAction;

impl SetValueAction {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ActionStrategy for SetValueAction {
    async fn apply(
        &self,
        action: &Action,
        ctx: &mut ExecutionContext,
        _system: &System,
        step_result: &StepResult,
    ) -> Result<(), EngineError> {
        let Action::SetValue { path, value } = action else {
            return Err(EngineError::Flow(format!(
                "set_value strategy received a `{}` action",
                action.type_name()
            )));
        };
        let rendered = render_action_value(ctx, value, step_result)?;
        ctx.apply_set_with_cascade(path, rendered)?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "set_value_tests.rs"]
mod tests;
