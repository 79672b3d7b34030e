// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `log_message`: a human-readable transcript line, recorded on
//! the context for the host to surface (a session log, a UI pane) —
//! distinct from `log_event`'s structured telemetry.

use super::{render_action_value, ActionStrategy};
use crate::error::EngineError;
use async_trait::async_trait;
use grimoire_core::{ExecutionContext, StepResult};
use grimoire_model::{Action, System};

#[derive(Default)]
pub struct LogMessageAction;

impl LogMessageAction {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ActionStrategy for LogMessageAction {
    async fn apply(
        &self,
        action: &Action,
        ctx: &mut ExecutionContext,
        _system: &System,
        step_result: &StepResult,
    ) -> Result<(), EngineError> {
        let Action::LogMessage { message } = action else {
            return Err(EngineError::Flow(format!(
                "log_message strategy received a `{}` action",
                action.type_name()
            )));
        };
        let rendered = render_action_value(ctx, &serde_json::Value::String(message.clone()), step_result)?;
        let text = rendered
            .as_str()
            .map(str::to_string)
            .unwrap_or_else(|| rendered.to_string());
        ctx.record_action_message(text);
        Ok(())
    }
}

#[cfg(test)]
#[path = "log_message_tests.rs"]
mod tests;
