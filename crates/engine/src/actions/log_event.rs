// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `log_event`: structured telemetry, routed through the
//! [`LoggerPort`] rather than the action-message transcript `log_message`
//! writes to.

use super::{render_action_value, ActionStrategy};
use crate::error::EngineError;
use async_trait::async_trait;
use grimoire_core::{ExecutionContext, StepResult};
use grimoire_model::{Action, System};
use grimoire_ports::{LogLevel, LoggerPort};
use std::sync::Arc;

pub struct LogEventAction {
    logger: Arc<dyn LoggerPort>,
}

impl LogEventAction {
    pub fn new(logger: Arc<dyn LoggerPort>) -> Self {
        Self { logger }
    }
}

#[async_trait]
impl ActionStrategy for LogEventAction {
    async fn apply(
        &self,
        action: &Action,
        ctx: &mut ExecutionContext,
        _system: &System,
        step_result: &StepResult,
    ) -> Result<(), EngineError> {
        let Action::LogEvent { event_type, data } = action else {
            return Err(EngineError::Flow(format!(
                "log_event strategy received a `{}` action",
                action.type_name()
            )));
        };
        let rendered = render_action_value(ctx, data, step_result)?;
        self.logger
            .log(LogLevel::Info, &format!("{event_type}: {rendered}"));
        Ok(())
    }
}

#[cfg(test)]
#[path = "log_event_tests.rs"]
mod tests;
