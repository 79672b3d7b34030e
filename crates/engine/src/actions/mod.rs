// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Action Strategies: declarative post-step effects applied after a
//! `StepExecutor` produces a result. One file per `Action` variant.

mod call_flow;
mod log_event;
mod log_message;
mod set_value;

pub use call_flow::CallFlowAction;
pub use log_event::LogEventAction;
pub use log_message::LogMessageAction;
pub use set_value::SetValueAction;

use crate::error::EngineError;
use async_trait::async_trait;
use grimoire_core::{ExecutionContext, StepResult};
use grimoire_model::{Action, System};

/// Implemented by one strategy per [`Action`] variant. A failing
/// action is logged and does not fail the step that produced `step_result`
/// — `apply_actions` (in `flow_engine`) is responsible for catching the
/// `Err` and continuing, not this trait.
#[async_trait]
pub trait ActionStrategy: Send + Sync {
    async fn apply(
        &self,
        action: &Action,
        ctx: &mut ExecutionContext,
        system: &System,
        step_result: &StepResult,
    ) -> Result<(), EngineError>;
}

/// Renders `value` against the acting step's result, passing non-string
/// values through unchanged. Shared by every strategy that needs to honor
/// templated action fields.
pub(crate) fn render_action_value(
    ctx: &ExecutionContext,
    value: &serde_json::Value,
    step_result: &StepResult,
) -> Result<serde_json::Value, EngineError> {
    match value {
        serde_json::Value::String(s) => {
            let extra = serde_json::json!({ "data": step_result.data });
            Ok(ctx.resolve_template(s, Some(&extra))?)
        }
        other => Ok(other.clone()),
    }
}
