// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `call_flow`: invokes a sub-flow as a side effect of another
//! step's actions, binding its outputs into a transient `result` overlay
//! for the remaining actions in the same list. Holds only a [`Weak`]
//! reference to the Flow Engine — the engine owns the registry that owns
//! this strategy, so a strong reference back would be a cycle.

use super::{render_action_value, ActionStrategy};
use crate::error::EngineError;
use crate::flow_engine::{FlowEngine, StepOutcome};
use async_trait::async_trait;
use grimoire_core::{ExecutionContext, StepResult};
use grimoire_model::{Action, System};
use std::sync::Weak;

pub struct CallFlowAction {
    engine: Weak<FlowEngine>,
}

impl CallFlowAction {
    pub fn new(engine: Weak<FlowEngine>) -> Self {
        Self { engine }
    }
}

#[async_trait]
impl ActionStrategy for CallFlowAction {
    async fn apply(
        &self,
        action: &Action,
        ctx: &mut ExecutionContext,
        system: &System,
        step_result: &StepResult,
    ) -> Result<(), EngineError> {
        let Action::CallFlow { flow_id, inputs } = action else {
            return Err(EngineError::Flow(format!(
                "call_flow strategy received a `{}` action",
                action.type_name()
            )));
        };

        let mut rendered_inputs = serde_json::Map::with_capacity(inputs.len());
        for (key, value) in inputs {
            rendered_inputs.insert(key.clone(), render_action_value(ctx, value, step_result)?);
        }

        let engine = self.engine.upgrade().ok_or_else(|| {
            EngineError::Flow("call_flow action outlived its Flow Engine".to_string())
        })?;

        match engine
            .invoke_subflow(flow_id, &rendered_inputs, ctx, system)
            .await?
        {
            StepOutcome::Completed(flow_result) if flow_result.success => {
                ctx.set_result_overlay(flow_result.outputs)?;
                Ok(())
            }
            StepOutcome::Completed(flow_result) => Err(EngineError::Flow(format!(
                "call_flow `{flow_id}` failed: {}",
                flow_result.error.unwrap_or_default()
            ))),
            StepOutcome::Pending(_) => Err(EngineError::Flow(format!(
                "call_flow `{flow_id}` requires input, which is not supported from an action"
            ))),
        }
    }
}

#[cfg(test)]
#[path = "call_flow_tests.rs"]
mod tests;
