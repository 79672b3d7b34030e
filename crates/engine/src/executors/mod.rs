// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The Step Executors: one file per step kind, each implementing
//! [`StepExecutor`]. `flow_call` has no executor here — resuming a
//! sub-flow to completion needs to bubble a stacked continuation token
//! through the Flow Engine itself, which a single `StepResult` cannot
//! express, so the Flow Engine handles that step kind directly and only
//! borrows [`flow_call::render_inputs`] from this module.

mod completion;
mod conditional;
mod dice_roll;
mod dice_sequence;
mod flow_call;
mod llm_generation;
mod player_choice;
mod player_input;
mod table_roll;

pub use completion::CompletionExecutor;
pub use conditional::ConditionalExecutor;
pub use dice_roll::DiceRollExecutor;
pub use dice_sequence::DiceSequenceExecutor;
pub use llm_generation::LlmGenerationExecutor;
pub use player_choice::PlayerChoiceExecutor;
pub use player_input::PlayerInputExecutor;
pub use table_roll::TableRollExecutor;

pub(crate) use flow_call::render_inputs;

use crate::error::EngineError;
use async_trait::async_trait;
use grimoire_core::{ExecutionContext, StepResult};
use grimoire_model::{Step, System};
use serde_json::Value;

/// Implemented by every non-recursive step kind. `execute` computes the
/// step's effect and, for interactive kinds, returns `requires_input=true`
/// instead of applying it; `process_input` resumes such a step once the
/// host supplies the awaited value.
#[async_trait]
pub trait StepExecutor: Send + Sync {
    async fn execute(
        &self,
        step: &Step,
        ctx: &mut ExecutionContext,
        system: &System,
    ) -> Result<StepResult, EngineError>;

    async fn process_input(
        &self,
        _input: Value,
        step: &Step,
        _ctx: &mut ExecutionContext,
        _system: &System,
    ) -> Result<StepResult, EngineError> {
        Err(EngineError::Flow(format!(
            "step `{}` does not accept input",
            step.id
        )))
    }
}
