// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Component-boundary result types.
//!
//! The core uses explicit result values at component boundaries and panics
//! only for invariant breaches — never for expected step/flow outcomes. See
//! `StepResult`/`FlowResult` below.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The input kind an interactive step expects back via `process_input`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputType {
    Choice,
    Text,
}

/// One choice offered by an interactive step (`player_choice`, `table_roll`
/// with a `generate` entry that still needs confirmation, etc).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Choice {
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub data: Value,
}

/// Outcome of one executor invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepResult {
    pub step_id: String,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default)]
    pub data: Map<String, Value>,
    #[serde(default)]
    pub requires_input: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<Choice>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_type: Option<InputType>,
}

impl StepResult {
    pub fn ok(step_id: impl Into<String>, data: Map<String, Value>) -> Self {
        Self {
            step_id: step_id.into(),
            success: true,
            error: None,
            data,
            requires_input: false,
            prompt: None,
            choices: None,
            input_type: None,
        }
    }

    pub fn failed(step_id: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            step_id: step_id.into(),
            success: false,
            error: Some(error.into()),
            data: Map::new(),
            requires_input: false,
            prompt: None,
            choices: None,
            input_type: None,
        }
    }

    pub fn pending(
        step_id: impl Into<String>,
        prompt: Option<String>,
        choices: Option<Vec<Choice>>,
        input_type: Option<InputType>,
    ) -> Self {
        Self {
            step_id: step_id.into(),
            success: true,
            error: None,
            data: Map::new(),
            requires_input: true,
            prompt,
            choices,
            input_type,
        }
    }
}

/// One step's outcome, as carried in a completed `FlowResult`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepOutcomeRecord {
    pub step_id: String,
    pub success: bool,
    #[serde(default)]
    pub data: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Terminal state of a flow execution, or a snapshot of an in-progress one
/// returned to the host for persistence/diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowResult {
    pub success: bool,
    pub flow_id: String,
    #[serde(default)]
    pub outputs: Value,
    #[serde(default)]
    pub variables: Value,
    #[serde(default)]
    pub step_results: Vec<StepOutcomeRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at_step: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default)]
    pub cancelled: bool,
}

impl FlowResult {
    pub fn success(
        flow_id: impl Into<String>,
        outputs: Value,
        variables: Value,
        step_results: Vec<StepOutcomeRecord>,
    ) -> Self {
        Self {
            success: true,
            flow_id: flow_id.into(),
            outputs,
            variables,
            step_results,
            completed_at_step: None,
            error: None,
            cancelled: false,
        }
    }

    pub fn failure(
        flow_id: impl Into<String>,
        completed_at_step: impl Into<String>,
        error: impl Into<String>,
        step_results: Vec<StepOutcomeRecord>,
    ) -> Self {
        Self {
            success: false,
            flow_id: flow_id.into(),
            outputs: Value::Null,
            variables: Value::Null,
            step_results,
            completed_at_step: Some(completed_at_step.into()),
            error: Some(error.into()),
            cancelled: false,
        }
    }

    pub fn cancelled(flow_id: impl Into<String>, step_results: Vec<StepOutcomeRecord>) -> Self {
        Self {
            success: false,
            flow_id: flow_id.into(),
            outputs: Value::Null,
            variables: Value::Null,
            step_results,
            completed_at_step: None,
            error: None,
            cancelled: true,
        }
    }
}
