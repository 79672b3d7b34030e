// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The Flow and Step records — the definitions the Flow Engine
//! interprets. Step payloads are modeled as a tagged-by-`type` enum
//! flattened onto a common envelope, the same shape `oj-runbook`'s
//! `RunDirective`/`StepDef` pair uses for its own union of step kinds.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputDef {
    pub name: String,
    #[serde(rename = "type", default)]
    pub attr_type: Option<String>,
    #[serde(default = "default_true")]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputDef {
    pub name: String,
    #[serde(rename = "type", default)]
    pub attr_type: Option<String>,
    #[serde(default)]
    pub required: bool,
}

fn default_true() -> bool {
    true
}

/// A condition: either a literal boolean or a template string evaluated at
/// run time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConditionValue {
    Bool(bool),
    Template(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiceSequenceSpec {
    pub items: Vec<String>,
    pub roll: String,
    #[serde(default)]
    pub display_as: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InlineChoice {
    pub id: String,
    pub label: String,
    #[serde(flatten)]
    pub data: Map<String, Value>,
}

/// `player_choice`'s `choice_source`: one of three variants,
/// disambiguated by which unique field is present.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChoiceSource {
    TableFromValues {
        table_from_values: String,
        selection_count: u32,
        display_format: String,
    },
    Compendium {
        compendium: String,
        #[serde(default)]
        filter: Option<String>,
    },
    Table {
        table: String,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableRollRef {
    pub table: String,
    #[serde(default)]
    pub count: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LlmSettings {
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub max_tokens: Option<u32>,
    #[serde(default)]
    pub temperature: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmValidation {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub schema: Option<Value>,
}

/// An `else` branch: either a flat action list or a nested
/// `{if, then, else?}` map forming an elif chain.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ElseBranch {
    Actions(Vec<Action>),
    Elif(Box<ConditionalBranch>),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConditionalBranch {
    #[serde(rename = "if")]
    pub if_condition: ConditionValue,
    #[serde(rename = "then")]
    pub then_actions: Vec<Action>,
    #[serde(rename = "else", default)]
    pub else_actions: Option<ElseBranch>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StepKind {
    DiceRoll {
        roll: String,
    },
    DiceSequence {
        sequence: DiceSequenceSpec,
    },
    PlayerChoice {
        #[serde(default)]
        choices: Option<Vec<InlineChoice>>,
        #[serde(default)]
        choice_source: Option<ChoiceSource>,
    },
    PlayerInput {
        #[serde(default)]
        prompt: Option<String>,
    },
    TableRoll {
        tables: Vec<TableRollRef>,
    },
    LlmGeneration {
        #[serde(default)]
        prompt: Option<String>,
        #[serde(default)]
        prompt_ref: Option<String>,
        #[serde(default)]
        prompt_data: Map<String, Value>,
        #[serde(default)]
        settings: LlmSettings,
        #[serde(default)]
        validation: Option<LlmValidation>,
    },
    Conditional {
        if_condition: ConditionValue,
        #[serde(default)]
        then_actions: Vec<Action>,
        #[serde(default)]
        else_actions: Option<ElseBranch>,
    },
    FlowCall {
        flow: String,
        #[serde(default)]
        inputs: Map<String, Value>,
    },
    Completion {
        #[serde(default)]
        prompt: Option<String>,
    },
}

impl StepKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            StepKind::DiceRoll { .. } => "dice_roll",
            StepKind::DiceSequence { .. } => "dice_sequence",
            StepKind::PlayerChoice { .. } => "player_choice",
            StepKind::PlayerInput { .. } => "player_input",
            StepKind::TableRoll { .. } => "table_roll",
            StepKind::LlmGeneration { .. } => "llm_generation",
            StepKind::Conditional { .. } => "conditional",
            StepKind::FlowCall { .. } => "flow_call",
            StepKind::Completion { .. } => "completion",
        }
    }
}

/// A post-step declarative effect.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    SetValue {
        path: String,
        value: Value,
    },
    LogMessage {
        message: String,
    },
    LogEvent {
        #[serde(rename = "event_type")]
        event_type: String,
        data: Value,
    },
    CallFlow {
        flow_id: String,
        #[serde(default)]
        inputs: Map<String, Value>,
    },
    #[serde(other)]
    Unknown,
}

impl Action {
    pub fn type_name(&self) -> &'static str {
        match self {
            Action::SetValue { .. } => "set_value",
            Action::LogMessage { .. } => "log_message",
            Action::LogEvent { .. } => "log_event",
            Action::CallFlow { .. } => "call_flow",
            Action::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Step {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub condition: Option<String>,
    #[serde(default)]
    pub next_step: Option<String>,
    #[serde(default)]
    pub actions: Vec<Action>,
    #[serde(flatten)]
    pub kind: StepKind,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flow {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub inputs: Vec<InputDef>,
    #[serde(default)]
    pub outputs: Vec<OutputDef>,
    #[serde(default)]
    pub variables: Map<String, Value>,
    pub steps: Vec<Step>,
    #[serde(default)]
    pub resume_points: Vec<String>,
}

impl Flow {
    pub fn step(&self, id: &str) -> Option<&Step> {
        self.steps.iter().find(|s| s.id == id)
    }

    pub fn step_index(&self, id: &str) -> Option<usize> {
        self.steps.iter().position(|s| s.id == id)
    }

    /// The step that follows `idx` positionally, honoring an explicit
    /// `next_step` override if present.
    pub fn next_index(&self, idx: usize) -> Option<usize> {
        let step = self.steps.get(idx)?;
        match &step.next_step {
            Some(target) => self.step_index(target),
            None => {
                let next = idx + 1;
                if next < self.steps.len() {
                    Some(next)
                } else {
                    None
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "flow_tests.rs"]
mod tests;
