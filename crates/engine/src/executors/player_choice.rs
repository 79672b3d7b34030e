// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `player_choice`. `execute` and `process_input` both recompute
//! the same choice set from the (unchanged) context rather than threading
//! it through `StepResult`, since resolution is deterministic.

use super::StepExecutor;
use crate::error::EngineError;
use async_trait::async_trait;
use grimoire_core::result::{Choice, InputType};
use grimoire_core::{ExecutionContext, StepResult};
use grimoire_model::{ChoiceSource, Step, StepKind, System, TableEntryValue};
use serde_json::{json, Map, Value};

#[derive(Default)]
pub struct PlayerChoiceExecutor;

impl PlayerChoiceExecutor {
    pub fn new() -> Self {
        Self
    }

    fn resolve_choices(
        &self,
        step: &Step,
        ctx: &ExecutionContext,
        system: &System,
    ) -> Result<Vec<Choice>, EngineError> {
        let StepKind::PlayerChoice {
            choices,
            choice_source,
        } = &step.kind
        else {
            return Err(EngineError::Flow(format!(
                "player_choice executor received a `{}` step",
                step.kind.type_name()
            )));
        };

        if let Some(inline) = choices {
            return Ok(inline
                .iter()
                .map(|c| Choice {
                    id: c.id.clone(),
                    label: c.label.clone(),
                    data: Value::Object(c.data.clone()),
                })
                .collect());
        }

        let Some(source) = choice_source else {
            return Err(EngineError::Choice(format!(
                "step `{}` has neither `choices` nor `choice_source`",
                step.id
            )));
        };

        match source {
            ChoiceSource::TableFromValues {
                table_from_values,
                display_format,
                ..
            } => {
                let root = ctx.template_context(None)?;
                let target = grimoire_core::path::get(&root, table_from_values).cloned();
                let Some(Value::Object(map)) = target else {
                    return Err(EngineError::Choice(format!(
                        "`{table_from_values}` is not an object in the current context"
                    )));
                };
                let mut out = Vec::with_capacity(map.len());
                for (key, value) in &map {
                    let extra = json!({ "key": key, "value": value });
                    let rendered = ctx.resolve_template(display_format, Some(&extra))?;
                    let label = rendered
                        .as_str()
                        .map(str::to_string)
                        .unwrap_or_else(|| rendered.to_string());
                    out.push(Choice {
                        id: key.clone(),
                        label,
                        data: value.clone(),
                    });
                }
                Ok(out)
            }
            ChoiceSource::Compendium { compendium, filter } => {
                let comp = system.compendium(compendium).ok_or_else(|| {
                    EngineError::Choice(format!("unknown compendium `{compendium}`"))
                })?;
                let mut out = Vec::new();
                for id in comp.entry_ids() {
                    let entry = comp.entry(id).expect("entry_ids only yields present keys");
                    if let Some(filter_expr) = filter {
                        let extra = json!({ "entry": entry });
                        let rendered = ctx.resolve_template(filter_expr, Some(&extra))?;
                        if !crate::condition::coerce_bool(&rendered) {
                            continue;
                        }
                    }
                    let label = entry
                        .get("name")
                        .and_then(Value::as_str)
                        .unwrap_or(id)
                        .to_string();
                    out.push(Choice {
                        id: id.to_string(),
                        label,
                        data: Value::Object(entry.clone()),
                    });
                }
                Ok(out)
            }
            ChoiceSource::Table { table } => {
                let tbl = system
                    .table(table)
                    .ok_or_else(|| EngineError::Choice(format!("unknown table `{table}`")))?;
                let mut out = Vec::with_capacity(tbl.entries.len());
                for (key, value) in &tbl.entries {
                    let label = match value {
                        TableEntryValue::Literal(s) => s.clone(),
                        _ => key.to_string(),
                    };
                    out.push(Choice {
                        id: key.to_string(),
                        label,
                        data: Value::Null,
                    });
                }
                Ok(out)
            }
        }
    }
}

#[async_trait]
impl StepExecutor for PlayerChoiceExecutor {
    async fn execute(
        &self,
        step: &Step,
        ctx: &mut ExecutionContext,
        system: &System,
    ) -> Result<StepResult, EngineError> {
        let choices = self.resolve_choices(step, ctx, system)?;
        Ok(StepResult::pending(
            step.id.clone(),
            step.name.clone(),
            Some(choices),
            Some(InputType::Choice),
        ))
    }

    async fn process_input(
        &self,
        input: Value,
        step: &Step,
        ctx: &mut ExecutionContext,
        system: &System,
    ) -> Result<StepResult, EngineError> {
        let choices = self.resolve_choices(step, ctx, system)?;
        let selected_ids: Vec<String> = match &input {
            Value::String(s) => vec![s.clone()],
            Value::Array(items) => items
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect(),
            other => vec![other.to_string()],
        };

        let valid = !selected_ids.is_empty()
            && selected_ids
                .iter()
                .all(|id| choices.iter().any(|c| &c.id == id));
        if !valid {
            return Ok(StepResult::failed(step.id.clone(), "Invalid choice"));
        }

        let mut data = Map::new();
        data.insert(
            "selected".into(),
            if selected_ids.len() == 1 {
                Value::String(selected_ids[0].clone())
            } else {
                Value::Array(selected_ids.into_iter().map(Value::String).collect())
            },
        );
        Ok(StepResult::ok(step.id.clone(), data))
    }
}

#[cfg(test)]
#[path = "player_choice_tests.rs"]
mod tests;
