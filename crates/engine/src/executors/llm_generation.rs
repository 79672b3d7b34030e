// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `llm_generation`: prompt rendering, the LLM call, and an
//! optional JSON validation/repair loop.

use super::StepExecutor;
use crate::error::EngineError;
use async_trait::async_trait;
use grimoire_core::{ExecutionContext, StepResult};
use grimoire_model::{LlmSettings, Step, StepKind, System};
use grimoire_ports::LlmService;
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use std::sync::Arc;

/// Bounds the JSON repair loop: up to this many repair attempts before
/// giving up.
const MAX_REPAIR_ATTEMPTS: u32 = 2;

const REPAIR_PROMPT: &str = "Return a valid JSON object, corrected.";

pub struct LlmGenerationExecutor {
    llm: Arc<dyn LlmService>,
}

impl LlmGenerationExecutor {
    pub fn new(llm: Arc<dyn LlmService>) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl StepExecutor for LlmGenerationExecutor {
    async fn execute(
        &self,
        step: &Step,
        ctx: &mut ExecutionContext,
        system: &System,
    ) -> Result<StepResult, EngineError> {
        let StepKind::LlmGeneration {
            prompt,
            prompt_ref,
            prompt_data,
            settings,
            validation,
        } = &step.kind
        else {
            return Err(EngineError::Flow(format!(
                "llm_generation executor received a `{}` step",
                step.kind.type_name()
            )));
        };

        let template = match (prompt, prompt_ref) {
            (Some(p), _) => p.clone(),
            (None, Some(r)) => system
                .prompt(r)
                .ok_or_else(|| EngineError::Llm(format!("unknown prompt `{r}`")))?
                .template
                .clone(),
            (None, None) => {
                return Ok(StepResult::failed(
                    step.id.clone(),
                    "llm_generation step requires `prompt` or `prompt_ref`",
                ))
            }
        };

        let extra = Value::Object(prompt_data.clone());
        let rendered = ctx.resolve_template(&template, Some(&extra))?;
        let rendered_prompt = rendered
            .as_str()
            .map(str::to_string)
            .unwrap_or_else(|| rendered.to_string());
        let settings_value = settings_to_value(settings);

        let response = match self
            .llm
            .generate(&rendered_prompt, &HashMap::new(), Some(&settings_value))
            .await
        {
            Ok(r) => r,
            Err(e) => {
                return Ok(StepResult::failed(
                    step.id.clone(),
                    format!("LLM generation failed: {e}"),
                ))
            }
        };

        let Some(validation) = validation else {
            let mut data = Map::new();
            data.insert("result".into(), Value::String(response));
            return Ok(StepResult::ok(step.id.clone(), data));
        };
        if validation.kind != "json" {
            return Ok(StepResult::failed(
                step.id.clone(),
                format!("unsupported validation type `{}`", validation.kind),
            ));
        }

        let mut candidate = response;
        let mut attempt = 0;
        loop {
            let outcome = extract_json(&candidate)
                .and_then(|value| validate_schema(&value, validation.schema.as_ref()).map(|_| value));
            match outcome {
                Ok(parsed) => {
                    let mut data = Map::new();
                    data.insert("result".into(), parsed);
                    return Ok(StepResult::ok(step.id.clone(), data));
                }
                Err(validation_err) => {
                    if attempt >= MAX_REPAIR_ATTEMPTS {
                        return Ok(StepResult::failed(
                            step.id.clone(),
                            format!(
                                "LLM JSON validation failed after {MAX_REPAIR_ATTEMPTS} repair attempts: {validation_err}"
                            ),
                        ));
                    }
                    attempt += 1;
                    candidate = match self
                        .llm
                        .generate(REPAIR_PROMPT, &HashMap::new(), Some(&settings_value))
                        .await
                    {
                        Ok(r) => r,
                        Err(e) => {
                            return Ok(StepResult::failed(
                                step.id.clone(),
                                format!("LLM generation failed during repair: {e}"),
                            ))
                        }
                    };
                }
            }
        }
    }
}

fn settings_to_value(settings: &LlmSettings) -> Value {
    json!({
        "provider": settings.provider,
        "model": settings.model,
        "max_tokens": settings.max_tokens,
        "temperature": settings.temperature,
    })
}

fn extract_json(text: &str) -> Result<Value, String> {
    if let Some(fenced) = extract_fenced_json(text) {
        if let Ok(v) = serde_json::from_str(&fenced) {
            return Ok(v);
        }
    }
    if let Some(balanced) = extract_balanced_braces(text) {
        return serde_json::from_str(&balanced).map_err(|e| e.to_string());
    }
    Err("no JSON object found in response".to_string())
}

fn extract_fenced_json(text: &str) -> Option<String> {
    let start = text
        .find("```json")
        .map(|i| i + "```json".len())
        .or_else(|| text.find("```").map(|i| i + 3))?;
    let rest = &text[start..];
    let end = rest.find("```")?;
    Some(rest[..end].trim().to_string())
}

fn extract_balanced_braces(text: &str) -> Option<String> {
    let open = text.find('{')?;
    let mut depth = 0i32;
    for (i, ch) in text[open..].char_indices() {
        match ch {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(text[open..open + i + 1].to_string());
                }
            }
            _ => {}
        }
    }
    None
}

fn validate_schema(value: &Value, schema: Option<&Value>) -> Result<(), String> {
    let Some(schema_obj) = schema.and_then(Value::as_object) else {
        return Ok(());
    };

    if let Some(required) = schema_obj.get("required").and_then(Value::as_array) {
        for key in required.iter().filter_map(Value::as_str) {
            if value.get(key).is_none() {
                return Err(format!("missing required key `{key}`"));
            }
        }
    }

    if let Some(properties) = schema_obj.get("properties").and_then(Value::as_object) {
        for (key, prop_schema) in properties {
            let Some(field_value) = value.get(key) else {
                continue;
            };
            let Some(prop) = prop_schema.as_object() else {
                continue;
            };
            if let Some(expected_type) = prop.get("type").and_then(Value::as_str) {
                if !matches_basic_type(field_value, expected_type) {
                    return Err(format!("field `{key}` is not of type `{expected_type}`"));
                }
            }
            if let Some(enum_values) = prop.get("enum").and_then(Value::as_array) {
                if !enum_values.contains(field_value) {
                    return Err(format!("field `{key}` is not one of the allowed enum values"));
                }
            }
            if let Some(min_length) = prop.get("minLength").and_then(Value::as_u64) {
                let len = field_value.as_str().map(str::len).unwrap_or(0) as u64;
                if len < min_length {
                    return Err(format!("field `{key}` is shorter than minLength {min_length}"));
                }
            }
        }
    }

    Ok(())
}

fn matches_basic_type(value: &Value, expected: &str) -> bool {
    match expected {
        "string" => value.is_string(),
        "integer" => value.is_i64() || value.is_u64(),
        "object" => value.is_object(),
        _ => true,
    }
}

#[cfg(test)]
#[path = "llm_generation_tests.rs"]
mod tests;
