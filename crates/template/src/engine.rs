// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The two-mode Template Service (C): load-time strict, run-time lenient,
//! built on `minijinja` (chosen per the grounding note in
//! `SPEC_FULL.md` — the corpus's own Jinja-compatible flow engine,
//! `BeemFlow`, uses the same crate for the same purpose).

use crate::error::TemplateError;
use crate::filters;
use crate::runtime_idents::RUN_TIME_IDENTIFIERS;
use crate::structured::detect_structured;
use grimoire_core::path;
use minijinja::value::Value as JinjaValue;
use minijinja::{Environment, State, UndefinedBehavior};
use serde_json::Value;
use std::collections::BTreeSet;

/// Wraps one loadtime environment (strict undefined) and one runtime
/// environment (lenient undefined, plus the `get_value` function), sharing
/// the same filter set.
pub struct TemplateService {
    loadtime_env: Environment<'static>,
    runtime_env: Environment<'static>,
}

impl Default for TemplateService {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateService {
    pub fn new() -> Self {
        let mut loadtime_env = Environment::new();
        loadtime_env.set_undefined_behavior(UndefinedBehavior::Strict);
        register_filters(&mut loadtime_env);

        let mut runtime_env = Environment::new();
        runtime_env.set_undefined_behavior(UndefinedBehavior::Lenient);
        register_filters(&mut runtime_env);
        runtime_env.add_function("get_value", get_value);

        Self {
            loadtime_env,
            runtime_env,
        }
    }

    /// Strict rendering against `system_metadata` (and local constants).
    /// Always returns a string; undefined variables raise.
    pub fn resolve_loadtime(&self, template: &str, context: &Value) -> Result<String, TemplateError> {
        self.loadtime_env
            .render_str(template, context)
            .map_err(|e| {
                if e.kind() == minijinja::ErrorKind::UndefinedError {
                    TemplateError::LoadtimeUndefined(e.to_string())
                } else {
                    TemplateError::LoadtimeRender(e.to_string())
                }
            })
    }

    /// Lenient rendering against the run-time context view, with
    /// structured-return detection. Referencing a run-time identifier
    /// that is entirely absent from `context`'s top level is an error;
    /// everything else undefined renders to the empty string.
    pub fn resolve_runtime(&self, template: &str, context: &Value) -> Result<Value, TemplateError> {
        if let Some(missing) = first_missing_runtime_identifier(template, context) {
            return Err(TemplateError::UndefinedRuntimeIdentifier(missing));
        }
        let rendered = self
            .runtime_env
            .render_str(template, context)
            .map_err(|e| TemplateError::Render(e.to_string()))?;
        Ok(detect_structured(&rendered))
    }
}

fn register_filters(env: &mut Environment<'static>) {
    env.add_filter("title_case", filters::title_case);
    env.add_filter("snake_case", filters::snake_case);
    env.add_filter("dice_modifier", filters::dice_modifier);
}

fn first_missing_runtime_identifier(template: &str, context: &Value) -> Option<String> {
    let idents: BTreeSet<String> = crate::runtime_idents::free_identifiers(template);
    let top_level = context.as_object();
    for ident in idents {
        if ident == "get_value" {
            continue;
        }
        if RUN_TIME_IDENTIFIERS.contains(&ident.as_str()) {
            let present = top_level.is_some_and(|obj| {
                obj.get(&ident)
                    .is_some_and(|v| !matches!(v, Value::Null))
            });
            if !present {
                return Some(ident);
            }
        }
    }
    None
}

/// `get_value(path)`: reads from the current frame with fallback
/// `outputs -> variables -> inputs -> system_metadata`.
fn get_value(state: &State, path_value: JinjaValue) -> Result<JinjaValue, minijinja::Error> {
    let path_str = path_value.as_str().ok_or_else(|| {
        minijinja::Error::new(
            minijinja::ErrorKind::InvalidOperation,
            "get_value() expects a string path argument",
        )
    })?;

    for ns in ["outputs", "variables", "inputs", "system_metadata"] {
        let Some(root) = state.lookup(ns) else {
            continue;
        };
        let root_json: Value = serde_json::to_value(&root).unwrap_or(Value::Null);
        if let Some(found) = path::get(&root_json, path_str) {
            return Ok(JinjaValue::from_serialize(found));
        }
    }
    Ok(JinjaValue::UNDEFINED)
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
