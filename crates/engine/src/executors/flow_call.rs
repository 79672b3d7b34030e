// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Not a [`StepExecutor`](super::StepExecutor): `flow_call` steps and
//! `call_flow` actions both need to recurse back into the Flow Engine, so
//! the Flow Engine drives them directly. This module only holds the
//! template-rendering logic shared by both call sites.

use crate::error::EngineError;
use grimoire_core::ExecutionContext;
use serde_json::{Map, Value};

/// Renders every string-valued entry of `inputs` as a template against the
/// *caller's* context before the sub-flow's own frame is pushed; non-string
/// values pass through unchanged.
pub(crate) fn render_inputs(
    inputs: &Map<String, Value>,
    ctx: &ExecutionContext,
) -> Result<Map<String, Value>, EngineError> {
    let mut rendered = Map::with_capacity(inputs.len());
    for (key, value) in inputs {
        let value = match value {
            Value::String(s) => ctx.resolve_template(s, None)?,
            other => other.clone(),
        };
        rendered.insert(key.clone(), value);
    }
    Ok(rendered)
}

#[cfg(test)]
#[path = "flow_call_tests.rs"]
mod tests;
