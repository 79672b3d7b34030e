// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Condition evaluation shared by `Step.condition` and the `conditional`
//! step's `if_condition`: both boil down to "render, then coerce
//! to bool". Rather than hand-rolling a restricted boolean-expression
//! parser, a bare condition is wrapped as a single `{{ ... }}` template and
//! handed to the runtime template resolver, whose Jinja-compatible
//! expression language already covers comparisons, `and`/`or`/`not`, and
//! dotted-path access.

use crate::error::EngineError;
use grimoire_core::ExecutionContext;
use grimoire_model::ConditionValue;
use serde_json::Value;

pub(crate) fn evaluate_condition_value(
    value: &ConditionValue,
    ctx: &ExecutionContext,
) -> Result<bool, EngineError> {
    match value {
        ConditionValue::Bool(b) => Ok(*b),
        ConditionValue::Template(raw) => evaluate_condition_str(raw, ctx),
    }
}

/// Never fails: a condition that raises during rendering (a malformed
/// expression, an undefined runtime identifier) coerces to `false` rather
/// than failing the step that guards on it. The render error is logged,
/// not silently dropped.
pub(crate) fn evaluate_condition_str(raw: &str, ctx: &ExecutionContext) -> Result<bool, EngineError> {
    let wrapped = if raw.contains("{{") || raw.contains("{%") {
        raw.to_string()
    } else {
        format!("{{{{ {raw} }}}}")
    };
    match ctx.resolve_template(&wrapped, None) {
        Ok(rendered) => Ok(coerce_bool(&rendered)),
        Err(e) => {
            tracing::warn!(condition = raw, error = %e, "condition evaluation raised; treating as false");
            Ok(false)
        }
    }
}

/// Literal booleans pass through; the listed strings coerce by name;
/// any other string is treated as already having been evaluated by the
/// template engine's expression language above (so it should never reach
/// here as anything but one of those literals or a plain scalar).
pub(crate) fn coerce_bool(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Null => false,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !matches!(s.to_lowercase().as_str(), "false" | "no" | "0" | ""),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

#[cfg(test)]
#[path = "condition_tests.rs"]
mod tests;
