// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Structured-return detection for run-time template rendering: if
//! the rendered text parses unambiguously as a single YAML mapping, list,
//! int, float, or bool, the parsed value is returned; otherwise the string
//! is returned verbatim.
//!
//! The one carve-out is the documented `"Label: value"` log-line
//! regression: a single-line string with exactly one top-level `": "`
//! and no other structural markers must never be parsed as a mapping.

use serde_json::Value;

/// Classifies `rendered` per the rule above.
pub fn detect_structured(rendered: &str) -> Value {
    let trimmed = rendered.trim();
    if trimmed.is_empty() || looks_like_log_line(trimmed) {
        return Value::String(rendered.to_string());
    }
    match serde_yaml::from_str::<serde_yaml::Value>(trimmed) {
        Ok(yaml_value) => match yaml_to_json(&yaml_value) {
            // A bare scalar string that round-trips to itself isn't "structured" —
            // preserve the original (untrimmed) text.
            Some(Value::String(s)) if s == trimmed => Value::String(rendered.to_string()),
            Some(json_value) => json_value,
            None => Value::String(rendered.to_string()),
        },
        Err(_) => Value::String(rendered.to_string()),
    }
}

fn looks_like_log_line(s: &str) -> bool {
    if s.contains('\n') {
        return false;
    }
    if s.starts_with('-') || s.starts_with('[') || s.starts_with('{') {
        return false;
    }
    s.matches(": ").count() == 1
}

fn yaml_to_json(value: &serde_yaml::Value) -> Option<Value> {
    serde_json::to_value(value).ok()
}

#[cfg(test)]
#[path = "structured_tests.rs"]
mod tests;
