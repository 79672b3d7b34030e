// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Dotted-path access over `serde_json::Value` trees.
//!
//! Generalizes the single-level `namespace/name` split used elsewhere in the
//! corpus (a plain `split_once('/')`) to full dotted-path traversal with
//! on-demand intermediate-object creation, as required by the Model
//! attribute paths and Execution Context namespaces.

use crate::error::CoreError;
use serde_json::{Map, Value};

/// Splits a dotted path into its segments. Empty segments are rejected by
/// callers before they reach here; this function only splits.
pub fn segments(path: &str) -> Vec<&str> {
    path.split('.').collect()
}

/// Reads `path` out of `root`, returning `None` if any segment is absent.
pub fn get<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = root;
    for seg in segments(path) {
        current = current.as_object()?.get(seg)?;
    }
    Some(current)
}

/// Writes `value` at `path` inside `root`, creating intermediate objects as
/// needed. Fails if an intermediate segment already holds a non-object
/// value.
pub fn set(root: &mut Value, path: &str, value: Value) -> Result<(), CoreError> {
    let segs = segments(path);
    let Some((last, init)) = segs.split_last() else {
        return Err(CoreError::PathConflict(path.to_string()));
    };
    if !root.is_object() {
        *root = Value::Object(Map::new());
    }
    let mut current = root
        .as_object_mut()
        .ok_or_else(|| CoreError::PathConflict(path.to_string()))?;
    for seg in init {
        let entry = current
            .entry(seg.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !entry.is_object() {
            *entry = Value::Object(Map::new());
        }
        current = entry
            .as_object_mut()
            .ok_or_else(|| CoreError::PathConflict(path.to_string()))?;
    }
    current.insert((*last).to_string(), value);
    Ok(())
}

/// Flattens a nested object into dotted-path keys. Inverse of [`unflatten`].
pub fn flatten(value: &Value) -> Map<String, Value> {
    let mut out = Map::new();
    flatten_into(value, String::new(), &mut out);
    out
}

fn flatten_into(value: &Value, prefix: String, out: &mut Map<String, Value>) {
    match value {
        Value::Object(map) if !map.is_empty() => {
            for (k, v) in map {
                let next = if prefix.is_empty() {
                    k.clone()
                } else {
                    format!("{prefix}.{k}")
                };
                flatten_into(v, next, out);
            }
        }
        _ => {
            out.insert(prefix, value.clone());
        }
    }
}

/// Rebuilds a nested object from dotted-path keys. Inverse of [`flatten`]
/// for keys that contain no literal `.` within a single logical segment.
pub fn unflatten(flat: &Map<String, Value>) -> Value {
    let mut root = Value::Object(Map::new());
    for (k, v) in flat {
        // set() only fails on a pre-existing non-object intermediate, which
        // cannot happen while building up from an empty root.
        let _ = set(&mut root, k, v.clone());
    }
    root
}

/// Left-identity, recursive deep-merge: maps merge key-wise; non-map values
/// on `overlay` override `base`.
pub fn deep_merge(base: &Value, overlay: &Value) -> Value {
    match (base, overlay) {
        (Value::Object(b), Value::Object(o)) => {
            let mut merged = b.clone();
            for (k, v) in o {
                let next = match merged.get(k) {
                    Some(existing) => deep_merge(existing, v),
                    None => v.clone(),
                };
                merged.insert(k.clone(), next);
            }
            Value::Object(merged)
        }
        (_, overlay) => overlay.clone(),
    }
}

#[cfg(test)]
#[path = "path_tests.rs"]
mod tests;
