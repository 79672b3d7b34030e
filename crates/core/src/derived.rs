// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Derived-field registry and dependency extraction.
//!
//! The cascade algorithm itself (`set` / `on_value_changed` / `recompute`
//! from the design) lives in [`crate::context::ExecutionContext`], since it
//! needs to read and write the frame the fields live in. This module owns
//! the pure bookkeeping: which fields are derived, what they depend on, and
//! the cycle guard.

use regex::Regex;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::OnceLock;

/// A registered derived field: its template expression and the set of
/// dotted paths it reads.
#[derive(Debug, Clone)]
pub struct DerivedField {
    pub expr: String,
    pub deps: BTreeSet<String>,
}

/// Tracks derived-field registrations, the reverse (base -> derived)
/// dependency graph, and the in-flight "computing" set used to break
/// cycles.
#[derive(Debug, Default)]
pub struct DerivedFieldManager {
    fields: HashMap<String, DerivedField>,
    dependency_graph: HashMap<String, BTreeSet<String>>,
    computing: HashSet<String>,
}

impl DerivedFieldManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `path` as derived by `expr`, extracting its dependencies
    /// and indexing them in the reverse dependency graph.
    pub fn register(&mut self, path: &str, expr: &str) {
        let deps = extract_dependencies(expr);
        for dep in &deps {
            self.dependency_graph
                .entry(dep.clone())
                .or_default()
                .insert(path.to_string());
        }
        self.fields.insert(
            path.to_string(),
            DerivedField {
                expr: expr.to_string(),
                deps,
            },
        );
    }

    pub fn is_derived(&self, path: &str) -> bool {
        self.fields.contains_key(path)
    }

    pub fn expr_of(&self, path: &str) -> Option<&str> {
        self.fields.get(path).map(|f| f.expr.as_str())
    }

    /// Derived fields whose dependency set includes `path`, in a
    /// deterministic order.
    pub fn dependents_of(&self, path: &str) -> Vec<String> {
        self.dependency_graph
            .get(path)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Attempts to enter the "computing" state for `path`. Returns `false`
    /// (and logs at the call site) if `path` is already being computed —
    /// the cycle guard preventing a derived field from recursing into
    /// itself.
    pub fn begin_computing(&mut self, path: &str) -> bool {
        self.computing.insert(path.to_string())
    }

    pub fn end_computing(&mut self, path: &str) {
        self.computing.remove(path);
    }
}

/// Extracts the set of dotted-path identifiers referenced inside `{{ ... }}`
/// blocks of `expr`, including the current-instance sigils `$.x` and
/// `$name.x` (normalized to `x`).
///
/// This is a lightweight regex scan over identifier tokens rather than a
/// full expression-language parse, the same tradeoff the corpus makes for
/// `${var}` interpolation (`oj-runbook`'s `template.rs`) — dependency
/// extraction only needs to know *which paths are read*, not how.
pub fn extract_dependencies(expr: &str) -> BTreeSet<String> {
    static BLOCK: OnceLock<Regex> = OnceLock::new();
    static IDENT: OnceLock<Regex> = OnceLock::new();
    let block_re = BLOCK.get_or_init(|| Regex::new(r"\{\{(.*?)\}\}").expect("static regex"));
    let ident_re = IDENT.get_or_init(|| {
        Regex::new(r"\$?\.?[A-Za-z_][A-Za-z0-9_]*(?:\.[A-Za-z_][A-Za-z0-9_]*)*")
            .expect("static regex")
    });

    const RESERVED: &[&str] = &[
        "and", "or", "not", "if", "else", "elif", "endif", "true", "false", "none", "True",
        "False", "None", "in", "is",
    ];

    let mut deps = BTreeSet::new();
    for block in block_re.captures_iter(expr) {
        let inner = &block[1];
        for m in ident_re.find_iter(inner) {
            let raw = m.as_str();
            // Strip the current-instance sigil: `$.x` -> `x`, `$name.x` -> `name.x`.
            let normalized = raw.trim_start_matches('$').trim_start_matches('.');
            if normalized.is_empty() || RESERVED.contains(&normalized) {
                continue;
            }
            // Skip filter/function names immediately followed by `(` or preceded by `|`
            // in the original text — a crude but sufficient heuristic since the filter
            // set (title_case, snake_case, dice_modifier, length, upper, lower, title)
            // never overlaps with a legal path segment used as a filter argument.
            if matches!(
                normalized,
                "title_case" | "snake_case" | "dice_modifier" | "length" | "upper" | "lower"
                    | "title" | "get_value"
            ) {
                continue;
            }
            deps.insert(normalized.to_string());
        }
    }
    deps
}

#[cfg(test)]
#[path = "derived_tests.rs"]
mod tests;
