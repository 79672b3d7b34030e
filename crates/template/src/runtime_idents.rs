// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The run-time identifier set from the GLOSSARY: any template referencing
//! one of these is deferred past load time, and — at run time — referencing
//! one that is absent from the rendering context is an error rather than a
//! silent empty string.

use regex::Regex;
use std::collections::BTreeSet;
use std::sync::OnceLock;

pub const RUN_TIME_IDENTIFIERS: &[&str] = &[
    "result",
    "results",
    "variables",
    "inputs",
    "outputs",
    "item",
    "selected_item",
    "selected_items",
    "key",
    "value",
    "llm_result",
    "get_value",
];

/// Extracts the set of bare identifiers referenced inside `{{ ... }}` /
/// `{% ... %}` blocks of `template` (filters and function-call names are
/// excluded on a best-effort basis).
pub fn free_identifiers(template: &str) -> BTreeSet<String> {
    static BLOCK: OnceLock<Regex> = OnceLock::new();
    static IDENT: OnceLock<Regex> = OnceLock::new();
    let block_re =
        BLOCK.get_or_init(|| Regex::new(r"\{\{(.*?)\}\}|\{%(.*?)%\}").expect("static regex"));
    let ident_re =
        IDENT.get_or_init(|| Regex::new(r"[A-Za-z_][A-Za-z0-9_]*").expect("static regex"));

    const KEYWORDS: &[&str] = &[
        "and", "or", "not", "if", "else", "elif", "endif", "for", "endfor", "in", "is", "true",
        "false", "none", "True", "False", "None",
    ];
    const FILTERS: &[&str] = &[
        "title_case",
        "snake_case",
        "dice_modifier",
        "length",
        "upper",
        "lower",
        "title",
    ];

    let mut idents = BTreeSet::new();
    for caps in block_re.captures_iter(template) {
        let inner = caps
            .get(1)
            .or_else(|| caps.get(2))
            .map(|m| m.as_str())
            .unwrap_or_default();
        for m in ident_re.find_iter(inner) {
            let word = m.as_str();
            if KEYWORDS.contains(&word) || FILTERS.contains(&word) {
                continue;
            }
            idents.insert(word.to_string());
        }
    }
    idents
}

/// True if `template` contains a free identifier from the run-time set, or
/// a `get_value(...)` call.
pub fn is_runtime_template(template: &str) -> bool {
    if template.contains("get_value(") {
        return true;
    }
    free_identifiers(template)
        .iter()
        .any(|ident| RUN_TIME_IDENTIFIERS.contains(&ident.as_str()))
}

#[cfg(test)]
#[path = "runtime_idents_tests.rs"]
mod tests;
