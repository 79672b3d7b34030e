// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cross-reference validation over a fully-parsed `System`.
//!
//! Mirrors `oj-runbook::validate`'s aggregate-everything style: every
//! problem found is collected into one message list rather than failing at
//! the first error, so a `validate` CLI run surfaces the whole picture in
//! one pass.

use crate::attribute::{AttrType, RangeEndpointOwned, RangeSpec};
use crate::error::ModelError;
use crate::flow::StepKind;
use crate::system::System;
use crate::table::TableEntryValue;
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

fn dice_expr_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d+d\d+(\s*[+-]\s*\d+)?$").expect("static regex"))
}

/// Returns `Ok(())` or `Err(ModelError::Validation(messages))` with every
/// problem found, never just the first.
pub fn validate_system(system: &System) -> Result<(), ModelError> {
    let mut errors = Vec::new();

    for (id, compendium) in &system.compendiums {
        if !system.models.contains_key(&compendium.model) {
            errors.push(format!(
                "compendium `{id}` references unknown model `{}`",
                compendium.model
            ));
            continue;
        }
        let model = &system.models[&compendium.model];
        for (entry_id, entry) in &compendium.entries {
            for (attr_path, attr_def) in &model.attributes {
                if attr_def.is_derived() {
                    continue;
                }
                match entry.get(attr_path) {
                    Some(value) => {
                        if !matches_attr_type(value, attr_def.attr_type) {
                            errors.push(format!(
                                "compendium `{id}` entry `{entry_id}`: attribute `{attr_path}` does not match type {:?}",
                                attr_def.attr_type
                            ));
                        }
                        if let Some(allowed) = &attr_def.enum_values {
                            if !allowed.contains(value) {
                                errors.push(format!(
                                    "compendium `{id}` entry `{entry_id}`: attribute `{attr_path}` is not one of the allowed enum values"
                                ));
                            }
                        }
                        if let Some(range) = &attr_def.range {
                            check_literal_range(value, range, &mut |msg| {
                                errors.push(format!(
                                    "compendium `{id}` entry `{entry_id}`: attribute `{attr_path}` {msg}"
                                ));
                            });
                        }
                    }
                    None if attr_def.required => {
                        errors.push(format!(
                            "compendium `{id}` entry `{entry_id}`: missing required attribute `{attr_path}`"
                        ));
                    }
                    None => {}
                }
            }
        }
    }

    for (id, table) in &system.tables {
        if table.entry_type != "str" && !system.models.contains_key(&table.entry_type) {
            errors.push(format!(
                "table `{id}` has unknown entry_type `{}`",
                table.entry_type
            ));
        }
        if let Err(e) = table.check_ranges() {
            errors.push(e.to_string());
        }
        for (key, entry) in &table.entries {
            match entry {
                TableEntryValue::Explicit { id: entry_id, entry_type } => {
                    match system.compendiums.get(entry_type) {
                        Some(compendium) if compendium.entry(entry_id).is_some() => {}
                        Some(_) => errors.push(format!(
                            "table `{id}` entry `{key}` references unknown compendium entry `{entry_id}` in `{entry_type}`"
                        )),
                        None => errors.push(format!(
                            "table `{id}` entry `{key}` references unknown compendium `{entry_type}`"
                        )),
                    }
                }
                TableEntryValue::Random { entry_type } => {
                    if !system.compendiums.contains_key(entry_type) {
                        errors.push(format!(
                            "table `{id}` entry `{key}` references unknown compendium `{entry_type}`"
                        ));
                    }
                }
                TableEntryValue::Generate { .. } | TableEntryValue::Literal(_) => {}
            }
        }
        if let Some(roll) = &table.roll {
            validate_dice_literal(roll, &format!("table `{id}`"), &mut errors);
        }
    }

    for (id, flow) in &system.flows {
        for output in &flow.outputs {
            if let Some(ty) = &output.attr_type {
                if !is_known_type(system, ty) {
                    errors.push(format!(
                        "flow `{id}` output `{}` references unknown type `{ty}`",
                        output.name
                    ));
                }
            }
        }
        for step in &flow.steps {
            match &step.kind {
                StepKind::FlowCall { flow: target, .. } => {
                    if !system.flows.contains_key(target) {
                        errors.push(format!(
                            "flow `{id}` step `{}` calls unknown flow `{target}`",
                            step.id
                        ));
                    }
                }
                StepKind::TableRoll { tables } => {
                    for t in tables {
                        if !system.tables.contains_key(&t.table) {
                            errors.push(format!(
                                "flow `{id}` step `{}` references unknown table `{}`",
                                step.id, t.table
                            ));
                        }
                    }
                }
                StepKind::DiceRoll { roll } => {
                    validate_dice_literal(roll, &format!("flow `{id}` step `{}`", step.id), &mut errors);
                }
                _ => {}
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ModelError::Validation(errors))
    }
}

/// Checks `value` against a `min..max` range, when both endpoints are
/// literal. An endpoint that references another attribute (`$other_attr`)
/// depends on instance data the loader doesn't have here, so it's skipped;
/// that half of the range is enforced by the engine at run time instead.
fn check_literal_range(value: &Value, range: &str, report: &mut dyn FnMut(String)) {
    let Some((lo, hi)) = RangeSpec::parse(range) else {
        return;
    };
    let Some(n) = value.as_f64() else {
        return;
    };
    if let RangeEndpointOwned::Literal(min) = lo {
        if n < min as f64 {
            report(format!("is below the minimum of range `{range}`"));
        }
    }
    if let RangeEndpointOwned::Literal(max) = hi {
        if n > max as f64 {
            report(format!("is above the maximum of range `{range}`"));
        }
    }
}

fn matches_attr_type(value: &Value, attr_type: AttrType) -> bool {
    match attr_type {
        AttrType::Int => value.is_i64() || value.is_u64(),
        AttrType::Float => value.is_number(),
        AttrType::Str => value.is_string(),
        AttrType::Bool => value.is_boolean(),
        AttrType::List => value.is_array(),
        AttrType::ModelId => value.is_string(),
    }
}

fn is_known_type(system: &System, ty: &str) -> bool {
    ty == "str" || ty == "int" || ty == "float" || ty == "bool" || ty == "list" || system.models.contains_key(ty)
}

fn validate_dice_literal(expr: &str, context: &str, errors: &mut Vec<String>) {
    if expr.contains("{{") {
        // Run-time template; validated syntactically, not evaluated, at load time.
        return;
    }
    if !dice_expr_re().is_match(expr.trim()) {
        errors.push(format!("{context}: invalid dice expression `{expr}`"));
    }
}

#[cfg(test)]
#[path = "validate_tests.rs"]
mod tests;
