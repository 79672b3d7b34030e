// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use grimoire_core::{ExecId, ExecutionContext};
use grimoire_template::CoreTemplateResolver;
use serde_json::json;
use std::sync::Arc;

fn ctx_with_variable(path: &str, value: serde_json::Value) -> ExecutionContext {
    let mut c = ExecutionContext::new(json!({}), Arc::new(CoreTemplateResolver::new()));
    c.push_frame("flow", ExecId::new("e1"));
    c.set_variable(path, value).expect("set");
    c
}

#[test]
fn literal_bool_condition_value_passes_through() {
    let c = ctx_with_variable("unused", json!(null));
    assert!(evaluate_condition_value(&ConditionValue::Bool(true), &c).expect("eval"));
    assert!(!evaluate_condition_value(&ConditionValue::Bool(false), &c).expect("eval"));
}

#[test]
fn bare_comparison_expression_evaluates_via_template_engine() {
    let c = ctx_with_variable("hp", json!(0));
    assert!(!evaluate_condition_str("variables.hp > 0", &c).expect("eval"));

    let c = ctx_with_variable("hp", json!(5));
    assert!(evaluate_condition_str("variables.hp > 0", &c).expect("eval"));
}

#[test]
fn string_literal_coercion_rules() {
    let c = ctx_with_variable("unused", json!(null));
    assert!(evaluate_condition_str("\"yes\"", &c).expect("eval"));
    assert!(!evaluate_condition_str("\"no\"", &c).expect("eval"));
}

#[test]
fn already_wrapped_template_is_not_double_wrapped() {
    let c = ctx_with_variable("flag", json!(true));
    assert!(evaluate_condition_str("{{ variables.flag }}", &c).expect("eval"));
}

#[test]
fn a_malformed_condition_coerces_to_false_instead_of_failing() {
    let c = ctx_with_variable("hp", json!(5));
    assert!(!evaluate_condition_str("variables.hp | no_such_filter", &c).expect("eval"));
    assert!(!evaluate_condition_value(
        &ConditionValue::Template("variables.hp |||".into()),
        &c
    )
    .expect("eval"));
}
