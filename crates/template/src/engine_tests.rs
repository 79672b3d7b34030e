// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serde_json::json;

#[test]
fn loadtime_renders_system_metadata() {
    let svc = TemplateService::new();
    let ctx = json!({"system": {"name": "Knave", "version": "2e"}});
    let out = svc
        .resolve_loadtime("{{ system.name }} v{{ system.version }}", &ctx)
        .unwrap();
    assert_eq!(out, "Knave v2e");
}

#[test]
fn loadtime_raises_on_undefined() {
    let svc = TemplateService::new();
    let ctx = json!({"system": {"name": "Knave"}});
    let err = svc.resolve_loadtime("{{ nonexistent }}", &ctx).unwrap_err();
    assert!(matches!(err, TemplateError::LoadtimeUndefined(_)));
}

#[test]
fn runtime_lenient_undefined_becomes_empty_string() {
    let svc = TemplateService::new();
    let ctx = json!({"inputs": {}, "outputs": {}, "variables": {}, "system_metadata": {}});
    let out = svc
        .resolve_runtime("before-{{ some_unset_field }}-after", &ctx)
        .unwrap();
    assert_eq!(out, json!("before--after"));
}

#[test]
fn runtime_errors_on_missing_runtime_identifier() {
    let svc = TemplateService::new();
    let ctx = json!({"inputs": {}, "outputs": {}, "variables": {}, "system_metadata": {}});
    let err = svc.resolve_runtime("{{ result.level_3_result }}", &ctx).unwrap_err();
    assert!(matches!(err, TemplateError::UndefinedRuntimeIdentifier(_)));
}

#[test]
fn runtime_result_binding_resolves_when_present() {
    let svc = TemplateService::new();
    let ctx = json!({
        "inputs": {}, "outputs": {}, "variables": {}, "system_metadata": {},
        "result": {"level_3_result": "Level 3 complete"}
    });
    let out = svc.resolve_runtime("{{ result.level_3_result }}", &ctx).unwrap();
    assert_eq!(out, json!("Level 3 complete"));
}

#[test]
fn runtime_detects_structured_return() {
    let svc = TemplateService::new();
    let ctx = json!({"inputs": {}, "outputs": {}, "variables": {"total": 15}, "system_metadata": {}});
    let out = svc.resolve_runtime("{{ variables.total }}", &ctx).unwrap();
    assert_eq!(out, json!(15));
}

#[test]
fn runtime_filters_work() {
    let svc = TemplateService::new();
    let ctx = json!({
        "inputs": {}, "outputs": {}, "variables": {}, "system_metadata": {},
        "key": "dexterity", "value": {"bonus": 1}
    });
    let out = svc
        .resolve_runtime("{{ key|title_case }}: +{{ value.bonus }}", &ctx)
        .unwrap();
    assert_eq!(out, json!("Dexterity: +1"));
}

#[test]
fn get_value_falls_back_through_namespaces() {
    let svc = TemplateService::new();
    let ctx = json!({
        "inputs": {"actor": {"name": "Mira"}},
        "outputs": {},
        "variables": {},
        "system_metadata": {"system": {"name": "Knave"}}
    });
    let out = svc
        .resolve_runtime("{{ get_value('actor.name') }}", &ctx)
        .unwrap();
    assert_eq!(out, json!("Mira"));
    let out = svc
        .resolve_runtime("{{ get_value('system.name') }}", &ctx)
        .unwrap();
    assert_eq!(out, json!("Knave"));
}
