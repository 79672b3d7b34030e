// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::test_support::{ctx, empty_system, step};
use grimoire_ports::FakeLlmService;
use serde_json::json;

fn schema_requiring_ability_and_reason() -> Value {
    json!({
        "required": ["ability", "reason"],
        "properties": {
            "ability": {"type": "string", "enum": ["strength", "dexterity", "constitution"]},
            "reason": {"type": "string", "minLength": 1},
        }
    })
}

#[tokio::test]
async fn plain_generation_with_no_validation_returns_raw_text() {
    let llm = Arc::new(FakeLlmService::new());
    llm.queue_response("a gust of wind rattles the shutters");
    let executor = LlmGenerationExecutor::new(llm);
    let mut c = ctx();
    let s = step(
        "flavor",
        StepKind::LlmGeneration {
            prompt: Some("Describe the weather".into()),
            prompt_ref: None,
            prompt_data: Map::new(),
            settings: LlmSettings::default(),
            validation: None,
        },
    );

    let res = executor.execute(&s, &mut c, &empty_system()).await.expect("execute");
    assert!(res.success);
    assert_eq!(
        res.data.get("result"),
        Some(&Value::String("a gust of wind rattles the shutters".into()))
    );
}

#[tokio::test]
async fn malformed_json_is_repaired_and_then_validated() {
    let llm = Arc::new(FakeLlmService::new());
    llm.queue_response(r#"Not JSON: {ability: "strength" reason: missing comma}"#);
    llm.queue_response(r#"{"ability":"strength","reason":"lifting heavy objects"}"#);
    let executor = LlmGenerationExecutor::new(llm.clone());
    let mut c = ctx();
    let s = step(
        "pick_ability",
        StepKind::LlmGeneration {
            prompt: Some("Pick an ability for the feat".into()),
            prompt_ref: None,
            prompt_data: Map::new(),
            settings: LlmSettings::default(),
            validation: Some(grimoire_model::LlmValidation {
                kind: "json".into(),
                schema: Some(schema_requiring_ability_and_reason()),
            }),
        },
    );

    let res = executor.execute(&s, &mut c, &empty_system()).await.expect("execute");
    assert!(res.success, "expected success, got {res:?}");
    assert_eq!(
        res.data.get("result").and_then(|v| v.get("ability")),
        Some(&Value::String("strength".into()))
    );
    assert_eq!(llm.calls().len(), 2);
}

#[tokio::test]
async fn exhausting_repair_attempts_fails_the_step() {
    let llm = Arc::new(FakeLlmService::new());
    llm.queue_response("still not json");
    let executor = LlmGenerationExecutor::new(llm);
    let mut c = ctx();
    let s = step(
        "pick_ability",
        StepKind::LlmGeneration {
            prompt: Some("Pick an ability".into()),
            prompt_ref: None,
            prompt_data: Map::new(),
            settings: LlmSettings::default(),
            validation: Some(grimoire_model::LlmValidation {
                kind: "json".into(),
                schema: Some(schema_requiring_ability_and_reason()),
            }),
        },
    );

    let res = executor.execute(&s, &mut c, &empty_system()).await.expect("execute");
    assert!(!res.success);
}

#[tokio::test]
async fn prompt_ref_resolves_through_the_system_prompt_library() {
    let mut system = empty_system();
    system.prompts.insert(
        "weather".into(),
        grimoire_model::Prompt {
            id: "weather".into(),
            name: "Weather flavor".into(),
            template: "Describe today's weather in {{ variables.region }}".into(),
            description: None,
        },
    );
    let mut c = ctx();
    c.set_variable("region", json!("the Ashwood")).expect("set");

    let llm = Arc::new(FakeLlmService::new());
    llm.queue_response("fog clings to the Ashwood");
    let executor = LlmGenerationExecutor::new(llm.clone());
    let s = step(
        "flavor",
        StepKind::LlmGeneration {
            prompt: None,
            prompt_ref: Some("weather".into()),
            prompt_data: Map::new(),
            settings: LlmSettings::default(),
            validation: None,
        },
    );

    let res = executor.execute(&s, &mut c, &system).await.expect("execute");
    assert!(res.success);
    assert_eq!(
        llm.calls().first().map(String::as_str),
        Some("Describe today's weather in the Ashwood")
    );
}

#[test]
fn extract_json_prefers_a_fenced_block_over_stray_braces() {
    let text = "here is the result:\n```json\n{\"a\": 1}\n```\nhope that helps {not json}";
    let value = extract_json(text).expect("extract");
    assert_eq!(value, json!({"a": 1}));
}

#[test]
fn extract_json_falls_back_to_balanced_braces() {
    let text = "Sure, {\"a\": {\"b\": 2}} is the answer.";
    let value = extract_json(text).expect("extract");
    assert_eq!(value, json!({"a": {"b": 2}}));
}
