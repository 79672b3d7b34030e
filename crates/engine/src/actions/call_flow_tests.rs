// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::flow_engine::FlowEngine;
use crate::test_support::{ctx, empty_system};
use grimoire_core::id::SequentialIdGen;
use grimoire_core::StepResult;
use grimoire_model::{Flow, Step, StepKind};
use grimoire_ports::{BuiltinNameGenerator, FakeDiceService, FakeLlmService, FakeLogger};
use serde_json::{json, Map};

fn step_with_actions(id: &str, kind: StepKind, actions: Vec<Action>) -> Step {
    Step {
        id: id.to_string(),
        name: None,
        condition: None,
        next_step: None,
        actions,
        kind,
    }
}

fn child_flow(id: &str, steps: Vec<Step>) -> Flow {
    Flow {
        id: id.to_string(),
        name: id.to_string(),
        description: None,
        inputs: Vec::new(),
        outputs: Vec::new(),
        variables: Map::new(),
        steps,
        resume_points: Vec::new(),
    }
}

fn build_engine() -> Arc<FlowEngine> {
    FlowEngine::new(
        Arc::new(FakeDiceService::default()),
        Arc::new(FakeLlmService::new()),
        Arc::new(BuiltinNameGenerator::default()),
        Arc::new(FakeLogger::new()),
        SequentialIdGen::new("test"),
    )
}

#[tokio::test]
async fn successful_subflow_binds_a_result_overlay() {
    let engine = build_engine();
    let mut system = empty_system();
    system.flows.insert(
        "give_gold".into(),
        child_flow(
            "give_gold",
            vec![step_with_actions(
                "set_gold",
                StepKind::Completion { prompt: None },
                vec![Action::SetValue {
                    path: "outputs.gold".into(),
                    value: json!(10),
                }],
            )],
        ),
    );

    let mut c = ctx();
    let action = CallFlowAction::new(Arc::downgrade(&engine));
    let call = Action::CallFlow {
        flow_id: "give_gold".into(),
        inputs: Map::new(),
    };
    let step_result = StepResult::ok("reward", Map::new());

    action
        .apply(&call, &mut c, &system, &step_result)
        .await
        .expect("apply");

    let view = c.template_context(None).expect("ctx");
    assert_eq!(view.get("result").and_then(|r| r.get("gold")), Some(&json!(10)));
}

#[tokio::test]
async fn a_failing_subflow_surfaces_as_an_action_error() {
    let engine = build_engine();
    let mut system = empty_system();
    system.flows.insert(
        "cursed".into(),
        child_flow(
            "cursed",
            vec![step_with_actions(
                "roll",
                StepKind::DiceRoll { roll: "1d20".into() },
                Vec::new(),
            )],
        ),
    );

    let mut c = ctx();
    let action = CallFlowAction::new(Arc::downgrade(&engine));
    let call = Action::CallFlow {
        flow_id: "cursed".into(),
        inputs: Map::new(),
    };
    let step_result = StepResult::ok("reward", Map::new());

    let result = action.apply(&call, &mut c, &system, &step_result).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn call_flow_renders_templated_inputs_from_the_step_result_data() {
    let engine = build_engine();
    let mut system = empty_system();
    system.flows.insert(
        "echo".into(),
        child_flow(
            "echo",
            vec![step_with_actions(
                "copy",
                StepKind::Completion { prompt: None },
                vec![Action::SetValue {
                    path: "outputs.heard".into(),
                    value: json!("{{ inputs.message }}"),
                }],
            )],
        ),
    );

    let mut c = ctx();
    let action = CallFlowAction::new(Arc::downgrade(&engine));
    let mut inputs = Map::new();
    inputs.insert("message".into(), json!("{{ data.result }}"));
    let call = Action::CallFlow {
        flow_id: "echo".into(),
        inputs,
    };
    let mut data = Map::new();
    data.insert("result".into(), json!("a raven's cry"));
    let step_result = StepResult::ok("listen", data);

    action
        .apply(&call, &mut c, &system, &step_result)
        .await
        .expect("apply");

    let view = c.template_context(None).expect("ctx");
    assert_eq!(
        view.get("result").and_then(|r| r.get("heard")),
        Some(&json!("a raven's cry"))
    );
}
