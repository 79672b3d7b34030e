// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::test_support::{ctx, empty_system, step};

#[tokio::test]
async fn execute_renders_prompt_and_requires_text_input() {
    let mut c = ctx();
    c.set_variable("hero_name", json!("Knave")).expect("set");
    let executor = PlayerInputExecutor::new();
    let s = step(
        "name_hero",
        StepKind::PlayerInput {
            prompt: Some("What is {{ variables.hero_name }}'s quest?".into()),
        },
    );

    let res = executor.execute(&s, &mut c, &empty_system()).await.expect("execute");
    assert!(res.requires_input);
    assert_eq!(res.input_type, Some(InputType::Text));
    assert_eq!(res.prompt.as_deref(), Some("What is Knave's quest?"));
}

#[tokio::test]
async fn process_input_stores_the_raw_value() {
    let mut c = ctx();
    let executor = PlayerInputExecutor::new();
    let s = step("name_hero", StepKind::PlayerInput { prompt: None });

    let res = executor
        .process_input(Value::String("Slay the dragon".into()), &s, &mut c, &empty_system())
        .await
        .expect("process_input");
    assert!(res.success);
    assert_eq!(res.data.get("value"), Some(&Value::String("Slay the dragon".into())));
}
