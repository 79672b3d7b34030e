// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::test_support::{ctx, empty_system, step};
use serde_json::json;

#[tokio::test]
async fn renders_the_closing_prompt_when_present() {
    let mut c = ctx();
    c.set_variable("hero_name", json!("Knave")).expect("set");
    let executor = CompletionExecutor::new();
    let s = step(
        "the_end",
        StepKind::Completion {
            prompt: Some("{{ variables.hero_name }}'s tale ends here.".into()),
        },
    );

    let res = executor.execute(&s, &mut c, &empty_system()).await.expect("execute");
    assert!(res.success);
    assert_eq!(
        res.data.get("prompt"),
        Some(&serde_json::Value::String("Knave's tale ends here.".into()))
    );
}

#[tokio::test]
async fn succeeds_with_no_data_when_no_prompt_is_configured() {
    let mut c = ctx();
    let executor = CompletionExecutor::new();
    let s = step("the_end", StepKind::Completion { prompt: None });

    let res = executor.execute(&s, &mut c, &empty_system()).await.expect("execute");
    assert!(res.success);
    assert!(res.data.get("prompt").is_none());
}
