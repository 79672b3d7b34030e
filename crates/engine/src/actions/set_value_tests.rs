// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::test_support::{ctx, empty_system};
use grimoire_core::StepResult;
use serde_json::{json, Map};

#[tokio::test]
async fn renders_a_templated_value_against_the_step_result_data() {
    let mut c = ctx();
    let action = SetValueAction::new();
    let mut data = Map::new();
    data.insert("result".into(), json!(14));
    let step_result = StepResult::ok("roll_str", data);
    let set = Action::SetValue {
        path: "variables.strength".into(),
        value: json!("{{ data.result }}"),
    };

    action
        .apply(&set, &mut c, &empty_system(), &step_result)
        .await
        .expect("apply");
    assert_eq!(c.get_variable("strength").unwrap(), Some(&json!(14)));
}

#[tokio::test]
async fn non_string_values_pass_through_without_templating() {
    let mut c = ctx();
    let action = SetValueAction::new();
    let step_result = StepResult::ok("noop", Map::new());
    let set = Action::SetValue {
        path: "variables.count".into(),
        value: json!(3),
    };

    action
        .apply(&set, &mut c, &empty_system(), &step_result)
        .await
        .expect("apply");
    assert_eq!(c.get_variable("count").unwrap(), Some(&json!(3)));
}
