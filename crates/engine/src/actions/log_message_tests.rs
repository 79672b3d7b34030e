// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::test_support::{ctx, empty_system};
use grimoire_core::StepResult;
use serde_json::{json, Map};

#[tokio::test]
async fn renders_and_records_the_message_on_the_context() {
    let mut c = ctx();
    let action = LogMessageAction::new();
    let mut data = Map::new();
    data.insert("result".into(), json!(17));
    let step_result = StepResult::ok("roll_init", data);
    let log = Action::LogMessage {
        message: "Initiative rolled: {{ data.result }}".into(),
    };

    action
        .apply(&log, &mut c, &empty_system(), &step_result)
        .await
        .expect("apply");
    assert_eq!(
        c.drain_action_messages(),
        vec!["Initiative rolled: 17".to_string()]
    );
}
