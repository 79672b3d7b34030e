// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::test_support::{ctx, empty_system, step};
use grimoire_ports::FakeDiceService;

#[tokio::test]
async fn rolls_resolved_expression_and_reports_breakdown() {
    let dice = Arc::new(FakeDiceService::default());
    dice.queue("1d20+3", 18);
    let executor = DiceRollExecutor::new(dice);
    let mut c = ctx();
    let s = step(
        "roll",
        StepKind::DiceRoll {
            roll: "1d20+3".into(),
        },
    );

    let res = executor.execute(&s, &mut c, &empty_system()).await.expect("execute");
    assert!(res.success);
    assert_eq!(res.data.get("result"), Some(&json!(18)));
}

#[tokio::test]
async fn dice_service_failure_produces_failed_step_result() {
    let dice = Arc::new(FakeDiceService::default());
    let executor = DiceRollExecutor::new(dice);
    let mut c = ctx();
    let s = step(
        "roll",
        StepKind::DiceRoll {
            roll: "1d20".into(),
        },
    );

    let res = executor.execute(&s, &mut c, &empty_system()).await.expect("execute");
    assert!(!res.success);
    assert!(res.error.unwrap().starts_with("Dice roll failed"));
}
