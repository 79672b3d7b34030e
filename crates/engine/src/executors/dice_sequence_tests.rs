// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::test_support::{ctx, empty_system, step};
use grimoire_model::DiceSequenceSpec;
use grimoire_ports::FakeDiceService;

#[tokio::test]
async fn rolls_one_expression_per_item_and_collects_results() {
    let dice = Arc::new(FakeDiceService::default());
    dice.queue("1d6", 3);
    let executor = DiceSequenceExecutor::new(dice.clone());
    let mut c = ctx();
    let s = step(
        "damage",
        StepKind::DiceSequence {
            sequence: DiceSequenceSpec {
                items: vec!["slash".into(), "burn".into()],
                roll: "1d6".into(),
                display_as: None,
            },
        },
    );

    let res = executor.execute(&s, &mut c, &empty_system()).await.expect("execute");
    assert!(res.success);
    let results = res.data.get("results").unwrap().as_array().unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0], json!({"item": "slash", "result": 3}));
    assert_eq!(dice.calls(), vec!["1d6".to_string(), "1d6".to_string()]);
}
