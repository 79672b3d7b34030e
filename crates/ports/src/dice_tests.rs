// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[tokio::test]
async fn fake_returns_queued_total_and_records_the_call() {
    let svc = FakeDiceService::new();
    svc.queue("1d20+3", 14);
    let ctx = HashMap::new();
    let result = svc.roll("1d20+3", &ctx).await.expect("roll");
    assert_eq!(result.total, 14);
    assert_eq!(svc.calls(), vec!["1d20+3".to_string()]);
}

#[tokio::test]
async fn fake_errors_on_unqueued_expression() {
    let svc = FakeDiceService::new();
    let ctx = HashMap::new();
    let err = svc.roll("2d6", &ctx).await.unwrap_err();
    assert!(matches!(err, DiceError::InvalidExpression(_)));
}

#[tokio::test]
async fn regex_service_rolls_within_expected_bounds_and_applies_modifier() {
    let svc = RegexDiceService::new();
    let ctx = HashMap::new();
    let result = svc.roll("3d6 + 2", &ctx).await.expect("roll");
    assert!((5..=20).contains(&result.total), "total was {}", result.total);
    assert!(result.breakdown.contains("+2"));
}

#[tokio::test]
async fn regex_service_rejects_malformed_expressions() {
    let svc = RegexDiceService::new();
    let ctx = HashMap::new();
    let err = svc.roll("not a roll", &ctx).await.unwrap_err();
    assert!(matches!(err, DiceError::InvalidExpression(_)));
}

#[tokio::test]
async fn regex_service_subtracts_a_negative_modifier() {
    let svc = RegexDiceService::new();
    let ctx = HashMap::new();
    let result = svc.roll("1d4-1", &ctx).await.expect("roll");
    assert!((0..=3).contains(&result.total), "total was {}", result.total);
}
