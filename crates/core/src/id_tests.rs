// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn sequential_id_gen_increments() {
    let gen = SequentialIdGen::new("flow");
    assert_eq!(gen.next(), "flow-1");
    assert_eq!(gen.next(), "flow-2");
}

#[test]
fn uuid_id_gen_produces_distinct_ids() {
    let gen = UuidIdGen;
    assert_ne!(gen.next(), gen.next());
}

#[test]
fn short_truncates() {
    assert_eq!("abcdef".short(3), "abc");
    assert_eq!("ab".short(3), "ab");
}

define_id! {
    pub struct TestId;
}

#[test]
fn define_id_equality_with_str() {
    let id = TestId::new("abc");
    assert_eq!(id.as_str(), "abc");
    assert_eq!(id.to_string(), "abc");
}
