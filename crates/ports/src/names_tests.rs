// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[tokio::test]
async fn builtin_generator_produces_a_two_word_name() {
    let gen = BuiltinNameGenerator::new();
    let name = gen.generate("npc_names", None).await;
    assert_eq!(name.split_whitespace().count(), 2);
}

#[tokio::test]
async fn builtin_generator_ignores_unknown_generator_ids() {
    let gen = BuiltinNameGenerator::new();
    let name = gen.generate("anything_at_all", None).await;
    assert!(!name.is_empty());
}
