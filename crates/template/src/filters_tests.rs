// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn title_case_capitalizes_each_word() {
    assert_eq!(title_case("dexterity score".into()), "Dexterity Score");
    assert_eq!(title_case("strength".into()), "Strength");
}

#[test]
fn snake_case_handles_spaces_and_camel() {
    assert_eq!(snake_case("Armor Class".into()), "armor_class");
    assert_eq!(snake_case("dexterityModifier".into()), "dexterity_modifier");
    assert_eq!(snake_case("HP-Max".into()), "hp_max");
}

#[test]
fn dice_modifier_always_signed() {
    assert_eq!(dice_modifier(3), "+3");
    assert_eq!(dice_modifier(-1), "-1");
    assert_eq!(dice_modifier(0), "+0");
}
