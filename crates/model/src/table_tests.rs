// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn table_key_parses_int_and_range() {
    assert_eq!(TableKey::parse("10").unwrap(), TableKey::Int(10));
    assert_eq!(TableKey::parse("1-3").unwrap(), TableKey::Range(1, 3));
    assert_eq!(TableKey::parse("5-5").unwrap(), TableKey::Range(5, 5));
}

#[test]
fn table_key_rejects_inverted_range() {
    assert!(TableKey::parse("5-1").is_err());
}

#[test]
fn lookup_by_range_and_exact_key() {
    let table: Table = serde_yaml::from_str(
        r#"
id: rarity
name: Rarity
roll: 1d10
entries:
  "1-3": Common
  "4-7": Uncommon
  "8-9": Rare
  "10": Legendary
"#,
    )
    .unwrap();
    assert!(matches!(table.lookup(1), Some(TableEntryValue::Literal(s)) if s == "Common"));
    assert!(matches!(table.lookup(5), Some(TableEntryValue::Literal(s)) if s == "Uncommon"));
    assert!(matches!(table.lookup(9), Some(TableEntryValue::Literal(s)) if s == "Rare"));
    assert!(matches!(table.lookup(10), Some(TableEntryValue::Literal(s)) if s == "Legendary"));
    assert!(table.lookup(99).is_none());
    assert!(table.check_ranges().is_ok());
}

#[test]
fn overlapping_ranges_are_rejected() {
    let table: Table = serde_yaml::from_str(
        r#"
id: bad
name: Bad
entries:
  "1-5": A
  "4-8": B
"#,
    )
    .unwrap();
    assert!(table.check_ranges().is_err());
}

#[test]
fn explicit_and_generate_entry_variants_parse() {
    let table: Table = serde_yaml::from_str(
        r#"
id: npc
name: NPC
entries:
  "1": {id: "goblin", type: "monster"}
  "2": {type: "monster"}
  "3": {generate: true, type: "name"}
"#,
    )
    .unwrap();
    assert!(matches!(
        table.lookup(1),
        Some(TableEntryValue::Explicit { id, entry_type }) if id == "goblin" && entry_type == "monster"
    ));
    assert!(matches!(
        table.lookup(2),
        Some(TableEntryValue::Random { entry_type }) if entry_type == "monster"
    ));
    assert!(matches!(
        table.lookup(3),
        Some(TableEntryValue::Generate { generate: true, entry_type: Some(t) }) if t == "name"
    ));
}
