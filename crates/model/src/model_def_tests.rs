// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::attribute::AttrType;

fn sample() -> Model {
    serde_yaml::from_str(
        r#"
id: character
name: Character
attributes:
  armor_class_base:
    type: int
    default: 10
  dexterity_modifier:
    type: int
    default: 0
  armor_class:
    type: int
    derived: "{{ variables.armor_class_base + variables.dexterity_modifier }}"
    required: false
"#,
    )
    .unwrap()
}

#[test]
fn attribute_lookup_by_path() {
    let model = sample();
    let attr = model.attribute("armor_class_base").unwrap();
    assert_eq!(attr.attr_type, AttrType::Int);
    assert_eq!(attr.default, Some(serde_json::json!(10)));
}

#[test]
fn derived_attributes_are_enumerable() {
    let model = sample();
    let derived: Vec<_> = model.derived_attributes().collect();
    assert_eq!(derived.len(), 1);
    assert_eq!(derived[0].0, "armor_class");
}
