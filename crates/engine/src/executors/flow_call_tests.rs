// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::test_support::ctx;
use serde_json::json;

#[test]
fn renders_string_inputs_and_passes_other_values_through() {
    let mut c = ctx();
    c.set_variable("hero_name", json!("Knave")).expect("set");
    let mut inputs = Map::new();
    inputs.insert("name".into(), Value::String("{{ variables.hero_name }}".into()));
    inputs.insert("level".into(), json!(3));

    let rendered = render_inputs(&inputs, &c).expect("render");
    assert_eq!(rendered.get("name"), Some(&Value::String("Knave".into())));
    assert_eq!(rendered.get("level"), Some(&json!(3)));
}
