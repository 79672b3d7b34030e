// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serde_json::json;

#[test]
fn get_resolves_nested_path() {
    let root = json!({"a": {"b": {"c": 5}}});
    assert_eq!(get(&root, "a.b.c"), Some(&json!(5)));
    assert_eq!(get(&root, "a.b.missing"), None);
}

#[test]
fn set_creates_intermediate_objects() {
    let mut root = json!({});
    set(&mut root, "a.b.c", json!(1)).unwrap();
    assert_eq!(root, json!({"a": {"b": {"c": 1}}}));
}

#[test]
fn set_overwrites_non_object_intermediate() {
    let mut root = json!({"a": 1});
    set(&mut root, "a.b", json!(2)).unwrap();
    assert_eq!(root, json!({"a": {"b": 2}}));
}

#[test]
fn flatten_unflatten_is_isomorphism() {
    let root = json!({"a": {"b": 1, "c": {"d": 2}}, "e": 3});
    let flat = flatten(&root);
    assert_eq!(flat.get("a.b"), Some(&json!(1)));
    assert_eq!(flat.get("a.c.d"), Some(&json!(2)));
    assert_eq!(flat.get("e"), Some(&json!(3)));
    assert_eq!(unflatten(&flat), root);
}

#[test]
fn deep_merge_is_left_identity() {
    let base = json!({"a": 1, "b": {"c": 2}});
    let empty = json!({});
    assert_eq!(deep_merge(&base, &empty), base);
}

#[test]
fn deep_merge_overrides_rightward() {
    let base = json!({"a": 1, "b": {"c": 2, "d": 3}});
    let overlay = json!({"b": {"c": 99}, "e": 5});
    assert_eq!(
        deep_merge(&base, &overlay),
        json!({"a": 1, "b": {"c": 99, "d": 3}, "e": 5})
    );
}
