// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serde_json::json;
use std::sync::{Arc, Mutex};

#[test]
fn equal_value_set_triggers_no_observers() {
    let mut ov = ObservableValue::new("hp", json!(10));
    let calls = Arc::new(Mutex::new(0));
    let calls2 = Arc::clone(&calls);
    ov.add_observer(move |_, _, _| {
        *calls2.lock().unwrap() += 1;
    });
    ov.set(json!(10));
    assert_eq!(*calls.lock().unwrap(), 0);
}

#[test]
fn changed_value_notifies_with_old_and_new() {
    let mut ov = ObservableValue::new("hp", json!(10));
    let seen = Arc::new(Mutex::new(Vec::new()));
    let seen2 = Arc::clone(&seen);
    ov.add_observer(move |name, old, new| {
        seen2
            .lock()
            .unwrap()
            .push((name.to_string(), old.clone(), new.clone()));
    });
    ov.set(json!(7));
    let recorded = seen.lock().unwrap();
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0], ("hp".to_string(), json!(10), json!(7)));
    assert_eq!(ov.value(), &json!(7));
}
