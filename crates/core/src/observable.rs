// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! A single named cell that notifies observers on change.
//!
//! Mirrors the shape the original Python engine's test suite pins down
//! (`ObservableValue(field_name, initial_value=None)`, observer signature
//! `(field_name, old_value, new_value)`, no-op on an equal set).

use serde_json::Value;

type Observer = Box<dyn FnMut(&str, &Value, &Value) + Send>;

/// A single named, observed value.
pub struct ObservableValue {
    name: String,
    value: Value,
    observers: Vec<Observer>,
}

impl ObservableValue {
    pub fn new(name: impl Into<String>, initial_value: Value) -> Self {
        Self {
            name: name.into(),
            value: initial_value,
            observers: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn add_observer<F>(&mut self, observer: F)
    where
        F: FnMut(&str, &Value, &Value) + Send + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    /// Sets the value. A no-op (no observer fan-out) when `new == old`.
    pub fn set(&mut self, new: Value) {
        if self.value == new {
            return;
        }
        let old = std::mem::replace(&mut self.value, new);
        for observer in &mut self.observers {
            observer(&self.name, &old, &self.value);
        }
    }
}

#[cfg(test)]
#[path = "observable_tests.rs"]
mod tests;
