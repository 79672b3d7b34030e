// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Execution Context: the stack of namespace frames a flow invocation reads
//! and writes through, plus the reactive field graph layered over it.

use crate::derived::DerivedFieldManager;
use crate::error::CoreError;
use crate::id::ExecId;
use crate::observable::ObservableValue;
use crate::path;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::warn;

/// Implemented by the Template Service; kept as a trait here so
/// `grimoire-core` never depends on `grimoire-template` (the dependency
/// runs the other way).
pub trait TemplateResolver: Send + Sync {
    /// Renders `template` in run-time (lenient) mode against `context`,
    /// returning the structured-or-string result.
    fn resolve_runtime(&self, template: &str, context: &Value) -> Result<Value, CoreError>;
}

/// A per-flow-invocation view of `{inputs, outputs, variables}` on the
/// context stack.
#[derive(Debug, Clone, Default)]
pub struct NamespaceFrame {
    pub flow_id: String,
    pub exec_id: ExecId,
    pub inputs: Value,
    pub outputs: Value,
    pub variables: Value,
    /// Transient `result` binding, present only while a `flow_call` step's
    /// actions are being applied.
    pub result_overlay: Option<Value>,
}

impl NamespaceFrame {
    pub fn new(flow_id: impl Into<String>, exec_id: ExecId) -> Self {
        Self {
            flow_id: flow_id.into(),
            exec_id,
            inputs: Value::Object(Map::new()),
            outputs: Value::Object(Map::new()),
            variables: Value::Object(Map::new()),
            result_overlay: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Namespace {
    Inputs,
    Outputs,
    Variables,
}

/// The four-namespace state store: a stack of [`NamespaceFrame`]s
/// plus the reactive observable/derived-field graph layered over the
/// current frame's `variables` namespace (the natural home for Model
/// instance attributes).
pub struct ExecutionContext {
    frames: Vec<NamespaceFrame>,
    system_metadata: Value,
    action_messages: Vec<String>,
    observable_values: HashMap<String, ObservableValue>,
    derived: DerivedFieldManager,
    resolver: Arc<dyn TemplateResolver>,
}

impl ExecutionContext {
    pub fn new(system_metadata: Value, resolver: Arc<dyn TemplateResolver>) -> Self {
        Self {
            frames: Vec::new(),
            system_metadata,
            action_messages: Vec::new(),
            observable_values: HashMap::new(),
            derived: DerivedFieldManager::new(),
            resolver,
        }
    }

    pub fn push_frame(&mut self, flow_id: impl Into<String>, exec_id: ExecId) {
        self.frames.push(NamespaceFrame::new(flow_id, exec_id));
    }

    pub fn pop_frame(&mut self) -> Option<NamespaceFrame> {
        self.frames.pop()
    }

    pub fn current_frame(&self) -> Option<&NamespaceFrame> {
        self.frames.last()
    }

    pub fn current_frame_mut(&mut self) -> Option<&mut NamespaceFrame> {
        self.frames.last_mut()
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    fn frame(&self) -> Result<&NamespaceFrame, CoreError> {
        self.frames.last().ok_or(CoreError::NoActiveFrame)
    }

    fn frame_mut(&mut self) -> Result<&mut NamespaceFrame, CoreError> {
        self.frames.last_mut().ok_or(CoreError::NoActiveFrame)
    }

    pub fn set_input(&mut self, dotted_path: &str, value: Value) -> Result<(), CoreError> {
        let frame = self.frame_mut()?;
        path::set(&mut frame.inputs, dotted_path, value)
    }

    pub fn set_output(&mut self, dotted_path: &str, value: Value) -> Result<(), CoreError> {
        let frame = self.frame_mut()?;
        path::set(&mut frame.outputs, dotted_path, value)
    }

    pub fn set_variable(&mut self, dotted_path: &str, value: Value) -> Result<(), CoreError> {
        let frame = self.frame_mut()?;
        path::set(&mut frame.variables, dotted_path, value)
    }

    pub fn get_input(&self, dotted_path: &str) -> Result<Option<&Value>, CoreError> {
        Ok(path::get(&self.frame()?.inputs, dotted_path))
    }

    pub fn get_output(&self, dotted_path: &str) -> Result<Option<&Value>, CoreError> {
        Ok(path::get(&self.frame()?.outputs, dotted_path))
    }

    pub fn get_variable(&self, dotted_path: &str) -> Result<Option<&Value>, CoreError> {
        Ok(path::get(&self.frame()?.variables, dotted_path))
    }

    /// Builds the `{inputs, outputs, variables, system_metadata}` view used
    /// for template resolution, merged with `extra_ctx` at the top level
    /// (including a transient `result` overlay if one is active).
    pub fn template_context(&self, extra_ctx: Option<&Value>) -> Result<Value, CoreError> {
        let frame = self.frame()?;
        let mut map = Map::new();
        map.insert("inputs".into(), frame.inputs.clone());
        map.insert("outputs".into(), frame.outputs.clone());
        map.insert("variables".into(), frame.variables.clone());
        map.insert("system_metadata".into(), self.system_metadata.clone());
        if let Some(result) = &frame.result_overlay {
            map.insert("result".into(), result.clone());
        }
        let mut ctx = Value::Object(map);
        if let Some(extra) = extra_ctx {
            ctx = path::deep_merge(&ctx, extra);
        }
        Ok(ctx)
    }

    pub fn resolve_template(&self, s: &str, extra_ctx: Option<&Value>) -> Result<Value, CoreError> {
        let ctx = self.template_context(extra_ctx)?;
        self.resolver.resolve_runtime(s, &ctx)
    }

    pub fn record_action_message(&mut self, message: impl Into<String>) {
        self.action_messages.push(message.into());
    }

    pub fn drain_action_messages(&mut self) -> Vec<String> {
        std::mem::take(&mut self.action_messages)
    }

    pub fn set_result_overlay(&mut self, value: Value) -> Result<(), CoreError> {
        self.frame_mut()?.result_overlay = Some(value);
        Ok(())
    }

    /// Removes the transient `result` binding. Must be called once a
    /// `flow_call` (or `call_flow` action) step's actions have all applied
    /// — the overlay is a one-shot binding, not a persistent one.
    pub fn clear_result_overlay(&mut self) -> Result<(), CoreError> {
        self.frame_mut()?.result_overlay = None;
        Ok(())
    }

    pub fn register_derived_field(&mut self, path: &str, expr: &str) {
        self.derived.register(path, expr);
    }

    /// Implements the set-cascade: an equal-value set is a no-op;
    /// otherwise the raw value lands in `variables`, observers are
    /// notified, and every derived field that reads `path` recomputes
    /// (depth-first, cycle-guarded).
    pub fn apply_set_with_cascade(&mut self, path_str: &str, value: Value) -> Result<(), CoreError> {
        let (ns, local_path) = Self::split_namespace(path_str);

        let observed = self
            .observable_values
            .entry(path_str.to_string())
            .or_insert_with(|| ObservableValue::new(path_str, Value::Null));
        if observed.value() == &value {
            return Ok(());
        }
        observed.set(value.clone());

        match ns {
            Namespace::Inputs => self.set_input(local_path, value)?,
            Namespace::Outputs => self.set_output(local_path, value)?,
            Namespace::Variables => self.set_variable(local_path, value)?,
        }

        self.cascade(path_str)
    }

    fn split_namespace(path_str: &str) -> (Namespace, &str) {
        if let Some(rest) = path_str.strip_prefix("outputs.") {
            (Namespace::Outputs, rest)
        } else if let Some(rest) = path_str.strip_prefix("inputs.") {
            (Namespace::Inputs, rest)
        } else if let Some(rest) = path_str.strip_prefix("variables.") {
            (Namespace::Variables, rest)
        } else {
            (Namespace::Variables, path_str)
        }
    }

    fn cascade(&mut self, changed_path: &str) -> Result<(), CoreError> {
        for derived_path in self.derived.dependents_of(changed_path) {
            self.recompute(&derived_path)?;
        }
        Ok(())
    }

    fn recompute(&mut self, derived_path: &str) -> Result<(), CoreError> {
        if !self.derived.begin_computing(derived_path) {
            warn!(path = derived_path, "derived field cycle detected, skipping recompute");
            return Ok(());
        }
        let expr = self.derived.expr_of(derived_path).map(str::to_string);
        if let Some(expr) = expr {
            let ctx = self.template_context(None)?;
            match self.resolver.resolve_runtime(&expr, &ctx) {
                Ok(new_value) => {
                    self.apply_set_with_cascade(derived_path, new_value)?;
                }
                Err(err) => {
                    warn!(path = derived_path, error = %err, "derived field recompute failed");
                }
            }
        }
        self.derived.end_computing(derived_path);
        Ok(())
    }
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
