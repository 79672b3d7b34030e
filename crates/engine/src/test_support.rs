// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test fixtures for the executor/action/flow-engine unit tests.

#![cfg(test)]

use grimoire_core::{ExecId, ExecutionContext};
use grimoire_model::{Step, StepKind, System};
use grimoire_template::CoreTemplateResolver;
use serde_json::json;
use std::sync::Arc;

pub(crate) fn ctx() -> ExecutionContext {
    let mut c = ExecutionContext::new(json!({}), Arc::new(CoreTemplateResolver::new()));
    c.push_frame("test_flow", ExecId::new("e1"));
    c
}

pub(crate) fn step(id: &str, kind: StepKind) -> Step {
    Step {
        id: id.to_string(),
        name: None,
        condition: None,
        next_step: None,
        actions: Vec::new(),
        kind,
    }
}

pub(crate) fn empty_system() -> System {
    System {
        id: "test".into(),
        name: "Test".into(),
        version: "1".into(),
        description: None,
        default_source: None,
        currency: None,
        credits: None,
        sources: Default::default(),
        models: Default::default(),
        compendiums: Default::default(),
        tables: Default::default(),
        flows: Default::default(),
        prompts: Default::default(),
    }
}
