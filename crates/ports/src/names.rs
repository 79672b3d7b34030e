// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Name generation port. `table_roll` and `llm_generation` steps may
//! ask a generator for a name instead of a table entry or a prompt
//! response; when no generator is configured for a `generator_id`, the
//! built-in pool stands in.

use async_trait::async_trait;
use rand::seq::SliceRandom;
use serde_json::Value;
use std::collections::HashMap;

#[async_trait]
pub trait NameGenerator: Send + Sync + 'static {
    async fn generate(&self, generator_id: &str, hints: Option<&HashMap<String, Value>>) -> String;
}

const FIRST_NAMES: &[&str] = &[
    "Alda", "Brenn", "Corwin", "Dessa", "Eldra", "Finnegan", "Garr", "Hesper", "Ioan", "Joslyn",
];
const LAST_NAMES: &[&str] = &[
    "Ashwood", "Blackmoor", "Crowley", "Duskwalker", "Emberfall", "Fenwick", "Greymantle",
    "Hollowell", "Ironside", "Jurrow",
];

/// Falls back to a simple first+last name pool, independent of
/// `generator_id`, for systems that don't wire in a real name generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinNameGenerator;

impl BuiltinNameGenerator {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl NameGenerator for BuiltinNameGenerator {
    async fn generate(&self, _generator_id: &str, _hints: Option<&HashMap<String, Value>>) -> String {
        let mut rng = rand::thread_rng();
        let first = FIRST_NAMES.choose(&mut rng).copied().unwrap_or("Unnamed");
        let last = LAST_NAMES.choose(&mut rng).copied().unwrap_or("Wanderer");
        format!("{first} {last}")
    }
}

#[cfg(test)]
#[path = "names_tests.rs"]
mod tests;
