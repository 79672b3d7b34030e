// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The Compendium record: a named catalog of entries conforming to a
//! Model.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Compendium {
    pub id: String,
    pub name: String,
    pub model: String,
    #[serde(default)]
    pub entries: IndexMap<String, Map<String, Value>>,
}

impl Compendium {
    pub fn entry(&self, entry_id: &str) -> Option<&Map<String, Value>> {
        self.entries.get(entry_id)
    }

    /// Ids in declaration order, for deterministic random-selection and
    /// listing output.
    pub fn entry_ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

#[cfg(test)]
#[path = "compendium_tests.rs"]
mod tests;
