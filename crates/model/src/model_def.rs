// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The Model record: a typed attribute schema other records validate
//! instances against.

use crate::attribute::AttributeDef;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationRule {
    /// Template expression; must render to a truthy value for the instance
    /// to be considered valid.
    pub expr: String,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Model {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub extends: Vec<String>,
    #[serde(default)]
    pub attributes: IndexMap<String, AttributeDef>,
    #[serde(default)]
    pub validations: Vec<ValidationRule>,
}

impl Model {
    /// Attribute lookup, following dotted paths against nested attribute
    /// maps declared by `of`/nested models is out of scope here — the
    /// loader flattens `extends` chains before this is called, so lookups
    /// stay a direct map index.
    pub fn attribute(&self, path: &str) -> Option<&AttributeDef> {
        self.attributes.get(path)
    }

    pub fn derived_attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes.iter().filter_map(|(path, def)| {
            def.derived.as_deref().map(|expr| (path.as_str(), expr))
        })
    }
}

#[cfg(test)]
#[path = "model_def_tests.rs"]
mod tests;
