// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The System record: the root aggregate a loaded directory produces.
//! Immutable after load; safely shared read-only across threads.

use crate::compendium::Compendium;
use crate::flow::Flow;
use crate::model_def::Model;
use crate::prompt::Prompt;
use crate::source::Source;
use crate::table::Table;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Denomination {
    pub symbol: String,
    pub name: String,
    pub value: f64,
    #[serde(default)]
    pub weight: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Currency {
    pub base_unit: String,
    #[serde(default)]
    pub denominations: Vec<Denomination>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Credits {
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default)]
    pub license: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct System {
    pub id: String,
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub default_source: Option<String>,
    #[serde(default)]
    pub currency: Option<Currency>,
    #[serde(default)]
    pub credits: Option<Credits>,

    #[serde(default)]
    pub sources: IndexMap<String, Source>,
    #[serde(default)]
    pub models: IndexMap<String, Model>,
    #[serde(default)]
    pub compendiums: IndexMap<String, Compendium>,
    #[serde(default)]
    pub tables: IndexMap<String, Table>,
    #[serde(default)]
    pub flows: IndexMap<String, Flow>,
    #[serde(default)]
    pub prompts: IndexMap<String, Prompt>,
}

impl System {
    /// Builds the `system_metadata` context used for load-time template
    /// resolution and as the final fallback tier of
    /// `get_value`.
    pub fn metadata(&self) -> Value {
        serde_json::json!({
            "system": {
                "id": self.id,
                "name": self.name,
                "version": self.version,
                "description": self.description,
            },
            "currency": self.currency,
        })
    }

    pub fn flow(&self, id: &str) -> Option<&Flow> {
        self.flows.get(id)
    }

    pub fn model(&self, id: &str) -> Option<&Model> {
        self.models.get(id)
    }

    pub fn compendium(&self, id: &str) -> Option<&Compendium> {
        self.compendiums.get(id)
    }

    pub fn table(&self, id: &str) -> Option<&Table> {
        self.tables.get(id)
    }

    pub fn prompt(&self, id: &str) -> Option<&Prompt> {
        self.prompts.get(id)
    }
}

#[cfg(test)]
#[path = "system_tests.rs"]
mod tests;
