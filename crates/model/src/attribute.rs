// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Model attribute definitions.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttrType {
    Int,
    Float,
    Str,
    Bool,
    List,
    ModelId,
}

/// A `"lo..hi"` range where either endpoint may be a literal integer or a
/// `$otherAttr` reference resolved against the instance at validation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeSpec {
    pub raw: String,
}

impl RangeSpec {
    pub fn parse(raw: &str) -> Option<(RangeEndpointOwned, RangeEndpointOwned)> {
        let (lo, hi) = raw.split_once("..")?;
        Some((Self::parse_endpoint(lo), Self::parse_endpoint(hi)))
    }

    fn parse_endpoint(s: &str) -> RangeEndpointOwned {
        let s = s.trim();
        if let Some(attr) = s.strip_prefix('$') {
            RangeEndpointOwned::AttrRef(attr.to_string())
        } else if let Ok(n) = s.parse::<i64>() {
            RangeEndpointOwned::Literal(n)
        } else {
            RangeEndpointOwned::AttrRef(s.to_string())
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RangeEndpointOwned {
    Literal(i64),
    AttrRef(String),
}

/// A model attribute: `id`, `name`, `extends`, `attributes: map<path, AttributeDef>`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttributeDef {
    #[serde(rename = "type", default = "default_attr_type")]
    pub attr_type: AttrType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "enum")]
    pub enum_values: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub derived: Option<String>,
    #[serde(default = "default_true")]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "of")]
    pub of_type: Option<AttrType>,
}

fn default_attr_type() -> AttrType {
    AttrType::Str
}

fn default_true() -> bool {
    true
}

impl AttributeDef {
    pub fn is_derived(&self) -> bool {
        self.derived.is_some()
    }
}

#[cfg(test)]
#[path = "attribute_tests.rs"]
mod tests;
