// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The Table record: a keyed lookup by integer or range, with
//! optional dice for random resolution.

use crate::error::ModelError;
use indexmap::IndexMap;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// An integer key or a contiguous `"lo-hi"` range (a single-element range
/// like `"lo-lo"` is valid).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TableKey {
    Int(i64),
    Range(i64, i64),
}

impl TableKey {
    pub fn parse(raw: &str) -> Result<Self, ModelError> {
        if let Ok(n) = raw.parse::<i64>() {
            return Ok(TableKey::Int(n));
        }
        let Some((lo, hi)) = raw.split_once('-') else {
            return Err(ModelError::InvalidTableKey(raw.to_string()));
        };
        let lo: i64 = lo
            .trim()
            .parse()
            .map_err(|_| ModelError::InvalidTableKey(raw.to_string()))?;
        let hi: i64 = hi
            .trim()
            .parse()
            .map_err(|_| ModelError::InvalidTableKey(raw.to_string()))?;
        if lo > hi {
            return Err(ModelError::InvalidTableKey(raw.to_string()));
        }
        Ok(TableKey::Range(lo, hi))
    }

    pub fn contains(&self, n: i64) -> bool {
        match self {
            TableKey::Int(v) => *v == n,
            TableKey::Range(lo, hi) => n >= *lo && n <= *hi,
        }
    }

    pub fn bounds(&self) -> (i64, i64) {
        match self {
            TableKey::Int(v) => (*v, *v),
            TableKey::Range(lo, hi) => (*lo, *hi),
        }
    }
}

impl fmt::Display for TableKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableKey::Int(v) => write!(f, "{v}"),
            TableKey::Range(lo, hi) => write!(f, "{lo}-{hi}"),
        }
    }
}

impl Serialize for TableKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for TableKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct KeyVisitor;

        impl Visitor<'_> for KeyVisitor {
            type Value = TableKey;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an integer or a \"lo-hi\" range string")
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<TableKey, E> {
                Ok(TableKey::Int(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<TableKey, E> {
                Ok(TableKey::Int(v as i64))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<TableKey, E> {
                TableKey::parse(v).map_err(de::Error::custom)
            }
        }

        deserializer.deserialize_any(KeyVisitor)
    }
}

/// One resolved entry value: a literal, an explicit compendium
/// lookup, a random-selection hint, or a generation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TableEntryValue {
    Literal(String),
    Explicit { id: String, #[serde(rename = "type")] entry_type: String },
    Random { #[serde(rename = "type")] entry_type: String },
    Generate {
        generate: bool,
        #[serde(default, rename = "type")]
        entry_type: Option<String>,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Table {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub roll: Option<String>,
    #[serde(default = "default_entry_type")]
    pub entry_type: String,
    #[serde(default)]
    pub entries: IndexMap<TableKey, TableEntryValue>,
}

fn default_entry_type() -> String {
    "str".to_string()
}

impl Table {
    /// Looks up the entry whose key contains `n`. Returns `None` if no
    /// entry matches (e.g. a roll that falls outside every declared range).
    pub fn lookup(&self, n: i64) -> Option<&TableEntryValue> {
        self.entries
            .iter()
            .find(|(key, _)| key.contains(n))
            .map(|(_, v)| v)
    }

    /// Validates that all range/int keys are contiguous and non-overlapping.
    /// Returns the first overlap found, if any.
    pub fn check_ranges(&self) -> Result<(), ModelError> {
        let mut bounds: Vec<(i64, i64)> = self.entries.keys().map(TableKey::bounds).collect();
        bounds.sort_unstable();
        for window in bounds.windows(2) {
            let (_, prev_hi) = window[0];
            let (next_lo, _) = window[1];
            if next_lo <= prev_hi {
                return Err(ModelError::OverlappingTableRanges(format!(
                    "{} overlaps following entry starting at {}",
                    self.id, next_lo
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "table_tests.rs"]
mod tests;
