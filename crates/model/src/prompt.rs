// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The Prompt record: a named, reusable LLM prompt template that
//! `llm_generation` steps may reference instead of inlining `prompt`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prompt {
    pub id: String,
    pub name: String,
    pub template: String,
    #[serde(default)]
    pub description: Option<String>,
}
