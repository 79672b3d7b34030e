// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error kinds raised during flow execution.

use grimoire_core::CoreError;
use grimoire_template::TemplateError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("template error: {0}")]
    Template(String),

    #[error("dice error: {0}")]
    Dice(String),

    #[error("llm error: {0}")]
    Llm(String),

    #[error("table error: {0}")]
    Table(String),

    #[error("choice error: {0}")]
    Choice(String),

    #[error("flow error: {0}")]
    Flow(String),

    #[error("cancelled")]
    Cancelled,
}

impl From<TemplateError> for EngineError {
    fn from(e: TemplateError) -> Self {
        EngineError::Template(e.to_string())
    }
}

impl From<CoreError> for EngineError {
    fn from(e: CoreError) -> Self {
        EngineError::Flow(e.to_string())
    }
}
