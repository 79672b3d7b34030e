// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Definition Model error kinds.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid table key `{0}`: expected an integer or a \"lo-hi\" range")]
    InvalidTableKey(String),

    #[error("table ranges overlap or are non-contiguous: {0}")]
    OverlappingTableRanges(String),

    #[error("invalid dice expression `{0}`")]
    InvalidDiceExpression(String),

    #[error("model validation failed:\n{}", .0.join("\n"))]
    Validation(Vec<String>),
}
