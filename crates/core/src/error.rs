// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared error kinds raised by the execution context and reactive graph.

use thiserror::Error;

/// Errors raised by [`crate::context::ExecutionContext`] and
/// [`crate::derived::DerivedFieldManager`].
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("no active namespace frame; push_frame must be called before use")]
    NoActiveFrame,

    #[error("path `{0}` traverses a non-object value")]
    PathConflict(String),

    #[error("template rendering failed: {0}")]
    Template(String),
}
