// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Template Service error kinds.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("undefined variable in load-time template: {0}")]
    LoadtimeUndefined(String),

    #[error("load-time template rendering failed: {0}")]
    LoadtimeRender(String),

    #[error("runtime identifier `{0}` was referenced but is not available in this context")]
    UndefinedRuntimeIdentifier(String),

    #[error("template rendering failed: {0}")]
    Render(String),
}
