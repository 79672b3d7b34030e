// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bridges [`TemplateService`] into the [`grimoire_core::context::TemplateResolver`]
//! trait object the Execution Context holds, so `grimoire-core` never needs
//! to depend on `grimoire-template`.

use crate::engine::TemplateService;
use grimoire_core::context::TemplateResolver;
use grimoire_core::error::CoreError;
use serde_json::Value;

pub struct CoreTemplateResolver {
    service: TemplateService,
}

impl CoreTemplateResolver {
    pub fn new() -> Self {
        Self {
            service: TemplateService::new(),
        }
    }
}

impl Default for CoreTemplateResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateResolver for CoreTemplateResolver {
    fn resolve_runtime(&self, template: &str, context: &Value) -> Result<Value, CoreError> {
        self.service
            .resolve_runtime(template, context)
            .map_err(|e| CoreError::Template(e.to_string()))
    }
}
