// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! LLM generation port. The `llm_generation` executor drives
//! the JSON-repair retry loop; this trait only needs to produce raw text.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("provider error: {0}")]
    ProviderError(String),
}

#[async_trait]
pub trait LlmService: Send + Sync + 'static {
    async fn generate(
        &self,
        prompt: &str,
        ctx: &HashMap<String, Value>,
        settings: Option<&Value>,
    ) -> Result<String, LlmError>;
}

/// Stands in for a real provider adapter; the LLM provider is an
/// opaque external collaborator, out of scope for this crate. Always
/// fails, so a system that actually exercises `llm_generation` needs a
/// real adapter wired in by the embedding host.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLlmService;

impl NoopLlmService {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl LlmService for NoopLlmService {
    async fn generate(
        &self,
        _prompt: &str,
        _ctx: &HashMap<String, Value>,
        _settings: Option<&Value>,
    ) -> Result<String, LlmError> {
        Err(LlmError::ProviderError(
            "no LLM provider configured (NoopLlmService)".to_string(),
        ))
    }
}

#[cfg(any(test, feature = "test-support"))]
mod fake {
    use super::*;
    use std::sync::Mutex;

    /// Scripted LLM service: returns successive queued responses in
    /// order, looping the last one once the queue is exhausted. Used to
    /// exercise the JSON-repair retry loop deterministically.
    pub struct FakeLlmService {
        responses: Mutex<Vec<String>>,
        calls: Mutex<Vec<String>>,
    }

    impl Default for FakeLlmService {
        fn default() -> Self {
            Self {
                responses: Mutex::new(Vec::new()),
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    impl FakeLlmService {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn queue_response(&self, response: impl Into<String>) {
            self.responses.lock().expect("lock").push(response.into());
        }

        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().expect("lock").clone()
        }
    }

    #[async_trait]
    impl LlmService for FakeLlmService {
        async fn generate(
            &self,
            prompt: &str,
            _ctx: &HashMap<String, Value>,
            _settings: Option<&Value>,
        ) -> Result<String, LlmError> {
            self.calls.lock().expect("lock").push(prompt.to_string());
            let mut responses = self.responses.lock().expect("lock");
            if responses.is_empty() {
                return Err(LlmError::ProviderError("no response queued".into()));
            }
            if responses.len() == 1 {
                Ok(responses[0].clone())
            } else {
                Ok(responses.remove(0))
            }
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeLlmService;

#[cfg(test)]
#[path = "llm_tests.rs"]
mod tests;
