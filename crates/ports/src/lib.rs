// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Ports to the world outside the engine: dice rolling, LLM
//! generation, name generation, and logging are all collaborators the
//! host supplies, not things this crate implements itself.

pub mod dice;
pub mod llm;
pub mod logger;
pub mod names;

pub use dice::{DiceError, DiceService, DiceSummary, RegexDiceService};
pub use llm::{LlmError, LlmService, NoopLlmService};
pub use logger::{LogLevel, LoggerPort, TracingLogger};
pub use names::{BuiltinNameGenerator, NameGenerator};

#[cfg(any(test, feature = "test-support"))]
pub use dice::FakeDiceService;
#[cfg(any(test, feature = "test-support"))]
pub use llm::FakeLlmService;
#[cfg(any(test, feature = "test-support"))]
pub use logger::FakeLogger;
