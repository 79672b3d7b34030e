// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Logging port"). The engine
//! itself uses `tracing` spans throughout; this port exists for the
//! `log_message`/`log_event` action strategies, which a host may want to
//! route somewhere other than the process's tracing subscriber (a
//! session transcript, a UI pane, a test recorder).

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        };
        f.write_str(s)
    }
}

pub trait LoggerPort: Send + Sync + 'static {
    fn log(&self, level: LogLevel, message: &str);
}

/// Forwards to the process's `tracing` subscriber, the default wiring
/// for `grimoire-cli`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl TracingLogger {
    pub fn new() -> Self {
        Self
    }
}

impl LoggerPort for TracingLogger {
    fn log(&self, level: LogLevel, message: &str) {
        match level {
            LogLevel::Trace => tracing::trace!("{message}"),
            LogLevel::Debug => tracing::debug!("{message}"),
            LogLevel::Info => tracing::info!("{message}"),
            LogLevel::Warn => tracing::warn!("{message}"),
            LogLevel::Error => tracing::error!("{message}"),
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
mod fake {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct FakeLogger {
        entries: Mutex<Vec<(LogLevel, String)>>,
    }

    impl FakeLogger {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn entries(&self) -> Vec<(LogLevel, String)> {
            self.entries.lock().expect("lock").clone()
        }
    }

    impl LoggerPort for FakeLogger {
        fn log(&self, level: LogLevel, message: &str) {
            self.entries.lock().expect("lock").push((level, message.to_string()));
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeLogger;

#[cfg(test)]
#[path = "logger_tests.rs"]
mod tests;
