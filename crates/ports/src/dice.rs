// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Dice rolling port. The engine never rolls dice itself —
//! it asks a `DiceService` for a total and a human-readable breakdown.

use async_trait::async_trait;
use rand::Rng;
use regex::Regex;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::OnceLock;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DiceError {
    #[error("invalid dice expression `{0}`")]
    InvalidExpression(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DiceSummary {
    pub total: i64,
    pub breakdown: String,
}

#[async_trait]
pub trait DiceService: Send + Sync + 'static {
    async fn roll(
        &self,
        expr: &str,
        ctx: &HashMap<String, Value>,
    ) -> Result<DiceSummary, DiceError>;
}

fn dice_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(\d+)d(\d+)(?:\s*([+-])\s*(\d+))?$").expect("static dice regex")
    })
}

/// The concrete dice evaluator for `NdM[+-]K` expressions, rolling each
/// die independently via `rand`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegexDiceService;

impl RegexDiceService {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DiceService for RegexDiceService {
    async fn roll(
        &self,
        expr: &str,
        _ctx: &HashMap<String, Value>,
    ) -> Result<DiceSummary, DiceError> {
        let trimmed = expr.trim();
        let captures = dice_pattern()
            .captures(trimmed)
            .ok_or_else(|| DiceError::InvalidExpression(expr.to_string()))?;
        let count: u32 = captures[1]
            .parse()
            .map_err(|_| DiceError::InvalidExpression(expr.to_string()))?;
        let sides: u32 = captures[2]
            .parse()
            .map_err(|_| DiceError::InvalidExpression(expr.to_string()))?;
        if count == 0 || sides == 0 {
            return Err(DiceError::InvalidExpression(expr.to_string()));
        }
        let modifier: i64 = match (captures.get(3), captures.get(4)) {
            (Some(sign), Some(value)) => {
                let value: i64 = value
                    .as_str()
                    .parse()
                    .map_err(|_| DiceError::InvalidExpression(expr.to_string()))?;
                if sign.as_str() == "-" {
                    -value
                } else {
                    value
                }
            }
            _ => 0,
        };

        let mut rng = rand::thread_rng();
        let rolls: Vec<i64> = (0..count)
            .map(|_| rng.gen_range(1..=sides) as i64)
            .collect();
        let total: i64 = rolls.iter().sum::<i64>() + modifier;
        let rolls_str = rolls
            .iter()
            .map(i64::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        let breakdown = if modifier == 0 {
            format!("[{rolls_str}] = {total}")
        } else {
            format!("[{rolls_str}] {modifier:+} = {total}")
        };

        Ok(DiceSummary { total, breakdown })
    }
}

#[cfg(any(test, feature = "test-support"))]
mod fake {
    use super::*;
    use std::sync::Mutex;

    /// Deterministic dice service for tests: returns a fixed total per
    /// expression (or the regex-derived maximum if none was queued), and
    /// records every expression it was asked to roll.
    pub struct FakeDiceService {
        queued: Mutex<HashMap<String, i64>>,
        calls: Mutex<Vec<String>>,
    }

    impl Default for FakeDiceService {
        fn default() -> Self {
            Self {
                queued: Mutex::new(HashMap::new()),
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    impl FakeDiceService {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn queue(&self, expr: impl Into<String>, total: i64) {
            self.queued.lock().expect("lock").insert(expr.into(), total);
        }

        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().expect("lock").clone()
        }
    }

    #[async_trait]
    impl DiceService for FakeDiceService {
        async fn roll(
            &self,
            expr: &str,
            _ctx: &HashMap<String, Value>,
        ) -> Result<DiceSummary, DiceError> {
            self.calls.lock().expect("lock").push(expr.to_string());
            let total = *self
                .queued
                .lock()
                .expect("lock")
                .get(expr)
                .ok_or_else(|| DiceError::InvalidExpression(expr.to_string()))?;
            Ok(DiceSummary {
                total,
                breakdown: format!("{expr} = {total}"),
            })
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeDiceService;

#[cfg(test)]
#[path = "dice_tests.rs"]
mod tests;
