// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The two lookup tables the Flow Engine dispatches through: one per step
//! kind (minus `flow_call`, which the engine drives directly) and one per
//! action kind.

use crate::actions::{ActionStrategy, CallFlowAction, LogEventAction, LogMessageAction, SetValueAction};
use crate::error::EngineError;
use crate::executors::{
    CompletionExecutor, ConditionalExecutor, DiceRollExecutor, DiceSequenceExecutor,
    LlmGenerationExecutor, PlayerChoiceExecutor, PlayerInputExecutor, StepExecutor, TableRollExecutor,
};
use crate::flow_engine::FlowEngine;
use grimoire_ports::{DiceService, LlmService, LoggerPort, NameGenerator};
use std::collections::HashMap;
use std::sync::{Arc, Weak};

pub struct ExecutorRegistry {
    executors: HashMap<&'static str, Arc<dyn StepExecutor>>,
}

impl ExecutorRegistry {
    pub fn new(dice: Arc<dyn DiceService>, llm: Arc<dyn LlmService>, names: Arc<dyn NameGenerator>) -> Self {
        let mut executors: HashMap<&'static str, Arc<dyn StepExecutor>> = HashMap::new();
        executors.insert("dice_roll", Arc::new(DiceRollExecutor::new(dice.clone())));
        executors.insert("dice_sequence", Arc::new(DiceSequenceExecutor::new(dice.clone())));
        executors.insert("player_choice", Arc::new(PlayerChoiceExecutor::new()));
        executors.insert("player_input", Arc::new(PlayerInputExecutor::new()));
        executors.insert("table_roll", Arc::new(TableRollExecutor::new(dice, names)));
        executors.insert("llm_generation", Arc::new(LlmGenerationExecutor::new(llm)));
        executors.insert("conditional", Arc::new(ConditionalExecutor::new()));
        executors.insert("completion", Arc::new(CompletionExecutor::new()));
        Self { executors }
    }

    pub fn lookup(&self, type_name: &str) -> Result<&Arc<dyn StepExecutor>, EngineError> {
        self.executors
            .get(type_name)
            .ok_or_else(|| EngineError::Flow(format!("no executor registered for step kind `{type_name}`")))
    }
}

pub struct ActionRegistry {
    strategies: HashMap<&'static str, Arc<dyn ActionStrategy>>,
}

impl ActionRegistry {
    pub fn new(logger: Arc<dyn LoggerPort>, engine: Weak<FlowEngine>) -> Self {
        let mut strategies: HashMap<&'static str, Arc<dyn ActionStrategy>> = HashMap::new();
        strategies.insert("set_value", Arc::new(SetValueAction::new()));
        strategies.insert("log_message", Arc::new(LogMessageAction::new()));
        strategies.insert("log_event", Arc::new(LogEventAction::new(logger)));
        strategies.insert("call_flow", Arc::new(CallFlowAction::new(engine)));
        Self { strategies }
    }

    pub fn lookup(&self, type_name: &str) -> Option<&Arc<dyn ActionStrategy>> {
        self.strategies.get(type_name)
    }
}
