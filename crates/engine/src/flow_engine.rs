// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The Flow Engine: drives one flow's steps to completion or to
//! a suspension point, and resumes a suspended flow (and any ancestor
//! flows stacked above it via `flow_call`) once the host supplies input.

use crate::condition;
use crate::error::EngineError;
use crate::executors;
use crate::registry::{ActionRegistry, ExecutorRegistry};
use grimoire_core::id::IdGen;
use grimoire_core::{ExecId, ExecutionContext, FlowResult, StepResult};
use grimoire_core::result::{Choice, InputType, StepOutcomeRecord};
use grimoire_model::{Action, Flow, StepKind, System};
use grimoire_ports::{DiceService, LlmService, LogLevel, LoggerPort, NameGenerator};
use serde_json::{Map, Value};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

/// One suspended step, recorded so `resume` knows exactly where to pick
/// the flow back up.
#[derive(Debug, Clone)]
pub struct PendingFrame {
    pub flow_id: String,
    pub step_id: String,
    pub idx: usize,
    pub prompt: Option<String>,
    pub choices: Option<Vec<Choice>>,
    pub input_type: Option<InputType>,
}

/// The stacked continuation token of a suspended flow: root-first, with the
/// innermost (currently awaiting input) frame last.
#[derive(Debug, Clone, Default)]
pub struct PendingState {
    pub stack: Vec<PendingFrame>,
}

impl PendingState {
    /// The frame the host should actually prompt for.
    pub fn current(&self) -> Option<&PendingFrame> {
        self.stack.last()
    }
}

/// Either a flow ran to completion (possibly with failure) or it
/// suspended awaiting input.
#[derive(Debug)]
pub enum StepOutcome {
    Completed(FlowResult),
    Pending(PendingState),
}

pub struct FlowEngine {
    registry: ExecutorRegistry,
    actions: ActionRegistry,
    logger: Arc<dyn LoggerPort>,
    id_gen: Box<dyn Fn() -> String + Send + Sync>,
    cancelling: AtomicBool,
}

impl FlowEngine {
    pub fn new(
        dice: Arc<dyn DiceService>,
        llm: Arc<dyn LlmService>,
        names: Arc<dyn NameGenerator>,
        logger: Arc<dyn LoggerPort>,
        id_gen: impl IdGen + 'static,
    ) -> Arc<Self> {
        Arc::new_cyclic(|weak: &Weak<FlowEngine>| FlowEngine {
            registry: ExecutorRegistry::new(dice, llm, names),
            actions: ActionRegistry::new(logger.clone(), weak.clone()),
            logger,
            id_gen: Box::new(move || id_gen.next()),
            cancelling: AtomicBool::new(false),
        })
    }

    /// Requests that the in-flight (or next) run stop at its next step
    /// boundary. Cooperative, like a job's `cancelling` flag: a step
    /// already executing runs to completion, but the loop driving it
    /// returns `EngineError::Cancelled` before starting the next one.
    pub fn cancel(&self) {
        self.cancelling.store(true, Ordering::SeqCst);
    }

    fn is_cancelling(&self) -> bool {
        self.cancelling.load(Ordering::SeqCst)
    }

    fn next_exec_id(&self) -> ExecId {
        ExecId::new((self.id_gen)())
    }

    /// Entry point for a fresh top-level flow invocation. Clears any
    /// cancellation requested by a previous run before starting.
    pub async fn execute_flow(
        &self,
        flow_id: &str,
        inputs: Value,
        ctx: &mut ExecutionContext,
        system: &System,
    ) -> Result<StepOutcome, EngineError> {
        self.cancelling.store(false, Ordering::SeqCst);
        let flow = system
            .flow(flow_id)
            .ok_or_else(|| EngineError::Flow(format!("unknown flow `{flow_id}`")))?;

        ctx.push_frame(flow_id, self.next_exec_id());
        register_model_derived_fields(ctx, system);
        if let Value::Object(map) = inputs {
            for (key, value) in map {
                ctx.set_input(&key, value)?;
            }
        }
        for (key, value) in &flow.variables {
            ctx.set_variable(key, value.clone())?;
        }

        self.run_loop(ctx, system, flow, 0, Vec::new()).await
    }

    /// Invokes `flow_id` as a sub-flow of whatever frame is currently on
    /// top of `ctx` — used by both the `flow_call` step and the
    /// `call_flow` action. `inputs` must already be rendered.
    pub(crate) async fn invoke_subflow(
        &self,
        flow_id: &str,
        inputs: &Map<String, Value>,
        ctx: &mut ExecutionContext,
        system: &System,
    ) -> Result<StepOutcome, EngineError> {
        let flow = system
            .flow(flow_id)
            .ok_or_else(|| EngineError::Flow(format!("unknown flow `{flow_id}`")))?;

        ctx.push_frame(flow_id, self.next_exec_id());
        register_model_derived_fields(ctx, system);
        for (key, value) in inputs {
            ctx.set_input(key, value.clone())?;
        }
        for (key, value) in &flow.variables {
            ctx.set_variable(key, value.clone())?;
        }

        self.run_loop(ctx, system, flow, 0, Vec::new()).await
    }

    /// Resumes a previously suspended flow tree with `user_value` supplied
    /// for the innermost pending step, cascading success or failure back up
    /// through any stacked `flow_call` ancestors.
    pub async fn resume(
        &self,
        pending: PendingState,
        user_value: Value,
        ctx: &mut ExecutionContext,
        system: &System,
    ) -> Result<StepOutcome, EngineError> {
        if self.is_cancelling() {
            return Err(EngineError::Cancelled);
        }
        let mut stack = pending.stack;
        let frame = stack
            .pop()
            .ok_or_else(|| EngineError::Flow("resume called with an empty pending stack".to_string()))?;
        let flow = system
            .flow(&frame.flow_id)
            .ok_or_else(|| EngineError::Flow(format!("unknown flow `{}`", frame.flow_id)))?;
        let step = flow
            .step(&frame.step_id)
            .ok_or_else(|| EngineError::Flow(format!("unknown step `{}`", frame.step_id)))?;

        let executor = self.registry.lookup(step.kind.type_name())?;
        let result = executor
            .process_input(user_value, step, ctx, system)
            .await?;

        if result.requires_input {
            stack.push(PendingFrame {
                flow_id: frame.flow_id,
                step_id: frame.step_id,
                idx: frame.idx,
                prompt: result.prompt,
                choices: result.choices,
                input_type: result.input_type,
            });
            return Ok(StepOutcome::Pending(PendingState { stack }));
        }

        if !result.success {
            self.apply_actions(&step.actions, ctx, system, flow, &result).await.ok();
            ctx.pop_frame();
            let flow_result = FlowResult::failure(
                frame.flow_id.clone(),
                frame.step_id.clone(),
                result.error.unwrap_or_default(),
                vec![outcome_record(&result)],
            );
            return self.complete_subflow_and_continue(ctx, system, stack, flow_result).await;
        }

        if let Err(e) = self.apply_actions(&step.actions, ctx, system, flow, &result).await {
            ctx.pop_frame();
            let flow_result = FlowResult::failure(
                frame.flow_id.clone(),
                frame.step_id.clone(),
                e.to_string(),
                vec![outcome_record(&result)],
            );
            return self.complete_subflow_and_continue(ctx, system, stack, flow_result).await;
        }

        let next_idx = flow.next_index(frame.idx);
        let outcome = match next_idx {
            Some(n) => self.run_loop(ctx, system, flow, n, vec![outcome_record(&result)]).await?,
            None => {
                let popped = ctx
                    .pop_frame()
                    .ok_or_else(|| EngineError::Flow("no active frame to pop".to_string()))?;
                StepOutcome::Completed(FlowResult::success(
                    flow.id.clone(),
                    popped.outputs,
                    popped.variables,
                    vec![outcome_record(&result)],
                ))
            }
        };

        match outcome {
            StepOutcome::Completed(flow_result) => {
                self.complete_subflow_and_continue(ctx, system, stack, flow_result).await
            }
            StepOutcome::Pending(inner) => {
                let mut combined = stack;
                combined.extend(inner.stack);
                Ok(StepOutcome::Pending(PendingState { stack: combined }))
            }
        }
    }

    /// Walks back up a stack of suspended `flow_call` ancestors, binding
    /// each one's `result` overlay and continuing its own loop — or, if
    /// `flow_result` reports failure, cascading that failure upward instead.
    async fn complete_subflow_and_continue(
        &self,
        ctx: &mut ExecutionContext,
        system: &System,
        mut stack: Vec<PendingFrame>,
        mut flow_result: FlowResult,
    ) -> Result<StepOutcome, EngineError> {
        loop {
            if self.is_cancelling() {
                return Err(EngineError::Cancelled);
            }
            let Some(frame) = stack.pop() else {
                return Ok(StepOutcome::Completed(flow_result));
            };
            let flow = system
                .flow(&frame.flow_id)
                .ok_or_else(|| EngineError::Flow(format!("unknown flow `{}`", frame.flow_id)))?;
            let step = flow
                .step(&frame.step_id)
                .ok_or_else(|| EngineError::Flow(format!("unknown step `{}`", frame.step_id)))?;

            if !flow_result.success {
                ctx.pop_frame();
                flow_result = FlowResult::failure(
                    frame.flow_id.clone(),
                    frame.step_id.clone(),
                    flow_result.error.clone().unwrap_or_default(),
                    Vec::new(),
                );
                continue;
            }

            ctx.set_result_overlay(flow_result.outputs.clone())?;
            if let Err(e) = self
                .apply_actions(&step.actions, ctx, system, flow, &StepResult::ok(step.id.clone(), Map::new()))
                .await
            {
                ctx.pop_frame();
                flow_result = FlowResult::failure(
                    frame.flow_id.clone(),
                    frame.step_id.clone(),
                    e.to_string(),
                    Vec::new(),
                );
                continue;
            }

            let next_idx = flow.next_index(frame.idx);
            let outcome = match next_idx {
                Some(n) => self.run_loop(ctx, system, flow, n, Vec::new()).await?,
                None => {
                    let popped = ctx
                        .pop_frame()
                        .ok_or_else(|| EngineError::Flow("no active frame to pop".to_string()))?;
                    StepOutcome::Completed(FlowResult::success(
                        flow.id.clone(),
                        popped.outputs,
                        popped.variables,
                        Vec::new(),
                    ))
                }
            };

            match outcome {
                StepOutcome::Completed(fr) => flow_result = fr,
                StepOutcome::Pending(inner) => {
                    stack.extend(inner.stack);
                    return Ok(StepOutcome::Pending(PendingState { stack }));
                }
            }
        }
    }

    /// Dispatches steps starting at `start_idx` until the flow completes,
    /// fails, or suspends.
    async fn run_loop(
        &self,
        ctx: &mut ExecutionContext,
        system: &System,
        flow: &Flow,
        start_idx: usize,
        mut step_results: Vec<StepOutcomeRecord>,
    ) -> Result<StepOutcome, EngineError> {
        let mut idx = start_idx;
        loop {
            if self.is_cancelling() {
                return Err(EngineError::Cancelled);
            }
            let Some(step) = flow.steps.get(idx) else {
                return Ok(self.finish_success(ctx, flow, step_results)?);
            };

            if let Some(cond) = &step.condition {
                if !condition::evaluate_condition_str(cond, ctx)? {
                    idx = match flow.next_index(idx) {
                        Some(n) => n,
                        None => return Ok(self.finish_success(ctx, flow, step_results)?),
                    };
                    continue;
                }
            }

            if let StepKind::FlowCall { flow: sub_flow_id, inputs } = &step.kind {
                let rendered = executors::render_inputs(inputs, ctx)?;
                match self.invoke_subflow(sub_flow_id, &rendered, ctx, system).await? {
                    StepOutcome::Completed(flow_result) => {
                        if !flow_result.success {
                            ctx.pop_frame();
                            return Ok(StepOutcome::Completed(FlowResult::failure(
                                flow.id.clone(),
                                step.id.clone(),
                                flow_result.error.unwrap_or_default(),
                                step_results,
                            )));
                        }
                        ctx.set_result_overlay(flow_result.outputs)?;
                        if let Err(e) = self
                            .apply_actions(&step.actions, ctx, system, flow, &StepResult::ok(step.id.clone(), Map::new()))
                            .await
                        {
                            ctx.pop_frame();
                            return Ok(StepOutcome::Completed(FlowResult::failure(
                                flow.id.clone(),
                                step.id.clone(),
                                e.to_string(),
                                step_results,
                            )));
                        }
                        step_results.push(StepOutcomeRecord {
                            step_id: step.id.clone(),
                            success: true,
                            data: Map::new(),
                            error: None,
                        });
                        idx = match flow.next_index(idx) {
                            Some(n) => n,
                            None => return Ok(self.finish_success(ctx, flow, step_results)?),
                        };
                    }
                    StepOutcome::Pending(inner) => {
                        // `inner.stack` is more deeply nested than this step's own
                        // flow_call frame, so our frame belongs ahead of it, not
                        // after — the innermost (currently suspended) frame must
                        // stay last.
                        let mut stack = vec![PendingFrame {
                            flow_id: flow.id.clone(),
                            step_id: step.id.clone(),
                            idx,
                            prompt: None,
                            choices: None,
                            input_type: None,
                        }];
                        stack.extend(inner.stack);
                        return Ok(StepOutcome::Pending(PendingState { stack }));
                    }
                }
                continue;
            }

            let executor = self.registry.lookup(step.kind.type_name())?;
            let result = executor.execute(step, ctx, system).await?;

            if result.requires_input {
                return Ok(StepOutcome::Pending(PendingState {
                    stack: vec![PendingFrame {
                        flow_id: flow.id.clone(),
                        step_id: step.id.clone(),
                        idx,
                        prompt: result.prompt,
                        choices: result.choices,
                        input_type: result.input_type,
                    }],
                }));
            }

            if !result.success {
                step_results.push(outcome_record(&result));
                let error = result.error.clone().unwrap_or_default();
                ctx.pop_frame();
                return Ok(StepOutcome::Completed(FlowResult::failure(
                    flow.id.clone(),
                    step.id.clone(),
                    error,
                    step_results,
                )));
            }

            if let Err(e) = self.apply_actions(&step.actions, ctx, system, flow, &result).await {
                step_results.push(outcome_record(&result));
                ctx.pop_frame();
                return Ok(StepOutcome::Completed(FlowResult::failure(
                    flow.id.clone(),
                    step.id.clone(),
                    e.to_string(),
                    step_results,
                )));
            }

            if matches!(step.kind, StepKind::Conditional { .. }) {
                if let Some(branch_actions) = result.data.get("branch_actions") {
                    let actions: Vec<Action> = serde_json::from_value(branch_actions.clone())
                        .map_err(|e| EngineError::Flow(format!("invalid branch_actions payload: {e}")))?;
                    if let Err(e) = self.apply_actions(&actions, ctx, system, flow, &result).await {
                        step_results.push(outcome_record(&result));
                        ctx.pop_frame();
                        return Ok(StepOutcome::Completed(FlowResult::failure(
                            flow.id.clone(),
                            step.id.clone(),
                            e.to_string(),
                            step_results,
                        )));
                    }
                }
            }

            step_results.push(outcome_record(&result));

            if matches!(step.kind, StepKind::Completion { .. }) {
                return Ok(self.finish_success(ctx, flow, step_results)?);
            }

            idx = match flow.next_index(idx) {
                Some(n) => n,
                None => return Ok(self.finish_success(ctx, flow, step_results)?),
            };
        }
    }

    fn finish_success(
        &self,
        ctx: &mut ExecutionContext,
        flow: &Flow,
        step_results: Vec<StepOutcomeRecord>,
    ) -> Result<StepOutcome, EngineError> {
        let frame = ctx
            .pop_frame()
            .ok_or_else(|| EngineError::Flow("no active frame to pop".to_string()))?;
        Ok(StepOutcome::Completed(FlowResult::success(
            flow.id.clone(),
            frame.outputs,
            frame.variables,
            step_results,
        )))
    }

    /// Applies `actions` in order. A failing action is logged and skipped
    /// rather than failing the step — unless it's a `set_value` targeting a
    /// `required` flow output, in which case the failure is returned so the
    /// caller fails the flow instead. The `result` overlay (if any action
    /// set one) is always cleared before returning.
    async fn apply_actions(
        &self,
        actions: &[Action],
        ctx: &mut ExecutionContext,
        system: &System,
        flow: &Flow,
        step_result: &StepResult,
    ) -> Result<(), EngineError> {
        for action in actions {
            let type_name = action.type_name();
            match self.actions.lookup(type_name) {
                Some(strategy) => {
                    if let Err(e) = strategy.apply(action, ctx, system, step_result).await {
                        self.logger
                            .log(LogLevel::Warn, &format!("action `{type_name}` failed: {e}"));
                        if targets_required_output(action, flow) {
                            let _ = ctx.clear_result_overlay();
                            return Err(e);
                        }
                    }
                }
                None => {
                    self.logger
                        .log(LogLevel::Warn, &format!("no strategy registered for action `{type_name}`"));
                }
            }
        }
        ctx.clear_result_overlay()?;
        Ok(())
    }
}

/// True if `action` is a `set_value` whose path targets an output declared
/// `required` on `flow`.
fn targets_required_output(action: &Action, flow: &Flow) -> bool {
    let Action::SetValue { path, .. } = action else {
        return false;
    };
    let Some(name) = path.strip_prefix("outputs.") else {
        return false;
    };
    flow.outputs.iter().any(|o| o.name == name && o.required)
}

/// Registers every Model's `derived` attributes against the frame just
/// pushed, so a flow's `variables` namespace gets the reactive cascade
/// regardless of which Model an instance's attributes happen to belong to
/// — attribute paths are flat within a frame, so this only costs a handful
/// of redundant registrations when a system defines several Models.
fn register_model_derived_fields(ctx: &mut ExecutionContext, system: &System) {
    for model in system.models.values() {
        for (path, expr) in model.derived_attributes() {
            ctx.register_derived_field(path, expr);
        }
    }
}

fn outcome_record(result: &StepResult) -> StepOutcomeRecord {
    StepOutcomeRecord {
        step_id: result.step_id.clone(),
        success: result.success,
        data: result.data.clone(),
        error: result.error.clone(),
    }
}

#[cfg(test)]
#[path = "flow_engine_tests.rs"]
mod tests;
