//! Supervised runs on top of bocf-core's runtime:
//! - optional step budget (stop early, keep what was recorded)
//! - optional per-step sanity bounds (stop at the first non-physical state)
//! - observer hook called after every step, able to cancel the run
//! - independent runs of several configurations on scoped threads
//!
//! Semantics:
//! - steps are recorded exactly as `BuenoOrovio0D::run` would record them, so
//!   an unlimited supervised run produces the same history.

use core::ops::ControlFlow;

use bocf_core::{step_count, BuenoOrovio0D, State};

use crate::analysis::{violation, SanityBounds};
use crate::config::ModelConfig;
use crate::error::{ModelError, ModelResult};

#[derive(Clone, Copy, Debug, Default)]
pub struct RunLimits {
    /// Stop after this many steps of the current run
    pub max_steps: Option<usize>,
    /// Fail as soon as a recorded state leaves these bounds
    pub bounds: Option<SanityBounds>,
}

/// Called after each recorded step. `Break` cancels the run.
pub trait StepObserver {
    fn on_step(&mut self, step: usize, time: f64, state: &State) -> ControlFlow<()>;
}

impl<F> StepObserver for F
where
    F: FnMut(usize, f64, &State) -> ControlFlow<()>,
{
    fn on_step(&mut self, step: usize, time: f64, state: &State) -> ControlFlow<()> {
        self(step, time, state)
    }
}

/// Observer that never interferes.
pub struct NoObserver;

impl StepObserver for NoObserver {
    fn on_step(&mut self, _step: usize, _time: f64, _state: &State) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopReason {
    /// All `round(t_max / dt)` steps were taken
    Completed,
    /// `RunLimits::max_steps` reached first
    StepBudget,
    /// The observer returned `Break`
    Cancelled,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunReport {
    /// Steps taken by this call
    pub steps: usize,
    pub stop: StopReason,
}

/// Run `model` toward `t_max` under `limits`, reporting each step to `observer`.
///
/// On a bounds violation the offending state is already recorded in the
/// history and the error carries its history index.
pub fn run_supervised<O: StepObserver>(
    model: &mut BuenoOrovio0D,
    t_max: f64,
    limits: RunLimits,
    observer: &mut O,
) -> ModelResult<RunReport> {
    let n_steps = step_count(t_max, model.dt());
    let dt = model.dt();

    for taken in 0..n_steps {
        if let Some(max) = limits.max_steps {
            if taken >= max {
                log::debug!("run stopped by step budget after {} steps", taken);
                return Ok(RunReport { steps: taken, stop: StopReason::StepBudget });
            }
        }

        let state = *model.advance();
        let index = model.steps_taken() - 1;

        if let Some(bounds) = limits.bounds.as_ref() {
            if let Some(err) = violation(&state, bounds, index) {
                log::warn!("run aborted: {} (t = {})", err, index as f64 * dt);
                return Err(err);
            }
        }

        if observer.on_step(index, model.time(), &state).is_break() {
            log::debug!("run cancelled by observer at step {}", index);
            return Ok(RunReport { steps: taken + 1, stop: StopReason::Cancelled });
        }
    }

    Ok(RunReport { steps: n_steps, stop: StopReason::Completed })
}

/// Run one model per configuration, each on its own scoped thread.
///
/// Every run owns its state, parameters and history; results come back in
/// configuration order. Configurations failing `validate` are not run.
pub fn run_independent(configs: &[ModelConfig]) -> Vec<ModelResult<BuenoOrovio0D>> {
    std::thread::scope(|scope| {
        let handles: Vec<_> = configs
            .iter()
            .map(|cfg| {
                scope.spawn(move || -> ModelResult<BuenoOrovio0D> {
                    let mut model = cfg.build_checked()?;
                    model.run(cfg.t_max);
                    Ok(model)
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().unwrap_or(Err(ModelError::Other("worker panicked"))))
            .collect()
    })
}
