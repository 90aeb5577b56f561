//! Run configuration: preset selection, named parameter overrides, initial
//! state and stimulus protocol, plus an optional pre-flight check.
//!
//! The core accepts anything; `validate` is where a caller opts into
//! catching degenerate parameter sets and unstable step sizes up front.

use bocf_core::{BuenoOrovio0D, CellType, Parameters, State, Stimulation, PARAMETER_NAMES};

use crate::error::{ModelError, ModelResult};

/// Above `fastest / STABLE_FRACTION` a warning is logged.
const STABLE_FRACTION: f64 = 10.0;

#[derive(Clone, Debug, PartialEq)]
pub struct ModelConfig {
    pub dt: f64,
    pub t_max: f64,
    pub cell_type: CellType,
    pub initial_state: State,
    pub stimulations: Vec<Stimulation>,
    overrides: Vec<(&'static str, f64)>,
}

impl Default for ModelConfig {
    /// Single suprathreshold pulse on a resting EPI cell, 300 time units at dt = 0.01.
    fn default() -> Self {
        Self {
            dt: 0.01,
            t_max: 300.0,
            cell_type: CellType::Epi,
            initial_state: State::RESTING,
            stimulations: vec![Stimulation::new(0.1, 0.2, 5.0)],
            overrides: Vec::new(),
        }
    }
}

/// Canonical name for `name`, accepting the `w_inf_` alias.
fn canonical_name(name: &str) -> Option<&'static str> {
    if name == "w_inf_" {
        return Some("w_inf_star");
    }
    PARAMETER_NAMES.iter().copied().find(|&n| n == name)
}

/// Split `"name=value"` into its parts.
pub fn parse_assignment(text: &str) -> ModelResult<(&str, f64)> {
    let (name, value) = text
        .split_once('=')
        .ok_or(ModelError::InvalidInput("expected name=value"))?;
    let value: f64 = value
        .trim()
        .parse()
        .map_err(|_| ModelError::InvalidInput("value is not a number"))?;
    Ok((name.trim(), value))
}

impl ModelConfig {
    pub fn new(dt: f64, t_max: f64) -> Self {
        Self { dt, t_max, ..Self::default() }
    }

    /// Override one parameter of the preset. Later overrides of the same name win.
    pub fn set_parameter(&mut self, name: &str, value: f64) -> ModelResult<()> {
        let name = canonical_name(name).ok_or(ModelError::UnknownParameter)?;
        match self.overrides.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.overrides.push((name, value)),
        }
        Ok(())
    }

    /// Apply a `"name=value"` override.
    pub fn apply_assignment(&mut self, text: &str) -> ModelResult<()> {
        let (name, value) = parse_assignment(text)?;
        self.set_parameter(name, value)
    }

    pub fn overrides(&self) -> &[(&'static str, f64)] {
        &self.overrides
    }

    /// Preset for `cell_type` with every override applied.
    pub fn parameters(&self) -> Parameters {
        let mut params = Parameters::for_cell(self.cell_type);
        for &(name, value) in &self.overrides {
            if let Some(slot) = params.get_mut(name) {
                *slot = value;
            }
        }
        params
    }

    /// Check the configuration for the hazards the integrator does not guard:
    /// zero or negative time constants and step sizes that cannot be stable.
    pub fn validate(&self) -> ModelResult<()> {
        if !(self.dt.is_finite() && self.dt > 0.0) {
            return Err(ModelError::InvalidTimestep);
        }
        if !(self.t_max.is_finite() && self.t_max >= 0.0) {
            return Err(ModelError::InvalidInput("t_max must be finite and non-negative"));
        }

        let params = self.parameters();
        for (name, value) in params.iter() {
            if name == "u_o" {
                if !value.is_finite() {
                    return Err(ModelError::InvalidInput("u_o must be finite"));
                }
            } else if !(value.is_finite() && value > 0.0) {
                return Err(ModelError::NonPositiveParameter(name));
            }
        }

        for stim in &self.stimulations {
            if !(stim.t_start.is_finite() && stim.amplitude.is_finite()) {
                return Err(ModelError::InvalidStimulus("non-finite start or amplitude"));
            }
            if !(stim.duration.is_finite() && stim.duration >= 0.0) {
                return Err(ModelError::InvalidStimulus("duration must be non-negative"));
            }
        }

        if !self.initial_state.is_finite() {
            return Err(ModelError::InvalidInput("initial state must be finite"));
        }

        let fastest = params.fastest_time_constant();
        if self.dt >= fastest {
            return Err(ModelError::InvalidTimestep);
        }
        if self.dt > fastest / STABLE_FRACTION {
            log::warn!(
                "dt = {} is above a tenth of the fastest time constant ({}); expect overshoot",
                self.dt,
                fastest
            );
        }
        Ok(())
    }

    /// Build the model without checking anything.
    pub fn build(&self) -> BuenoOrovio0D {
        BuenoOrovio0D::new(self.dt, self.stimulations.clone())
            .with_parameters(self.parameters())
            .with_state(self.initial_state)
    }

    pub fn build_checked(&self) -> ModelResult<BuenoOrovio0D> {
        self.validate()?;
        log::debug!(
            "building {} cell: dt={}, {} stimulations, {} overrides",
            self.cell_type.name(),
            self.dt,
            self.stimulations.len(),
            self.overrides.len()
        );
        Ok(self.build())
    }
}
