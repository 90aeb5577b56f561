// Backend abstraction for the TUI so different cell models can drive the chart.

use bocf_core::stimulus::total_at;
use bocf_core::{euler_step, BuenoOrovio0D, Parameters, State, Stimulation};

/// Common interface for any single-cell backend that can drive the TUI.
pub trait CellBackend {
    /// Advance by one timestep; returns the time reached and the new state.
    fn step(&mut self) -> (f64, State);
    /// Fixed timestep (x-axis scale).
    fn dt(&self) -> f64;
    /// Current state without stepping.
    fn state(&self) -> State;
    /// Short description for the status panel.
    fn label(&self) -> String;
}

/// Backend driven by bocf-core's Euler step directly, without keeping a history,
/// so an interactive session can run indefinitely.
pub struct CoreBackend {
    params: Parameters,
    stimulations: Vec<Stimulation>,
    dt: f64,
    state: State,
    step: usize,
    cell: &'static str,
}

impl CoreBackend {
    /// Take over the configuration of a freshly built model.
    pub fn from_model(model: &BuenoOrovio0D, cell: &'static str) -> Self {
        Self {
            params: *model.parameters(),
            stimulations: model.stimulations().to_vec(),
            dt: model.dt(),
            state: *model.state(),
            step: 0,
            cell,
        }
    }

    /// Simulation time of the next step.
    pub fn time(&self) -> f64 {
        self.step as f64 * self.dt
    }
}

impl CellBackend for CoreBackend {
    fn step(&mut self) -> (f64, State) {
        let stimulus = total_at(&self.stimulations, self.time());
        self.state = euler_step(&self.state, &self.params, self.dt, stimulus);
        self.step = self.step.saturating_add(1);
        (self.time(), self.state)
    }

    fn dt(&self) -> f64 {
        self.dt
    }

    fn state(&self) -> State {
        self.state
    }

    fn label(&self) -> String {
        format!("{} cell, dt = {}, {} stimuli", self.cell, self.dt, self.stimulations.len())
    }
}
