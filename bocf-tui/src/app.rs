// Application state for the TUI, including a rolling window of recent states.

use std::collections::VecDeque;

use bocf_core::{State, Variable};
use crate::backend::CellBackend;

pub const MAX_STEPS_PER_TICK: usize = 5_000;

pub struct App<B: CellBackend> {
    pub backend: B,
    pub tick: u64,
    pub window: usize,                 // number of samples kept for the chart
    pub trace: VecDeque<(f64, State)>, // (time, state), oldest first
    pub steps_per_tick: usize,
    pub running: bool,
}

impl<B: CellBackend> App<B> {
    pub fn new(backend: B, window: usize, steps_per_tick: usize) -> Self {
        Self {
            backend,
            tick: 0,
            window,
            trace: VecDeque::with_capacity(window),
            steps_per_tick: steps_per_tick.clamp(1, MAX_STEPS_PER_TICK),
            running: false,
        }
    }

    pub fn toggle_running(&mut self) {
        self.running = !self.running;
    }

    pub fn faster(&mut self) {
        self.steps_per_tick = (self.steps_per_tick * 2).min(MAX_STEPS_PER_TICK);
    }

    pub fn slower(&mut self) {
        self.steps_per_tick = (self.steps_per_tick / 2).max(1);
    }

    /// Advance the model by `steps_per_tick` steps, sampling into the window.
    pub fn step(&mut self) {
        for _ in 0..self.steps_per_tick {
            let sample = self.backend.step();
            if self.trace.len() == self.window {
                self.trace.pop_front();
            }
            self.trace.push_back(sample);
        }
        self.tick = self.tick.saturating_add(1);
    }

    /// Chart points of one variable.
    pub fn series(&self, var: Variable) -> Vec<(f64, f64)> {
        self.trace.iter().map(|(t, s)| (*t, s.get(var))).collect()
    }

    /// Time span covered by the window.
    pub fn time_bounds(&self) -> [f64; 2] {
        match (self.trace.front(), self.trace.back()) {
            (Some((t0, _)), Some((t1, _))) if t1 > t0 => [*t0, *t1],
            (Some((t0, _)), _) => [*t0, *t0 + self.backend.dt()],
            _ => [0.0, self.backend.dt() * self.window as f64],
        }
    }

    pub fn time(&self) -> f64 {
        self.trace.back().map_or(0.0, |(t, _)| *t)
    }
}
