//! Append-only time history of state snapshots.

use crate::{State, Variable};

/// One snapshot per completed step, in step order.
///
/// Only the integrator appends; callers get read access and derive time as
/// `step_index * dt`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct History {
    states: Vec<State>,
}

impl History {
    pub fn new() -> Self {
        Self { states: Vec::new() }
    }

    #[inline]
    pub(crate) fn push(&mut self, state: State) {
        self.states.push(state);
    }

    pub(crate) fn reserve(&mut self, additional: usize) {
        self.states.reserve(additional);
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn get(&self, step: usize) -> Option<&State> {
        self.states.get(step)
    }

    pub fn last(&self) -> Option<&State> {
        self.states.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, State> {
        self.states.iter()
    }

    pub fn as_slice(&self) -> &[State] {
        &self.states
    }

    /// Values of one variable across the run.
    pub fn column(&self, var: Variable) -> impl Iterator<Item = f64> + '_ {
        self.states.iter().map(move |s| s.get(var))
    }

    /// Simulation time of the recorded step `step`.
    #[inline]
    pub fn time_of(step: usize, dt: f64) -> f64 {
        step as f64 * dt
    }

    pub fn into_vec(self) -> Vec<State> {
        self.states
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a State;
    type IntoIter = std::slice::Iter<'a, State>;

    fn into_iter(self) -> Self::IntoIter {
        self.states.iter()
    }
}
