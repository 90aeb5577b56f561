//! Fixed-capacity rolling trace for memory-bounded callers (feature "embedded").
//!
//! Keeps the most recent `N` states of a cell without allocating, e.g. for a
//! tissue solver that only needs a short look-back per cell.

use heapless::Deque;

use bocf_core::{State, Variable};

pub struct RecentTrace<const N: usize> {
    states: Deque<State, N>,
    /// Total states ever pushed (not just the retained ones)
    pushed: usize,
}

impl<const N: usize> Default for RecentTrace<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> RecentTrace<N> {
    pub const fn new() -> Self {
        Self { states: Deque::new(), pushed: 0 }
    }

    /// Append `state`, evicting the oldest one when full.
    pub fn push(&mut self, state: State) {
        if self.states.is_full() {
            let _ = self.states.pop_front();
        }
        // cannot fail: a slot was freed above
        let _ = self.states.push_back(state);
        self.pushed += 1;
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn total_pushed(&self) -> usize {
        self.pushed
    }

    pub fn latest(&self) -> Option<&State> {
        self.states.back()
    }

    /// Oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &State> + '_ {
        self.states.iter()
    }

    /// Largest retained value of `var`, if any.
    pub fn max_of(&self, var: Variable) -> Option<f64> {
        self.states.iter().map(|s| s.get(var)).reduce(f64::max)
    }
}

#[cfg(test)]
#[cfg(feature = "std")]
mod tests {
    use super::*;

    #[test]
    fn keeps_only_the_newest() {
        let mut trace: RecentTrace<3> = RecentTrace::new();
        assert!(trace.is_empty());
        for k in 0..5 {
            trace.push(State { u: k as f64, ..State::RESTING });
        }
        assert_eq!(trace.len(), 3);
        assert_eq!(trace.total_pushed(), 5);
        let us: Vec<f64> = trace.iter().map(|s| s.u).collect();
        assert_eq!(us, vec![2.0, 3.0, 4.0]);
        assert_eq!(trace.latest().map(|s| s.u), Some(4.0));
        assert_eq!(trace.max_of(Variable::U), Some(4.0));
    }

    #[test]
    fn follows_a_running_model() {
        use bocf_core::{BuenoOrovio0D, Stimulation};
        let mut model = BuenoOrovio0D::new(0.01, vec![Stimulation::new(0.1, 0.2, 5.0)]);
        let mut trace: RecentTrace<16> = RecentTrace::new();
        for _ in 0..100 {
            trace.push(*model.advance());
        }
        assert_eq!(trace.len(), 16);
        assert_eq!(trace.latest(), model.history().last());
    }
}
