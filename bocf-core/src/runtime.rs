//! 0D runtime: owns one cell's state, parameters and history, and advances
//! them with fixed-step explicit Euler.

use crate::kinetics;
use crate::stimulus::total_at;
use crate::{History, Parameters, State, Stimulation};

/// Advance one cell by `dt` from `state`.
///
/// All four variables are updated from start-of-step values. `stimulus` is
/// added to `du/dt`; a tissue solver passes its external current plus
/// diffusion here and calls this once per cell per timestep.
#[inline]
pub fn euler_step(state: &State, params: &Parameters, dt: f64, stimulus: f64) -> State {
    let d = kinetics::evaluate(state, params, stimulus);
    State {
        u: state.u + dt * d.du,
        v: state.v + dt * d.dv,
        w: state.w + dt * d.dw,
        s: state.s + dt * d.ds,
    }
}

/// Single-cell simulation of the minimal ventricular model.
///
/// Lifecycle: constructed with defaults, then driven by [`step`](Self::step)
/// or [`run`](Self::run). There is no validation: a non-positive `dt`, zero
/// time constants or an unstable step size propagate into the recorded
/// states.
#[derive(Clone, Debug)]
pub struct BuenoOrovio0D {
    dt: f64,
    stimulations: Vec<Stimulation>,
    parameters: Parameters,
    state: State,
    history: History,
    steps: usize,
}

impl BuenoOrovio0D {
    /// EPI parameters, resting initial state, empty history.
    pub fn new(dt: f64, stimulations: Vec<Stimulation>) -> Self {
        Self {
            dt,
            stimulations,
            parameters: Parameters::default(),
            state: State::default(),
            history: History::new(),
            steps: 0,
        }
    }

    pub fn with_parameters(mut self, parameters: Parameters) -> Self {
        self.parameters = parameters;
        self
    }

    pub fn with_state(mut self, state: State) -> Self {
        self.state = state;
        self
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    pub fn stimulations(&self) -> &[Stimulation] {
        &self.stimulations
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn into_history(self) -> History {
        self.history
    }

    /// Recorded steps taken so far.
    pub fn steps_taken(&self) -> usize {
        self.steps
    }

    /// Simulation time reached by the recorded steps.
    pub fn time(&self) -> f64 {
        History::time_of(self.steps, self.dt)
    }

    /// Advance the state by one step with the stimulus evaluated at `dt * i`.
    /// Does not record history.
    pub fn step(&mut self, i: usize) {
        let stimulus = total_at(&self.stimulations, self.dt * i as f64);
        self.state = euler_step(&self.state, &self.parameters, self.dt, stimulus);
    }

    /// Run for `round(t_max / dt)` steps, recording the state after each one.
    ///
    /// The step index continues from previous runs, so calling `run` twice
    /// advances time twice. `t_max` is not hit exactly when it is not a
    /// multiple of `dt`.
    pub fn run(&mut self, t_max: f64) {
        let n_steps = step_count(t_max, self.dt);
        self.history.reserve(n_steps);
        for _ in 0..n_steps {
            self.advance();
        }
    }

    /// Take the next step of the run and record it. Returns the new state.
    pub fn advance(&mut self) -> &State {
        self.step(self.steps);
        self.steps += 1;
        self.history.push(self.state);
        &self.state
    }
}

/// `round(t_max / dt)` with ties to even (2.5 -> 2, 3.5 -> 4); non-finite
/// or negative ratios give zero steps.
#[inline]
pub fn step_count(t_max: f64, dt: f64) -> usize {
    // `as` saturates: NaN -> 0, negative -> 0, +inf -> usize::MAX
    (t_max / dt).round_ties_even() as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_count_rounds_to_nearest() {
        assert_eq!(step_count(1.0, 0.3), 3);
        assert_eq!(step_count(1.0, 0.4), 2);
        assert_eq!(step_count(0.5, 1.0), 0);
        assert_eq!(step_count(3.5, 1.0), 4);
        assert_eq!(step_count(300.0, 0.01), 30_000);
        assert_eq!(step_count(0.0, 0.01), 0);
        assert_eq!(step_count(1.0, -0.1), 0);
    }

    #[test]
    fn half_step_horizon_rounds_to_even() {
        let mut m = BuenoOrovio0D::new(0.4, Vec::new());
        m.run(1.0);
        assert_eq!(m.history().len(), 2);

        let mut m = BuenoOrovio0D::new(1.0, Vec::new());
        m.run(0.5);
        assert!(m.history().is_empty());
    }

    #[test]
    fn step_does_not_record() {
        let mut m = BuenoOrovio0D::new(0.01, vec![Stimulation::new(0.0, 1.0, 5.0)]);
        m.step(0);
        assert!(m.history().is_empty());
        assert_eq!(m.steps_taken(), 0);
        assert!((m.state().u - 0.05).abs() < 1e-12);
    }

    #[test]
    fn run_records_every_step_and_continues_time() {
        let mut m = BuenoOrovio0D::new(0.5, Vec::new());
        m.run(2.0);
        assert_eq!(m.history().len(), 4);
        m.run(1.0);
        assert_eq!(m.history().len(), 6);
        assert_eq!(m.steps_taken(), 6);
        assert_eq!(m.time(), 3.0);
    }

    #[test]
    fn advance_matches_run() {
        let stims = vec![Stimulation::new(0.1, 0.2, 5.0)];
        let mut a = BuenoOrovio0D::new(0.01, stims.clone());
        let mut b = BuenoOrovio0D::new(0.01, stims);
        a.run(1.0);
        for _ in 0..100 {
            b.advance();
        }
        assert_eq!(a.history(), b.history());
        assert_eq!(a.state(), b.state());
    }

    #[test]
    fn stimulus_is_sampled_at_step_start() {
        // window [1.0, 1.5) with dt 0.5 covers exactly step index 2
        let mut m = BuenoOrovio0D::new(0.5, vec![Stimulation::new(1.0, 0.5, 0.2)]);
        m.run(2.0);
        let u: Vec<f64> = m.history().iter().map(|s| s.u).collect();
        assert_eq!(u[0], 0.0);
        assert_eq!(u[1], 0.0);
        assert!((u[2] - 0.1).abs() < 1e-12);
        assert!(u[3] < u[2]);
    }

    #[test]
    fn euler_step_uses_start_of_step_values() {
        let p = Parameters::epi();
        let s0 = State::new(0.5, 1.0, 1.0, 0.5);
        let d = kinetics::evaluate(&s0, &p, 0.0);
        let s1 = euler_step(&s0, &p, 0.01, 0.0);
        assert_eq!(s1.u, s0.u + 0.01 * d.du);
        assert_eq!(s1.v, s0.v + 0.01 * d.dv);
        // J_fi and J_si were taken with the old v, w, s
        let j_fi = kinetics::j_fi(s0.u, s0.v, p.theta_v, p.u_u, p.tau_fi);
        assert_eq!(d.currents.j_fi, j_fi);
    }

    #[test]
    fn builders_override_defaults() {
        let m = BuenoOrovio0D::new(0.01, Vec::new())
            .with_parameters(Parameters::endo())
            .with_state(State::new(0.2, 0.5, 0.5, 0.1));
        assert_eq!(m.parameters().u_u, 1.56);
        assert_eq!(m.state().u, 0.2);
        assert!(m.stimulations().is_empty());
    }
}
