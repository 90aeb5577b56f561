//! Post-hoc inspection of a recorded run.
//!
//! - `check`: sanity check that surfaces numerical blow-up or non-physical
//!   gates after the fact, since the integrator never stops on its own.
//! - `action_potentials`: excursions of `u` above a detection threshold.
//! - `apd`: action-potential duration at a given repolarisation fraction.
//! - `restitution`: diastolic interval vs. following duration, for paced runs.

use bocf_core::{History, State, Variable};

use crate::error::{ModelError, ModelResult};

/// Admissible ranges for the sanity check.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SanityBounds {
    pub u_min: f64,
    pub u_max: f64,
    /// Slack around `[0, 1]` for `v`, `w` and `s`.
    pub gate_tolerance: f64,
}

impl Default for SanityBounds {
    fn default() -> Self {
        Self {
            u_min: -0.5,
            u_max: 2.0,
            gate_tolerance: 1e-6,
        }
    }
}

impl SanityBounds {
    fn admits(&self, var: Variable, value: f64) -> bool {
        match var {
            Variable::U => value >= self.u_min && value <= self.u_max,
            _ => value >= -self.gate_tolerance && value <= 1.0 + self.gate_tolerance,
        }
    }
}

/// First step at which the history stops being physical.
///
/// Non-finite values are reported as `Diverged`, finite values outside
/// `bounds` as `OutOfRange`.
pub fn check(history: &History, bounds: &SanityBounds) -> ModelResult<()> {
    for (step, state) in history.iter().enumerate() {
        if let Some(err) = violation(state, bounds, step) {
            log::debug!("sanity: {} ({:?})", err, state);
            return Err(err);
        }
    }
    Ok(())
}

/// Non-finite values take precedence over range violations.
pub(crate) fn violation(state: &State, bounds: &SanityBounds, step: usize) -> Option<ModelError> {
    if let Some(variable) = Variable::ALL.into_iter().find(|&v| !state.get(v).is_finite()) {
        return Some(ModelError::Diverged { step, variable });
    }
    Variable::ALL
        .into_iter()
        .find(|&v| !bounds.admits(v, state.get(v)))
        .map(|variable| ModelError::OutOfRange { step, variable })
}

/// One excursion of `u` at or above the detection threshold.
///
/// Indices are history steps; `end` is the first step back below the
/// threshold and is `None` if the run stopped mid-excursion.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ActionPotential {
    pub onset: usize,
    pub peak_step: usize,
    pub peak: f64,
    pub end: Option<usize>,
    /// Lowest `u` between the previous excursion (or the start) and `onset`
    pub rest: f64,
}

impl ActionPotential {
    pub fn onset_time(&self, dt: f64) -> f64 {
        History::time_of(self.onset, dt)
    }

    pub fn peak_time(&self, dt: f64) -> f64 {
        History::time_of(self.peak_step, dt)
    }

    /// Time spent at or above the detection threshold.
    pub fn duration(&self, dt: f64) -> Option<f64> {
        self.end.map(|end| (end - self.onset) as f64 * dt)
    }
}

/// Detect excursions of `u` through `threshold`.
pub fn action_potentials(history: &History, threshold: f64) -> Vec<ActionPotential> {
    let mut aps = Vec::new();
    let mut current: Option<ActionPotential> = None;
    let mut rest = f64::INFINITY;

    for (step, u) in history.column(Variable::U).enumerate() {
        if let Some(ap) = current.as_mut() {
            if u < threshold {
                ap.end = Some(step);
                aps.push(*ap);
                current = None;
                rest = u;
            } else if u > ap.peak {
                ap.peak = u;
                ap.peak_step = step;
            }
        } else if u >= threshold {
            current = Some(ActionPotential {
                onset: step,
                peak_step: step,
                peak: u,
                end: None,
                rest: if rest.is_finite() { rest } else { u },
            });
        } else {
            rest = rest.min(u);
        }
    }
    aps.extend(current);
    aps
}

/// Duration at `fraction` repolarisation (0.9 for APD90).
///
/// Measured between the upstroke and downstroke crossings of
/// `rest + (1 - fraction) * (peak - rest)`. `None` when the downstroke
/// crossing is not in the history, including when `ap` was detected on a
/// longer history than `history`.
pub fn apd(history: &History, ap: &ActionPotential, dt: f64, fraction: f64) -> Option<f64> {
    let u = history.as_slice();
    let level = ap.rest + (1.0 - fraction) * (ap.peak - ap.rest);

    let mut start = ap.onset.min(ap.peak_step).min(u.len());
    while start > 0 && u[start - 1].u >= level {
        start -= 1;
    }
    let end = (ap.peak_step..u.len()).find(|&i| u[i].u < level)?;
    Some((end - start) as f64 * dt)
}

/// Diastolic interval preceding an action potential and that potential's duration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RestitutionPoint {
    pub diastolic_interval: f64,
    pub duration: f64,
}

/// Restitution pairs from consecutive complete action potentials.
pub fn restitution(aps: &[ActionPotential], dt: f64) -> Vec<RestitutionPoint> {
    aps.windows(2)
        .filter_map(|pair| {
            let prev_end = pair[0].end?;
            let duration = pair[1].duration(dt)?;
            Some(RestitutionPoint {
                diastolic_interval: (pair[1].onset - prev_end) as f64 * dt,
                duration,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use bocf_core::{BuenoOrovio0D, Stimulation};

    const DT: f64 = 0.01;

    fn single_beat() -> BuenoOrovio0D {
        let mut m = BuenoOrovio0D::new(DT, vec![Stimulation::new(0.1, 0.2, 5.0)]);
        m.run(300.0);
        m
    }

    #[test]
    fn reference_beat_passes_sanity_check() {
        let m = single_beat();
        assert!(check(m.history(), &SanityBounds::default()).is_ok());
    }

    #[test]
    fn oversized_step_is_flagged() {
        let mut m = BuenoOrovio0D::new(1.0, vec![Stimulation::new(0.0, 2.0, 5.0)]);
        m.run(300.0);
        match check(m.history(), &SanityBounds::default()) {
            Err(ModelError::OutOfRange { .. }) | Err(ModelError::Diverged { .. }) => {}
            other => panic!("expected a range failure, got {:?}", other),
        }
    }

    #[test]
    fn nan_is_reported_as_divergence() {
        let mut params = bocf_core::Parameters::epi();
        params.tau_o1 = 0.0;
        let mut m = BuenoOrovio0D::new(DT, Vec::new())
            .with_parameters(params)
            .with_state(bocf_core::State::new(0.001, 1.0, 1.0, 0.0));
        m.run(0.05);
        assert_eq!(
            check(m.history(), &SanityBounds::default()),
            Err(ModelError::Diverged { step: 0, variable: Variable::U })
        );
    }

    #[test]
    fn one_action_potential_with_expected_shape() {
        let m = single_beat();
        let aps = action_potentials(m.history(), 0.3);
        assert_eq!(aps.len(), 1);
        let ap = aps[0];
        assert!(ap.onset_time(DT) < 0.5);
        assert!(ap.peak > 1.4 && ap.peak < 1.55);
        assert!(ap.peak_time(DT) < 2.0);
        assert_eq!(ap.rest, 0.0);
        let d = ap.duration(DT).unwrap();
        assert!(d > 255.0 && d < 275.0, "duration {d}");
    }

    #[test]
    fn apd90_exceeds_apd50() {
        let m = single_beat();
        let ap = action_potentials(m.history(), 0.3)[0];
        let apd50 = apd(m.history(), &ap, DT, 0.5).unwrap();
        let apd90 = apd(m.history(), &ap, DT, 0.9).unwrap();
        assert!(apd50 > 215.0 && apd50 < 235.0, "apd50 {apd50}");
        assert!(apd90 > 265.0 && apd90 < 280.0, "apd90 {apd90}");
    }

    #[test]
    fn truncated_run_leaves_end_open() {
        let mut m = BuenoOrovio0D::new(DT, vec![Stimulation::new(0.1, 0.2, 5.0)]);
        m.run(50.0);
        let aps = action_potentials(m.history(), 0.3);
        assert_eq!(aps.len(), 1);
        assert_eq!(aps[0].end, None);
        assert_eq!(aps[0].duration(DT), None);
        assert_eq!(apd(m.history(), &aps[0], DT, 0.9), None);
    }

    #[test]
    fn apd_on_shorter_history_is_none() {
        let full = single_beat();
        let ap = action_potentials(full.history(), 0.3)[0];

        let mut head = BuenoOrovio0D::new(DT, vec![Stimulation::new(0.1, 0.2, 5.0)]);
        head.run(0.1);
        assert!(head.history().len() < ap.onset);
        assert_eq!(apd(head.history(), &ap, DT, 0.9), None);
        assert_eq!(apd(&History::new(), &ap, DT, 0.5), None);
    }

    #[test]
    fn shorter_diastolic_interval_shortens_next_beat() {
        let mut m = BuenoOrovio0D::new(DT, Stimulation::train(0.1, 0.2, 5.0, 400.0, 3));
        m.run(1200.0);
        let aps = action_potentials(m.history(), 0.3);
        assert_eq!(aps.len(), 3);
        let points = restitution(&aps, DT);
        assert_eq!(points.len(), 2);
        assert!(points[0].diastolic_interval < points[1].diastolic_interval);
        assert!(points[0].duration < points[1].duration);
        // paced beats are shorter than the first, fully rested one
        assert!(points[0].duration < aps[0].duration(DT).unwrap());
    }

    #[test]
    fn flat_history_has_no_excursions() {
        let mut m = BuenoOrovio0D::new(DT, Vec::new());
        m.run(10.0);
        assert!(action_potentials(m.history(), 0.3).is_empty());
        assert!(restitution(&[], DT).is_empty());
        assert_abs_diff_eq!(m.history().last().unwrap().u, 0.0);
    }
}
