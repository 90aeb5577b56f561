//! External pacing current injected into `du/dt`.

/// The exclusive end is pulled in by a few ULPs so that `t_start + duration`
/// rounding (0.1 + 0.2 != 0.3) does not keep the pulse on at the boundary.
const EDGE_ULPS: f64 = 4.0;

/// One rectangular pulse over the half-open window `[t_start, t_start + duration)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stimulation {
    pub t_start: f64,
    pub duration: f64,
    /// Added to `du/dt` while active. May be negative.
    pub amplitude: f64,
}

impl Stimulation {
    pub fn new(t_start: f64, duration: f64, amplitude: f64) -> Self {
        Self { t_start, duration, amplitude }
    }

    /// Exclusive end of the active window.
    #[inline]
    pub fn end(&self) -> f64 {
        self.t_start + self.duration
    }

    /// `amplitude` for `t_start <= t < end`, else zero. The start is compared
    /// exactly; only the end carries the ULP slack.
    pub fn value_at(&self, t: f64) -> f64 {
        let end = self.end();
        let eps = EDGE_ULPS * f64::EPSILON * end.abs().max(1.0);
        if self.t_start <= t && t < end - eps {
            self.amplitude
        } else {
            0.0
        }
    }

    /// Regular pacing: `count` identical pulses every `period`, the first at `t_start`.
    pub fn train(t_start: f64, duration: f64, amplitude: f64, period: f64, count: usize) -> Vec<Self> {
        (0..count)
            .map(|k| Self::new(t_start + period * k as f64, duration, amplitude))
            .collect()
    }

    /// S1-S2 restitution protocol: an S1 train followed by one premature S2
    /// pulse `s2_interval` after the last S1.
    pub fn s1_s2(
        t_start: f64,
        duration: f64,
        amplitude: f64,
        s1_period: f64,
        s1_count: usize,
        s2_interval: f64,
    ) -> Vec<Self> {
        let mut stims = Self::train(t_start, duration, amplitude, s1_period, s1_count);
        let last = stims.last().map_or(t_start - s2_interval, |s| s.t_start);
        stims.push(Self::new(last + s2_interval, duration, amplitude));
        stims
    }
}

/// Sum of every protocol entry active at `t`; overlapping windows add.
#[inline]
pub fn total_at(stimulations: &[Stimulation], t: f64) -> f64 {
    stimulations.iter().map(|s| s.value_at(t)).sum()
}
