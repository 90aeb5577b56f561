//! Instantaneous electrophysiological state of one cell.

/// The four model variables.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Variable {
    U,
    V,
    W,
    S,
}

impl Variable {
    pub const ALL: [Variable; 4] = [Variable::U, Variable::V, Variable::W, Variable::S];

    pub fn name(self) -> &'static str {
        match self {
            Variable::U => "u",
            Variable::V => "v",
            Variable::W => "w",
            Variable::S => "s",
        }
    }
}

/// State vector `(u, v, w, s)`.
///
/// `u` is the dimensionless transmembrane potential, `v`, `w` and `s` are
/// gating variables that stay in `[0, 1]` under physiological stimuli.
/// Nothing clamps them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct State {
    pub u: f64,
    pub v: f64,
    pub w: f64,
    pub s: f64,
}

impl Default for State {
    /// Fully repolarized resting state.
    fn default() -> Self {
        Self::RESTING
    }
}

impl State {
    pub const RESTING: State = State { u: 0.0, v: 1.0, w: 1.0, s: 0.0 };

    pub fn new(u: f64, v: f64, w: f64, s: f64) -> Self {
        Self { u, v, w, s }
    }

    #[inline]
    pub fn get(&self, var: Variable) -> f64 {
        match var {
            Variable::U => self.u,
            Variable::V => self.v,
            Variable::W => self.w,
            Variable::S => self.s,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.u.is_finite() && self.v.is_finite() && self.w.is_finite() && self.s.is_finite()
    }

    pub fn to_array(self) -> [f64; 4] {
        [self.u, self.v, self.w, self.s]
    }
}
