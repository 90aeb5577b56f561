//! Parameter sets of the minimal ventricular model.
//!
//! Values are the published fits of Bueno-Orovio, Cherry & Fenton (2008),
//! "Minimal model for human ventricular action potentials in tissue",
//! J Theor Biol 253(3), 544-560. EPI is the default.

/// Cell types with a published parameter fit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum CellType {
    /// Epicardial
    #[default]
    Epi,
    /// Endocardial
    Endo,
    /// Midmyocardial (M cell)
    Mid,
    /// Fit to the Priebe-Beuckelmann model
    Pb,
}

impl CellType {
    pub const ALL: [CellType; 4] = [CellType::Epi, CellType::Endo, CellType::Mid, CellType::Pb];

    pub fn name(self) -> &'static str {
        match self {
            CellType::Epi => "epi",
            CellType::Endo => "endo",
            CellType::Mid => "mid",
            CellType::Pb => "pb",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name().eq_ignore_ascii_case(name))
    }
}

/// The 28 scalar constants governing the model kinetics.
///
/// Fixed for the lifetime of a run: the integrator owns its copy and only
/// hands out shared references.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Parameters {
    /// Resting (reference) potential
    pub u_o: f64,
    /// Upper potential reached by the fast inward current
    pub u_u: f64,
    pub theta_v: f64,
    pub theta_w: f64,
    pub theta_v_m: f64,
    pub theta_o: f64,
    pub tau_v1_m: f64,
    pub tau_v2_m: f64,
    pub tau_v_p: f64,
    pub tau_w1_m: f64,
    pub tau_w2_m: f64,
    pub k_w_m: f64,
    pub u_w_m: f64,
    pub tau_w_p: f64,
    pub tau_fi: f64,
    pub tau_o1: f64,
    pub tau_o2: f64,
    pub tau_so1: f64,
    pub tau_so2: f64,
    pub k_so: f64,
    pub u_so: f64,
    pub tau_s1: f64,
    pub tau_s2: f64,
    pub k_s: f64,
    pub u_s: f64,
    pub tau_si: f64,
    /// Slope divisor of w_inf below `theta_o`. Not a relaxation time.
    pub tau_w_inf: f64,
    /// Asymptote of w_inf at or above `theta_o`
    pub w_inf_star: f64,
}

/// Canonical parameter names, in declaration order.
pub const PARAMETER_NAMES: [&str; 28] = [
    "u_o", "u_u", "theta_v", "theta_w", "theta_v_m", "theta_o", "tau_v1_m", "tau_v2_m",
    "tau_v_p", "tau_w1_m", "tau_w2_m", "k_w_m", "u_w_m", "tau_w_p", "tau_fi", "tau_o1",
    "tau_o2", "tau_so1", "tau_so2", "k_so", "u_so", "tau_s1", "tau_s2", "k_s", "u_s",
    "tau_si", "tau_w_inf", "w_inf_star",
];

impl Default for Parameters {
    fn default() -> Self {
        Self::epi()
    }
}

impl Parameters {
    pub fn epi() -> Self {
        Self {
            u_o: 0.0,
            u_u: 1.55,
            theta_v: 0.3,
            theta_w: 0.13,
            theta_v_m: 0.006,
            theta_o: 0.006,
            tau_v1_m: 60.0,
            tau_v2_m: 1150.0,
            tau_v_p: 1.4506,
            tau_w1_m: 60.0,
            tau_w2_m: 15.0,
            k_w_m: 65.0,
            u_w_m: 0.03,
            tau_w_p: 200.0,
            tau_fi: 0.11,
            tau_o1: 400.0,
            tau_o2: 6.0,
            tau_so1: 30.0181,
            tau_so2: 0.9957,
            k_so: 2.0458,
            u_so: 0.65,
            tau_s1: 2.7342,
            tau_s2: 16.0,
            k_s: 2.0994,
            u_s: 0.9087,
            tau_si: 1.8875,
            tau_w_inf: 0.07,
            w_inf_star: 0.94,
        }
    }

    pub fn endo() -> Self {
        Self {
            u_o: 0.0,
            u_u: 1.56,
            theta_v: 0.3,
            theta_w: 0.13,
            theta_v_m: 0.2,
            theta_o: 0.006,
            tau_v1_m: 75.0,
            tau_v2_m: 10.0,
            tau_v_p: 1.4506,
            tau_w1_m: 6.0,
            tau_w2_m: 140.0,
            k_w_m: 200.0,
            u_w_m: 0.016,
            tau_w_p: 280.0,
            tau_fi: 0.1,
            tau_o1: 470.0,
            tau_o2: 6.0,
            tau_so1: 40.0,
            tau_so2: 1.2,
            k_so: 2.0,
            u_so: 0.65,
            tau_s1: 2.7342,
            tau_s2: 2.0,
            k_s: 2.0994,
            u_s: 0.9087,
            tau_si: 2.9013,
            tau_w_inf: 0.0273,
            w_inf_star: 0.78,
        }
    }

    pub fn mid_myocardial() -> Self {
        Self {
            u_o: 0.0,
            u_u: 1.61,
            theta_v: 0.3,
            theta_w: 0.13,
            theta_v_m: 0.1,
            theta_o: 0.005,
            tau_v1_m: 80.0,
            tau_v2_m: 1.4506,
            tau_v_p: 1.4506,
            tau_w1_m: 70.0,
            tau_w2_m: 8.0,
            k_w_m: 200.0,
            u_w_m: 0.016,
            tau_w_p: 280.0,
            tau_fi: 0.078,
            tau_o1: 410.0,
            tau_o2: 7.0,
            tau_so1: 91.0,
            tau_so2: 0.8,
            k_so: 2.1,
            u_so: 0.6,
            tau_s1: 2.7342,
            tau_s2: 4.0,
            k_s: 2.0994,
            u_s: 0.9087,
            tau_si: 3.3849,
            tau_w_inf: 0.01,
            w_inf_star: 0.5,
        }
    }

    pub fn pb() -> Self {
        Self {
            u_o: 0.0,
            u_u: 1.45,
            theta_v: 0.35,
            theta_w: 0.13,
            theta_v_m: 0.175,
            theta_o: 0.006,
            tau_v1_m: 10.0,
            tau_v2_m: 1150.0,
            tau_v_p: 1.4506,
            tau_w1_m: 140.0,
            tau_w2_m: 6.25,
            k_w_m: 65.0,
            u_w_m: 0.015,
            tau_w_p: 326.0,
            tau_fi: 0.105,
            tau_o1: 400.0,
            tau_o2: 6.0,
            tau_so1: 30.0181,
            tau_so2: 0.9957,
            k_so: 2.0458,
            u_so: 0.65,
            tau_s1: 2.7342,
            tau_s2: 16.0,
            k_s: 2.0994,
            u_s: 0.9087,
            tau_si: 1.8875,
            tau_w_inf: 0.175,
            w_inf_star: 0.9,
        }
    }

    pub fn for_cell(cell: CellType) -> Self {
        match cell {
            CellType::Epi => Self::epi(),
            CellType::Endo => Self::endo(),
            CellType::Mid => Self::mid_myocardial(),
            CellType::Pb => Self::pb(),
        }
    }

    /// Look up a parameter by name. `w_inf_` is accepted for `w_inf_star`.
    pub fn get(&self, name: &str) -> Option<f64> {
        let p = self;
        Some(match name {
            "u_o" => p.u_o,
            "u_u" => p.u_u,
            "theta_v" => p.theta_v,
            "theta_w" => p.theta_w,
            "theta_v_m" => p.theta_v_m,
            "theta_o" => p.theta_o,
            "tau_v1_m" => p.tau_v1_m,
            "tau_v2_m" => p.tau_v2_m,
            "tau_v_p" => p.tau_v_p,
            "tau_w1_m" => p.tau_w1_m,
            "tau_w2_m" => p.tau_w2_m,
            "k_w_m" => p.k_w_m,
            "u_w_m" => p.u_w_m,
            "tau_w_p" => p.tau_w_p,
            "tau_fi" => p.tau_fi,
            "tau_o1" => p.tau_o1,
            "tau_o2" => p.tau_o2,
            "tau_so1" => p.tau_so1,
            "tau_so2" => p.tau_so2,
            "k_so" => p.k_so,
            "u_so" => p.u_so,
            "tau_s1" => p.tau_s1,
            "tau_s2" => p.tau_s2,
            "k_s" => p.k_s,
            "u_s" => p.u_s,
            "tau_si" => p.tau_si,
            "tau_w_inf" => p.tau_w_inf,
            "w_inf_star" | "w_inf_" => p.w_inf_star,
            _ => return None,
        })
    }

    /// Mutable access by name, for building overridden sets before a run.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut f64> {
        let p = self;
        Some(match name {
            "u_o" => &mut p.u_o,
            "u_u" => &mut p.u_u,
            "theta_v" => &mut p.theta_v,
            "theta_w" => &mut p.theta_w,
            "theta_v_m" => &mut p.theta_v_m,
            "theta_o" => &mut p.theta_o,
            "tau_v1_m" => &mut p.tau_v1_m,
            "tau_v2_m" => &mut p.tau_v2_m,
            "tau_v_p" => &mut p.tau_v_p,
            "tau_w1_m" => &mut p.tau_w1_m,
            "tau_w2_m" => &mut p.tau_w2_m,
            "k_w_m" => &mut p.k_w_m,
            "u_w_m" => &mut p.u_w_m,
            "tau_w_p" => &mut p.tau_w_p,
            "tau_fi" => &mut p.tau_fi,
            "tau_o1" => &mut p.tau_o1,
            "tau_o2" => &mut p.tau_o2,
            "tau_so1" => &mut p.tau_so1,
            "tau_so2" => &mut p.tau_so2,
            "k_so" => &mut p.k_so,
            "u_so" => &mut p.u_so,
            "tau_s1" => &mut p.tau_s1,
            "tau_s2" => &mut p.tau_s2,
            "k_s" => &mut p.k_s,
            "u_s" => &mut p.u_s,
            "tau_si" => &mut p.tau_si,
            "tau_w_inf" => &mut p.tau_w_inf,
            "w_inf_star" | "w_inf_" => &mut p.w_inf_star,
            _ => return None,
        })
    }

    /// (name, value) pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        PARAMETER_NAMES
            .iter()
            .filter_map(move |&name| self.get(name).map(|value| (name, value)))
    }

    /// Smallest time constant of the set. Explicit Euler needs `dt` well below it.
    pub fn fastest_time_constant(&self) -> f64 {
        [
            self.tau_v1_m,
            self.tau_v2_m,
            self.tau_v_p,
            self.tau_w1_m,
            self.tau_w2_m,
            self.tau_w_p,
            self.tau_fi,
            self.tau_o1,
            self.tau_o2,
            self.tau_so1,
            self.tau_so2,
            self.tau_s1,
            self.tau_s2,
            self.tau_si,
        ]
        .into_iter()
        .fold(f64::INFINITY, f64::min)
    }
}
