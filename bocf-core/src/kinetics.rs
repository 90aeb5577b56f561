//! Kinetics: gate targets, threshold-switched time constants, the three
//! transmembrane currents and the right-hand side of the model.
//!
//! Every function here is pure and total on finite inputs. Two comparison
//! conventions coexist and must not be unified:
//! - branch selectors (`v_inf`, `tau_v_minus`, `tau_o`, `tau_s`, `d_v`, `d_w`)
//!   take the "below" branch only for strict `u - theta < 0`;
//! - current gates use the Heaviside step with `H(0) = 1`.
//!
//! `tau_w_minus` and `tau_so` are smooth tanh blends, not switches.

use crate::{Parameters, State};

/// Heaviside step, `1` for `x >= 0`.
#[inline]
pub fn heaviside(x: f64) -> f64 {
    if x >= 0.0 {
        1.0
    } else {
        0.0
    }
}

/// `tau_1 + (tau_2 - tau_1) * (1 + tanh(k * (u - u_mid))) / 2`
#[inline]
fn tanh_blend(u: f64, tau_1: f64, tau_2: f64, k: f64, u_mid: f64) -> f64 {
    tau_1 + (tau_2 - tau_1) * (1.0 + (k * (u - u_mid)).tanh()) / 2.0
}

/// Steady state of `v`: a binary step at `theta_v_m`.
#[inline]
pub fn steady_state_v(u: f64, theta_v_m: f64) -> f64 {
    if u < theta_v_m {
        1.0
    } else {
        0.0
    }
}

/// Steady state of `w`.
///
/// Below `theta_o` this is the affine `1 - u / tau_w_inf`; `tau_w_inf` is a
/// divisor of `u` here, not a relaxation time.
#[inline]
pub fn steady_state_w(u: f64, theta_o: f64, tau_w_inf: f64, w_inf_star: f64) -> f64 {
    if u - theta_o < 0.0 {
        1.0 - u / tau_w_inf
    } else {
        w_inf_star
    }
}

#[inline]
pub fn tau_v_minus(u: f64, theta_v_m: f64, tau_v1_m: f64, tau_v2_m: f64) -> f64 {
    if u - theta_v_m < 0.0 {
        tau_v1_m
    } else {
        tau_v2_m
    }
}

#[inline]
pub fn tau_w_minus(u: f64, tau_w1_m: f64, tau_w2_m: f64, k_w_m: f64, u_w_m: f64) -> f64 {
    tanh_blend(u, tau_w1_m, tau_w2_m, k_w_m, u_w_m)
}

#[inline]
pub fn tau_o(u: f64, tau_o1: f64, tau_o2: f64, theta_o: f64) -> f64 {
    if u - theta_o < 0.0 {
        tau_o1
    } else {
        tau_o2
    }
}

#[inline]
pub fn tau_so(u: f64, tau_so1: f64, tau_so2: f64, k_so: f64, u_so: f64) -> f64 {
    tanh_blend(u, tau_so1, tau_so2, k_so, u_so)
}

#[inline]
pub fn tau_s(u: f64, tau_s1: f64, tau_s2: f64, theta_w: f64) -> f64 {
    if u - theta_w < 0.0 {
        tau_s1
    } else {
        tau_s2
    }
}

/// `dv/dt`: relaxation to `v_inf` below `theta_v`, decay with `tau_v_p` above.
#[inline]
pub fn d_v(v: f64, u: f64, theta_v: f64, v_inf: f64, tau_v_m: f64, tau_v_p: f64) -> f64 {
    if u - theta_v < 0.0 {
        (v_inf - v) / tau_v_m
    } else {
        -v / tau_v_p
    }
}

/// `dw/dt`, same form as [`d_v`].
#[inline]
pub fn d_w(w: f64, u: f64, theta_w: f64, w_inf: f64, tau_w_m: f64, tau_w_p: f64) -> f64 {
    if u - theta_w < 0.0 {
        (w_inf - w) / tau_w_m
    } else {
        -w / tau_w_p
    }
}

/// `ds/dt`: relaxation toward a sigmoid of `u`, no threshold branch.
#[inline]
pub fn d_s(s: f64, u: f64, tau_s: f64, k_s: f64, u_s: f64) -> f64 {
    ((1.0 + (k_s * (u - u_s)).tanh()) / 2.0 - s) / tau_s
}

/// Fast inward current.
#[inline]
pub fn j_fi(u: f64, v: f64, theta_v: f64, u_u: f64, tau_fi: f64) -> f64 {
    -v * heaviside(u - theta_v) * (u - theta_v) * (u_u - u) / tau_fi
}

/// Slow outward current: linear leak below `theta_w`, constant above.
#[inline]
pub fn j_so(u: f64, u_o: f64, theta_w: f64, tau_o: f64, tau_so: f64) -> f64 {
    let h = heaviside(u - theta_w);
    (u - u_o) * (1.0 - h) / tau_o + h / tau_so
}

/// Slow inward current, gated by `w` and `s` above `theta_w`.
#[inline]
pub fn j_si(u: f64, w: f64, s: f64, theta_w: f64, tau_si: f64) -> f64 {
    -heaviside(u - theta_w) * w * s / tau_si
}

/// Reaction term of `du/dt`, before any stimulus is added.
#[inline]
pub fn d_u(j_fi: f64, j_so: f64, j_si: f64) -> f64 {
    -(j_fi + j_so + j_si)
}

/// The three transmembrane currents at one state.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Currents {
    pub j_fi: f64,
    pub j_so: f64,
    pub j_si: f64,
}

impl Currents {
    pub fn at(state: &State, p: &Parameters) -> Self {
        let u = state.u;
        let tau_o = tau_o(u, p.tau_o1, p.tau_o2, p.theta_o);
        let tau_so = tau_so(u, p.tau_so1, p.tau_so2, p.k_so, p.u_so);
        Self {
            j_fi: j_fi(u, state.v, p.theta_v, p.u_u, p.tau_fi),
            j_so: j_so(u, p.u_o, p.theta_w, tau_o, tau_so),
            j_si: j_si(u, state.w, state.s, p.theta_w, p.tau_si),
        }
    }

    #[inline]
    pub fn reaction(&self) -> f64 {
        d_u(self.j_fi, self.j_so, self.j_si)
    }
}

/// Time derivatives of all four variables at one state.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Derivatives {
    pub du: f64,
    pub dv: f64,
    pub dw: f64,
    pub ds: f64,
    pub currents: Currents,
}

/// Evaluate the full right-hand side at `state`.
///
/// `stimulus` is added to `du` as is; tissue callers can fold their
/// diffusion term into it.
pub fn evaluate(state: &State, p: &Parameters, stimulus: f64) -> Derivatives {
    let State { u, v, w, s } = *state;

    let v_inf = steady_state_v(u, p.theta_v_m);
    let tau_v_m = tau_v_minus(u, p.theta_v_m, p.tau_v1_m, p.tau_v2_m);
    let dv = d_v(v, u, p.theta_v, v_inf, tau_v_m, p.tau_v_p);

    let w_inf = steady_state_w(u, p.theta_o, p.tau_w_inf, p.w_inf_star);
    let tau_w_m = tau_w_minus(u, p.tau_w1_m, p.tau_w2_m, p.k_w_m, p.u_w_m);
    let dw = d_w(w, u, p.theta_w, w_inf, tau_w_m, p.tau_w_p);

    let tau_s = tau_s(u, p.tau_s1, p.tau_s2, p.theta_w);
    let ds = d_s(s, u, tau_s, p.k_s, p.u_s);

    let currents = Currents::at(state, p);

    Derivatives {
        du: currents.reaction() + stimulus,
        dv,
        dw,
        ds,
        currents,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn gate_uses_ge_while_v_inf_uses_strict_lt() {
        let p = Parameters::epi();
        // H(0) == 1: J_fi is switched on exactly at theta_v (its magnitude is 0 there)
        assert_eq!(heaviside(0.0), 1.0);
        assert_eq!(heaviside(-1e-12), 0.0);
        let u = p.theta_v + 1e-9;
        assert!(j_fi(u, 1.0, p.theta_v, p.u_u, p.tau_fi) < 0.0);

        assert_eq!(steady_state_v(p.theta_v_m, p.theta_v_m), 0.0);
        assert_eq!(steady_state_v(p.theta_v_m - 1e-12, p.theta_v_m), 1.0);
    }

    #[test]
    fn slow_currents_switch_on_at_theta_w() {
        let p = Parameters::epi();
        let below = j_so(p.theta_w - 1e-9, p.u_o, p.theta_w, 6.0, 2.0);
        let at = j_so(p.theta_w, p.u_o, p.theta_w, 6.0, 2.0);
        assert_abs_diff_eq!(below, (p.theta_w - 1e-9) / 6.0, epsilon = 1e-15);
        assert_eq!(at, 0.5);
        assert_eq!(j_si(p.theta_w - 1e-9, 1.0, 1.0, p.theta_w, p.tau_si), 0.0);
        assert_abs_diff_eq!(j_si(p.theta_w, 1.0, 1.0, p.theta_w, p.tau_si), -1.0 / p.tau_si);
    }

    #[test]
    fn hard_switches_pick_below_only_strictly() {
        assert_eq!(tau_v_minus(0.0059, 0.006, 60.0, 1150.0), 60.0);
        assert_eq!(tau_v_minus(0.006, 0.006, 60.0, 1150.0), 1150.0);
        assert_eq!(tau_o(0.006, 400.0, 6.0, 0.006), 6.0);
        assert_eq!(tau_s(0.13, 2.7342, 16.0, 0.13), 16.0);
        assert_eq!(tau_s(0.12, 2.7342, 16.0, 0.13), 2.7342);
    }

    #[test]
    fn w_inf_divides_u_by_tau_w_inf() {
        assert_abs_diff_eq!(steady_state_w(0.0035, 0.006, 0.07, 0.94), 0.95, epsilon = 1e-12);
        assert_eq!(steady_state_w(0.006, 0.006, 0.07, 0.94), 0.94);
    }

    #[test]
    fn tanh_blends_are_smooth() {
        // At the midpoint the blend sits halfway between the two constants.
        assert_abs_diff_eq!(tau_w_minus(0.03, 60.0, 15.0, 65.0, 0.03), 37.5, epsilon = 1e-12);
        assert_abs_diff_eq!(tau_so(0.65, 30.0181, 0.9957, 2.0458, 0.65), 15.5069, epsilon = 1e-12);
        // Far from it they approach the endpoints without switching.
        assert_abs_diff_eq!(tau_w_minus(-1.0, 60.0, 15.0, 65.0, 0.03), 60.0, epsilon = 1e-9);
        assert_abs_diff_eq!(tau_w_minus(1.0, 60.0, 15.0, 65.0, 0.03), 15.0, epsilon = 1e-9);
    }

    #[test]
    fn v_decays_with_tau_v_p_at_threshold() {
        assert_abs_diff_eq!(d_v(0.5, 0.3, 0.3, 1.0, 60.0, 1.4506), -0.5 / 1.4506);
        assert_abs_diff_eq!(d_v(0.5, 0.29, 0.3, 1.0, 60.0, 1.4506), 0.5 / 60.0);
        assert_abs_diff_eq!(d_w(0.5, 0.13, 0.13, 0.94, 15.0, 200.0), -0.5 / 200.0);
    }

    #[test]
    fn s_relaxes_to_half_at_u_s() {
        assert_abs_diff_eq!(d_s(0.0, 0.9087, 2.0, 2.0994, 0.9087), 0.25);
    }

    #[test]
    fn resting_state_has_no_u_v_w_drift() {
        let d = evaluate(&State::RESTING, &Parameters::epi(), 0.0);
        assert_eq!(d.du, 0.0);
        assert_eq!(d.dv, 0.0);
        assert_eq!(d.dw, 0.0);
        assert_eq!(d.currents, Currents::default());
        // s relaxes toward its small resting sigmoid value
        assert!(d.ds > 0.0 && d.ds < 0.01);
    }

    #[test]
    fn stimulus_adds_to_du_only() {
        let p = Parameters::epi();
        let free = evaluate(&State::RESTING, &p, 0.0);
        let forced = evaluate(&State::RESTING, &p, 5.0);
        assert_eq!(forced.du, free.du + 5.0);
        assert_eq!((forced.dv, forced.dw, forced.ds), (free.dv, free.dw, free.ds));
    }

    #[test]
    fn reaction_is_negated_sum() {
        assert_eq!(d_u(1.0, -2.0, 0.5), 0.5);
        let c = Currents { j_fi: -3.0, j_so: 1.0, j_si: -0.25 };
        assert_eq!(c.reaction(), 2.25);
    }
}
