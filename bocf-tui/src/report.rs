// Headless mode: run to t_max, then print a summary of the recorded history.

use anyhow::{bail, Result};

use bocf_core::{BuenoOrovio0D, History, Variable};
use bocf_core_plus::{action_potentials, apd, check, restitution, SanityBounds};

pub fn run(mut model: BuenoOrovio0D, t_max: f64, threshold: f64) -> Result<()> {
    log::info!("running {} steps of dt = {}", bocf_core::step_count(t_max, model.dt()), model.dt());
    model.run(t_max);

    let dt = model.dt();
    let history = model.history();
    let last = history.last().copied().unwrap_or(*model.state());
    println!("steps: {}  t: {:.3}", history.len(), model.time());
    println!("final state: u={:.5} v={:.5} w={:.5} s={:.5}", last.u, last.v, last.w, last.s);

    if let Err(err) = check(history, &SanityBounds::default()) {
        if let bocf_core_plus::ModelError::Diverged { step, .. } | bocf_core_plus::ModelError::OutOfRange { step, .. } = err {
            log::error!("non-physical state at t = {:.3}", History::time_of(step, dt));
        }
        bail!("sanity check failed: {} (reduce --dt or check --set values)", err);
    }

    let peak = history.column(Variable::U).fold(f64::NEG_INFINITY, f64::max);
    println!("peak u: {:.5}", peak);

    let aps = action_potentials(history, threshold);
    println!("action potentials (u >= {}): {}", threshold, aps.len());
    for (k, ap) in aps.iter().enumerate() {
        let fmt_opt = |x: Option<f64>| x.map_or_else(|| "-".to_string(), |v| format!("{:.2}", v));
        println!(
            "  #{:<3} onset {:>9.2}  peak {:.4} at {:>9.2}  APD50 {:>8}  APD90 {:>8}",
            k + 1,
            ap.onset_time(dt),
            ap.peak,
            ap.peak_time(dt),
            fmt_opt(apd(history, ap, dt, 0.5)),
            fmt_opt(apd(history, ap, dt, 0.9)),
        );
    }

    let points = restitution(&aps, dt);
    if !points.is_empty() {
        println!("restitution (DI -> duration):");
        for p in points {
            println!("  {:>9.2} -> {:>9.2}", p.diastolic_interval, p.duration);
        }
    }
    Ok(())
}
