// Command-line arguments and their translation into a model configuration.

use anyhow::{anyhow, Context, Result};
use clap::Parser;

use bocf_core::{CellType, Stimulation};
use bocf_core_plus::ModelConfig;

#[derive(Parser, Debug)]
#[command(name = "bocf-tui", version, about = "Single-cell Bueno-Orovio ventricular model: live chart or headless report")]
pub struct Cli {
    /// Fixed timestep
    #[arg(long, default_value_t = 0.01)]
    pub dt: f64,

    /// Simulated time for headless runs
    #[arg(long, default_value_t = 300.0)]
    pub t_max: f64,

    /// Parameter preset: epi, endo, mid or pb
    #[arg(long, default_value = "epi", value_parser = parse_cell)]
    pub cell: CellType,

    /// Stimulus pulse as START,DURATION,AMPLITUDE (repeatable)
    #[arg(long = "stim", value_parser = parse_stim)]
    pub stims: Vec<Stimulation>,

    /// Repeat the first pulse as a train: PERIOD,COUNT
    #[arg(long, value_parser = parse_pace)]
    pub pace: Option<Pacing>,

    /// Parameter override NAME=VALUE (repeatable)
    #[arg(long = "set")]
    pub overrides: Vec<String>,

    /// Run to --t-max and print a report instead of opening the TUI
    #[arg(long)]
    pub headless: bool,

    /// Detection threshold on u for action potentials
    #[arg(long, default_value_t = 0.3)]
    pub threshold: f64,

    /// Steps simulated per frame in the TUI
    #[arg(long, default_value_t = 50)]
    pub speed: usize,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pacing {
    pub period: f64,
    pub count: usize,
}

fn parse_cell(s: &str) -> Result<CellType> {
    CellType::from_name(s).ok_or_else(|| anyhow!("unknown cell type '{}' (epi, endo, mid, pb)", s))
}

fn parse_numbers(s: &str, n: usize) -> Result<Vec<f64>> {
    let values = s
        .split(',')
        .map(|part| part.trim().parse::<f64>().with_context(|| format!("'{}' is not a number", part)))
        .collect::<Result<Vec<_>>>()?;
    if values.len() != n {
        return Err(anyhow!("expected {} comma-separated values, got {}", n, values.len()));
    }
    Ok(values)
}

fn parse_stim(s: &str) -> Result<Stimulation> {
    let v = parse_numbers(s, 3)?;
    Ok(Stimulation::new(v[0], v[1], v[2]))
}

fn parse_pace(s: &str) -> Result<Pacing> {
    let v = parse_numbers(s, 2)?;
    if !(v[1] >= 0.0 && v[1].fract() == 0.0) {
        return Err(anyhow!("pulse count must be a non-negative integer"));
    }
    Ok(Pacing { period: v[0], count: v[1] as usize })
}

impl Cli {
    pub fn to_config(&self) -> Result<ModelConfig> {
        let mut cfg = ModelConfig::new(self.dt, self.t_max);
        cfg.cell_type = self.cell;
        if !self.stims.is_empty() {
            cfg.stimulations = self.stims.clone();
        }
        if let Some(pace) = self.pace {
            let first = cfg.stimulations.first().copied().ok_or_else(|| anyhow!("--pace needs a pulse"))?;
            let mut train = Stimulation::train(first.t_start, first.duration, first.amplitude, pace.period, pace.count);
            train.extend(cfg.stimulations.iter().skip(1).copied());
            cfg.stimulations = train;
        }
        for assignment in &self.overrides {
            cfg.apply_assignment(assignment)
                .with_context(|| format!("bad --set '{}'", assignment))?;
        }
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("bocf-tui").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn defaults_reproduce_reference_run() {
        let cfg = parse(&[]).to_config().unwrap();
        assert_eq!(cfg, ModelConfig::default());
    }

    #[test]
    fn stimuli_pacing_and_overrides() {
        let cli = parse(&[
            "--cell", "endo", "--stim", "1,0.5,4", "--pace", "500,3", "--set", "tau_si=2.0", "--headless",
        ]);
        assert!(cli.headless);
        let cfg = cli.to_config().unwrap();
        assert_eq!(cfg.cell_type, CellType::Endo);
        assert_eq!(cfg.stimulations.len(), 3);
        assert_eq!(cfg.stimulations[2], Stimulation::new(1001.0, 0.5, 4.0));
        assert_eq!(cfg.parameters().tau_si, 2.0);
    }

    #[test]
    fn malformed_values_are_rejected() {
        let bad = |args: &[&str]| Cli::try_parse_from(std::iter::once("bocf-tui").chain(args.iter().copied())).is_err();
        assert!(bad(&["--stim", "1,2"]));
        assert!(bad(&["--cell", "atrial"]));
        assert!(bad(&["--pace", "500,2.5"]));
        assert!(parse(&["--set", "tau_nope=1"]).to_config().is_err());
    }
}
