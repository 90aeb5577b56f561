//! bocf-core: Zero-dependency Bueno-Orovio minimal ventricular cell model (0D)
//!
//! Four-variable phenomenological model of the human ventricular action
//! potential (Bueno-Orovio, Cherry & Fenton, J Theor Biol 2008), with
//! fixed-step explicit Euler integration and rectangular stimulus pulses.

pub mod params;
pub mod state;
pub mod kinetics;
pub mod stimulus;
pub mod history;
pub mod runtime;

// Re-exports
pub use params::{CellType, Parameters, PARAMETER_NAMES};
pub use state::{State, Variable};
pub use kinetics::{Currents, Derivatives};
pub use stimulus::Stimulation;
pub use history::History;
pub use runtime::{euler_step, step_count, BuenoOrovio0D};
