#![cfg_attr(not(feature = "std"), no_std)]
//! bocf-core-plus: Caller-side layers atop bocf-core (keeps bocf-core unchanged)
//!
//! Additions:
//! - Error taxonomy for the hazards the integrator does not guard
//! - Run configuration with presets, named overrides and a pre-flight check
//! - Supervised runs (step budgets, sanity bounds, cancellable observers)
//! - Post-hoc sanity check and action-potential measurements (APD, restitution)
//! - Optional heapless rolling trace behind feature "embedded"
//!
//! This crate composes bocf-core's types and reuses its time semantics.

#[cfg(feature = "std")]
pub mod analysis;
#[cfg(feature = "std")]
pub mod config;
#[cfg(feature = "std")]
pub mod runtime_plus;

// Embedded modules (only compiled when feature = "embedded")
#[cfg(feature = "embedded")]
pub mod trace;

// Error module (no_std friendly)
pub mod error;

// Re-exports
pub use error::{ModelError, ModelResult};
#[cfg(feature = "std")]
pub use analysis::{action_potentials, apd, check, restitution, ActionPotential, RestitutionPoint, SanityBounds};
#[cfg(feature = "std")]
pub use config::{parse_assignment, ModelConfig};
#[cfg(feature = "std")]
pub use runtime_plus::{run_independent, run_supervised, NoObserver, RunLimits, RunReport, StepObserver, StopReason};

#[cfg(feature = "embedded")]
pub use trace::RecentTrace;
