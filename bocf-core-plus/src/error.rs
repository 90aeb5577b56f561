use core::fmt;

use bocf_core::Variable;

/// Caller-side errors. The integrator itself never fails; these come from
/// configuration checks and post-hoc inspection of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelError {
    /// No parameter with that name
    UnknownParameter,
    /// A time constant or threshold that must be strictly positive is not
    NonPositiveParameter(&'static str),
    /// `dt` non-positive, non-finite, or too coarse for the fastest time constant
    InvalidTimestep,
    InvalidStimulus(&'static str),
    InvalidInput(&'static str),
    /// A variable became NaN or infinite at `step`
    Diverged { step: usize, variable: Variable },
    /// A variable left its physiological range at `step`
    OutOfRange { step: usize, variable: Variable },
    Other(&'static str),
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::UnknownParameter => write!(f, "unknown parameter"),
            ModelError::NonPositiveParameter(name) => {
                write!(f, "parameter must be strictly positive: {}", name)
            }
            ModelError::InvalidTimestep => write!(f, "invalid timestep"),
            ModelError::InvalidStimulus(msg) => write!(f, "invalid stimulus: {}", msg),
            ModelError::InvalidInput(msg) => write!(f, "invalid input: {}", msg),
            ModelError::Diverged { step, variable } => {
                write!(f, "{} diverged at step {}", variable.name(), step)
            }
            ModelError::OutOfRange { step, variable } => {
                write!(f, "{} out of range at step {}", variable.name(), step)
            }
            ModelError::Other(msg) => write!(f, "error: {}", msg),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ModelError {}

pub type ModelResult<T, E = ModelError> = core::result::Result<T, E>;
