//! Error types for the trajectory engine

use thiserror::Error;

/// Failure raised by the adaptive integrator
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IntegrationError {
    /// The error estimate stayed above tolerance even at the smallest step
    #[error(
        "tolerance not met at t = {time} s: step {step} s is at the minimum, normalized error {error}"
    )]
    ToleranceNotMet { time: f64, step: f64, error: f64 },
}

/// Errors surfaced by the engine to its callers
///
/// Collisions and draft creation/removal are ordinary control flow and
/// never show up here.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// Configuration rejected before any state was touched
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The current repopulation pass was abandoned
    #[error("numerical failure: {0}")]
    NumericalFailure(#[from] IntegrationError),

    /// An internal invariant was violated
    #[error("inconsistent timeline state: {0}")]
    InconsistentTimelineState(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
