use thiserror::Error;

/// Failure taxonomy for the layout engine.
///
/// `UpperInfeasible` and `SignatureCollision` from the generator's
/// diversification loop are not represented here: both are handled locally
/// by skipping the attempt and continuing, and never surface to the caller.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("base layer infeasible: no placement fit the pallet within the time budget")]
    BaseInfeasible,

    #[error("solver error: {0}")]
    SolverError(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
