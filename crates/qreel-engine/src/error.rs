//! Engine error types.

use thiserror::Error;

use qreel_hal::HalError;

/// Errors that can escape the spin pipeline.
///
/// Hardware problems never appear here; they degrade to the simulator
/// inside the pipeline. What remains is the simulator itself failing and
/// the empty-distribution precondition violation.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The outcome distribution had no positive counts to draw from.
    #[error("Cannot draw from an empty outcome distribution")]
    EmptyDistribution,

    /// A backend operation failed outside the hardware-fallback path.
    #[error(transparent)]
    Hal(#[from] HalError),
}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
