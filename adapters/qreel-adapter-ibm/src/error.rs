//! Error types for the IBM Quantum adapter.

use thiserror::Error;

/// Result type for IBM operations.
pub type IbmResult<T> = Result<T, IbmError>;

/// Errors that can occur when using IBM Quantum.
#[derive(Debug, Error)]
pub enum IbmError {
    /// Missing API token.
    #[error("IBM Quantum API token not found. Set the IBM_QUANTUM_TOKEN environment variable.")]
    MissingToken,

    /// Invalid API token.
    #[error("Invalid IBM Quantum API token")]
    InvalidToken,

    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// API returned an error.
    #[error("IBM Quantum API error: {message}")]
    ApiError {
        /// Error code from API.
        code: Option<String>,
        /// Error message.
        message: String,
    },

    /// Job not found.
    #[error("Job not found: {0}")]
    JobNotFound(String),

    /// Job failed.
    #[error("Job failed: {0}")]
    JobFailed(String),

    /// Backend not available.
    #[error("Backend not available: {0}")]
    BackendUnavailable(String),

    /// No device satisfies the least-busy eligibility filter.
    #[error("No operational backend with at least {0} qubits")]
    NoEligibleBackend(usize),

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl From<IbmError> for qreel_hal::HalError {
    fn from(e: IbmError) -> Self {
        match e {
            IbmError::MissingToken | IbmError::InvalidToken => {
                qreel_hal::HalError::AuthenticationFailed(e.to_string())
            }
            IbmError::JobNotFound(id) => qreel_hal::HalError::JobNotFound(id),
            IbmError::JobFailed(msg) => qreel_hal::HalError::JobFailed(msg),
            IbmError::BackendUnavailable(msg) => qreel_hal::HalError::BackendUnavailable(msg),
            IbmError::NoEligibleBackend(_) => {
                qreel_hal::HalError::BackendUnavailable(e.to_string())
            }
            _ => qreel_hal::HalError::Backend(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_token_display() {
        let err = IbmError::MissingToken;
        assert!(err.to_string().contains("IBM_QUANTUM_TOKEN"));
    }

    #[test]
    fn test_api_error_display() {
        let err = IbmError::ApiError {
            code: Some("ERR_401".into()),
            message: "Unauthorized".into(),
        };
        assert!(err.to_string().contains("Unauthorized"));
    }

    #[test]
    fn test_no_eligible_backend_display() {
        let err = IbmError::NoEligibleBackend(3);
        assert!(err.to_string().contains('3'));
    }

    #[test]
    fn test_missing_token_to_hal_auth_failed() {
        let hal: qreel_hal::HalError = IbmError::MissingToken.into();
        assert!(matches!(hal, qreel_hal::HalError::AuthenticationFailed(_)));
    }

    #[test]
    fn test_job_failed_to_hal() {
        let hal: qreel_hal::HalError = IbmError::JobFailed("boom".into()).into();
        assert!(matches!(hal, qreel_hal::HalError::JobFailed(msg) if msg == "boom"));
    }

    #[test]
    fn test_no_eligible_backend_to_hal_unavailable() {
        let hal: qreel_hal::HalError = IbmError::NoEligibleBackend(3).into();
        assert!(matches!(hal, qreel_hal::HalError::BackendUnavailable(_)));
    }
}
