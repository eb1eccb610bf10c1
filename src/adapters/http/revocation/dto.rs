//! Response DTOs for revocation endpoints.

use serde::{Deserialize, Serialize};

/// Error body returned by the add endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub error_code: String,
    /// Pipeline stage that failed (`body`, `token`, `claim`, `backend`).
    pub stage: String,
    /// Human-readable error message.
    pub message: String,
}

impl ErrorResponse {
    pub fn new(
        error_code: impl Into<String>,
        stage: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error_code: error_code.into(),
            stage: stage.into(),
            message: message.into(),
        }
    }
}

/// Liveness probe body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthResponse {
    pub status: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}
