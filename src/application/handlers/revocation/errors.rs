//! Errors surfaced by the revocation handlers.

use thiserror::Error;

use crate::domain::revocation::DecodeError;
use crate::ports::BackendError;

/// Failure of an add or check request.
///
/// Neither kind is retried; both are reported directly to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RevocationError {
    /// The logout notification could not be turned into a key.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// The membership backend is unavailable or rejected the call.
    #[error(transparent)]
    Backend(#[from] BackendError),
}

impl RevocationError {
    /// Name of the pipeline stage that failed.
    pub fn stage(&self) -> &'static str {
        match self {
            RevocationError::Decode(e) => e.stage(),
            RevocationError::Backend(_) => "backend",
        }
    }
}
