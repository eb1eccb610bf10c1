//! Membership backend port - the shared set of revoked keys.
//!
//! The backend is a probabilistic membership structure (a Bloom filter) that
//! is shared by every replica of this service and by the API gateway.
//!
//! # Contract
//!
//! - `add` is a single round-trip. Adding a key that is already present
//!   succeeds and changes nothing observable.
//! - `check` is a single round-trip. `true` means "possibly revoked" (false
//!   positives are bounded by the backend's configured error rate); `false`
//!   means the key was never added.
//! - No ordering is guaranteed between concurrent calls.
//! - Implementations must be safe to share across concurrent request
//!   handlers and must bound every call with a timeout, reporting expiry as
//!   [`BackendError::ConnectionFailed`].
//! - After `close`, every call fails with `ConnectionFailed`.

use async_trait::async_trait;

use crate::domain::revocation::RevocationKey;

/// Port for the shared revocation membership structure.
#[async_trait]
pub trait MembershipBackend: Send + Sync {
    /// Marks `key` as revoked.
    async fn add(&self, key: &RevocationKey) -> Result<(), BackendError>;

    /// Returns whether `key` is (possibly) revoked.
    async fn check(&self, key: &RevocationKey) -> Result<bool, BackendError>;

    /// Releases the underlying connection.
    async fn close(&self) -> Result<(), BackendError>;
}

/// Errors reported by membership backends.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    /// The backend is unreachable, the call timed out, or the handle is closed.
    #[error("membership backend connection failed: {0}")]
    ConnectionFailed(String),

    /// The backend answered but rejected the call.
    #[error("membership backend request failed: {0}")]
    RequestFailed(String),
}

impl BackendError {
    pub fn connection_failed(detail: impl Into<String>) -> Self {
        Self::ConnectionFailed(detail.into())
    }

    pub fn request_failed(detail: impl Into<String>) -> Self {
        Self::RequestFailed(detail.into())
    }

    pub fn closed() -> Self {
        Self::ConnectionFailed("connection closed".to_string())
    }

    /// Returns true if the backend could not be reached at all.
    pub fn is_connection_failure(&self) -> bool {
        matches!(self, BackendError::ConnectionFailed(_))
    }
}
