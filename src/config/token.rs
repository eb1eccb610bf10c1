//! Logout token configuration

use serde::Deserialize;

use crate::domain::revocation::{BodyFormat, ClaimName};

/// Which claim identifies the revoked subject and how bodies are encoded.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TokenConfig {
    /// Claim used as the subject identifier (`JWT_CLAIM`)
    #[serde(default)]
    pub claim: ClaimName,

    /// Accepted logout notification encoding
    #[serde(default)]
    pub body_format: BodyFormat,
}
