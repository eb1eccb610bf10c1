//! RevokeTokenHandler - Command handler for back-channel logout notifications.

use std::sync::Arc;

use crate::domain::revocation::{BodyEncoding, ClaimName, LogoutNotification, RevocationKey};
use crate::ports::{ClaimsDecoder, MembershipBackend};

use super::RevocationError;

/// Command carrying a raw logout notification.
#[derive(Debug, Clone)]
pub struct RevokeTokenCommand {
    pub body: Vec<u8>,
    pub encoding: BodyEncoding,
}

/// Result of a successful revocation.
#[derive(Debug, Clone)]
pub struct RevokeTokenResult {
    /// The key that was submitted to the backend.
    pub key: RevocationKey,
}

/// Handler for revoking the subject of a logout token.
///
/// Pipeline: body -> logout token -> claim set -> key -> `add`. Decoding
/// completes before the backend is touched, so a decode failure never
/// issues a backend call.
pub struct RevokeTokenHandler {
    decoder: Arc<dyn ClaimsDecoder>,
    backend: Arc<dyn MembershipBackend>,
    claim: ClaimName,
}

impl RevokeTokenHandler {
    pub fn new(
        decoder: Arc<dyn ClaimsDecoder>,
        backend: Arc<dyn MembershipBackend>,
        claim: ClaimName,
    ) -> Self {
        Self {
            decoder,
            backend,
            claim,
        }
    }

    /// Decodes the notification into a revocation key without side effects.
    pub fn derive_key(&self, cmd: &RevokeTokenCommand) -> Result<RevocationKey, RevocationError> {
        let notification = LogoutNotification::parse(&cmd.body, cmd.encoding)?;
        let claims = self.decoder.decode(notification.logout_token())?;
        Ok(claims.revocation_key(&self.claim)?)
    }

    pub async fn handle(
        &self,
        cmd: RevokeTokenCommand,
    ) -> Result<RevokeTokenResult, RevocationError> {
        let key = self.derive_key(&cmd).map_err(|e| {
            tracing::warn!(stage = e.stage(), error = %e, "Rejected logout notification");
            e
        })?;

        self.backend.add(&key).await.map_err(|e| {
            tracing::error!(key = %key, error = %e, "Failed to record revocation");
            e
        })?;

        tracing::info!(key = %key, "Revoked token subject");
        Ok(RevokeTokenResult { key })
    }
}
