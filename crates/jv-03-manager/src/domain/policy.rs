//! # Signature Policy
//!
//! The Manager trusts content, not senders: any relayer may submit a
//! mutation as long as it carries a valid signature by the stored key over
//! the canonical cell of the new values. Failures surface as the runtime's
//! generic signature exit code.

use super::messages::ManagerMessage;
use shared_crypto::{Ed25519PublicKey, Ed25519Signature};
use shared_runtime::domain::ExitCode;
use shared_runtime::ports::{AuthContext, AuthDenied, AuthorizationPolicy};

/// Ed25519 verification against the stored admin key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SignaturePolicy {
    admin_pubkey: [u8; 32],
}

impl SignaturePolicy {
    #[must_use]
    pub fn new(admin_pubkey: [u8; 32]) -> Self {
        Self { admin_pubkey }
    }
}

fn denied(reason: &'static str) -> AuthDenied {
    AuthDenied {
        exit_code: ExitCode::SIGNATURE_FAILED,
        reason,
    }
}

impl AuthorizationPolicy<ManagerMessage> for SignaturePolicy {
    fn authorize(&self, op: &ManagerMessage, ctx: &AuthContext<'_>) -> Result<(), AuthDenied> {
        if !matches!(op, ManagerMessage::Signed { .. }) {
            return Ok(());
        }
        let (Some(signature), Some(payload)) = (ctx.signature, ctx.signed_payload) else {
            return Err(denied("signature missing"));
        };
        let key = Ed25519PublicKey::from_bytes(self.admin_pubkey)
            .map_err(|_| denied("stored key is not a curve point"))?;
        key.verify(
            payload.hash().as_bytes(),
            &Ed25519Signature::from_bytes(*signature),
        )
        .map_err(|_| denied("signature does not match the admin key"))
    }
}
