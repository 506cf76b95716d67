//! # Admin Policy
//!
//! The Issuer trusts sender addresses: a privileged operation proceeds only
//! when the inbound message comes from the recorded admin. Every refused
//! operation reports the same exit code.

use super::messages::IssuerMessage;
use super::opcodes;
use super::value_objects::exit;
use shared_cell::Address;
use shared_runtime::ports::{AuthContext, AuthDenied, AuthorizationPolicy};

/// Sender-address equality against the admin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AdminPolicy {
    admin: Address,
}

impl AdminPolicy {
    #[must_use]
    pub fn new(admin: Address) -> Self {
        Self { admin }
    }
}

impl AdminPolicy {
    /// Refuses an admin selector from anyone else before its fields are
    /// read, so a malformed privileged body still fails with the admin
    /// exit code.
    pub fn screen(&self, selector: u32, sender: &Address) -> Result<(), AuthDenied> {
        if !opcodes::is_admin_op(selector) || *sender == self.admin {
            return Ok(());
        }
        Err(AuthDenied {
            exit_code: exit::UNAUTHORIZED,
            reason: "sender is not the admin",
        })
    }
}

impl AuthorizationPolicy<IssuerMessage> for AdminPolicy {
    fn authorize(&self, op: &IssuerMessage, ctx: &AuthContext<'_>) -> Result<(), AuthDenied> {
        if !op.requires_admin() || *ctx.sender == self.admin {
            return Ok(());
        }
        Err(AuthDenied {
            exit_code: exit::UNAUTHORIZED,
            reason: "sender is not the admin",
        })
    }
}
