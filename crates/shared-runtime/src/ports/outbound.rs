//! # Driven Ports (SPI - Outbound)
//!
//! - [`ContractLogic`]: the state machine behind a code hash
//! - [`EventSink`]: where transaction events go
//! - [`AuthorizationPolicy`]: the seam account crates use to gate privileged ops

use crate::domain::{
    ContractOutcome, ExitCode, GetMethodContext, MessageContext, StackValue,
};
use crate::events::RuntimeEvent;
use shared_cell::{Address, Cell};

// =============================================================================
// CONTRACT LOGIC
// =============================================================================

/// Behaviour of a deployed account.
///
/// Handlers receive an owned view of the inbound message and the committed
/// data. Returning `Err` rolls back every effect of the message.
pub trait ContractLogic: Send + Sync {
    /// Human-readable contract name for logs.
    fn name(&self) -> &'static str;

    /// Handles one inbound internal message.
    fn on_internal(
        &self,
        ctx: &MessageContext,
        data: &Cell,
    ) -> Result<ContractOutcome, ExitCode>;

    /// Runs a read-only getter.
    fn get_method(
        &self,
        ctx: &GetMethodContext,
        data: &Cell,
        method: &str,
        args: &[StackValue],
    ) -> Result<Vec<StackValue>, ExitCode>;
}

// =============================================================================
// EVENT SINK
// =============================================================================

/// Receives every runtime event.
pub trait EventSink: Send + Sync {
    fn publish(&self, event: &RuntimeEvent);
}

// =============================================================================
// AUTHORIZATION
// =============================================================================

/// Inputs available to an authorization check.
#[derive(Clone, Copy, Debug)]
pub struct AuthContext<'a> {
    pub sender: &'a Address,
    /// Signature carried in the message, for signature-gated accounts.
    pub signature: Option<&'a [u8; 64]>,
    /// Canonical record the signature must cover.
    pub signed_payload: Option<&'a Cell>,
}

impl<'a> AuthContext<'a> {
    /// Context carrying only the sender.
    #[must_use]
    pub fn from_sender(sender: &'a Address) -> Self {
        Self {
            sender,
            signature: None,
            signed_payload: None,
        }
    }

    #[must_use]
    pub fn with_signature(mut self, signature: &'a [u8; 64], payload: &'a Cell) -> Self {
        self.signature = Some(signature);
        self.signed_payload = Some(payload);
        self
    }
}

/// Authorization refusal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AuthDenied {
    pub exit_code: ExitCode,
    pub reason: &'static str,
}

impl From<AuthDenied> for ExitCode {
    fn from(denied: AuthDenied) -> Self {
        denied.exit_code
    }
}

/// Decides whether a privileged operation may proceed.
pub trait AuthorizationPolicy<Op> {
    fn authorize(&self, op: &Op, ctx: &AuthContext<'_>) -> Result<(), AuthDenied>;
}
