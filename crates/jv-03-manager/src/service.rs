//! # Manager Service
//!
//! Verifies the signature through [`SignaturePolicy`], then applies the
//! request. A rejected signature leaves every field untouched.
//!
//! | Request | Effect |
//! |---------|--------|
//! | `setTokens` | replaces s/y tokens, vault flag and (long form) treasury together |
//! | `setTreasury` | replaces the treasury |
//! | `deposit`, `withdraw` | none beyond authorization |
//! | `setAsset` | upserts `assets[asset] = enabled` |

use crate::domain::{ManagerMessage, ManagerRequest, ManagerState, SignaturePolicy};
use crate::errors::{ManagerError, ManagerResult};
use crate::metrics;
use shared_runtime::domain::{ContractOutcome, MessageContext};
use shared_runtime::ports::{AuthContext, AuthorizationPolicy};
use tracing::{debug, info, instrument, warn};

/// Handles decoded Manager messages.
#[derive(Clone, Copy, Debug, Default)]
pub struct ManagerService;

impl ManagerService {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Applies one message to `state`.
    #[instrument(skip_all, fields(op = message.name(), sender = %ctx.sender))]
    pub fn handle(
        &self,
        ctx: &MessageContext,
        mut state: ManagerState,
        message: ManagerMessage,
    ) -> ManagerResult<ContractOutcome> {
        let ManagerMessage::Signed {
            query_id,
            signature,
            request,
        } = message
        else {
            debug!(value = ctx.value, "Value accepted");
            return Ok(ContractOutcome::new(state.to_cell()?));
        };

        let payload = request.signed_cell()?;
        let auth = AuthContext::from_sender(&ctx.sender).with_signature(&signature, &payload);
        if let Err(denied) = SignaturePolicy::new(state.admin_pubkey).authorize(&message, &auth) {
            metrics::record_signature_failure();
            warn!(reason = denied.reason, "Signature rejected");
            return Err(ManagerError::SignatureInvalid(denied.reason));
        }

        match request {
            ManagerRequest::SetTokens(update) => {
                state.s_token = update.s_token;
                state.y_token = update.y_token;
                state.is_vault = update.is_vault;
                if let Some(treasury) = update.treasury {
                    state.treasury = treasury;
                }
                info!(
                    query_id,
                    s_token = %state.s_token,
                    y_token = %state.y_token,
                    is_vault = state.is_vault,
                    "Tokens updated"
                );
            }
            ManagerRequest::SetTreasury { treasury } => {
                state.treasury = treasury;
                info!(query_id, %treasury, "Treasury updated");
            }
            ManagerRequest::Deposit { amount } => info!(query_id, amount, "Deposit authorized"),
            ManagerRequest::Withdraw { amount } => info!(query_id, amount, "Withdraw authorized"),
            ManagerRequest::SetAsset { asset, enabled } => {
                state.set_asset(asset, enabled);
                info!(query_id, %asset, enabled, "Asset updated");
            }
        }
        metrics::record_update();
        Ok(ContractOutcome::new(state.to_cell()?))
    }
}

// =============================================================================
// TESTS
// =============================================================================
