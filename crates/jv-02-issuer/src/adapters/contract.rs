//! # Issuer Contract Adapter
//!
//! Plugs [`IssuerService`] into the runtime and serves the read-only
//! getters.
//!
//! | Getter | Result |
//! |--------|--------|
//! | `get_jetton_data` | supply, mintable (-1), admin, content, holder code |
//! | `get_wallet_address(owner)` | Holder address |
//! | `get_price` | price |
//! | `get_last_sync_supply` | last synced supply |
//! | `get_backing_token` | backing token address |
//! | `is_blacklisted(address)` | -1 / 0 |

use crate::domain::{AdminPolicy, IssuerMessage, IssuerState};
use crate::metrics;
use crate::service::IssuerService;
use jv_01_holder::domain::derive_holder_address;
use shared_cell::Cell;
use shared_runtime::domain::{
    address_arg, peek_op, ContractOutcome, ExitCode, GetMethodContext, MessageContext,
    StackValue,
};
use shared_runtime::ports::ContractLogic;
use tracing::{debug, warn};

/// Runtime-facing Issuer contract.
#[derive(Clone, Copy, Debug, Default)]
pub struct IssuerContract {
    service: IssuerService,
}

impl IssuerContract {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl ContractLogic for IssuerContract {
    fn name(&self) -> &'static str {
        "issuer"
    }

    fn on_internal(&self, ctx: &MessageContext, data: &Cell) -> Result<ContractOutcome, ExitCode> {
        let state = IssuerState::load(data)?;
        if !ctx.bounced {
            if let Some(selector) = peek_op(&ctx.body) {
                if let Err(denied) = AdminPolicy::new(state.admin).screen(selector, &ctx.sender) {
                    metrics::record_unauthorized();
                    warn!(reason = denied.reason, sender = %ctx.sender, "Privileged operation refused");
                    return Err(denied.into());
                }
            }
        }
        let message = IssuerMessage::decode(&ctx.body, ctx.bounced).map_err(|err| {
            debug!(%err, "Rejected Issuer message");
            err.exit_code()
        })?;
        self.service.handle(ctx, state, message).map_err(|err| {
            debug!(%err, "Issuer handler failed");
            err.exit_code()
        })
    }

    fn get_method(
        &self,
        ctx: &GetMethodContext,
        data: &Cell,
        method: &str,
        args: &[StackValue],
    ) -> Result<Vec<StackValue>, ExitCode> {
        let state = IssuerState::load(data)?;
        match method {
            "get_jetton_data" => Ok(vec![
                StackValue::from(state.total_supply),
                StackValue::from_bool(true),
                StackValue::from(state.admin),
                StackValue::Cell(state.content),
                StackValue::Cell(state.holder_code),
            ]),
            "get_wallet_address" => {
                let owner = address_arg(args, 0)?;
                let holder = derive_holder_address(
                    &owner,
                    &ctx.self_address,
                    &state.holder_code,
                    ctx.self_address.workchain,
                )?;
                Ok(vec![StackValue::from(holder)])
            }
            "get_price" => Ok(vec![StackValue::Int(i128::from(state.price))]),
            "get_last_sync_supply" => Ok(vec![StackValue::from(state.last_sync_supply)]),
            "get_backing_token" => Ok(vec![StackValue::from(state.backing_token)]),
            "is_blacklisted" => {
                let address = address_arg(args, 0)?;
                Ok(vec![StackValue::from_bool(state.is_blacklisted(&address))])
            }
            _ => Err(ExitCode::UNKNOWN_OP),
        }
    }
}
