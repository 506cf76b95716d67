//! # Manager Contract Adapter
//!
//! | Getter | Result |
//! |--------|--------|
//! | `get_stoken` | address |
//! | `get_ytoken` | address |
//! | `get_treasury` | address |
//! | `get_is_vault` | 1 / 0 |
//! | `get_admin_pubkey` | uint256 |
//! | `is_asset_enabled(asset)` | 1 / 0 |

use crate::domain::{ManagerMessage, ManagerState};
use crate::service::ManagerService;
use shared_cell::Cell;
use shared_runtime::domain::{
    address_arg, ContractOutcome, ExitCode, GetMethodContext, MessageContext, StackValue,
};
use shared_runtime::ports::ContractLogic;
use tracing::debug;

fn flag(value: bool) -> StackValue {
    StackValue::Int(i128::from(value))
}

/// Runtime-facing Manager contract.
#[derive(Clone, Copy, Debug, Default)]
pub struct ManagerContract {
    service: ManagerService,
}

impl ManagerContract {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl ContractLogic for ManagerContract {
    fn name(&self) -> &'static str {
        "manager"
    }

    fn on_internal(&self, ctx: &MessageContext, data: &Cell) -> Result<ContractOutcome, ExitCode> {
        let state = ManagerState::load(data)?;
        let message = ManagerMessage::decode(&ctx.body, ctx.bounced).map_err(|err| {
            debug!(%err, "Rejected Manager message");
            err.exit_code()
        })?;
        self.service
            .handle(ctx, state, message)
            .map_err(|err| err.exit_code())
    }

    fn get_method(
        &self,
        _ctx: &GetMethodContext,
        data: &Cell,
        method: &str,
        args: &[StackValue],
    ) -> Result<Vec<StackValue>, ExitCode> {
        let state = ManagerState::load(data)?;
        match method {
            "get_stoken" => Ok(vec![StackValue::from(state.s_token)]),
            "get_ytoken" => Ok(vec![StackValue::from(state.y_token)]),
            "get_treasury" => Ok(vec![StackValue::from(state.treasury)]),
            "get_is_vault" => Ok(vec![flag(state.is_vault)]),
            "get_admin_pubkey" => Ok(vec![StackValue::Uint256(state.admin_pubkey)]),
            "is_asset_enabled" => {
                let asset = address_arg(args, 0)?;
                Ok(vec![flag(state.is_asset_enabled(&asset))])
            }
            _ => Err(ExitCode::UNKNOWN_OP),
        }
    }
}
