//! # Holder Contract Adapter
//!
//! Plugs [`HolderService`] into the runtime as [`ContractLogic`].

use crate::domain::{HolderFees, HolderMessage, HolderState};
use crate::service::HolderService;
use shared_cell::Cell;
use shared_runtime::domain::{
    ContractOutcome, ExitCode, GetMethodContext, MessageContext, StackValue,
};
use shared_runtime::ports::ContractLogic;
use tracing::debug;

/// Runtime-facing Holder contract.
#[derive(Clone, Copy, Debug, Default)]
pub struct HolderContract {
    service: HolderService,
}

impl HolderContract {
    #[must_use]
    pub fn new(fees: HolderFees) -> Self {
        Self {
            service: HolderService::new(fees),
        }
    }
}

impl ContractLogic for HolderContract {
    fn name(&self) -> &'static str {
        "holder"
    }

    fn on_internal(&self, ctx: &MessageContext, data: &Cell) -> Result<ContractOutcome, ExitCode> {
        let state = HolderState::load(data)?;
        let message = HolderMessage::decode(&ctx.body, ctx.bounced).map_err(|err| {
            debug!(%err, "Rejected Holder message");
            err.exit_code()
        })?;
        self.service.handle(ctx, state, message).map_err(|err| {
            debug!(%err, "Holder handler failed");
            err.exit_code()
        })
    }

    fn get_method(
        &self,
        _ctx: &GetMethodContext,
        data: &Cell,
        method: &str,
        _args: &[StackValue],
    ) -> Result<Vec<StackValue>, ExitCode> {
        let state = HolderState::load(data)?;
        match method {
            "get_wallet_data" => Ok(vec![
                StackValue::from(state.balance),
                StackValue::from(state.owner),
                StackValue::from(state.issuer),
                StackValue::Cell(state.code),
            ]),
            _ => Err(ExitCode::UNKNOWN_OP),
        }
    }
}
