//! # Holder Service
//!
//! The Holder state machine. Each handler takes the committed state by
//! value and returns the next state plus the sends it requests; any error
//! discards both.
//!
//! ## Flows
//!
//! | Message | Checks | Effect |
//! |---------|--------|--------|
//! | `transfer` | owner (705), balance (706), value (709) | debit, `internal_transfer` to the destination Holder with `StateInit`, mode 64, bounce |
//! | `internal_transfer` | Issuer or sibling (707), range (5) | credit, optional `transfer_notification`, optional `excesses` (mode 2) |
//! | `burn` | owner (705), balance (706) | debit, `burn_notification` to the Issuer, mode 64, bounce |
//! | `withdraw_burn` | Issuer (707), balance (706) | debit, `withdraw_burned` to the Issuer, mode 64 |
//! | bounced `internal_transfer` / `burn_notification` | none | credit back |

use crate::domain::{
    burn_notification_body, excesses_body, holder_state_init, is_authorized_credit_source,
    transfer_notification_body, withdraw_burned_body, BurnRequest, HolderFees, HolderMessage, HolderState,
    InternalTransfer, TransferRequest,
};
use crate::errors::{HolderError, HolderResult};
use crate::metrics;
use shared_cell::Address;
use shared_runtime::domain::{Coins, ContractOutcome, MessageContext, OutboundMessage, SendMode};
use tracing::{debug, info, instrument, warn};

/// Handles decoded Holder messages.
#[derive(Clone, Copy, Debug, Default)]
pub struct HolderService {
    fees: HolderFees,
}

impl HolderService {
    #[must_use]
    pub fn new(fees: HolderFees) -> Self {
        Self { fees }
    }

    #[must_use]
    pub fn fees(&self) -> HolderFees {
        self.fees
    }

    /// Applies one message to `state`.
    #[instrument(skip_all, fields(holder = %ctx.self_address, sender = %ctx.sender))]
    pub fn handle(
        &self,
        ctx: &MessageContext,
        state: HolderState,
        message: HolderMessage,
    ) -> HolderResult<ContractOutcome> {
        match message {
            HolderMessage::TopUp => {
                debug!(value = ctx.value, "Top-up accepted");
                Ok(ContractOutcome::new(state.to_cell()?))
            }
            HolderMessage::Transfer(req) => self.transfer(ctx, state, req),
            HolderMessage::InternalTransfer(credit) => self.receive(ctx, state, credit),
            HolderMessage::Burn(req) => self.burn(ctx, state, req),
            HolderMessage::WithdrawBurn {
                query_id,
                shares,
                receiver,
            } => self.withdraw_burn(ctx, state, query_id, shares, receiver),
            HolderMessage::Returned {
                op,
                query_id,
                amount,
            } => {
                let mut state = state;
                state.credit(amount)?;
                warn!(op = format_args!("0x{op:08x}"), query_id, amount, "Debit bounced, balance restored");
                Ok(ContractOutcome::new(state.to_cell()?))
            }
            HolderMessage::IgnoredBounce { op } => {
                debug!(?op, "Bounce ignored");
                Ok(ContractOutcome::new(state.to_cell()?))
            }
        }
    }

    fn transfer(
        &self,
        ctx: &MessageContext,
        mut state: HolderState,
        req: TransferRequest,
    ) -> HolderResult<ContractOutcome> {
        if ctx.sender != state.owner {
            return Err(HolderError::NotOwner(ctx.sender));
        }
        if req.destination.workchain != ctx.workchain() {
            return Err(HolderError::WrongWorkchain(req.destination));
        }
        state.debit(req.amount)?;

        let required = req
            .forward_amount
            .checked_add(self.fees.transfer_reserve())
            .ok_or(HolderError::Overflow)?;
        if ctx.value <= required {
            return Err(HolderError::InsufficientValue {
                attached: ctx.value,
                required,
            });
        }

        let init = holder_state_init(&req.destination, &state.issuer, &state.code)?;
        let destination = init.address(ctx.workchain())?;
        let credit = InternalTransfer {
            query_id: req.query_id,
            amount: req.amount,
            from: Some(state.owner),
            response: req.response,
            forward_amount: req.forward_amount,
            forward_payload: req.forward_payload,
        };

        info!(
            query_id = req.query_id,
            amount = req.amount,
            to = %req.destination,
            holder = %destination,
            "Transfer sent"
        );
        metrics::record_transfer();

        Ok(ContractOutcome::new(state.to_cell()?).send(
            OutboundMessage::new(destination, 0, credit.to_cell()?)
                .with_bounce(true)
                .with_state_init(init),
            SendMode::CARRY_REMAINING_VALUE,
        ))
    }

    fn receive(
        &self,
        ctx: &MessageContext,
        mut state: HolderState,
        credit: InternalTransfer,
    ) -> HolderResult<ContractOutcome> {
        if !is_authorized_credit_source(&state, &ctx.sender, credit.from.as_ref(), ctx.workchain())? {
            return Err(HolderError::UnauthorizedIncoming(ctx.sender));
        }
        state.credit(credit.amount)?;
        metrics::record_credit();

        let balance_before = ctx.balance.saturating_sub(ctx.value);
        let storage_fee = self.fees.min_storage - balance_before.min(self.fees.min_storage);
        let mut remaining: Coins = ctx
            .value
            .saturating_sub(storage_fee + self.fees.gas_consumption);

        let mut outcome = ContractOutcome::new(state.to_cell()?);
        if credit.forward_amount > 0 {
            remaining = remaining.saturating_sub(credit.forward_amount);
            let body = transfer_notification_body(
                credit.query_id,
                credit.amount,
                credit.from.as_ref(),
                &credit.forward_payload,
            )?;
            outcome = outcome.send(
                OutboundMessage::new(state.owner, credit.forward_amount, body),
                SendMode::PAY_FEES_SEPARATELY,
            );
        }
        if let Some(response) = credit.response {
            if remaining > 0 {
                outcome = outcome.send(
                    OutboundMessage::new(response, remaining, excesses_body(credit.query_id)?),
                    SendMode::IGNORE_ERRORS,
                );
            }
        }

        info!(
            query_id = credit.query_id,
            amount = credit.amount,
            balance = state.balance,
            "Credit received"
        );
        Ok(outcome)
    }

    fn burn(
        &self,
        ctx: &MessageContext,
        mut state: HolderState,
        req: BurnRequest,
    ) -> HolderResult<ContractOutcome> {
        if ctx.sender != state.owner {
            return Err(HolderError::NotOwner(ctx.sender));
        }
        state.debit(req.amount)?;

        let body = burn_notification_body(
            req.query_id,
            req.amount,
            &state.owner,
            req.response.as_ref(),
        )?;
        info!(query_id = req.query_id, amount = req.amount, "Burn sent");
        metrics::record_burn(req.amount);

        Ok(ContractOutcome::new(state.to_cell()?).send(
            OutboundMessage::new(state.issuer, 0, body).with_bounce(true),
            SendMode::CARRY_REMAINING_VALUE,
        ))
    }

    fn withdraw_burn(
        &self,
        ctx: &MessageContext,
        mut state: HolderState,
        query_id: u64,
        shares: Coins,
        receiver: Address,
    ) -> HolderResult<ContractOutcome> {
        if ctx.sender != state.issuer {
            return Err(HolderError::UnauthorizedIncoming(ctx.sender));
        }
        state.debit(shares)?;
        info!(query_id, shares, balance = state.balance, "Shares burned for withdraw");

        // The Issuer releases backing only on this confirmation.
        let body = withdraw_burned_body(query_id, shares, &state.owner, &receiver)?;
        Ok(ContractOutcome::new(state.to_cell()?).send(
            OutboundMessage::new(state.issuer, 0, body),
            SendMode::CARRY_REMAINING_VALUE,
        ))
    }
}

// =============================================================================
// TESTS
// =============================================================================
