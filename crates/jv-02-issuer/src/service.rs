//! # Issuer Service
//!
//! The Issuer state machine. Every privileged message passes the
//! [`AdminPolicy`] first; the handler then validates its own parameters in
//! a fixed order and either commits the new state with its sends or fails
//! as a whole.
//!
//! ## Supply Accounting
//!
//! | Event | Supply |
//! |-------|--------|
//! | `mint`, `deposit` (minted > 0) | `+ amount` |
//! | `withdraw` | `- shares` |
//! | `burn_notification` | `- amount` |
//! | bounced `internal_transfer` | `- amount` (mint reverted) |
//! | bounced `withdraw_burn` | `+ shares` (withdraw reverted) |
//! | `withdraw_burned` | unchanged; backing released to the receiver |

use crate::domain::{
    check_price, minted_for_deposit, opcodes as op, take_wallet_address_body,
    withdraw_release_body, AdminPolicy, IssuerMessage, IssuerState,
};
use crate::errors::{IssuerError, IssuerResult};
use crate::metrics;
use jv_01_holder::domain::{
    derive_holder_address, excesses_body, forward_payload, holder_state_init,
    withdraw_burn_body, InternalTransfer,
};
use shared_cell::{Address, Cell};
use shared_runtime::domain::{Coins, ContractOutcome, MessageContext, OutboundMessage, SendMode};
use shared_runtime::ports::{AuthContext, AuthorizationPolicy};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Handles decoded Issuer messages.
#[derive(Clone, Copy, Debug, Default)]
pub struct IssuerService;

impl IssuerService {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Applies one message to `state`.
    #[instrument(skip_all, fields(op = message.name(), sender = %ctx.sender))]
    pub fn handle(
        &self,
        ctx: &MessageContext,
        state: IssuerState,
        message: IssuerMessage,
    ) -> IssuerResult<ContractOutcome> {
        let policy = AdminPolicy::new(state.admin);
        if let Err(denied) = policy.authorize(&message, &AuthContext::from_sender(&ctx.sender)) {
            metrics::record_unauthorized();
            warn!(reason = denied.reason, "Privileged operation refused");
            return Err(IssuerError::Unauthorized(ctx.sender));
        }

        let mut state = state;
        match message {
            IssuerMessage::TopUp | IssuerMessage::Excesses { .. } => {
                debug!(value = ctx.value, "Value accepted");
                Ok(ContractOutcome::new(state.to_cell()?))
            }
            IssuerMessage::Mint {
                query_id,
                to,
                forward_value,
                credit,
            } => {
                if state.is_blacklisted(&to) {
                    return Err(IssuerError::Blacklisted(to));
                }
                state.mint_supply(credit.amount)?;
                info!(query_id, %to, amount = credit.amount, supply = state.total_supply, "Minted");
                metrics::record_mint(credit.amount, state.total_supply);
                let send = credit_holder(ctx, &state, &to, &credit, forward_value)?;
                Ok(ContractOutcome::new(state.to_cell()?)
                    .send(send, SendMode::PAY_FEES_SEPARATELY))
            }
            IssuerMessage::ChangeAdmin {
                query_id,
                new_admin,
            } => {
                info!(query_id, old = %state.admin, new = %new_admin, "Admin changed");
                state.admin = new_admin;
                Ok(ContractOutcome::new(state.to_cell()?))
            }
            IssuerMessage::ChangeContent { query_id, content } => {
                info!(query_id, "Content changed");
                state.content = content;
                Ok(ContractOutcome::new(state.to_cell()?))
            }
            IssuerMessage::SetPrice { query_id, price } => {
                check_price(price)?;
                info!(query_id, price, "Price set");
                state.price = price;
                Ok(ContractOutcome::new(state.to_cell()?))
            }
            IssuerMessage::SetBlacklisted {
                query_id,
                address,
                flag,
            } => {
                info!(query_id, %address, flag, "Blacklist updated");
                state.set_blacklisted(address, flag);
                Ok(ContractOutcome::new(state.to_cell()?))
            }
            IssuerMessage::SetBackingToken { query_id, address } => {
                info!(query_id, %address, "Backing token set");
                state.backing_token = address;
                Ok(ContractOutcome::new(state.to_cell()?))
            }
            IssuerMessage::SyncJetton { query_id } => {
                debug!(
                    query_id,
                    previous = state.last_sync_supply,
                    supply = state.total_supply,
                    "Supply synced"
                );
                state.last_sync_supply = state.total_supply;
                Ok(ContractOutcome::new(state.to_cell()?))
            }
            IssuerMessage::Deposit {
                query_id,
                backing,
                amount,
                receiver,
            } => self.deposit(ctx, state, query_id, backing, amount, receiver),
            IssuerMessage::Withdraw {
                query_id,
                shares,
                receiver,
                owner,
            } => self.withdraw(ctx, state, query_id, shares, receiver, owner),
            IssuerMessage::Rescue {
                query_id,
                to,
                amount,
            } => {
                info!(query_id, %to, amount, "Rescue");
                Ok(ContractOutcome::new(state.to_cell()?).send(
                    OutboundMessage::new(to, amount, Arc::new(Cell::empty())),
                    SendMode::ORDINARY,
                ))
            }
            IssuerMessage::BurnNotification {
                query_id,
                amount,
                owner,
                response,
            } => {
                let holder = derive_holder_address(
                    &owner,
                    &ctx.self_address,
                    &state.holder_code,
                    ctx.workchain(),
                )?;
                if ctx.sender != holder {
                    return Err(IssuerError::UnauthorizedBurn(ctx.sender));
                }
                state.burn_supply(amount)?;
                info!(query_id, %owner, amount, supply = state.total_supply, "Burned");
                metrics::record_burn(amount, state.total_supply);

                let outcome = ContractOutcome::new(state.to_cell()?);
                Ok(match response {
                    Some(response) => outcome.send(
                        OutboundMessage::new(response, 0, excesses_body(query_id)?),
                        SendMode::CARRY_REMAINING_VALUE | SendMode::IGNORE_ERRORS,
                    ),
                    None => outcome,
                })
            }
            IssuerMessage::WithdrawBurned {
                query_id,
                shares,
                owner,
                receiver,
            } => self.release_backing(ctx, state, query_id, shares, owner, receiver),
            IssuerMessage::ProvideWalletAddress {
                query_id,
                owner,
                include_address,
            } => {
                let holder = if owner.workchain == ctx.workchain() {
                    Some(derive_holder_address(
                        &owner,
                        &ctx.self_address,
                        &state.holder_code,
                        ctx.workchain(),
                    )?)
                } else {
                    None
                };
                let body = take_wallet_address_body(
                    query_id,
                    holder.as_ref(),
                    include_address.then_some(&owner),
                )?;
                Ok(ContractOutcome::new(state.to_cell()?).send(
                    OutboundMessage::new(ctx.sender, 0, body),
                    SendMode::CARRY_REMAINING_VALUE,
                ))
            }
            IssuerMessage::Returned {
                op: returned,
                query_id,
                amount,
            } => {
                match returned {
                    op::INTERNAL_TRANSFER => {
                        state.burn_supply(amount)?;
                        warn!(query_id, amount, "Mint bounced, supply reverted");
                    }
                    op::WITHDRAW_BURN => {
                        state.mint_supply(amount)?;
                        warn!(query_id, amount, "Withdraw burn bounced, supply restored");
                    }
                    other => debug!(op = other, "Bounce ignored"),
                }
                Ok(ContractOutcome::new(state.to_cell()?))
            }
            IssuerMessage::IgnoredBounce { op } => {
                debug!(?op, "Bounce ignored");
                Ok(ContractOutcome::new(state.to_cell()?))
            }
        }
    }

    fn deposit(
        &self,
        ctx: &MessageContext,
        mut state: IssuerState,
        query_id: u64,
        backing: Address,
        amount: Coins,
        receiver: Address,
    ) -> IssuerResult<ContractOutcome> {
        if state.is_blacklisted(&receiver) {
            return Err(IssuerError::Blacklisted(receiver));
        }
        if amount == 0 {
            return Err(IssuerError::ZeroDeposit);
        }
        let minted = minted_for_deposit(amount, state.price)?;
        if minted == 0 {
            info!(query_id, amount, price = state.price, "Deposit below price, nothing minted");
            return Ok(ContractOutcome::new(state.to_cell()?));
        }

        state.mint_supply(minted)?;
        info!(
            query_id,
            %backing,
            %receiver,
            amount,
            minted,
            supply = state.total_supply,
            "Deposit minted"
        );
        metrics::record_mint(minted, state.total_supply);

        let credit = InternalTransfer {
            query_id,
            amount: minted,
            from: None,
            response: Some(ctx.sender),
            forward_amount: 0,
            forward_payload: forward_payload(None)?,
        };
        let send = credit_holder(ctx, &state, &receiver, &credit, 0)?;
        Ok(ContractOutcome::new(state.to_cell()?).send(send, SendMode::CARRY_REMAINING_VALUE))
    }

    fn withdraw(
        &self,
        ctx: &MessageContext,
        mut state: IssuerState,
        query_id: u64,
        shares: Coins,
        receiver: Address,
        owner: Address,
    ) -> IssuerResult<ContractOutcome> {
        if shares == 0 {
            return Err(IssuerError::ZeroShares);
        }
        if shares > state.total_supply {
            return Err(IssuerError::InsufficientSupply {
                supply: state.total_supply,
                requested: shares,
            });
        }
        if state.is_blacklisted(&receiver) {
            return Err(IssuerError::Blacklisted(receiver));
        }

        state.burn_supply(shares)?;
        info!(query_id, %owner, %receiver, shares, supply = state.total_supply, "Withdraw");
        metrics::record_burn(shares, state.total_supply);

        let holder = derive_holder_address(
            &owner,
            &ctx.self_address,
            &state.holder_code,
            ctx.workchain(),
        )?;
        // Backing is released only once the Holder confirms the debit.
        let body = withdraw_burn_body(query_id, shares, &receiver)?;
        Ok(ContractOutcome::new(state.to_cell()?).send(
            OutboundMessage::new(holder, 0, body).with_bounce(true),
            SendMode::CARRY_REMAINING_VALUE,
        ))
    }

    fn release_backing(
        &self,
        ctx: &MessageContext,
        state: IssuerState,
        query_id: u64,
        shares: Coins,
        owner: Address,
        receiver: Address,
    ) -> IssuerResult<ContractOutcome> {
        let holder = derive_holder_address(
            &owner,
            &ctx.self_address,
            &state.holder_code,
            ctx.workchain(),
        )?;
        if ctx.sender != holder {
            return Err(IssuerError::UnauthorizedBurn(ctx.sender));
        }
        info!(query_id, %owner, %receiver, shares, backing = %state.backing_token, "Withdraw released");
        let body = withdraw_release_body(query_id, shares, &receiver)?;
        Ok(ContractOutcome::new(state.to_cell()?).send(
            OutboundMessage::new(state.backing_token, 0, body),
            SendMode::CARRY_REMAINING_VALUE,
        ))
    }
}

/// Bounceable `internal_transfer` to the Holder of `owner`, deploying it if needed.
fn credit_holder(
    ctx: &MessageContext,
    state: &IssuerState,
    owner: &Address,
    credit: &InternalTransfer,
    value: Coins,
) -> IssuerResult<OutboundMessage> {
    let init = holder_state_init(owner, &ctx.self_address, &state.holder_code)?;
    let holder = init.address(ctx.workchain())?;
    Ok(OutboundMessage::new(holder, value, credit.to_cell()?)
        .with_bounce(true)
        .with_state_init(init))
}

// =============================================================================
// TESTS
// =============================================================================
