//! # Holder Messages
//!
//! Inbound bodies are decoded once into [`HolderMessage`] at the account
//! boundary. The request structs also build the bodies clients and other
//! accounts send.
//!
//! | Operation | Fields after `op, query_id` |
//! |-----------|-----------------------------|
//! | `transfer` | coins amount, addr to, addr response, bit custom payload, coins forward, forward payload |
//! | `internal_transfer` | coins amount, addr from, addr response, coins forward, forward payload |
//! | `burn` | coins amount, addr response, bit custom payload |
//! | `withdraw_burn` | coins shares, addr receiver |
//!
//! A forward payload is the raw `Either Cell ^Cell` tail of the body. It is
//! carried from `transfer` through `internal_transfer` into
//! `transfer_notification` without being interpreted.

use super::opcodes as op;
use crate::errors::{HolderError, HolderResult};
use shared_cell::{Address, Cell, CellBuilder, CellError, CellSlice};
use shared_runtime::domain::{Coins, BOUNCE_PREFIX};
use std::sync::Arc;

/// `Either Cell ^Cell` tail: bit `0`, then the payload as a reference when present.
pub fn forward_payload(payload: Option<Arc<Cell>>) -> Result<Arc<Cell>, CellError> {
    let mut b = Cell::builder();
    b.store_bit(false)?;
    if let Some(payload) = payload {
        b.store_ref(payload)?;
    }
    Ok(b.build_ref())
}

fn body(op: u32, query_id: u64) -> Result<CellBuilder, CellError> {
    let mut b = Cell::builder();
    b.store_uint(u128::from(op), 32)?
        .store_uint(u128::from(query_id), 64)?;
    Ok(b)
}

fn load_tail(s: &CellSlice<'_>) -> Result<Arc<Cell>, CellError> {
    Ok(Arc::new(s.to_cell()?))
}

// =============================================================================
// REQUESTS
// =============================================================================

/// Owner-initiated transfer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransferRequest {
    pub query_id: u64,
    pub amount: Coins,
    /// Owner of the receiving Holder.
    pub destination: Address,
    pub response: Option<Address>,
    pub forward_amount: Coins,
    pub forward_payload: Arc<Cell>,
}

impl TransferRequest {
    pub fn to_cell(&self) -> Result<Arc<Cell>, CellError> {
        let mut b = body(op::TRANSFER, self.query_id)?;
        b.store_coins(self.amount)?
            .store_address(&self.destination)?
            .store_maybe_address(self.response.as_ref())?
            .store_bit(false)?
            .store_coins(self.forward_amount)?
            .store_cell(&self.forward_payload)?;
        Ok(b.build_ref())
    }

    fn load(s: &mut CellSlice<'_>, query_id: u64) -> Result<Self, CellError> {
        let amount = s.load_coins()?;
        let destination = s.load_address()?;
        let response = s.load_maybe_address()?;
        let _custom_payload = s.load_maybe_ref()?;
        let forward_amount = s.load_coins()?;
        Ok(Self {
            query_id,
            amount,
            destination,
            response,
            forward_amount,
            forward_payload: load_tail(s)?,
        })
    }
}

/// Credit delivered to a Holder by the Issuer (mint) or a sibling (transfer).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InternalTransfer {
    pub query_id: u64,
    pub amount: Coins,
    /// Owner of the sending Holder; `None` on the mint path.
    pub from: Option<Address>,
    pub response: Option<Address>,
    pub forward_amount: Coins,
    pub forward_payload: Arc<Cell>,
}

impl InternalTransfer {
    /// Plain credit with no forward value.
    #[must_use]
    pub fn credit(query_id: u64, amount: Coins, forward_payload: Arc<Cell>) -> Self {
        Self {
            query_id,
            amount,
            from: None,
            response: None,
            forward_amount: 0,
            forward_payload,
        }
    }

    pub fn to_cell(&self) -> Result<Arc<Cell>, CellError> {
        let mut b = body(op::INTERNAL_TRANSFER, self.query_id)?;
        b.store_coins(self.amount)?
            .store_maybe_address(self.from.as_ref())?
            .store_maybe_address(self.response.as_ref())?
            .store_coins(self.forward_amount)?
            .store_cell(&self.forward_payload)?;
        Ok(b.build_ref())
    }

    /// Everything after `amount` is optional: a short record is a bare credit.
    pub fn load(s: &mut CellSlice<'_>, query_id: u64) -> Result<Self, CellError> {
        let amount = s.load_coins()?;
        let from = if s.remaining_bits() >= 2 {
            s.load_maybe_address()?
        } else {
            None
        };
        let response = if s.remaining_bits() >= 2 {
            s.load_maybe_address()?
        } else {
            None
        };
        let forward_amount = if s.remaining_bits() >= 4 {
            s.load_coins()?
        } else {
            0
        };
        Ok(Self {
            query_id,
            amount,
            from,
            response,
            forward_amount,
            forward_payload: load_tail(s)?,
        })
    }
}

/// Owner-initiated burn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BurnRequest {
    pub query_id: u64,
    pub amount: Coins,
    pub response: Option<Address>,
}

impl BurnRequest {
    pub fn to_cell(&self) -> Result<Arc<Cell>, CellError> {
        let mut b = body(op::BURN, self.query_id)?;
        b.store_coins(self.amount)?
            .store_maybe_address(self.response.as_ref())?
            .store_bit(false)?;
        Ok(b.build_ref())
    }

    fn load(s: &mut CellSlice<'_>, query_id: u64) -> Result<Self, CellError> {
        let amount = s.load_coins()?;
        let response = s.load_maybe_address()?;
        if s.remaining_bits() > 0 {
            let _custom_payload = s.load_maybe_ref()?;
        }
        Ok(Self {
            query_id,
            amount,
            response,
        })
    }
}

// =============================================================================
// OUTBOUND BODIES
// =============================================================================

/// `transfer_notification(query_id, amount, from, forward_payload)` to the owner.
pub fn transfer_notification_body(
    query_id: u64,
    amount: Coins,
    from: Option<&Address>,
    payload: &Cell,
) -> Result<Arc<Cell>, CellError> {
    let mut b = body(op::TRANSFER_NOTIFICATION, query_id)?;
    b.store_coins(amount)?
        .store_maybe_address(from)?
        .store_cell(payload)?;
    Ok(b.build_ref())
}

/// `excesses(query_id)`.
pub fn excesses_body(query_id: u64) -> Result<Arc<Cell>, CellError> {
    Ok(body(op::EXCESSES, query_id)?.build_ref())
}

/// `burn_notification(query_id, amount, owner, response)` to the Issuer.
pub fn burn_notification_body(
    query_id: u64,
    amount: Coins,
    owner: &Address,
    response: Option<&Address>,
) -> Result<Arc<Cell>, CellError> {
    let mut b = body(op::BURN_NOTIFICATION, query_id)?;
    b.store_coins(amount)?
        .store_address(owner)?
        .store_maybe_address(response)?;
    Ok(b.build_ref())
}

/// `withdraw_burn(query_id, shares, receiver)` from the Issuer.
pub fn withdraw_burn_body(
    query_id: u64,
    shares: Coins,
    receiver: &Address,
) -> Result<Arc<Cell>, CellError> {
    let mut b = body(op::WITHDRAW_BURN, query_id)?;
    b.store_coins(shares)?.store_address(receiver)?;
    Ok(b.build_ref())
}

/// `withdraw_burned(query_id, shares, owner, receiver)` back to the Issuer
/// once the shares are debited.
pub fn withdraw_burned_body(
    query_id: u64,
    shares: Coins,
    owner: &Address,
    receiver: &Address,
) -> Result<Arc<Cell>, CellError> {
    let mut b = body(op::WITHDRAW_BURNED, query_id)?;
    b.store_coins(shares)?
        .store_address(owner)?
        .store_address(receiver)?;
    Ok(b.build_ref())
}

// =============================================================================
// DECODED MESSAGE
// =============================================================================

/// Every message a Holder understands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HolderMessage {
    /// Empty body: native value only.
    TopUp,
    Transfer(TransferRequest),
    InternalTransfer(InternalTransfer),
    Burn(BurnRequest),
    WithdrawBurn {
        query_id: u64,
        shares: Coins,
        receiver: Address,
    },
    /// A debit this Holder sent came back bounced.
    Returned { op: u32, query_id: u64, amount: Coins },
    /// Any other bounce. Nothing to restore.
    IgnoredBounce { op: Option<u32> },
}

impl HolderMessage {
    pub fn decode(body: &Cell, bounced: bool) -> HolderResult<Self> {
        let mut s = body.parse();
        if bounced {
            return Ok(Self::decode_bounced(&mut s)?);
        }
        if s.is_empty() {
            return Ok(Self::TopUp);
        }
        let selector = s.load_u32()?;
        let query_id = s.load_u64()?;
        match selector {
            op::TRANSFER => Ok(Self::Transfer(TransferRequest::load(&mut s, query_id)?)),
            op::INTERNAL_TRANSFER => Ok(Self::InternalTransfer(InternalTransfer::load(
                &mut s, query_id,
            )?)),
            op::BURN => Ok(Self::Burn(BurnRequest::load(&mut s, query_id)?)),
            op::WITHDRAW_BURN => Ok(Self::WithdrawBurn {
                query_id,
                shares: s.load_coins()?,
                receiver: s.load_address()?,
            }),
            other => Err(HolderError::UnknownOp(other)),
        }
    }

    fn decode_bounced(s: &mut CellSlice<'_>) -> Result<Self, CellError> {
        if s.load_u32()? != BOUNCE_PREFIX {
            return Err(CellError::InvalidLayout("bounced body prefix"));
        }
        let Ok(selector) = s.load_u32() else {
            return Ok(Self::IgnoredBounce { op: None });
        };
        match selector {
            op::INTERNAL_TRANSFER | op::BURN_NOTIFICATION => Ok(Self::Returned {
                op: selector,
                query_id: s.load_u64()?,
                amount: s.load_coins()?,
            }),
            other => Ok(Self::IgnoredBounce { op: Some(other) }),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
