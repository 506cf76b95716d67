//! # Issuer Messages
//!
//! | Operation | Fields after `op, query_id` | Admin |
//! |-----------|-----------------------------|-------|
//! | `mint` | addr to, coins forward value, ^(op, query_id, coins amount, [credit tail]) | yes |
//! | `change_admin` | addr new admin | yes |
//! | `change_content` | ^content | yes |
//! | `set_price` | int32 price | yes |
//! | `set_blacklisted` | addr, bit flag | yes |
//! | `set_stoken` | addr backing token | yes |
//! | `sync_jetton` | none | yes |
//! | `deposit` | addr backing, coins amount, addr receiver | yes |
//! | `withdraw` | coins shares, addr receiver, addr owner | yes |
//! | `rescue` | addr to, coins amount | yes |
//! | `burn_notification` | coins amount, addr owner, addr response | no |
//! | `withdraw_burned` | coins shares, addr owner, addr receiver | no |
//! | `provide_wallet_address` | addr owner, bit include owner | no |
//!
//! The nested mint record is read leniently: its selector is not checked
//! and everything after the amount is optional.

use super::opcodes as op;
use crate::errors::{IssuerError, IssuerResult};
use jv_01_holder::domain::InternalTransfer;
use shared_cell::{Address, Cell, CellBuilder, CellError, CellSlice};
use shared_runtime::domain::{Coins, BOUNCE_PREFIX};
use std::sync::Arc;

fn body(op: u32, query_id: u64) -> Result<CellBuilder, CellError> {
    let mut b = Cell::builder();
    b.store_uint(u128::from(op), 32)?
        .store_uint(u128::from(query_id), 64)?;
    Ok(b)
}

// =============================================================================
// MESSAGE
// =============================================================================

/// Every message the Issuer understands, decoded once.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IssuerMessage {
    /// Empty body: native value only.
    TopUp,
    Mint {
        query_id: u64,
        to: Address,
        /// Native value attached to the Holder credit.
        forward_value: Coins,
        credit: InternalTransfer,
    },
    ChangeAdmin {
        query_id: u64,
        new_admin: Address,
    },
    ChangeContent {
        query_id: u64,
        content: Arc<Cell>,
    },
    SetPrice {
        query_id: u64,
        price: i32,
    },
    SetBlacklisted {
        query_id: u64,
        address: Address,
        flag: bool,
    },
    SetBackingToken {
        query_id: u64,
        address: Address,
    },
    SyncJetton {
        query_id: u64,
    },
    Deposit {
        query_id: u64,
        backing: Address,
        amount: Coins,
        receiver: Address,
    },
    Withdraw {
        query_id: u64,
        shares: Coins,
        receiver: Address,
        owner: Address,
    },
    Rescue {
        query_id: u64,
        to: Address,
        amount: Coins,
    },
    BurnNotification {
        query_id: u64,
        amount: Coins,
        owner: Address,
        response: Option<Address>,
    },
    /// A Holder confirming the debit of a withdraw.
    WithdrawBurned {
        query_id: u64,
        shares: Coins,
        owner: Address,
        receiver: Address,
    },
    ProvideWalletAddress {
        query_id: u64,
        owner: Address,
        include_address: bool,
    },
    /// Refund arriving back at the Issuer.
    Excesses {
        query_id: u64,
    },
    /// A message the Issuer sent bounced.
    Returned {
        op: u32,
        query_id: u64,
        amount: Coins,
    },
    IgnoredBounce {
        op: Option<u32>,
    },
}

impl IssuerMessage {
    /// True for operations gated on the admin address.
    #[must_use]
    pub fn requires_admin(&self) -> bool {
        matches!(
            self,
            Self::Mint { .. }
                | Self::ChangeAdmin { .. }
                | Self::ChangeContent { .. }
                | Self::SetPrice { .. }
                | Self::SetBlacklisted { .. }
                | Self::SetBackingToken { .. }
                | Self::SyncJetton { .. }
                | Self::Deposit { .. }
                | Self::Withdraw { .. }
                | Self::Rescue { .. }
        )
    }

    /// Operation name for logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::TopUp => "top_up",
            Self::Mint { .. } => "mint",
            Self::ChangeAdmin { .. } => "change_admin",
            Self::ChangeContent { .. } => "change_content",
            Self::SetPrice { .. } => "set_price",
            Self::SetBlacklisted { .. } => "set_blacklisted",
            Self::SetBackingToken { .. } => "set_stoken",
            Self::SyncJetton { .. } => "sync_jetton",
            Self::Deposit { .. } => "deposit",
            Self::Withdraw { .. } => "withdraw",
            Self::Rescue { .. } => "rescue",
            Self::BurnNotification { .. } => "burn_notification",
            Self::WithdrawBurned { .. } => "withdraw_burned",
            Self::ProvideWalletAddress { .. } => "provide_wallet_address",
            Self::Excesses { .. } => "excesses",
            Self::Returned { .. } => "bounced",
            Self::IgnoredBounce { .. } => "ignored_bounce",
        }
    }

    pub fn decode(body: &Cell, bounced: bool) -> IssuerResult<Self> {
        let mut s = body.parse();
        if bounced {
            return Ok(Self::decode_bounced(&mut s)?);
        }
        if s.is_empty() {
            return Ok(Self::TopUp);
        }
        let selector = s.load_u32()?;
        let query_id = s.load_u64()?;
        let message = match selector {
            op::MINT => {
                let to = s.load_address()?;
                let forward_value = s.load_coins()?;
                let master = s.load_ref()?;
                let mut m = master.parse();
                let _nested_op = m.load_u32()?;
                let nested_query = m.load_u64()?;
                Self::Mint {
                    query_id,
                    to,
                    forward_value,
                    credit: InternalTransfer::load(&mut m, nested_query)?,
                }
            }
            op::CHANGE_ADMIN => Self::ChangeAdmin {
                query_id,
                new_admin: s.load_address()?,
            },
            op::CHANGE_CONTENT => Self::ChangeContent {
                query_id,
                content: s.load_ref()?,
            },
            op::SET_PRICE => Self::SetPrice {
                query_id,
                price: s.load_int(32)? as i32,
            },
            op::SET_BLACKLISTED => Self::SetBlacklisted {
                query_id,
                address: s.load_address()?,
                flag: s.load_bit()?,
            },
            op::SET_STOKEN => Self::SetBackingToken {
                query_id,
                address: s.load_address()?,
            },
            op::SYNC_JETTON => Self::SyncJetton { query_id },
            op::DEPOSIT => Self::Deposit {
                query_id,
                backing: s.load_address()?,
                amount: s.load_coins()?,
                receiver: s.load_address()?,
            },
            op::WITHDRAW => Self::Withdraw {
                query_id,
                shares: s.load_coins()?,
                receiver: s.load_address()?,
                owner: s.load_address()?,
            },
            op::RESCUE => Self::Rescue {
                query_id,
                to: s.load_address()?,
                amount: s.load_coins()?,
            },
            op::BURN_NOTIFICATION => Self::BurnNotification {
                query_id,
                amount: s.load_coins()?,
                owner: s.load_address()?,
                response: s.load_maybe_address()?,
            },
            op::WITHDRAW_BURNED => Self::WithdrawBurned {
                query_id,
                shares: s.load_coins()?,
                owner: s.load_address()?,
                receiver: s.load_address()?,
            },
            op::PROVIDE_WALLET_ADDRESS => Self::ProvideWalletAddress {
                query_id,
                owner: s.load_address()?,
                include_address: s.load_bit()?,
            },
            op::EXCESSES => Self::Excesses { query_id },
            other => return Err(IssuerError::UnknownOp(other)),
        };
        Ok(message)
    }

    fn decode_bounced(s: &mut CellSlice<'_>) -> Result<Self, CellError> {
        if s.load_u32()? != BOUNCE_PREFIX {
            return Err(CellError::InvalidLayout("bounced body prefix"));
        }
        let Ok(selector) = s.load_u32() else {
            return Ok(Self::IgnoredBounce { op: None });
        };
        match selector {
            op::INTERNAL_TRANSFER | op::WITHDRAW_BURN => Ok(Self::Returned {
                op: selector,
                query_id: s.load_u64()?,
                amount: s.load_coins()?,
            }),
            other => Ok(Self::IgnoredBounce { op: Some(other) }),
        }
    }

    /// Serializes a request body. Only operations a client sends to the
    /// Issuer are encodable.
    pub fn to_cell(&self) -> Result<Arc<Cell>, CellError> {
        let b = match self {
            Self::TopUp => Cell::builder(),
            Self::Mint {
                query_id,
                to,
                forward_value,
                credit,
            } => {
                let mut b = body(op::MINT, *query_id)?;
                b.store_address(to)?
                    .store_coins(*forward_value)?
                    .store_ref(credit.to_cell()?)?;
                b
            }
            Self::ChangeAdmin {
                query_id,
                new_admin,
            } => {
                let mut b = body(op::CHANGE_ADMIN, *query_id)?;
                b.store_address(new_admin)?;
                b
            }
            Self::ChangeContent { query_id, content } => {
                let mut b = body(op::CHANGE_CONTENT, *query_id)?;
                b.store_ref(content.clone())?;
                b
            }
            Self::SetPrice { query_id, price } => {
                let mut b = body(op::SET_PRICE, *query_id)?;
                b.store_int(i128::from(*price), 32)?;
                b
            }
            Self::SetBlacklisted {
                query_id,
                address,
                flag,
            } => {
                let mut b = body(op::SET_BLACKLISTED, *query_id)?;
                b.store_address(address)?.store_bit(*flag)?;
                b
            }
            Self::SetBackingToken { query_id, address } => {
                let mut b = body(op::SET_STOKEN, *query_id)?;
                b.store_address(address)?;
                b
            }
            Self::SyncJetton { query_id } => body(op::SYNC_JETTON, *query_id)?,
            Self::Deposit {
                query_id,
                backing,
                amount,
                receiver,
            } => {
                let mut b = body(op::DEPOSIT, *query_id)?;
                b.store_address(backing)?
                    .store_coins(*amount)?
                    .store_address(receiver)?;
                b
            }
            Self::Withdraw {
                query_id,
                shares,
                receiver,
                owner,
            } => {
                let mut b = body(op::WITHDRAW, *query_id)?;
                b.store_coins(*shares)?
                    .store_address(receiver)?
                    .store_address(owner)?;
                b
            }
            Self::Rescue {
                query_id,
                to,
                amount,
            } => {
                let mut b = body(op::RESCUE, *query_id)?;
                b.store_address(to)?.store_coins(*amount)?;
                b
            }
            Self::BurnNotification {
                query_id,
                amount,
                owner,
                response,
            } => {
                let mut b = body(op::BURN_NOTIFICATION, *query_id)?;
                b.store_coins(*amount)?
                    .store_address(owner)?
                    .store_maybe_address(response.as_ref())?;
                b
            }
            Self::WithdrawBurned {
                query_id,
                shares,
                owner,
                receiver,
            } => {
                let mut b = body(op::WITHDRAW_BURNED, *query_id)?;
                b.store_coins(*shares)?
                    .store_address(owner)?
                    .store_address(receiver)?;
                b
            }
            Self::ProvideWalletAddress {
                query_id,
                owner,
                include_address,
            } => {
                let mut b = body(op::PROVIDE_WALLET_ADDRESS, *query_id)?;
                b.store_address(owner)?.store_bit(*include_address)?;
                b
            }
            Self::Excesses { query_id } => body(op::EXCESSES, *query_id)?,
            Self::Returned { .. } | Self::IgnoredBounce { .. } => {
                return Err(CellError::InvalidLayout("bounces are not sent by clients"))
            }
        };
        Ok(b.build_ref())
    }
}

// =============================================================================
// OUTBOUND BODIES
// =============================================================================

/// `take_wallet_address(query_id, holder | addr_none, Maybe ^owner)`.
pub fn take_wallet_address_body(
    query_id: u64,
    holder: Option<&Address>,
    owner: Option<&Address>,
) -> Result<Arc<Cell>, CellError> {
    let owner_cell = match owner {
        Some(owner) => {
            let mut b = Cell::builder();
            b.store_address(owner)?;
            Some(b.build_ref())
        }
        None => None,
    };
    let mut b = body(op::TAKE_WALLET_ADDRESS, query_id)?;
    b.store_maybe_address(holder)?.store_maybe_ref(owner_cell)?;
    Ok(b.build_ref())
}

/// `withdraw_release(query_id, shares, receiver)` to the backing token.
pub fn withdraw_release_body(
    query_id: u64,
    shares: Coins,
    receiver: &Address,
) -> Result<Arc<Cell>, CellError> {
    let mut b = body(op::WITHDRAW_RELEASE, query_id)?;
    b.store_coins(shares)?.store_address(receiver)?;
    Ok(b.build_ref())
}

// =============================================================================
// TESTS
// =============================================================================
