//! # Manager Messages
//!
//! Every mutation carries a 512-bit Ed25519 signature right after
//! `op, query_id`. The signature covers the representation hash of a
//! canonical cell rebuilt from the decoded fields:
//!
//! | Operation | Body after the signature | Signed cell |
//! |-----------|--------------------------|-------------|
//! | `setTokens` | ^(addr s, addr y, [addr treasury], bit is_vault) | the nested record |
//! | `setTreasury` | addr treasury | addr treasury |
//! | `deposit` | uint32 amount | uint32 amount |
//! | `withdraw` | uint32 amount | uint32 amount |
//! | `setAsset` | addr asset, bit enabled | addr asset, bit enabled |
//!
//! Nothing in the signed content is unique per message: a captured
//! message stays valid until the values it sets change.

use super::opcodes as op;
use crate::errors::{ManagerError, ManagerResult};
use shared_cell::{Address, Cell, CellBuilder, CellError, CellSlice};
use shared_crypto::Ed25519KeyPair;
use shared_runtime::domain::BOUNCE_PREFIX;
use std::sync::Arc;

/// Width of the signature field.
pub const SIGNATURE_BITS: usize = 512;

/// New token configuration carried by `setTokens`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TokenUpdate {
    pub s_token: Address,
    pub y_token: Address,
    /// Present only in the long form of the record.
    pub treasury: Option<Address>,
    pub is_vault: bool,
}

impl TokenUpdate {
    fn store(&self, b: &mut CellBuilder) -> Result<(), CellError> {
        b.store_address(&self.s_token)?.store_address(&self.y_token)?;
        if let Some(treasury) = &self.treasury {
            b.store_address(treasury)?;
        }
        b.store_bit(self.is_vault)?;
        Ok(())
    }

    /// A treasury is present when more than the flag bit follows the two
    /// token addresses.
    fn load(s: &mut CellSlice<'_>) -> Result<Self, CellError> {
        let s_token = s.load_address()?;
        let y_token = s.load_address()?;
        let treasury = if s.remaining_bits() > 1 {
            Some(s.load_address()?)
        } else {
            None
        };
        Ok(Self {
            s_token,
            y_token,
            treasury,
            is_vault: s.load_bit()?,
        })
    }
}

// =============================================================================
// REQUESTS
// =============================================================================

/// The signed content of a Manager mutation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ManagerRequest {
    SetTokens(TokenUpdate),
    SetTreasury { treasury: Address },
    /// Authorization only: no state changes.
    Deposit { amount: u32 },
    /// Authorization only: no state changes.
    Withdraw { amount: u32 },
    SetAsset { asset: Address, enabled: bool },
}

impl ManagerRequest {
    #[must_use]
    pub fn op(&self) -> u32 {
        match self {
            Self::SetTokens(_) => op::SET_TOKENS,
            Self::SetTreasury { .. } => op::SET_TREASURY,
            Self::Deposit { .. } => op::DEPOSIT,
            Self::Withdraw { .. } => op::WITHDRAW,
            Self::SetAsset { .. } => op::SET_ASSET,
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::SetTokens(_) => "set_tokens",
            Self::SetTreasury { .. } => "set_treasury",
            Self::Deposit { .. } => "deposit",
            Self::Withdraw { .. } => "withdraw",
            Self::SetAsset { .. } => "set_asset",
        }
    }

    fn store_fields(&self, b: &mut CellBuilder) -> Result<(), CellError> {
        match self {
            Self::SetTokens(update) => update.store(b)?,
            Self::SetTreasury { treasury } => {
                b.store_address(treasury)?;
            }
            Self::Deposit { amount } | Self::Withdraw { amount } => {
                b.store_uint(u128::from(*amount), 32)?;
            }
            Self::SetAsset { asset, enabled } => {
                b.store_address(asset)?.store_bit(*enabled)?;
            }
        }
        Ok(())
    }

    /// The canonical cell whose hash is signed.
    pub fn signed_cell(&self) -> Result<Arc<Cell>, CellError> {
        let mut b = Cell::builder();
        self.store_fields(&mut b)?;
        Ok(b.build_ref())
    }

    /// Signs the request and wraps it into a message.
    pub fn sign(self, keypair: &Ed25519KeyPair, query_id: u64) -> Result<ManagerMessage, CellError> {
        let hash = self.signed_cell()?.hash();
        Ok(ManagerMessage::Signed {
            query_id,
            signature: *keypair.sign(hash.as_bytes()).as_bytes(),
            request: self,
        })
    }

    fn load(selector: u32, s: &mut CellSlice<'_>) -> ManagerResult<Self> {
        Ok(match selector {
            op::SET_TOKENS => {
                let record = s.load_ref()?;
                Self::SetTokens(TokenUpdate::load(&mut record.parse())?)
            }
            op::SET_TREASURY => Self::SetTreasury {
                treasury: s.load_address()?,
            },
            op::DEPOSIT => Self::Deposit {
                amount: s.load_u32()?,
            },
            op::WITHDRAW => Self::Withdraw {
                amount: s.load_u32()?,
            },
            op::SET_ASSET => Self::SetAsset {
                asset: s.load_address()?,
                enabled: s.load_bit()?,
            },
            other => return Err(ManagerError::UnknownOp(other)),
        })
    }
}

// =============================================================================
// MESSAGE
// =============================================================================

/// Every message the Manager understands, decoded once.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ManagerMessage {
    /// Empty body: native value only.
    TopUp,
    Signed {
        query_id: u64,
        signature: [u8; 64],
        request: ManagerRequest,
    },
    /// The Manager sends nothing, so any bounce is noise.
    IgnoredBounce,
}

impl ManagerMessage {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::TopUp => "top_up",
            Self::Signed { request, .. } => request.name(),
            Self::IgnoredBounce => "ignored_bounce",
        }
    }

    pub fn decode(body: &Cell, bounced: bool) -> ManagerResult<Self> {
        let mut s = body.parse();
        if bounced {
            if s.load_u32()? != BOUNCE_PREFIX {
                return Err(CellError::InvalidLayout("bounced body prefix").into());
            }
            return Ok(Self::IgnoredBounce);
        }
        if s.is_empty() {
            return Ok(Self::TopUp);
        }
        let selector = s.load_u32()?;
        let query_id = s.load_u64()?;
        let signature: [u8; 64] = s
            .load_bytes(SIGNATURE_BITS / 8)?
            .try_into()
            .map_err(|_| CellError::InvalidLayout("512-bit signature"))?;
        Ok(Self::Signed {
            query_id,
            signature,
            request: ManagerRequest::load(selector, &mut s)?,
        })
    }

    /// Serializes the body a relayer sends.
    pub fn to_cell(&self) -> Result<Arc<Cell>, CellError> {
        let mut b = Cell::builder();
        if let Self::Signed {
            query_id,
            signature,
            request,
        } = self
        {
            b.store_uint(u128::from(request.op()), 32)?
                .store_uint(u128::from(*query_id), 64)?
                .store_bytes(signature)?;
            match request {
                ManagerRequest::SetTokens(_) => {
                    b.store_ref(request.signed_cell()?)?;
                }
                other => other.store_fields(&mut b)?,
            }
        }
        Ok(b.build_ref())
    }
}

// =============================================================================
// TESTS
// =============================================================================
