//! # Issuer State
//!
//! The hot fields live in the primary record; the rest sit in a secondary
//! record behind the last reference.
//!
//! ```text
//! primary:   coins total_supply, addr admin, ^content, ^holder_code, ^secondary
//! secondary: coins last_sync_supply, int32 price, addr backing_token,
//!            HashmapE(267, bool) blacklist
//! ```

use crate::errors::{IssuerError, IssuerResult};
use serde::{Deserialize, Serialize};
use shared_cell::{Address, Cell, CellError, Dictionary, MAX_COINS};
use shared_runtime::domain::Coins;
use std::sync::Arc;

/// Placeholder backing token used until `set_stoken` runs.
pub const UNSET_BACKING_TOKEN: Address = Address::new(0, [0; 32]);

/// Committed data of the Issuer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IssuerState {
    pub total_supply: Coins,
    pub admin: Address,
    pub content: Arc<Cell>,
    pub holder_code: Arc<Cell>,
    pub last_sync_supply: Coins,
    /// Deposited units per minted unit.
    pub price: i32,
    pub backing_token: Address,
    pub blacklist: Dictionary<Address, bool>,
}

impl IssuerState {
    pub fn load(cell: &Cell) -> Result<Self, CellError> {
        let mut s = cell.parse();
        let total_supply = s.load_coins()?;
        let admin = s.load_address()?;
        let content = s.load_ref()?;
        let holder_code = s.load_ref()?;
        let secondary = s.load_ref()?;

        let mut s = secondary.parse();
        Ok(Self {
            total_supply,
            admin,
            content,
            holder_code,
            last_sync_supply: s.load_coins()?,
            // An int32 read always fits.
            price: s.load_int(32)? as i32,
            backing_token: s.load_address()?,
            blacklist: s.load_dict()?,
        })
    }

    pub fn to_cell(&self) -> Result<Arc<Cell>, CellError> {
        let mut secondary = Cell::builder();
        secondary
            .store_coins(self.last_sync_supply)?
            .store_int(i128::from(self.price), 32)?
            .store_address(&self.backing_token)?
            .store_dict(&self.blacklist)?;

        let mut b = Cell::builder();
        b.store_coins(self.total_supply)?
            .store_address(&self.admin)?
            .store_ref(self.content.clone())?
            .store_ref(self.holder_code.clone())?
            .store_ref(secondary.build_ref())?;
        Ok(b.build_ref())
    }

    #[must_use]
    pub fn is_blacklisted(&self, address: &Address) -> bool {
        self.blacklist.get(address).copied().unwrap_or(false)
    }

    /// Upserts the flag; clearing removes the entry.
    pub fn set_blacklisted(&mut self, address: Address, flag: bool) {
        if flag {
            self.blacklist.insert(address, true);
        } else {
            self.blacklist.remove(&address);
        }
    }

    pub fn mint_supply(&mut self, amount: Coins) -> IssuerResult<()> {
        self.total_supply = self
            .total_supply
            .checked_add(amount)
            .filter(|s| *s <= MAX_COINS)
            .ok_or(IssuerError::Overflow)?;
        Ok(())
    }

    pub fn burn_supply(&mut self, amount: Coins) -> IssuerResult<()> {
        self.total_supply =
            self.total_supply
                .checked_sub(amount)
                .ok_or(IssuerError::InsufficientSupply {
                    supply: self.total_supply,
                    requested: amount,
                })?;
        Ok(())
    }
}

// =============================================================================
// DEPLOY CONFIGURATION
// =============================================================================

/// Initial Issuer configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuerConfig {
    pub admin: Address,
    /// Off-chain metadata URI stored in the content record.
    pub content_uri: String,
    #[serde(default = "default_price")]
    pub price: i32,
    #[serde(default = "default_backing_token")]
    pub backing_token: Address,
}

fn default_price() -> i32 {
    1
}

fn default_backing_token() -> Address {
    UNSET_BACKING_TOKEN
}

impl IssuerConfig {
    #[must_use]
    pub fn new(admin: Address, content_uri: impl Into<String>) -> Self {
        Self {
            admin,
            content_uri: content_uri.into(),
            price: default_price(),
            backing_token: default_backing_token(),
        }
    }

    /// Zero-supply state with an empty blacklist.
    pub fn initial_state(&self, holder_code: Arc<Cell>) -> Result<IssuerState, CellError> {
        Ok(IssuerState {
            total_supply: 0,
            admin: self.admin,
            content: offchain_content(&self.content_uri)?,
            holder_code,
            last_sync_supply: 0,
            price: self.price,
            backing_token: self.backing_token,
            blacklist: Dictionary::new(),
        })
    }
}

/// Bytes of string data per snake cell.
const SNAKE_CHUNK: usize = 127;

/// Off-chain content record: tag byte `0x01`, then the URI as a snake
/// string (full cells chained through their single reference).
pub fn offchain_content(uri: &str) -> Result<Arc<Cell>, CellError> {
    let bytes = uri.as_bytes();
    let first = bytes.len().min(SNAKE_CHUNK - 1);
    let mut tail: Option<Arc<Cell>> = None;
    let rest = &bytes[first..];
    for chunk in rest.chunks(SNAKE_CHUNK).rev() {
        let mut b = Cell::builder();
        b.store_bytes(chunk)?;
        if let Some(next) = tail.take() {
            b.store_ref(next)?;
        }
        tail = Some(b.build_ref());
    }
    let mut b = Cell::builder();
    b.store_uint(1, 8)?.store_bytes(&bytes[..first])?;
    if let Some(next) = tail {
        b.store_ref(next)?;
    }
    Ok(b.build_ref())
}

/// Reads back a URI written by [`offchain_content`].
pub fn read_offchain_uri(content: &Cell) -> Result<String, CellError> {
    let mut s = content.parse();
    if s.load_uint(8)? != 1 {
        return Err(CellError::InvalidLayout("off-chain content tag"));
    }
    let mut bytes = s.load_bytes(s.remaining_bits() / 8)?;
    let mut next = content.references().first().cloned();
    while let Some(cell) = next {
        bytes.extend(cell.parse().load_bytes(cell.bit_len() / 8)?);
        next = cell.references().first().cloned();
    }
    String::from_utf8(bytes).map_err(|_| CellError::InvalidLayout("content is not utf-8"))
}
