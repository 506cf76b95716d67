//! # Holder State
//!
//! Persistent layout: `coins balance, addr owner, addr issuer, ^code`.

use crate::errors::{HolderError, HolderResult};
use shared_cell::{Address, Cell, CellError, MAX_COINS};
use shared_runtime::domain::Coins;
use std::sync::Arc;

/// Committed data of one Holder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HolderState {
    pub balance: Coins,
    pub owner: Address,
    pub issuer: Address,
    /// Code used to derive sibling Holders.
    pub code: Arc<Cell>,
}

impl HolderState {
    /// Zero-balance state a fresh Holder is deployed with.
    #[must_use]
    pub fn new(owner: Address, issuer: Address, code: Arc<Cell>) -> Self {
        Self {
            balance: 0,
            owner,
            issuer,
            code,
        }
    }

    pub fn load(cell: &Cell) -> Result<Self, CellError> {
        let mut s = cell.parse();
        Ok(Self {
            balance: s.load_coins()?,
            owner: s.load_address()?,
            issuer: s.load_address()?,
            code: s.load_ref()?,
        })
    }

    pub fn to_cell(&self) -> Result<Arc<Cell>, CellError> {
        let mut b = Cell::builder();
        b.store_coins(self.balance)?
            .store_address(&self.owner)?
            .store_address(&self.issuer)?
            .store_ref(self.code.clone())?;
        Ok(b.build_ref())
    }

    pub fn credit(&mut self, amount: Coins) -> HolderResult<()> {
        self.balance = self
            .balance
            .checked_add(amount)
            .filter(|b| *b <= MAX_COINS)
            .ok_or(HolderError::Overflow)?;
        Ok(())
    }

    pub fn debit(&mut self, amount: Coins) -> HolderResult<()> {
        self.balance = self
            .balance
            .checked_sub(amount)
            .ok_or(HolderError::InsufficientBalance {
                balance: self.balance,
                requested: amount,
            })?;
        Ok(())
    }
}
