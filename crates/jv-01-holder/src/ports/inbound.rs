//! # Driving Port (API - Inbound)
//!
//! What an owner can do with its Holder.

use crate::domain::{BurnRequest, TransferRequest};
use shared_cell::{Address, Cell};
use shared_runtime::domain::{Coins, Transaction};
use shared_runtime::errors::ClientResult;
use shared_runtime::ports::RuntimeApi;
use std::sync::Arc;

/// Snapshot returned by `get_wallet_data`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WalletData {
    pub balance: Coins,
    pub owner: Address,
    pub issuer: Address,
    pub code: Arc<Cell>,
}

/// Owner-side Holder API.
pub trait HolderApi {
    /// Sends `transfer` from `owner` with `value` attached and drains the queue.
    fn transfer<R: RuntimeApi>(
        &self,
        runtime: &mut R,
        owner: Address,
        value: Coins,
        request: &TransferRequest,
    ) -> ClientResult<Vec<Transaction>>;

    /// Sends `burn` from `owner` and drains the queue.
    fn burn<R: RuntimeApi>(
        &self,
        runtime: &mut R,
        owner: Address,
        value: Coins,
        request: &BurnRequest,
    ) -> ClientResult<Vec<Transaction>>;

    /// Reads `get_wallet_data`.
    fn wallet_data<R: RuntimeApi>(&self, runtime: &R) -> ClientResult<WalletData>;
}
