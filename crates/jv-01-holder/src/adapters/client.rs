//! # Holder Client
//!
//! Typed access to one Holder through [`RuntimeApi`].

use crate::domain::{derive_holder_address, BurnRequest, TransferRequest};
use crate::ports::{HolderApi, WalletData};
use shared_cell::{Address, Cell, CellError};
use shared_runtime::domain::{Coins, Transaction};
use shared_runtime::errors::ClientResult;
use shared_runtime::ports::{RuntimeApi, StackReader};
use std::sync::Arc;
use tracing::instrument;

/// Handle on the Holder at `address`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HolderClient {
    pub address: Address,
}

impl HolderClient {
    #[must_use]
    pub fn new(address: Address) -> Self {
        Self { address }
    }

    /// Client for the Holder of `owner` under `issuer`, derived locally.
    pub fn for_owner(
        owner: &Address,
        issuer: &Address,
        code: &Arc<Cell>,
        workchain: i8,
    ) -> Result<Self, CellError> {
        Ok(Self::new(derive_holder_address(owner, issuer, code, workchain)?))
    }

    /// Balance, or zero when the Holder was never deployed.
    pub fn balance<R: RuntimeApi>(&self, runtime: &R) -> ClientResult<Coins> {
        match runtime.account(&self.address) {
            Some(account) if account.is_active() => Ok(self.wallet_data(runtime)?.balance),
            _ => Ok(0),
        }
    }
}

impl HolderApi for HolderClient {
    #[instrument(skip(self, runtime, request), fields(holder = %self.address))]
    fn transfer<R: RuntimeApi>(
        &self,
        runtime: &mut R,
        owner: Address,
        value: Coins,
        request: &TransferRequest,
    ) -> ClientResult<Vec<Transaction>> {
        runtime.send_internal(owner, self.address, value, request.to_cell()?, None, true)?;
        Ok(runtime.run_until_idle()?)
    }

    #[instrument(skip(self, runtime, request), fields(holder = %self.address))]
    fn burn<R: RuntimeApi>(
        &self,
        runtime: &mut R,
        owner: Address,
        value: Coins,
        request: &BurnRequest,
    ) -> ClientResult<Vec<Transaction>> {
        runtime.send_internal(owner, self.address, value, request.to_cell()?, None, true)?;
        Ok(runtime.run_until_idle()?)
    }

    fn wallet_data<R: RuntimeApi>(&self, runtime: &R) -> ClientResult<WalletData> {
        let stack = runtime.run_get_method(&self.address, "get_wallet_data", &[])?;
        let mut reader = StackReader::new("get_wallet_data", &stack);
        Ok(WalletData {
            balance: reader.read_coins()?,
            owner: reader.read_address()?,
            issuer: reader.read_address()?,
            code: reader.read_cell()?,
        })
    }
}
