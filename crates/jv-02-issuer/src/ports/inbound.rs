//! # Driving Port (API - Inbound)
//!
//! What admins and token users can do with the Issuer.

use crate::domain::IssuerMessage;
use shared_cell::{Address, Cell};
use shared_runtime::domain::{Coins, Transaction};
use shared_runtime::errors::ClientResult;
use shared_runtime::ports::RuntimeApi;
use std::sync::Arc;

/// Snapshot returned by `get_jetton_data`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JettonData {
    pub total_supply: Coins,
    pub mintable: bool,
    pub admin: Address,
    pub content: Arc<Cell>,
    pub holder_code: Arc<Cell>,
}

/// Issuer API.
pub trait IssuerApi {
    /// Sends `message` from `sender` with `value` attached and drains the queue.
    fn send<R: RuntimeApi>(
        &self,
        runtime: &mut R,
        sender: Address,
        value: Coins,
        message: &IssuerMessage,
    ) -> ClientResult<Vec<Transaction>>;

    fn jetton_data<R: RuntimeApi>(&self, runtime: &R) -> ClientResult<JettonData>;

    /// Holder address of `owner`, computed by the Issuer.
    fn wallet_address<R: RuntimeApi>(&self, runtime: &R, owner: &Address) -> ClientResult<Address>;

    fn price<R: RuntimeApi>(&self, runtime: &R) -> ClientResult<i32>;

    fn last_sync_supply<R: RuntimeApi>(&self, runtime: &R) -> ClientResult<Coins>;

    fn backing_token<R: RuntimeApi>(&self, runtime: &R) -> ClientResult<Address>;

    fn is_blacklisted<R: RuntimeApi>(&self, runtime: &R, address: &Address) -> ClientResult<bool>;
}
