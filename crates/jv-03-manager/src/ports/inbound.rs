//! # Driving Port (API - Inbound)
//!
//! Relaying signed requests and reading the Manager configuration.

use crate::domain::ManagerMessage;
use shared_cell::Address;
use shared_runtime::domain::{Coins, Transaction};
use shared_runtime::errors::ClientResult;
use shared_runtime::ports::RuntimeApi;

/// Snapshot of every Manager getter except the asset lookup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ManagerSettings {
    pub s_token: Address,
    pub y_token: Address,
    pub treasury: Address,
    pub is_vault: bool,
    pub admin_pubkey: [u8; 32],
}

/// Manager API.
pub trait ManagerApi {
    /// Relays `message` from `relayer` and drains the queue.
    fn send<R: RuntimeApi>(
        &self,
        runtime: &mut R,
        relayer: Address,
        value: Coins,
        message: &ManagerMessage,
    ) -> ClientResult<Vec<Transaction>>;

    /// Reads all configuration getters.
    fn settings<R: RuntimeApi>(&self, runtime: &R) -> ClientResult<ManagerSettings>;

    fn is_asset_enabled<R: RuntimeApi>(&self, runtime: &R, asset: &Address) -> ClientResult<bool>;
}
