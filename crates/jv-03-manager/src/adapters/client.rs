//! # Manager Client
//!
//! Signs requests with the admin key and relays them from any wallet.

use crate::domain::{ManagerMessage, ManagerRequest};
use crate::ports::{ManagerApi, ManagerSettings};
use shared_cell::Address;
use shared_crypto::Ed25519KeyPair;
use shared_runtime::domain::{Coins, StackValue, Transaction};
use shared_runtime::errors::ClientResult;
use shared_runtime::ports::{RuntimeApi, StackReader};
use tracing::instrument;

/// Handle on the Manager at `address`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ManagerClient {
    pub address: Address,
}

impl ManagerClient {
    #[must_use]
    pub fn new(address: Address) -> Self {
        Self { address }
    }

    /// Signs `request` with `signer` and relays it from `relayer`.
    pub fn submit<R: RuntimeApi>(
        &self,
        runtime: &mut R,
        relayer: Address,
        value: Coins,
        signer: &Ed25519KeyPair,
        query_id: u64,
        request: ManagerRequest,
    ) -> ClientResult<Vec<Transaction>> {
        let message = request.sign(signer, query_id)?;
        self.send(runtime, relayer, value, &message)
    }

    fn read<R: RuntimeApi>(
        &self,
        runtime: &R,
        method: &'static str,
        args: &[StackValue],
    ) -> ClientResult<Vec<StackValue>> {
        Ok(runtime.run_get_method(&self.address, method, args)?)
    }
}

impl ManagerApi for ManagerClient {
    #[instrument(skip(self, runtime, message), fields(op = message.name()))]
    fn send<R: RuntimeApi>(
        &self,
        runtime: &mut R,
        relayer: Address,
        value: Coins,
        message: &ManagerMessage,
    ) -> ClientResult<Vec<Transaction>> {
        runtime.send_internal(relayer, self.address, value, message.to_cell()?, None, true)?;
        Ok(runtime.run_until_idle()?)
    }

    fn settings<R: RuntimeApi>(&self, runtime: &R) -> ClientResult<ManagerSettings> {
        let address = |method: &'static str| -> ClientResult<Address> {
            StackReader::new(method, &self.read(runtime, method, &[])?).read_address()
        };
        let is_vault = StackReader::new("get_is_vault", &self.read(runtime, "get_is_vault", &[])?)
            .read_bool()?;
        let admin_pubkey =
            StackReader::new("get_admin_pubkey", &self.read(runtime, "get_admin_pubkey", &[])?)
                .read_uint256()?;
        Ok(ManagerSettings {
            s_token: address("get_stoken")?,
            y_token: address("get_ytoken")?,
            treasury: address("get_treasury")?,
            is_vault,
            admin_pubkey,
        })
    }

    fn is_asset_enabled<R: RuntimeApi>(&self, runtime: &R, asset: &Address) -> ClientResult<bool> {
        let stack = self.read(runtime, "is_asset_enabled", &[StackValue::from(*asset)])?;
        StackReader::new("is_asset_enabled", &stack).read_bool()
    }
}
