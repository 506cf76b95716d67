//! # Issuer Client
//!
//! Typed access to the Issuer through [`RuntimeApi`].

use crate::domain::IssuerMessage;
use crate::ports::{IssuerApi, JettonData};
use jv_01_holder::domain::{forward_payload, InternalTransfer};
use shared_cell::Address;
use shared_runtime::domain::{Coins, StackValue, Transaction};
use shared_runtime::errors::{ClientError, ClientResult};
use shared_runtime::ports::{RuntimeApi, StackReader};
use tracing::instrument;

/// Handle on the Issuer at `address`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IssuerClient {
    pub address: Address,
}

impl IssuerClient {
    #[must_use]
    pub fn new(address: Address) -> Self {
        Self { address }
    }

    /// Mints `amount` to `to`, attaching `forward_value` to the Holder credit.
    /// Excess native value is returned to `admin`.
    pub fn mint<R: RuntimeApi>(
        &self,
        runtime: &mut R,
        admin: Address,
        to: Address,
        amount: Coins,
        forward_value: Coins,
        value: Coins,
    ) -> ClientResult<Vec<Transaction>> {
        let credit = InternalTransfer {
            response: Some(admin),
            ..InternalTransfer::credit(0, amount, forward_payload(None)?)
        };
        let message = IssuerMessage::Mint {
            query_id: 0,
            to,
            forward_value,
            credit,
        };
        self.send(runtime, admin, value, &message)
    }

    pub fn deposit<R: RuntimeApi>(
        &self,
        runtime: &mut R,
        admin: Address,
        backing: Address,
        amount: Coins,
        receiver: Address,
        value: Coins,
    ) -> ClientResult<Vec<Transaction>> {
        let message = IssuerMessage::Deposit {
            query_id: 0,
            backing,
            amount,
            receiver,
        };
        self.send(runtime, admin, value, &message)
    }

    pub fn withdraw<R: RuntimeApi>(
        &self,
        runtime: &mut R,
        admin: Address,
        shares: Coins,
        receiver: Address,
        owner: Address,
        value: Coins,
    ) -> ClientResult<Vec<Transaction>> {
        let message = IssuerMessage::Withdraw {
            query_id: 0,
            shares,
            receiver,
            owner,
        };
        self.send(runtime, admin, value, &message)
    }

    fn call<R: RuntimeApi>(
        &self,
        runtime: &R,
        method: &'static str,
        args: &[StackValue],
    ) -> ClientResult<Vec<StackValue>> {
        Ok(runtime.run_get_method(&self.address, method, args)?)
    }
}

impl IssuerApi for IssuerClient {
    #[instrument(skip(self, runtime, message), fields(op = message.name()))]
    fn send<R: RuntimeApi>(
        &self,
        runtime: &mut R,
        sender: Address,
        value: Coins,
        message: &IssuerMessage,
    ) -> ClientResult<Vec<Transaction>> {
        runtime.send_internal(sender, self.address, value, message.to_cell()?, None, true)?;
        Ok(runtime.run_until_idle()?)
    }

    fn jetton_data<R: RuntimeApi>(&self, runtime: &R) -> ClientResult<JettonData> {
        let stack = self.call(runtime, "get_jetton_data", &[])?;
        let mut reader = StackReader::new("get_jetton_data", &stack);
        Ok(JettonData {
            total_supply: reader.read_coins()?,
            mintable: reader.read_bool()?,
            admin: reader.read_address()?,
            content: reader.read_cell()?,
            holder_code: reader.read_cell()?,
        })
    }

    fn wallet_address<R: RuntimeApi>(&self, runtime: &R, owner: &Address) -> ClientResult<Address> {
        let stack = self.call(runtime, "get_wallet_address", &[StackValue::from(*owner)])?;
        StackReader::new("get_wallet_address", &stack).read_address()
    }

    fn price<R: RuntimeApi>(&self, runtime: &R) -> ClientResult<i32> {
        let stack = self.call(runtime, "get_price", &[])?;
        let price = StackReader::new("get_price", &stack).read_int()?;
        i32::try_from(price).map_err(|_| ClientError::UnexpectedStackEntry {
            method: "get_price".into(),
            index: 0,
            expected: "a 32-bit integer",
        })
    }

    fn last_sync_supply<R: RuntimeApi>(&self, runtime: &R) -> ClientResult<Coins> {
        let stack = self.call(runtime, "get_last_sync_supply", &[])?;
        StackReader::new("get_last_sync_supply", &stack).read_coins()
    }

    fn backing_token<R: RuntimeApi>(&self, runtime: &R) -> ClientResult<Address> {
        let stack = self.call(runtime, "get_backing_token", &[])?;
        StackReader::new("get_backing_token", &stack).read_address()
    }

    fn is_blacklisted<R: RuntimeApi>(&self, runtime: &R, address: &Address) -> ClientResult<bool> {
        let stack = self.call(runtime, "is_blacklisted", &[StackValue::from(*address)])?;
        StackReader::new("is_blacklisted", &stack).read_bool()
    }
}
