//! # Driving Port (API - Inbound)
//!
//! Everything outside the runtime talks to it through [`RuntimeApi`]:
//! typed clients, the node binary and the integration suite.

use crate::domain::{Account, Coins, StackValue, StateInit, Transaction};
use crate::errors::{ClientError, ClientResult, RuntimeResult};
use shared_cell::{Address, Cell};
use std::sync::Arc;

/// Primary runtime API.
pub trait RuntimeApi {
    /// Workchain new accounts are derived on.
    fn workchain(&self) -> i8;

    /// Creates (or tops up) an external wallet named `label`.
    fn create_wallet(&mut self, label: &str, balance: Coins) -> Address;

    /// Deploys an account directly from `state_init`, funding it with `balance`.
    fn deploy(&mut self, state_init: StateInit, balance: Coins) -> RuntimeResult<Address>;

    /// Queues a message from a wallet. Nothing executes until
    /// [`RuntimeApi::run_until_idle`].
    fn send_internal(
        &mut self,
        from: Address,
        to: Address,
        value: Coins,
        body: Arc<Cell>,
        state_init: Option<StateInit>,
        bounce: bool,
    ) -> RuntimeResult<()>;

    /// Delivers queued messages until the queue is empty.
    fn run_until_idle(&mut self) -> RuntimeResult<Vec<Transaction>>;

    /// Runs a read-only getter against committed state.
    fn run_get_method(
        &self,
        address: &Address,
        method: &str,
        args: &[StackValue],
    ) -> RuntimeResult<Vec<StackValue>>;

    /// Snapshot of an account, if it was ever touched.
    fn account(&self, address: &Address) -> Option<Account>;

    /// Native balance (zero for unknown accounts).
    fn balance(&self, address: &Address) -> Coins {
        self.account(address).map_or(0, |a| a.balance)
    }
}

// =============================================================================
// STACK READER
// =============================================================================

/// Sequential typed reader over a get-method result.
#[derive(Debug)]
pub struct StackReader<'a> {
    method: &'a str,
    values: &'a [StackValue],
    pos: usize,
}

impl<'a> StackReader<'a> {
    #[must_use]
    pub fn new(method: &'a str, values: &'a [StackValue]) -> Self {
        Self {
            method,
            values,
            pos: 0,
        }
    }

    fn next(&mut self) -> ClientResult<(usize, &'a StackValue)> {
        let index = self.pos;
        let value = self
            .values
            .get(index)
            .ok_or_else(|| ClientError::MissingStackEntry {
                method: self.method.to_string(),
                index,
            })?;
        self.pos += 1;
        Ok((index, value))
    }

    fn mismatch(&self, index: usize, expected: &'static str) -> ClientError {
        ClientError::UnexpectedStackEntry {
            method: self.method.to_string(),
            index,
            expected,
        }
    }

    pub fn read_int(&mut self) -> ClientResult<i128> {
        let (index, value) = self.next()?;
        value.as_int().ok_or_else(|| self.mismatch(index, "an integer"))
    }

    /// Non-negative integer as an amount.
    pub fn read_coins(&mut self) -> ClientResult<Coins> {
        let (index, value) = self.next()?;
        value
            .as_int()
            .and_then(|v| Coins::try_from(v).ok())
            .ok_or_else(|| self.mismatch(index, "a non-negative integer"))
    }

    /// `-1`/`0` or `1`/`0` flag.
    pub fn read_bool(&mut self) -> ClientResult<bool> {
        Ok(self.read_int()? != 0)
    }

    pub fn read_uint256(&mut self) -> ClientResult<[u8; 32]> {
        let (index, value) = self.next()?;
        value
            .as_uint256()
            .copied()
            .ok_or_else(|| self.mismatch(index, "a 256-bit integer"))
    }

    pub fn read_cell(&mut self) -> ClientResult<Arc<Cell>> {
        let (index, value) = self.next()?;
        value
            .as_cell()
            .cloned()
            .ok_or_else(|| self.mismatch(index, "a cell"))
    }

    pub fn read_maybe_address(&mut self) -> ClientResult<Option<Address>> {
        let (index, value) = self.next()?;
        value
            .as_address()
            .ok_or_else(|| self.mismatch(index, "an address"))
    }

    /// Address that must not be `addr_none`.
    pub fn read_address(&mut self) -> ClientResult<Address> {
        let index = self.pos;
        self.read_maybe_address()?
            .ok_or_else(|| self.mismatch(index, "a standard address"))
    }
}
