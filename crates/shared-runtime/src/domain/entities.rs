//! # Domain Entities
//!
//! Accounts, messages, contract outcomes and transaction records.

use super::value_objects::{Coins, ExitCode, LogicalTime, SendMode};
use serde::{Deserialize, Serialize};
use shared_cell::{Address, Cell, CellError, Hash};
use std::sync::Arc;

// =============================================================================
// STATE INIT
// =============================================================================

/// Initial code and data of an account. Its hash is the account address.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StateInit {
    pub code: Arc<Cell>,
    pub data: Arc<Cell>,
}

impl StateInit {
    #[must_use]
    pub fn new(code: Arc<Cell>, data: Arc<Cell>) -> Self {
        Self { code, data }
    }

    /// `split_depth:0 special:0 code:1 data:1 library:0`, then code and data refs.
    pub fn to_cell(&self) -> Result<Cell, CellError> {
        let mut b = Cell::builder();
        b.store_uint(0b00110, 5)?
            .store_ref(self.code.clone())?
            .store_ref(self.data.clone())?;
        Ok(b.build())
    }

    /// Parses the layout written by [`StateInit::to_cell`].
    pub fn from_cell(cell: &Cell) -> Result<Self, CellError> {
        let mut s = cell.parse();
        if s.load_uint(5)? != 0b00110 {
            return Err(CellError::InvalidLayout("state init"));
        }
        let code = s.load_ref()?;
        let data = s.load_ref()?;
        Ok(Self { code, data })
    }

    pub fn hash(&self) -> Result<Hash, CellError> {
        Ok(self.to_cell()?.hash())
    }

    /// Deterministic address on `workchain`.
    pub fn address(&self, workchain: i8) -> Result<Address, CellError> {
        Ok(Address::from_hash(workchain, self.hash()?))
    }
}

// =============================================================================
// ACCOUNT
// =============================================================================

/// Lifecycle of an account.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AccountStatus {
    /// Not deployed. May still hold value.
    Uninit,
    /// Deployed contract.
    Active { code: Arc<Cell>, data: Arc<Cell> },
    /// External actor created by the harness. Accepts every message.
    Wallet,
}

/// An addressable account.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Account {
    pub address: Address,
    pub balance: Coins,
    pub status: AccountStatus,
    pub last_lt: LogicalTime,
}

impl Account {
    #[must_use]
    pub fn uninit(address: Address) -> Self {
        Self {
            address,
            balance: 0,
            status: AccountStatus::Uninit,
            last_lt: 0,
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self.status, AccountStatus::Active { .. })
    }

    /// Committed persistent data of an active account.
    #[must_use]
    pub fn data(&self) -> Option<&Arc<Cell>> {
        match &self.status {
            AccountStatus::Active { data, .. } => Some(data),
            _ => None,
        }
    }

    #[must_use]
    pub fn code(&self) -> Option<&Arc<Cell>> {
        match &self.status {
            AccountStatus::Active { code, .. } => Some(code),
            _ => None,
        }
    }
}

// =============================================================================
// MESSAGES
// =============================================================================

/// A message in flight between two accounts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InternalMessage {
    pub src: Address,
    pub dest: Address,
    pub value: Coins,
    pub bounce: bool,
    pub bounced: bool,
    pub body: Arc<Cell>,
    pub state_init: Option<StateInit>,
    pub created_lt: LogicalTime,
}

/// A message requested by a contract handler.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutboundMessage {
    pub to: Address,
    pub value: Coins,
    pub bounce: bool,
    pub body: Arc<Cell>,
    pub state_init: Option<StateInit>,
}

impl OutboundMessage {
    /// Non-bounceable message without `StateInit`.
    #[must_use]
    pub fn new(to: Address, value: Coins, body: Arc<Cell>) -> Self {
        Self {
            to,
            value,
            bounce: false,
            body,
            state_init: None,
        }
    }

    #[must_use]
    pub fn with_bounce(mut self, bounce: bool) -> Self {
        self.bounce = bounce;
        self
    }

    #[must_use]
    pub fn with_state_init(mut self, state_init: StateInit) -> Self {
        self.state_init = Some(state_init);
        self
    }
}

/// Action emitted by the compute phase.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OutAction {
    SendMessage {
        message: OutboundMessage,
        mode: SendMode,
    },
}

/// New persistent data plus actions for the action phase.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContractOutcome {
    pub data: Arc<Cell>,
    pub actions: Vec<OutAction>,
}

impl ContractOutcome {
    /// Commits `data` with no outbound messages.
    #[must_use]
    pub fn new(data: Arc<Cell>) -> Self {
        Self {
            data,
            actions: Vec::new(),
        }
    }

    /// Queues a send.
    #[must_use]
    pub fn send(mut self, message: OutboundMessage, mode: SendMode) -> Self {
        self.actions.push(OutAction::SendMessage { message, mode });
        self
    }
}

/// What a handler sees about the inbound message and its own account.
#[derive(Clone, Debug)]
pub struct MessageContext {
    pub self_address: Address,
    pub sender: Address,
    /// Value attached to the inbound message.
    pub value: Coins,
    /// Balance after the inbound value was credited.
    pub balance: Coins,
    pub body: Arc<Cell>,
    pub bounced: bool,
    pub lt: LogicalTime,
    pub code: Arc<Cell>,
}

impl MessageContext {
    #[must_use]
    pub fn workchain(&self) -> i8 {
        self.self_address.workchain
    }
}

/// What a get-method sees.
#[derive(Clone, Debug)]
pub struct GetMethodContext {
    pub self_address: Address,
    pub balance: Coins,
    pub code: Arc<Cell>,
}

// =============================================================================
// TRANSACTION RECORD
// =============================================================================

/// Summary of an emitted message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageSummary {
    pub dest: Address,
    pub value: Coins,
    pub op: Option<u32>,
    pub bounce: bool,
    pub bounced: bool,
}

/// One inbound message processed to completion by one account.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub lt: LogicalTime,
    pub account: Address,
    pub source: Address,
    pub op: Option<u32>,
    pub value: Coins,
    pub inbound_bounced: bool,
    pub success: bool,
    pub exit_code: ExitCode,
    pub deployed: bool,
    pub out_messages: Vec<MessageSummary>,
}

impl Transaction {
    /// True when this transaction emitted a bounce back to its source.
    #[must_use]
    pub fn produced_bounce(&self) -> bool {
        self.out_messages.iter().any(|m| m.bounced)
    }
}

// =============================================================================
// TESTS
// =============================================================================
