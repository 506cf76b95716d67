//! # Runtime Events
//!
//! Published through the [`EventSink`](crate::ports::EventSink) port after
//! each committed or failed transaction.

use crate::domain::{Coins, LogicalTime, Transaction};
use serde::{Deserialize, Serialize};
use shared_cell::Address;

/// Event emitted by the runtime.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuntimeEvent {
    /// A transaction finished, successfully or not.
    TransactionExecuted(Transaction),

    /// An account was deployed from an attached or genesis `StateInit`.
    AccountDeployed {
        address: Address,
        contract: String,
        lt: LogicalTime,
    },

    /// A failed message was returned to its sender.
    MessageBounced {
        from: Address,
        to: Address,
        value: Coins,
        lt: LogicalTime,
    },
}

impl RuntimeEvent {
    /// Short topic name for logs and filtering.
    #[must_use]
    pub fn topic(&self) -> &'static str {
        match self {
            Self::TransactionExecuted(_) => "transaction",
            Self::AccountDeployed { .. } => "deploy",
            Self::MessageBounced { .. } => "bounce",
        }
    }

    #[must_use]
    pub fn lt(&self) -> LogicalTime {
        match self {
            Self::TransactionExecuted(tx) => tx.lt,
            Self::AccountDeployed { lt, .. } | Self::MessageBounced { lt, .. } => *lt,
        }
    }
}
