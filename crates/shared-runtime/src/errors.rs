//! # Runtime Errors
//!
//! Harness-level failures. Contract failures are not errors here: they are
//! recorded on the transaction as an exit code.

use crate::domain::{Coins, ExitCode, InvariantViolation};
use shared_cell::{Address, CellError, Hash};
use thiserror::Error;

/// Errors returned by the runtime API.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    /// The account is not a harness wallet and cannot originate messages.
    #[error("account {0} is not a wallet")]
    NotAWallet(Address),

    /// Wallet balance too small for the requested send.
    #[error("insufficient balance on {address}: have {balance}, need {needed}")]
    InsufficientBalance {
        address: Address,
        balance: Coins,
        needed: Coins,
    },

    /// No contract logic registered for this code hash.
    #[error("no contract registered for code hash {0}")]
    UnknownCode(Hash),

    /// Get-method or deploy target is not active.
    #[error("account {0} is not active")]
    AccountNotActive(Address),

    /// Deploying over an existing active account or wallet.
    #[error("account {0} already exists")]
    AccountExists(Address),

    /// Get-method returned a non-zero exit code.
    #[error("get-method {method} failed with exit code {exit_code}")]
    GetMethodFailed { method: String, exit_code: ExitCode },

    /// `run_until_idle` processed the configured maximum of transactions.
    #[error("step limit of {limit} transactions exceeded")]
    StepLimitExceeded { limit: usize },

    /// A cell could not be built or read.
    #[error("cell error: {0}")]
    Cell(#[from] CellError),

    /// A runtime invariant check failed.
    #[error("invariant violated: {0}")]
    Invariant(#[from] InvariantViolation),
}

/// Result alias for runtime operations.
pub type RuntimeResult<T> = Result<T, RuntimeError>;

// =============================================================================
// CLIENT ERRORS
// =============================================================================

/// Errors raised by typed account clients.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// The runtime rejected the call.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),

    /// A request body could not be built.
    #[error("cell error: {0}")]
    Cell(#[from] CellError),

    /// A get-method returned fewer entries than expected.
    #[error("get-method {method} returned no entry at index {index}")]
    MissingStackEntry { method: String, index: usize },

    /// A get-method entry has the wrong type.
    #[error("get-method {method} entry {index} is not {expected}")]
    UnexpectedStackEntry {
        method: String,
        index: usize,
        expected: &'static str,
    },
}

/// Result alias for client calls.
pub type ClientResult<T> = Result<T, ClientError>;
