//! # Error Types
//!
//! Holder failures. Each maps to the exit code recorded on the transaction.

use crate::domain::exit;
use shared_cell::{Address, CellError};
use shared_runtime::domain::{Coins, ExitCode};
use thiserror::Error;

/// Errors raised while handling a Holder message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HolderError {
    /// Transfer or burn not sent by the owner.
    #[error("sender {0} is not the owner")]
    NotOwner(Address),

    /// Debit larger than the balance.
    #[error("insufficient balance: have {balance}, requested {requested}")]
    InsufficientBalance { balance: Coins, requested: Coins },

    /// Credit from an account that is neither the Issuer nor a sibling Holder.
    #[error("credit from unauthorized sender {0}")]
    UnauthorizedIncoming(Address),

    /// Transfer does not carry enough native value to fund the chain.
    #[error("attached value {attached} must exceed {required}")]
    InsufficientValue { attached: Coins, required: Coins },

    /// Transfer destination is on another workchain.
    #[error("destination {0} is on another workchain")]
    WrongWorkchain(Address),

    /// Credit would exceed the coin range.
    #[error("balance overflow")]
    Overflow,

    /// Selector not handled by this account.
    #[error("unknown operation 0x{0:08x}")]
    UnknownOp(u32),

    /// Malformed body or state.
    #[error("cell error: {0}")]
    Cell(#[from] CellError),
}

impl HolderError {
    /// Exit code recorded for this failure.
    #[must_use]
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::NotOwner(_) => exit::NOT_OWNER,
            Self::InsufficientBalance { .. } => exit::INSUFFICIENT_BALANCE,
            Self::UnauthorizedIncoming(_) => exit::UNAUTHORIZED_INCOMING,
            Self::InsufficientValue { .. } => exit::INSUFFICIENT_VALUE,
            Self::WrongWorkchain(_) => exit::WRONG_WORKCHAIN,
            Self::Overflow => ExitCode::INT_OUT_OF_RANGE,
            Self::UnknownOp(_) => ExitCode::UNKNOWN_OP,
            Self::Cell(err) => ExitCode::from(err.clone()),
        }
    }
}

impl From<HolderError> for ExitCode {
    fn from(err: HolderError) -> Self {
        err.exit_code()
    }
}

/// Result alias for Holder handlers.
pub type HolderResult<T> = Result<T, HolderError>;
