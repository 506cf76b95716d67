//! # Error Types
//!
//! Issuer failures and their exit codes.

use crate::domain::exit;
use shared_cell::{Address, CellError};
use shared_runtime::domain::{Coins, ExitCode};
use thiserror::Error;

/// Errors raised while handling an Issuer message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IssuerError {
    /// Privileged operation from a non-admin sender.
    #[error("sender {0} is not the admin")]
    Unauthorized(Address),

    /// `burn_notification` from an account that is not the owner's Holder.
    #[error("burn notification from {0} is not from the owner's holder")]
    UnauthorizedBurn(Address),

    #[error("invalid price {0}: must be positive")]
    InvalidPrice(i32),

    #[error("address {0} is blacklisted")]
    Blacklisted(Address),

    #[error("deposit amount is zero")]
    ZeroDeposit,

    #[error("withdraw shares are zero")]
    ZeroShares,

    #[error("insufficient supply: have {supply}, requested {requested}")]
    InsufficientSupply { supply: Coins, requested: Coins },

    /// Supply would leave the coin range.
    #[error("supply overflow")]
    Overflow,

    #[error("unknown operation 0x{0:08x}")]
    UnknownOp(u32),

    #[error("cell error: {0}")]
    Cell(#[from] CellError),
}

impl IssuerError {
    /// Exit code recorded for this failure.
    #[must_use]
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::Unauthorized(_) => exit::UNAUTHORIZED,
            Self::UnauthorizedBurn(_) => exit::UNAUTHORIZED_BURN,
            Self::InvalidPrice(_) => exit::INVALID_PRICE,
            Self::Blacklisted(_) => exit::BLACKLISTED,
            Self::ZeroDeposit => exit::ZERO_DEPOSIT,
            Self::ZeroShares => exit::ZERO_SHARES,
            Self::InsufficientSupply { .. } => exit::INSUFFICIENT_SUPPLY,
            Self::Overflow => ExitCode::INT_OUT_OF_RANGE,
            Self::UnknownOp(_) => ExitCode::UNKNOWN_OP,
            Self::Cell(err) => ExitCode::from(err.clone()),
        }
    }
}

impl From<IssuerError> for ExitCode {
    fn from(err: IssuerError) -> Self {
        err.exit_code()
    }
}

/// Result alias for Issuer handlers.
pub type IssuerResult<T> = Result<T, IssuerError>;
