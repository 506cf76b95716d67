//! # Error Types
//!
//! Manager failures and their exit codes.

use shared_cell::CellError;
use shared_runtime::domain::ExitCode;
use thiserror::Error;

/// Errors raised while handling a Manager message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ManagerError {
    /// Signature missing or not produced by the admin key over the payload.
    #[error("signature rejected: {0}")]
    SignatureInvalid(&'static str),

    #[error("unknown operation 0x{0:08x}")]
    UnknownOp(u32),

    #[error("cell error: {0}")]
    Cell(#[from] CellError),
}

impl ManagerError {
    /// Exit code recorded for this failure.
    #[must_use]
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::SignatureInvalid(_) => ExitCode::SIGNATURE_FAILED,
            Self::UnknownOp(_) => ExitCode::UNKNOWN_OP,
            Self::Cell(err) => ExitCode::from(err.clone()),
        }
    }
}

impl From<ManagerError> for ExitCode {
    fn from(err: ManagerError) -> Self {
        err.exit_code()
    }
}

/// Result alias for Manager handlers.
pub type ManagerResult<T> = Result<T, ManagerError>;
