//! # Value Objects
//!
//! Small immutable types shared by the runtime and every account:
//! native amounts, logical time, exit codes, send modes and get-method
//! stack entries.

use serde::{Deserialize, Serialize};
use shared_cell::{Address, Cell, CellError};
use std::fmt;
use std::ops::BitOr;
use std::sync::Arc;

/// Native value or token amount. Coin fields never exceed 2^120 - 1.
pub type Coins = u128;

/// Monotonic logical time assigned to messages and transactions.
pub type LogicalTime = u64;

// =============================================================================
// EXIT CODE
// =============================================================================

/// Outcome code of a compute or action phase.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: Self = Self(0);
    /// Get-method called with too few arguments.
    pub const STACK_UNDERFLOW: Self = Self(2);
    /// Integer does not fit the target width.
    pub const INT_OUT_OF_RANGE: Self = Self(5);
    /// Argument of the wrong type.
    pub const TYPE_CHECK: Self = Self(7);
    pub const CELL_OVERFLOW: Self = Self(8);
    pub const CELL_UNDERFLOW: Self = Self(9);
    pub const SIGNATURE_FAILED: Self = Self(35);
    /// An outbound send needed more value than the account holds.
    pub const NOT_ENOUGH_VALUE: Self = Self(37);
    pub const UNKNOWN_OP: Self = Self(0xFFFF);
    /// Message reached an undeployed account without a matching `StateInit`.
    pub const ACCOUNT_NOT_ACTIVE: Self = Self(-1);

    #[must_use]
    pub const fn code(self) -> i32 {
        self.0
    }

    #[must_use]
    pub const fn is_success(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Debug for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ExitCode({})", self.0)
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<CellError> for ExitCode {
    fn from(err: CellError) -> Self {
        match err {
            CellError::Overflow { .. } => Self::CELL_OVERFLOW,
            CellError::RangeCheck { .. } => Self::INT_OUT_OF_RANGE,
            CellError::Underflow { .. }
            | CellError::NoReference
            | CellError::InvalidAddress
            | CellError::InvalidAddressText(_)
            | CellError::InvalidDictionary(_)
            | CellError::InvalidLayout(_) => Self::CELL_UNDERFLOW,
        }
    }
}

// =============================================================================
// SEND MODE
// =============================================================================

/// Flags controlling how an outbound message is funded.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SendMode(pub u8);

impl SendMode {
    pub const ORDINARY: Self = Self(0);
    /// Fees are paid separately. Fees are not charged here, so this is inert.
    pub const PAY_FEES_SEPARATELY: Self = Self(1);
    /// Skip the send instead of failing when funds are short.
    pub const IGNORE_ERRORS: Self = Self(2);
    /// Add whatever is left of the inbound value.
    pub const CARRY_REMAINING_VALUE: Self = Self(64);
    /// Send the entire remaining balance.
    pub const CARRY_ALL_BALANCE: Self = Self(128);

    #[must_use]
    pub const fn contains(self, flag: Self) -> bool {
        self.0 & flag.0 == flag.0
    }
}

impl BitOr for SendMode {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl fmt::Debug for SendMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SendMode({})", self.0)
    }
}

// =============================================================================
// GET-METHOD STACK
// =============================================================================

/// A single get-method argument or result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StackValue {
    Int(i128),
    /// Unsigned 256-bit integer, big-endian. Public keys and hashes.
    Uint256([u8; 32]),
    Cell(Arc<Cell>),
    /// `None` is `addr_none`.
    Address(Option<Address>),
}

impl StackValue {
    #[must_use]
    pub fn as_int(&self) -> Option<i128> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_uint256(&self) -> Option<&[u8; 32]> {
        match self {
            Self::Uint256(v) => Some(v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_cell(&self) -> Option<&Arc<Cell>> {
        match self {
            Self::Cell(c) => Some(c),
            _ => None,
        }
    }

    /// Address entry; the outer `None` means the entry is not an address.
    #[must_use]
    pub fn as_address(&self) -> Option<Option<Address>> {
        match self {
            Self::Address(a) => Some(*a),
            _ => None,
        }
    }

    /// Boolean in the `-1`/`0` convention.
    #[must_use]
    pub fn from_bool(flag: bool) -> Self {
        Self::Int(if flag { -1 } else { 0 })
    }
}

impl From<Coins> for StackValue {
    fn from(value: Coins) -> Self {
        // Coins are bounded by 2^120 so the cast is lossless.
        Self::Int(value as i128)
    }
}

impl From<Address> for StackValue {
    fn from(address: Address) -> Self {
        Self::Address(Some(address))
    }
}

// =============================================================================
// TESTS
// =============================================================================
