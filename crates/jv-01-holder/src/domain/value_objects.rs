//! # Value Objects
//!
//! Fee constants and exit codes owned by the Holder account.

use shared_runtime::domain::{Coins, ExitCode};

/// Native-value thresholds a Holder keeps for itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HolderFees {
    /// Balance a Holder tops itself up to before refunding excess.
    pub min_storage: Coins,
    /// Budgeted cost of handling one message.
    pub gas_consumption: Coins,
}

impl HolderFees {
    pub const DEFAULT: Self = Self {
        min_storage: 10_000_000,
        gas_consumption: 15_000_000,
    };

    /// Value a transfer must carry beyond its forward value.
    #[must_use]
    pub const fn transfer_reserve(&self) -> Coins {
        2 * self.gas_consumption + self.min_storage
    }
}

impl Default for HolderFees {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Holder exit codes.
pub mod exit {
    use super::ExitCode;

    /// Sender is not the owner.
    pub const NOT_OWNER: ExitCode = ExitCode(705);
    /// Balance smaller than the requested amount.
    pub const INSUFFICIENT_BALANCE: ExitCode = ExitCode(706);
    /// Credit from neither the Issuer nor a sibling Holder.
    pub const UNAUTHORIZED_INCOMING: ExitCode = ExitCode(707);
    /// Transfer does not carry enough native value.
    pub const INSUFFICIENT_VALUE: ExitCode = ExitCode(709);
    /// Destination lives on another workchain.
    pub const WRONG_WORKCHAIN: ExitCode = ExitCode(333);
}
