//! # Value Objects

use shared_runtime::domain::ExitCode;

/// Issuer exit codes.
pub mod exit {
    use super::ExitCode;

    /// Sender is not the admin.
    pub const UNAUTHORIZED: ExitCode = ExitCode(73);
    /// `burn_notification` not sent by the owner's Holder.
    pub const UNAUTHORIZED_BURN: ExitCode = ExitCode(74);
    /// Price is zero or negative.
    pub const INVALID_PRICE: ExitCode = ExitCode(75);
    /// Target address is blacklisted.
    pub const BLACKLISTED: ExitCode = ExitCode(76);
    pub const ZERO_DEPOSIT: ExitCode = ExitCode(77);
    pub const ZERO_SHARES: ExitCode = ExitCode(78);
    /// Withdraw asks for more shares than exist.
    pub const INSUFFICIENT_SUPPLY: ExitCode = ExitCode(79);
}
