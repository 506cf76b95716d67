//! # Domain Services
//!
//! Pure helpers used by the execution engine: bounce bodies, op peeking,
//! harness wallet addresses, get-method arguments and send-value resolution.

use super::value_objects::{Coins, ExitCode, SendMode, StackValue};
use shared_cell::{Address, Cell, CellError};

/// Prefix of every bounced message body.
pub const BOUNCE_PREFIX: u32 = 0xFFFF_FFFF;

/// Bits of the original body echoed back in a bounce.
pub const BOUNCE_ECHO_BITS: usize = 256;

/// `0xFFFFFFFF` followed by the first 256 bits of `original`.
pub fn bounce_body(original: &Cell) -> Result<Cell, CellError> {
    let echo: Vec<bool> = original.parse().peek_bits(BOUNCE_ECHO_BITS).collect();
    let mut b = Cell::builder();
    b.store_uint(u128::from(BOUNCE_PREFIX), 32)?.store_bits(&echo)?;
    Ok(b.build())
}

/// Leading 32-bit op of a body, if it has one.
#[must_use]
pub fn peek_op(body: &Cell) -> Option<u32> {
    body.parse().load_u32().ok()
}

/// Address of a harness-created wallet: `sha256(label)` on `workchain`.
#[must_use]
pub fn wallet_address(workchain: i8, label: &str) -> Address {
    Address::new(workchain, shared_crypto::sha256(label.as_bytes()))
}

/// Address argument of a get-method. Accepts an address entry or a cell
/// whose first field is an address.
pub fn address_arg(args: &[StackValue], index: usize) -> Result<Address, ExitCode> {
    match args.get(index) {
        None => Err(ExitCode::STACK_UNDERFLOW),
        Some(StackValue::Address(Some(address))) => Ok(*address),
        Some(StackValue::Cell(cell)) => Ok(cell.parse().load_address()?),
        Some(_) => Err(ExitCode::TYPE_CHECK),
    }
}

/// Resolved value of a single send during the action phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SendValue {
    /// Send this amount.
    Send(Coins),
    /// Funds are short and the mode allows skipping.
    Skip,
    /// Funds are short; the action phase fails.
    Insufficient { needed: Coins },
}

/// Computes how much a send carries given what is left of the balance and
/// of the inbound value.
#[must_use]
pub fn resolve_send_value(
    requested: Coins,
    mode: SendMode,
    balance: Coins,
    remaining_inbound: Coins,
) -> SendValue {
    let needed = if mode.contains(SendMode::CARRY_ALL_BALANCE) {
        balance
    } else if mode.contains(SendMode::CARRY_REMAINING_VALUE) {
        requested.saturating_add(remaining_inbound)
    } else {
        requested
    };

    if needed > balance {
        if mode.contains(SendMode::IGNORE_ERRORS) {
            SendValue::Skip
        } else {
            SendValue::Insufficient { needed }
        }
    } else {
        SendValue::Send(needed)
    }
}

// =============================================================================
// TESTS
// =============================================================================
