//! # Runtime Invariants
//!
//! | Invariant | Check |
//! |-----------|-------|
//! | Native value is conserved (no fees are charged) | `check_value_conservation` |
//! | Logical time strictly increases | `check_lt_monotonic` |

use super::entities::Transaction;
use super::value_objects::Coins;
use thiserror::Error;

/// A violated runtime invariant.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("native value not conserved: issued {issued}, accounted {accounted}")]
    ValueNotConserved { issued: Coins, accounted: Coins },

    #[error("logical time went backwards at lt {lt}")]
    LogicalTimeRegressed { lt: u64 },
}

/// Balances plus in-flight value must equal everything issued to the harness.
pub fn check_value_conservation(
    issued: Coins,
    balances: impl IntoIterator<Item = Coins>,
    in_flight: impl IntoIterator<Item = Coins>,
) -> Result<(), InvariantViolation> {
    let accounted = balances
        .into_iter()
        .chain(in_flight)
        .fold(0u128, u128::saturating_add);
    if accounted == issued {
        Ok(())
    } else {
        Err(InvariantViolation::ValueNotConserved { issued, accounted })
    }
}

/// Transactions must carry strictly increasing logical times.
pub fn check_lt_monotonic(transactions: &[Transaction]) -> Result<(), InvariantViolation> {
    for pair in transactions.windows(2) {
        if pair[1].lt <= pair[0].lt {
            return Err(InvariantViolation::LogicalTimeRegressed { lt: pair[1].lt });
        }
    }
    Ok(())
}
