//! # Issuer Invariants
//!
//! | Invariant | Check |
//! |-----------|-------|
//! | Supply never negative, never above the coin range | `IssuerState::mint_supply`, `burn_supply` |
//! | Supply equals the sum of Holder balances once the queue is idle | `check_supply_matches` |
//! | A non-positive price is never stored | `check_price` |

use crate::errors::{IssuerError, IssuerResult};
use shared_runtime::domain::Coins;

/// Validates a price before it is stored.
pub fn check_price(price: i32) -> IssuerResult<()> {
    if price <= 0 {
        return Err(IssuerError::InvalidPrice(price));
    }
    Ok(())
}

/// True when `total_supply` equals the sum of `balances`.
pub fn check_supply_matches(total_supply: Coins, balances: impl IntoIterator<Item = Coins>) -> bool {
    balances
        .into_iter()
        .try_fold(0u128, u128::checked_add)
        .is_some_and(|sum| sum == total_supply)
}
