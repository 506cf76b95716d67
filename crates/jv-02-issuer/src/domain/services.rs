//! # Issuer Domain Services
//!
//! Pure calculations used by the handlers.

use super::invariants::check_price;
use crate::errors::IssuerResult;
use shared_runtime::domain::Coins;

/// Units minted for `amount` deposited at `price`, truncating toward zero.
/// A result of zero is valid: the deposit succeeds without minting.
pub fn minted_for_deposit(amount: Coins, price: i32) -> IssuerResult<Coins> {
    check_price(price)?;
    // Positive i32 always fits.
    Ok(amount / price as Coins)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::IssuerError;

    #[test]
    fn test_truncation() {
        assert_eq!(minted_for_deposit(100, 1), Ok(100));
        assert_eq!(minted_for_deposit(99, 10), Ok(9));
        assert_eq!(minted_for_deposit(5, 10), Ok(0));
    }

    #[test]
    fn test_non_positive_price() {
        assert_eq!(minted_for_deposit(100, 0), Err(IssuerError::InvalidPrice(0)));
        assert_eq!(minted_for_deposit(100, -1), Err(IssuerError::InvalidPrice(-1)));
    }
}
