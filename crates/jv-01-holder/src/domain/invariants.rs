//! # Holder Invariants
//!
//! | Invariant | Check |
//! |-----------|-------|
//! | Only the Issuer or a sibling Holder may credit | `is_authorized_credit_source` |
//! | Balance never goes negative | `HolderState::debit` |
//! | Balance stays within the coin range | `HolderState::credit` |

use super::entities::HolderState;
use super::services::derive_holder_address;
use shared_cell::{Address, CellError};

/// True when `sender` is the bound Issuer, or the Holder that `from` owns
/// under the same Issuer and code.
pub fn is_authorized_credit_source(
    state: &HolderState,
    sender: &Address,
    from: Option<&Address>,
    workchain: i8,
) -> Result<bool, CellError> {
    if *sender == state.issuer {
        return Ok(true);
    }
    match from {
        Some(from) => Ok(derive_holder_address(from, &state.issuer, &state.code, workchain)?
            == *sender),
        None => Ok(false),
    }
}
