//! # Address Derivation
//!
//! A Holder's address is the hash of its `StateInit`: the Holder code plus
//! the zero-balance state for `(owner, issuer)`. Anyone can compute it
//! without touching the runtime.

use super::entities::HolderState;
use shared_cell::{Address, Cell, CellError};
use shared_runtime::domain::StateInit;
use std::sync::Arc;

/// Bytes identifying the Holder code cell.
pub const HOLDER_CODE_TAG: &[u8] = b"jv::holder/1";

/// The Holder code cell registered with the runtime.
pub fn holder_code() -> Result<Arc<Cell>, CellError> {
    let mut b = Cell::builder();
    b.store_bytes(HOLDER_CODE_TAG)?;
    Ok(b.build_ref())
}

/// `StateInit` that deploys the Holder of `owner` under `issuer`.
pub fn holder_state_init(
    owner: &Address,
    issuer: &Address,
    code: &Arc<Cell>,
) -> Result<StateInit, CellError> {
    let data = HolderState::new(*owner, *issuer, code.clone()).to_cell()?;
    Ok(StateInit::new(code.clone(), data))
}

/// Deterministic Holder address. Pure: same inputs, same address.
pub fn derive_holder_address(
    owner: &Address,
    issuer: &Address,
    code: &Arc<Cell>,
    workchain: i8,
) -> Result<Address, CellError> {
    holder_state_init(owner, issuer, code)?.address(workchain)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derivation_is_deterministic() {
        let code = holder_code().unwrap();
        let owner = Address::new(0, [7; 32]);
        let issuer = Address::new(0, [9; 32]);
        let a = derive_holder_address(&owner, &issuer, &code, 0).unwrap();
        let b = derive_holder_address(&owner, &issuer, &holder_code().unwrap(), 0).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_derivation_separates_inputs() {
        let code = holder_code().unwrap();
        let owner = Address::new(0, [7; 32]);
        let issuer = Address::new(0, [9; 32]);
        let base = derive_holder_address(&owner, &issuer, &code, 0).unwrap();
        let other_owner =
            derive_holder_address(&Address::new(0, [8; 32]), &issuer, &code, 0).unwrap();
        let other_issuer =
            derive_holder_address(&owner, &Address::new(0, [8; 32]), &code, 0).unwrap();
        assert_ne!(base, other_owner);
        assert_ne!(base, other_issuer);
    }

    #[test]
    fn test_state_init_starts_empty() {
        let code = holder_code().unwrap();
        let owner = Address::new(0, [7; 32]);
        let issuer = Address::new(0, [9; 32]);
        let init = holder_state_init(&owner, &issuer, &code).unwrap();
        let state = HolderState::load(&init.data).unwrap();
        assert_eq!(state.balance, 0);
        assert_eq!(state.owner, owner);
        assert_eq!(state.issuer, issuer);
        assert_eq!(state.code.hash(), code.hash());
    }
}
