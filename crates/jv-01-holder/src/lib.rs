//! # JV-01 Holder - Per-Owner Token Balance
//!
//! One Holder exists per token owner. It stores that owner's balance and
//! takes part in the transfer, mint and burn message chains. A Holder is
//! deployed lazily by the first message that targets it, at an address
//! derived from the Holder code and its initial state.
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement Location |
//! |-----------|---------------------|
//! | Only the owner transfers or burns | `service.rs` - `HolderService::transfer`, `burn` |
//! | Credits come from the bound Issuer or a sibling Holder | `domain/invariants.rs` - `is_authorized_credit_source` |
//! | Balance never negative, never above the coin range | `domain/entities.rs` - `HolderState::debit`, `credit` |
//! | Bounced debits are restored | `service.rs` - `HolderMessage::Returned` |
//! | Address is a pure function of (owner, issuer, code) | `domain/services.rs` - `derive_holder_address` |
//!
//! ## Exit Codes
//!
//! | Code | Meaning |
//! |------|---------|
//! | 705 | Sender is not the owner |
//! | 706 | Insufficient balance |
//! | 707 | Unauthorized credit source |
//! | 709 | Not enough native value attached to a transfer |
//! | 333 | Destination on another workchain |
//!
//! ## Usage Example
//!
//! ```ignore
//! use jv_01_holder::prelude::*;
//!
//! let holder = HolderClient::for_owner(&alice, &issuer, &code, 0)?;
//! holder.transfer(&mut runtime, alice, 100_000_000, &request)?;
//! assert_eq!(holder.wallet_data(&runtime)?.balance, 400);
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod adapters;
pub mod domain;
pub mod errors;
pub mod metrics;
pub mod ports;
pub mod service;

use shared_cell::{Cell, CellError};
use shared_runtime::adapters::ContractRegistry;
use std::sync::Arc;

/// Registers the Holder contract and returns its code cell.
pub fn register(
    registry: &mut ContractRegistry,
    fees: domain::HolderFees,
) -> Result<Arc<Cell>, CellError> {
    let code = domain::holder_code()?;
    registry.register(&code, Arc::new(adapters::HolderContract::new(fees)));
    Ok(code)
}

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::adapters::{HolderClient, HolderContract};
    pub use crate::domain::{
        derive_holder_address, exit, forward_payload, holder_code, holder_state_init,
        opcodes, BurnRequest, HolderFees, HolderMessage, HolderState, InternalTransfer,
        TransferRequest,
    };
    pub use crate::errors::{HolderError, HolderResult};
    pub use crate::ports::{HolderApi, WalletData};
    pub use crate::register;
    pub use crate::service::HolderService;
}

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use shared_cell::Address;
    use shared_runtime::prelude::*;

    const TON: Coins = 1_000_000_000;

    /// Runtime with the Holder registered and a funded Holder for `alice`,
    /// minted by a wallet that plays the Issuer.
    fn setup() -> (Runtime, Address, Address, HolderClient) {
        let mut registry = ContractRegistry::new();
        let code = register(&mut registry, HolderFees::DEFAULT).unwrap();
        let mut runtime = Runtime::new(RuntimeConfig::default(), registry);
        let issuer = runtime.create_wallet("issuer", 10 * TON);
        let alice = runtime.create_wallet("alice", 10 * TON);

        let init = holder_state_init(&alice, &issuer, &code).unwrap();
        let holder = HolderClient::for_owner(&alice, &issuer, &code, 0).unwrap();
        let credit = InternalTransfer::credit(0, 1_000, forward_payload(None).unwrap());
        runtime
            .send_internal(issuer, holder.address, TON / 10, credit.to_cell().unwrap(), Some(init), true)
            .unwrap();
        let txs = runtime.run_until_idle().unwrap();
        assert!(txs[0].success);
        assert!(txs[0].deployed);
        (runtime, issuer, alice, holder)
    }

    #[test]
    fn test_mint_path_deploys_holder() {
        let (runtime, issuer, alice, holder) = setup();
        let data = holder.wallet_data(&runtime).unwrap();
        assert_eq!(data.balance, 1_000);
        assert_eq!(data.owner, alice);
        assert_eq!(data.issuer, issuer);
    }

    #[test]
    fn test_transfer_between_holders() {
        let (mut runtime, issuer, alice, holder) = setup();
        let bob = runtime.create_wallet("bob", TON);
        let request = TransferRequest {
            query_id: 1,
            amount: 400,
            destination: bob,
            response: Some(alice),
            forward_amount: 0,
            forward_payload: forward_payload(None).unwrap(),
        };
        let txs = holder.transfer(&mut runtime, alice, TON / 10, &request).unwrap();
        assert!(txs.iter().all(|tx| tx.success));

        let code = holder_code().unwrap();
        let bob_holder = HolderClient::for_owner(&bob, &issuer, &code, 0).unwrap();
        assert_eq!(holder.balance(&runtime).unwrap(), 600);
        assert_eq!(bob_holder.balance(&runtime).unwrap(), 400);

        // The excess reaches alice as `excesses`.
        let refund = txs
            .iter()
            .find(|tx| tx.account == alice)
            .expect("excesses delivered");
        assert_eq!(refund.op, Some(opcodes::EXCESSES));
    }

    #[test]
    fn test_failed_transfer_keeps_balance() {
        let (mut runtime, _issuer, alice, holder) = setup();
        let bob = runtime.create_wallet("bob", TON);
        let request = TransferRequest {
            query_id: 2,
            amount: 5_000,
            destination: bob,
            response: Some(alice),
            forward_amount: 0,
            forward_payload: forward_payload(None).unwrap(),
        };
        let txs = holder.transfer(&mut runtime, alice, TON / 10, &request).unwrap();
        assert!(!txs[0].success);
        assert_eq!(txs[0].exit_code, exit::INSUFFICIENT_BALANCE);
        assert_eq!(holder.balance(&runtime).unwrap(), 1_000);
    }

    #[test]
    fn test_never_deployed_holder_has_zero_balance() {
        let (runtime, issuer, _alice, _holder) = setup();
        let code = holder_code().unwrap();
        let nobody = HolderClient::for_owner(&Address::new(0, [0xEE; 32]), &issuer, &code, 0)
            .unwrap();
        assert_eq!(nobody.balance(&runtime).unwrap(), 0);
    }
}
