//! # JV-02 Issuer - Token Supply and Admin Authority
//!
//! The single account that owns the token's global supply. It mints to
//! Holders (deploying them on first use), converts deposits into minted
//! units at an admin-set price, burns shares on withdraw and keeps a
//! blacklist of addresses that may not receive tokens.
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement Location |
//! |-----------|---------------------|
//! | Privileged operations only from the admin (73) | `domain/policy.rs` - `AdminPolicy` |
//! | Supply never negative | `domain/entities.rs` - `IssuerState::burn_supply` |
//! | Stored price always positive (75) | `domain/invariants.rs` - `check_price` |
//! | Deposits truncate; zero minted is success | `domain/services.rs` - `minted_for_deposit` |
//! | Bounced mint/withdraw messages restore supply | `service.rs` - `IssuerMessage::Returned` |
//! | `sync_jetton` is idempotent | `service.rs` - `SyncJetton` |
//!
//! ## Exit Codes
//!
//! | Code | Meaning |
//! |------|---------|
//! | 73 | Unauthorized |
//! | 74 | Burn notification not from the owner's Holder |
//! | 75 | Invalid price |
//! | 76 | Blacklisted |
//! | 77 | Zero deposit |
//! | 78 | Zero shares |
//! | 79 | Insufficient supply |
//!
//! ## Usage Example
//!
//! ```ignore
//! use jv_02_issuer::prelude::*;
//!
//! let issuer = IssuerClient::new(deploy(&mut runtime, &config, holder_code, TON)?);
//! issuer.mint(&mut runtime, admin, alice, 100, 20_000_000, 50_000_000)?;
//! assert_eq!(issuer.jetton_data(&runtime)?.total_supply, 100);
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod adapters;
pub mod domain;
pub mod errors;
pub mod metrics;
pub mod ports;
pub mod service;

use domain::IssuerConfig;
use shared_cell::{Address, Cell, CellError};
use shared_runtime::adapters::ContractRegistry;
use shared_runtime::domain::{Coins, StateInit};
use shared_runtime::errors::RuntimeResult;
use shared_runtime::ports::RuntimeApi;
use std::sync::Arc;

/// Bytes identifying the Issuer code cell.
pub const ISSUER_CODE_TAG: &[u8] = b"jv::issuer/1";

/// The Issuer code cell registered with the runtime.
pub fn issuer_code() -> Result<Arc<Cell>, CellError> {
    let mut b = Cell::builder();
    b.store_bytes(ISSUER_CODE_TAG)?;
    Ok(b.build_ref())
}

/// Registers the Issuer contract and returns its code cell.
pub fn register(registry: &mut ContractRegistry) -> Result<Arc<Cell>, CellError> {
    let code = issuer_code()?;
    registry.register(&code, Arc::new(adapters::IssuerContract::new()));
    Ok(code)
}

/// `StateInit` of an Issuer configured by `config`.
pub fn issuer_state_init(
    config: &IssuerConfig,
    holder_code: Arc<Cell>,
) -> Result<StateInit, CellError> {
    let data = config.initial_state(holder_code)?.to_cell()?;
    Ok(StateInit::new(issuer_code()?, data))
}

/// Deploys an Issuer funded with `balance` and returns its address.
pub fn deploy<R: RuntimeApi>(
    runtime: &mut R,
    config: &IssuerConfig,
    holder_code: Arc<Cell>,
    balance: Coins,
) -> RuntimeResult<Address> {
    runtime.deploy(issuer_state_init(config, holder_code)?, balance)
}

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::adapters::{IssuerClient, IssuerContract};
    pub use crate::domain::{
        exit, minted_for_deposit, offchain_content, opcodes, read_offchain_uri, AdminPolicy,
        IssuerConfig, IssuerMessage, IssuerState,
    };
    pub use crate::errors::{IssuerError, IssuerResult};
    pub use crate::ports::{IssuerApi, JettonData};
    pub use crate::service::IssuerService;
    pub use crate::{deploy, issuer_code, issuer_state_init, register};
}

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use jv_01_holder::prelude::{HolderClient, HolderFees};
    use shared_runtime::prelude::*;

    const TON: Coins = 1_000_000_000;

    struct World {
        runtime: Runtime,
        admin: shared_cell::Address,
        issuer: IssuerClient,
        holder_code: std::sync::Arc<shared_cell::Cell>,
    }

    fn world() -> World {
        let mut registry = ContractRegistry::new();
        let holder_code = jv_01_holder::register(&mut registry, HolderFees::DEFAULT).unwrap();
        register(&mut registry).unwrap();
        let mut runtime = Runtime::new(RuntimeConfig::default(), registry);
        let admin = runtime.create_wallet("admin", 100 * TON);
        let config = IssuerConfig::new(admin, "https://example.com/token.json");
        let address = deploy(&mut runtime, &config, holder_code.clone(), TON).unwrap();
        World {
            runtime,
            admin,
            issuer: IssuerClient::new(address),
            holder_code,
        }
    }

    #[test]
    fn test_deploy_initial_data() {
        let w = world();
        let data = w.issuer.jetton_data(&w.runtime).unwrap();
        assert_eq!(data.total_supply, 0);
        assert!(data.mintable);
        assert_eq!(data.admin, w.admin);
        assert_eq!(
            read_offchain_uri(&data.content).unwrap(),
            "https://example.com/token.json"
        );
        assert_eq!(data.holder_code.hash(), w.holder_code.hash());
        assert_eq!(w.issuer.price(&w.runtime).unwrap(), 1);
    }

    #[test]
    fn test_mint_reaches_holder_through_runtime() {
        let mut w = world();
        let alice = w.runtime.create_wallet("alice", TON);
        let txs = w
            .issuer
            .mint(&mut w.runtime, w.admin, alice, 100, 20_000_000, 50_000_000)
            .unwrap();
        assert!(txs.iter().all(|tx| tx.success));

        let holder_address = w.issuer.wallet_address(&w.runtime, &alice).unwrap();
        let holder = HolderClient::new(holder_address);
        assert_eq!(holder.balance(&w.runtime).unwrap(), 100);
        assert_eq!(w.issuer.jetton_data(&w.runtime).unwrap().total_supply, 100);
        w.runtime.check_value_conservation().unwrap();
    }

    #[test]
    fn test_non_admin_mint_fails_with_73() {
        let mut w = world();
        let mallory = w.runtime.create_wallet("mallory", TON);
        let txs = w
            .issuer
            .mint(&mut w.runtime, mallory, mallory, 100, 20_000_000, 50_000_000)
            .unwrap();
        assert!(!txs[0].success);
        assert_eq!(txs[0].exit_code, exit::UNAUTHORIZED);
        assert_eq!(w.issuer.jetton_data(&w.runtime).unwrap().total_supply, 0);
    }

    #[test]
    fn test_change_admin() {
        let mut w = world();
        let next = w.runtime.create_wallet("next-admin", TON);
        w.issuer
            .send(
                &mut w.runtime,
                w.admin,
                50_000_000,
                &IssuerMessage::ChangeAdmin {
                    query_id: 0,
                    new_admin: next,
                },
            )
            .unwrap();
        assert_eq!(w.issuer.jetton_data(&w.runtime).unwrap().admin, next);
    }

    #[test]
    fn test_failed_withdraw_burn_restores_supply() {
        let mut w = world();
        let alice = w.runtime.create_wallet("alice", TON);
        let bob = w.runtime.create_wallet("bob", TON);
        w.issuer
            .mint(&mut w.runtime, w.admin, alice, 100, 20_000_000, 50_000_000)
            .unwrap();
        // Bob has no Holder: the withdraw burn bounces back to the Issuer.
        let txs = w
            .issuer
            .withdraw(&mut w.runtime, w.admin, 40, bob, bob, 50_000_000)
            .unwrap();
        assert!(txs[0].success);
        assert!(txs.iter().any(|tx| tx.inbound_bounced));
        assert_eq!(w.issuer.jetton_data(&w.runtime).unwrap().total_supply, 100);
    }

    #[test]
    fn test_rescue_moves_native_value() {
        let mut w = world();
        let vault = w.runtime.create_wallet("vault", 0);
        w.issuer
            .send(
                &mut w.runtime,
                w.admin,
                10_000_000,
                &IssuerMessage::Rescue {
                    query_id: 0,
                    to: vault,
                    amount: TON / 2,
                },
            )
            .unwrap();
        assert_eq!(w.runtime.balance(&vault), TON / 2);

        // More than the Issuer holds: the whole message fails in the action phase.
        let txs = w
            .issuer
            .send(
                &mut w.runtime,
                w.admin,
                10_000_000,
                &IssuerMessage::Rescue {
                    query_id: 1,
                    to: vault,
                    amount: 10 * TON,
                },
            )
            .unwrap();
        assert_eq!(txs[0].exit_code, ExitCode::NOT_ENOUGH_VALUE);
        assert_eq!(w.runtime.balance(&vault), TON / 2);
    }
}
