//! # JV-03 Manager - Signature-Gated Vault Configuration
//!
//! Holds the vault's token pair, treasury and allowed assets. Unlike the
//! Issuer it ignores who sends a message: every change must carry an
//! Ed25519 signature by the stored admin key over the canonical cell of
//! the new values, so any wallet can relay it.
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement Location |
//! |-----------|---------------------|
//! | Every mutation signed by `admin_pubkey` (35) | `domain/policy.rs` - `SignaturePolicy` |
//! | Signature bound to content, not sender | `domain/messages.rs` - `ManagerRequest::signed_cell` |
//! | Token fields replaced together | `service.rs` - `setTokens` |
//! | `deposit`/`withdraw` mutate nothing | `service.rs` |
//!
//! Signed messages carry no nonce; a replayed message is accepted again.
//!
//! ## Usage Example
//!
//! ```ignore
//! use jv_03_manager::prelude::*;
//!
//! let manager = ManagerClient::new(deploy(&mut runtime, &config, TON)?);
//! manager.submit(&mut runtime, relayer, 50_000_000, &admin_key, 0,
//!     ManagerRequest::SetAsset { asset, enabled: true })?;
//! assert!(manager.is_asset_enabled(&runtime, &asset)?);
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod adapters;
pub mod domain;
pub mod errors;
pub mod metrics;
pub mod ports;
pub mod service;

use domain::ManagerConfig;
use shared_cell::{Address, Cell, CellError};
use shared_runtime::adapters::ContractRegistry;
use shared_runtime::domain::{Coins, StateInit};
use shared_runtime::errors::RuntimeResult;
use shared_runtime::ports::RuntimeApi;
use std::sync::Arc;

/// Bytes identifying the Manager code cell.
pub const MANAGER_CODE_TAG: &[u8] = b"jv::manager/1";

/// The Manager code cell registered with the runtime.
pub fn manager_code() -> Result<Arc<Cell>, CellError> {
    let mut b = Cell::builder();
    b.store_bytes(MANAGER_CODE_TAG)?;
    Ok(b.build_ref())
}

/// Registers the Manager contract and returns its code cell.
pub fn register(registry: &mut ContractRegistry) -> Result<Arc<Cell>, CellError> {
    let code = manager_code()?;
    registry.register(&code, Arc::new(adapters::ManagerContract::new()));
    Ok(code)
}

pub fn manager_state_init(config: &ManagerConfig) -> Result<StateInit, CellError> {
    Ok(StateInit::new(
        manager_code()?,
        config.initial_state()?.to_cell()?,
    ))
}

/// Deploys a Manager funded with `balance` and returns its address.
pub fn deploy<R: RuntimeApi>(
    runtime: &mut R,
    config: &ManagerConfig,
    balance: Coins,
) -> RuntimeResult<Address> {
    runtime.deploy(manager_state_init(config)?, balance)
}

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::adapters::{ManagerClient, ManagerContract};
    pub use crate::domain::{
        opcodes, ManagerConfig, ManagerMessage, ManagerRequest, ManagerState, SignaturePolicy,
        TokenUpdate,
    };
    pub use crate::errors::{ManagerError, ManagerResult};
    pub use crate::ports::{ManagerApi, ManagerSettings};
    pub use crate::service::ManagerService;
    pub use crate::{deploy, manager_code, manager_state_init, register};
}

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// TESTS
// =============================================================================
