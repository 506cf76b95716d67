//! # Shared Runtime - Message-Driven Account Execution
//!
//! Every account owns private state and interacts with others only through
//! asynchronous messages. This crate executes those messages
//! deterministically, one transaction per inbound message.
//!
//! ## Guarantees
//!
//! | Guarantee | Enforcement |
//! |-----------|-------------|
//! | Atomic transactions (compute + action, all or nothing) | `service.rs` - `Runtime::execute` |
//! | Per-pair delivery order | `service.rs` - FIFO queue in logical-time order |
//! | Deterministic addresses | `domain/entities.rs` - `StateInit::address` |
//! | Bounce returns value and echoes 256 body bits | `domain/services.rs` - `bounce_body` |
//! | Native value conservation | `domain/invariants.rs` - `check_value_conservation` |
//!
//! ## Ports
//!
//! | Port | Direction | Adapters |
//! |------|-----------|----------|
//! | `RuntimeApi` | inbound | `Runtime` |
//! | `ContractLogic` | outbound | account crates |
//! | `EventSink` | outbound | `NoopEventSink`, `InMemoryEventLog`, `BroadcastEventBus` |
//! | `AuthorizationPolicy<Op>` | seam | account crates |
//!
//! ## Usage Example
//!
//! ```ignore
//! use shared_runtime::prelude::*;
//!
//! let mut runtime = Runtime::new(RuntimeConfig::default(), registry);
//! let alice = runtime.create_wallet("alice", 10_000_000_000);
//! runtime.send_internal(alice, target, 1_000_000_000, body, None, true)?;
//! for tx in runtime.run_until_idle()? {
//!     println!("{} exit={}", tx.account, tx.exit_code);
//! }
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

// =============================================================================
// MODULES
// =============================================================================

pub mod adapters;
pub mod domain;
pub mod errors;
pub mod events;
pub mod metrics;
pub mod ports;
pub mod service;

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::adapters::{
        BroadcastEventBus, ContractRegistry, InMemoryEventLog, NoopEventSink,
    };
    pub use crate::domain::{
        Account, AccountStatus, Coins, ContractOutcome, ExitCode, GetMethodContext,
        InternalMessage, LogicalTime, MessageContext, MessageSummary, OutAction,
        OutboundMessage, SendMode, StackValue, StateInit, Transaction, BOUNCE_PREFIX,
    };
    pub use crate::errors::{ClientError, ClientResult, RuntimeError, RuntimeResult};
    pub use crate::events::RuntimeEvent;
    pub use crate::ports::{
        AuthContext, AuthDenied, AuthorizationPolicy, ContractLogic, EventSink, RuntimeApi,
        StackReader,
    };
    pub use crate::service::{Runtime, RuntimeConfig};
}

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
