//! # Jetton Vault Node
//!
//! Wires the runtime and the three account crates into a runnable harness.
//!
//! ## Modules
//!
//! - `config/` - JSON file plus `JV_*` environment overrides
//! - `node/` - genesis deployment, step execution, state snapshot
//! - `scenario/` - JSON step list replayed against the node
//!
//! ## Startup Sequence
//!
//! 1. Load configuration (from file/env)
//! 2. Initialize telemetry
//! 3. Register account logic and deploy the Issuer and the Manager
//! 4. Start the event subscriber
//! 5. Replay the scenario and print the report

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod node;
pub mod scenario;

pub use config::{ConfigError, NodeConfig};
pub use node::{JettonNode, NodeError, Snapshot, StepReport};
pub use scenario::{Scenario, Step};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
