//! # Ports
//!
//! - `inbound`: the API the harness, clients and the node drive
//! - `outbound`: what the runtime depends on (contract logic, event sinks)
//!   plus the authorization seam shared by account crates

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
