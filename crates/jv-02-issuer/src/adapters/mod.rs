//! # Adapters
//!
//! - `contract`: the Issuer as runtime contract logic
//! - `client`: typed admin and query access

pub mod client;
pub mod contract;

pub use client::IssuerClient;
pub use contract::IssuerContract;
