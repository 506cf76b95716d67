//! # Adapters
//!
//! - `contract`: the Holder as runtime contract logic
//! - `client`: typed owner-side access

pub mod client;
pub mod contract;

pub use client::HolderClient;
pub use contract::HolderContract;
