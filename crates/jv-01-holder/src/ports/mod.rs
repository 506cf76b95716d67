//! # Ports
//!
//! The Holder implements the runtime's `ContractLogic` port (see
//! `adapters::contract`) and exposes [`HolderApi`] to owners.

pub mod inbound;

pub use inbound::{HolderApi, WalletData};
