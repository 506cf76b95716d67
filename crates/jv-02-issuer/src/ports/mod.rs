//! # Ports
//!
//! The Issuer implements the runtime's `ContractLogic` port (see
//! `adapters::contract`) and exposes [`IssuerApi`] to clients.

pub mod inbound;

pub use inbound::{IssuerApi, JettonData};
