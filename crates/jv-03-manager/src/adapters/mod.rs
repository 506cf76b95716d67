//! # Adapters Layer

pub mod client;
pub mod contract;

pub use client::ManagerClient;
pub use contract::ManagerContract;
