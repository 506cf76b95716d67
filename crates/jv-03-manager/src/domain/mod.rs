//! # Domain Layer
//!
//! Manager state, signed requests and the signature policy.

pub mod entities;
pub mod messages;
pub mod opcodes;
pub mod policy;

pub use entities::{ManagerConfig, ManagerState};
pub use messages::{ManagerMessage, ManagerRequest, TokenUpdate, SIGNATURE_BITS};
pub use policy::SignaturePolicy;
