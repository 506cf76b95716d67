//! # Domain Layer
//!
//! Holder state, messages and address derivation. No runtime access.

pub mod entities;
pub mod invariants;
pub mod messages;
pub mod opcodes;
pub mod services;
pub mod value_objects;

pub use entities::HolderState;
pub use invariants::is_authorized_credit_source;
pub use messages::{
    burn_notification_body, excesses_body, forward_payload, transfer_notification_body,
    withdraw_burn_body, withdraw_burned_body, BurnRequest, HolderMessage, InternalTransfer,
    TransferRequest,
};
pub use services::{derive_holder_address, holder_code, holder_state_init, HOLDER_CODE_TAG};
pub use value_objects::{exit, HolderFees};
