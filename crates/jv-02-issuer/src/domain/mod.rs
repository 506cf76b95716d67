//! # Domain Layer
//!
//! Issuer state, messages, pricing and the admin policy.

pub mod entities;
pub mod invariants;
pub mod messages;
pub mod opcodes;
pub mod policy;
pub mod services;
pub mod value_objects;

pub use entities::{
    offchain_content, read_offchain_uri, IssuerConfig, IssuerState, UNSET_BACKING_TOKEN,
};
pub use invariants::{check_price, check_supply_matches};
pub use messages::{take_wallet_address_body, withdraw_release_body, IssuerMessage};
pub use policy::AdminPolicy;
pub use services::minted_for_deposit;
pub use value_objects::exit;
