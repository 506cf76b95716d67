//! # Jetton Vault Test Suite
//!
//! Cross-account scenarios that need more than one account crate.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── fixtures.rs        # Shared runtime world
//!     ├── supply.rs          # Supply invariant, withdraw, blacklist, pricing
//!     ├── authorization.rs   # Issuer admin matrix, Manager signature matrix
//!     └── node_flows.rs      # Genesis, JSON scenarios, event bus
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p jv-tests
//! cargo test -p jv-tests integration::authorization::
//! cargo bench -p jv-tests
//! ```

pub mod integration;
