//! # Shared Cell - Bounded Binary Records
//!
//! Every piece of persistent account state and every message body is a
//! **cell**: up to 1023 bits of data plus up to 4 references to child cells.
//!
//! ## Components
//!
//! | Module | Purpose |
//! |--------|---------|
//! | `cell` | Immutable cell, representation hash, depth |
//! | `builder` | Typed appends (ints, coins, addresses, refs) |
//! | `slice` | Sequential typed reads |
//! | `address` | `addr_std` / `addr_none`, raw and friendly text |
//! | `dict` | `HashmapE` Patricia-trie dictionaries |
//!
//! ## Encoding Rules
//!
//! - Integers are big-endian, MSB first, two's complement when signed
//! - Coins: 4-bit byte length then the value, strictly below 2^120
//! - Reading past the end is an underflow; writing past capacity an overflow

#![warn(clippy::all)]

pub mod address;
pub mod builder;
pub mod cell;
pub mod dict;
pub mod errors;
pub mod slice;

// Re-exports
pub use address::{Address, FriendlyFlags};
pub use builder::{CellBuilder, MAX_COINS};
pub use cell::{Cell, Hash, MAX_BITS, MAX_REFS};
pub use dict::{DictKey, DictValue, Dictionary};
pub use errors::CellError;
pub use slice::CellSlice;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    #[test]
    fn test_version() {
        assert!(!super::VERSION.is_empty());
    }
}
