//! # Cell
//!
//! An immutable record of up to 1023 bits and up to 4 child references.
//! Both persistent account state and message bodies are cells.

use crate::builder::CellBuilder;
use crate::slice::CellSlice;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::sync::Arc;

/// Maximum number of data bits in a single cell.
pub const MAX_BITS: usize = 1023;

/// Maximum number of child references in a single cell.
pub const MAX_REFS: usize = 4;

// =============================================================================
// HASH (32 bytes)
// =============================================================================

/// A 32-byte SHA-256 representation hash.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Hash(pub [u8; 32]);

impl Hash {
    /// The zero hash.
    pub const ZERO: Self = Self([0u8; 32]);

    /// Creates a hash from a 32-byte array.
    #[must_use]
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns the underlying bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Lowercase hex rendering.
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hex = self.to_hex();
        write!(f, "{}...{}", &hex[..8], &hex[56..])
    }
}

impl From<[u8; 32]> for Hash {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

// =============================================================================
// CELL
// =============================================================================

/// An ordinary (non-exotic, level 0) cell.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct Cell {
    pub(crate) data: Vec<u8>,
    pub(crate) bit_len: usize,
    pub(crate) refs: Vec<Arc<Cell>>,
}

impl Cell {
    /// A cell with no bits and no references.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Starts a new builder.
    #[must_use]
    pub fn builder() -> CellBuilder {
        CellBuilder::new()
    }

    /// Number of data bits.
    #[must_use]
    pub fn bit_len(&self) -> usize {
        self.bit_len
    }

    /// Raw data bytes, the last one zero-padded when not byte aligned.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Child references.
    #[must_use]
    pub fn references(&self) -> &[Arc<Cell>] {
        &self.refs
    }

    /// True when the cell holds neither bits nor references.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bit_len == 0 && self.refs.is_empty()
    }

    /// Opens a reader positioned at the first bit and first reference.
    #[must_use]
    pub fn parse(&self) -> CellSlice<'_> {
        CellSlice::new(self)
    }

    /// Reads bit `index` (MSB first).
    #[must_use]
    pub(crate) fn bit(&self, index: usize) -> bool {
        (self.data[index / 8] >> (7 - index % 8)) & 1 == 1
    }

    /// Depth of the reference tree below this cell.
    #[must_use]
    pub fn depth(&self) -> u16 {
        self.refs
            .iter()
            .map(|child| child.depth() + 1)
            .max()
            .unwrap_or(0)
    }

    /// Representation hash.
    ///
    /// `sha256(d1 ‖ d2 ‖ padded data ‖ child depths ‖ child hashes)`.
    #[must_use]
    pub fn hash(&self) -> Hash {
        let mut hasher = Sha256::new();
        hasher.update(self.descriptors());
        hasher.update(self.padded_data());
        for child in &self.refs {
            hasher.update(child.depth().to_be_bytes());
        }
        for child in &self.refs {
            hasher.update(child.hash().as_bytes());
        }
        Hash::new(hasher.finalize().into())
    }

    fn descriptors(&self) -> [u8; 2] {
        let d1 = self.refs.len() as u8;
        let d2 = (self.bit_len / 8 + self.bit_len.div_ceil(8)) as u8;
        [d1, d2]
    }

    fn padded_data(&self) -> Vec<u8> {
        let mut bytes = self.data.clone();
        let rem = self.bit_len % 8;
        if rem != 0 {
            if let Some(last) = bytes.last_mut() {
                *last |= 1 << (7 - rem);
            }
        }
        bytes
    }
}

impl fmt::Debug for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn render(cell: &Cell, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
            writeln!(
                f,
                "{:indent$}x{{{}}}[{} bits]",
                "",
                hex::encode(&cell.data),
                cell.bit_len,
                indent = indent
            )?;
            for child in &cell.refs {
                render(child, f, indent + 1)?;
            }
            Ok(())
        }
        render(self, f, 0)
    }
}

// =============================================================================
// TESTS
// =============================================================================
