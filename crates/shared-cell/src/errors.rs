//! # Cell Errors
//!
//! Failures raised while building or reading cells.

use thiserror::Error;

/// Errors from cell construction and parsing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CellError {
    /// Builder ran past 1023 bits or 4 references.
    #[error("cell overflow: {bits} bits, {refs} refs")]
    Overflow { bits: usize, refs: usize },

    /// Slice read past its end.
    #[error("cell underflow: wanted {wanted} more bits, {available} available")]
    Underflow { wanted: usize, available: usize },

    /// Slice ran out of references.
    #[error("cell underflow: no reference left")]
    NoReference,

    /// Value does not fit into the requested width.
    #[error("value out of range for {bits}-bit field")]
    RangeCheck { bits: usize },

    /// Address tag is not `addr_none` or an `addr_std` without anycast.
    #[error("unsupported address encoding")]
    InvalidAddress,

    /// Address text could not be parsed.
    #[error("invalid address text: {0}")]
    InvalidAddressText(String),

    /// Dictionary trie is malformed.
    #[error("malformed dictionary: {0}")]
    InvalidDictionary(&'static str),

    /// Record prefix or tag does not match the expected layout.
    #[error("unexpected layout: {0}")]
    InvalidLayout(&'static str),
}

impl CellError {
    /// True if this error came from reading past the end of a slice.
    #[must_use]
    pub fn is_underflow(&self) -> bool {
        matches!(self, Self::Underflow { .. } | Self::NoReference)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CellError::Overflow { bits: 1024, refs: 0 };
        assert_eq!(err.to_string(), "cell overflow: 1024 bits, 0 refs");

        let err = CellError::RangeCheck { bits: 32 };
        assert!(err.to_string().contains("32-bit"));
    }

    #[test]
    fn test_underflow_classification() {
        assert!(CellError::NoReference.is_underflow());
        assert!(CellError::Underflow {
            wanted: 8,
            available: 0
        }
        .is_underflow());
        assert!(!CellError::InvalidAddress.is_underflow());
    }
}
