//! # Cell Builder
//!
//! Appends typed fields MSB-first. Every `store_*` checks capacity and
//! value range before mutating, so a failed store leaves the builder intact.

use crate::address::Address;
use crate::cell::{Cell, MAX_BITS, MAX_REFS};
use crate::errors::CellError;
use crate::slice::CellSlice;
use std::sync::Arc;

/// Largest value representable as `Coins` (`VarUInteger 16`).
pub const MAX_COINS: u128 = (1u128 << 120) - 1;

/// Mutable cell under construction.
#[derive(Clone, Debug, Default)]
pub struct CellBuilder {
    data: Vec<u8>,
    bit_len: usize,
    refs: Vec<Arc<Cell>>,
}

impl CellBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bits written so far.
    #[must_use]
    pub fn bit_len(&self) -> usize {
        self.bit_len
    }

    /// Bits still available.
    #[must_use]
    pub fn remaining_bits(&self) -> usize {
        MAX_BITS - self.bit_len
    }

    /// References still available.
    #[must_use]
    pub fn remaining_refs(&self) -> usize {
        MAX_REFS - self.refs.len()
    }

    fn ensure_bits(&self, bits: usize) -> Result<(), CellError> {
        if self.bit_len + bits > MAX_BITS {
            return Err(CellError::Overflow {
                bits: self.bit_len + bits,
                refs: self.refs.len(),
            });
        }
        Ok(())
    }

    fn push_bit(&mut self, bit: bool) {
        if self.bit_len % 8 == 0 {
            self.data.push(0);
        }
        if bit {
            let idx = self.bit_len / 8;
            self.data[idx] |= 1 << (7 - self.bit_len % 8);
        }
        self.bit_len += 1;
    }

    /// Stores a single bit.
    pub fn store_bit(&mut self, bit: bool) -> Result<&mut Self, CellError> {
        self.ensure_bits(1)?;
        self.push_bit(bit);
        Ok(self)
    }

    /// Stores an unsigned integer in exactly `bits` bits (`bits <= 128`).
    pub fn store_uint(&mut self, value: u128, bits: usize) -> Result<&mut Self, CellError> {
        if bits > 128 || (bits < 128 && value >> bits != 0) {
            return Err(CellError::RangeCheck { bits });
        }
        self.ensure_bits(bits)?;
        for i in (0..bits).rev() {
            self.push_bit((value >> i) & 1 == 1);
        }
        Ok(self)
    }

    /// Stores a two's complement signed integer in exactly `bits` bits.
    pub fn store_int(&mut self, value: i128, bits: usize) -> Result<&mut Self, CellError> {
        if bits == 0 || bits > 128 {
            return Err(CellError::RangeCheck { bits });
        }
        if bits < 128 {
            let min = -(1i128 << (bits - 1));
            let max = (1i128 << (bits - 1)) - 1;
            if value < min || value > max {
                return Err(CellError::RangeCheck { bits });
            }
        }
        self.ensure_bits(bits)?;
        let raw = value as u128;
        for i in (0..bits).rev() {
            self.push_bit((raw >> i) & 1 == 1);
        }
        Ok(self)
    }

    /// Stores whole bytes.
    pub fn store_bytes(&mut self, bytes: &[u8]) -> Result<&mut Self, CellError> {
        self.ensure_bits(bytes.len() * 8)?;
        for byte in bytes {
            for i in (0..8).rev() {
                self.push_bit((byte >> i) & 1 == 1);
            }
        }
        Ok(self)
    }

    /// Stores a sequence of individual bits.
    pub fn store_bits(&mut self, bits: &[bool]) -> Result<&mut Self, CellError> {
        self.ensure_bits(bits.len())?;
        for bit in bits {
            self.push_bit(*bit);
        }
        Ok(self)
    }

    /// Stores a `Coins` amount: 4-bit byte length followed by the value.
    pub fn store_coins(&mut self, amount: u128) -> Result<&mut Self, CellError> {
        if amount > MAX_COINS {
            return Err(CellError::RangeCheck { bits: 120 });
        }
        let len = (128 - amount.leading_zeros() as usize).div_ceil(8);
        self.ensure_bits(4 + len * 8)?;
        self.store_uint(len as u128, 4)?;
        self.store_uint(amount, len * 8)
    }

    /// Stores `addr_std$10`, no anycast.
    pub fn store_address(&mut self, address: &Address) -> Result<&mut Self, CellError> {
        self.ensure_bits(Address::STD_BITS)?;
        self.store_uint(0b10, 2)?;
        self.store_bit(false)?;
        self.store_int(i128::from(address.workchain), 8)?;
        self.store_bytes(&address.hash)
    }

    /// Stores an address, or `addr_none$00` for `None`.
    pub fn store_maybe_address(
        &mut self,
        address: Option<&Address>,
    ) -> Result<&mut Self, CellError> {
        match address {
            Some(address) => self.store_address(address),
            None => self.store_uint(0, 2),
        }
    }

    /// Appends a child reference.
    pub fn store_ref(&mut self, cell: Arc<Cell>) -> Result<&mut Self, CellError> {
        if self.refs.len() >= MAX_REFS {
            return Err(CellError::Overflow {
                bits: self.bit_len,
                refs: self.refs.len() + 1,
            });
        }
        self.refs.push(cell);
        Ok(self)
    }

    /// Stores `Maybe ^Cell`.
    pub fn store_maybe_ref(&mut self, cell: Option<Arc<Cell>>) -> Result<&mut Self, CellError> {
        match cell {
            Some(cell) => {
                if self.refs.len() >= MAX_REFS {
                    return Err(CellError::Overflow {
                        bits: self.bit_len + 1,
                        refs: self.refs.len() + 1,
                    });
                }
                self.store_bit(true)?;
                self.store_ref(cell)
            }
            None => self.store_bit(false),
        }
    }

    /// Copies the unread remainder of a slice (bits and references).
    pub fn store_slice(&mut self, slice: &CellSlice<'_>) -> Result<&mut Self, CellError> {
        let bits = slice.remaining_bits();
        let refs = slice.remaining_refs();
        if self.bit_len + bits > MAX_BITS || self.refs.len() + refs > MAX_REFS {
            return Err(CellError::Overflow {
                bits: self.bit_len + bits,
                refs: self.refs.len() + refs,
            });
        }
        for bit in slice.peek_bits(bits) {
            self.push_bit(bit);
        }
        self.refs.extend(slice.peek_refs().iter().cloned());
        Ok(self)
    }

    /// Copies all bits and references of another cell.
    pub fn store_cell(&mut self, cell: &Cell) -> Result<&mut Self, CellError> {
        self.store_slice(&cell.parse())
    }

    /// Finishes the cell.
    #[must_use]
    pub fn build(self) -> Cell {
        Cell {
            data: self.data,
            bit_len: self.bit_len,
            refs: self.refs,
        }
    }

    /// Finishes the cell behind an `Arc`, ready to be referenced.
    #[must_use]
    pub fn build_ref(self) -> Arc<Cell> {
        Arc::new(self.build())
    }
}

// =============================================================================
// TESTS
// =============================================================================
