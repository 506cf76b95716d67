//! # Cell Slice
//!
//! Sequential reader over a cell. Reads consume bits and references in
//! order; reading past the end yields an underflow error and leaves the
//! cursor untouched.

use crate::address::Address;
use crate::cell::Cell;
use crate::errors::CellError;
use std::sync::Arc;

/// Read cursor over a borrowed cell.
#[derive(Clone, Debug)]
pub struct CellSlice<'a> {
    cell: &'a Cell,
    bit_pos: usize,
    ref_pos: usize,
}

impl<'a> CellSlice<'a> {
    /// Opens a slice at the start of `cell`.
    #[must_use]
    pub fn new(cell: &'a Cell) -> Self {
        Self {
            cell,
            bit_pos: 0,
            ref_pos: 0,
        }
    }

    /// Unread bits.
    #[must_use]
    pub fn remaining_bits(&self) -> usize {
        self.cell.bit_len - self.bit_pos
    }

    /// Unread references.
    #[must_use]
    pub fn remaining_refs(&self) -> usize {
        self.cell.refs.len() - self.ref_pos
    }

    /// True when neither bits nor references remain.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.remaining_bits() == 0 && self.remaining_refs() == 0
    }

    fn ensure_bits(&self, bits: usize) -> Result<(), CellError> {
        if bits > self.remaining_bits() {
            return Err(CellError::Underflow {
                wanted: bits,
                available: self.remaining_bits(),
            });
        }
        Ok(())
    }

    /// Next `count` bits without consuming them. Truncated at the end.
    pub fn peek_bits(&self, count: usize) -> impl Iterator<Item = bool> + 'a {
        let cell: &'a Cell = self.cell;
        let end = (self.bit_pos + count).min(cell.bit_len);
        (self.bit_pos..end).map(move |i| cell.bit(i))
    }

    /// Unread references without consuming them.
    #[must_use]
    pub fn peek_refs(&self) -> &'a [Arc<Cell>] {
        &self.cell.refs[self.ref_pos..]
    }

    /// Skips `bits` bits.
    pub fn skip_bits(&mut self, bits: usize) -> Result<(), CellError> {
        self.ensure_bits(bits)?;
        self.bit_pos += bits;
        Ok(())
    }

    /// Reads one bit.
    pub fn load_bit(&mut self) -> Result<bool, CellError> {
        self.ensure_bits(1)?;
        let bit = self.cell.bit(self.bit_pos);
        self.bit_pos += 1;
        Ok(bit)
    }

    /// Reads `bits` bits as an unsigned integer (`bits <= 128`).
    pub fn load_uint(&mut self, bits: usize) -> Result<u128, CellError> {
        if bits > 128 {
            return Err(CellError::RangeCheck { bits });
        }
        self.ensure_bits(bits)?;
        let mut value = 0u128;
        for i in 0..bits {
            value = (value << 1) | u128::from(self.cell.bit(self.bit_pos + i));
        }
        self.bit_pos += bits;
        Ok(value)
    }

    /// Reads `bits` bits as a two's complement signed integer.
    pub fn load_int(&mut self, bits: usize) -> Result<i128, CellError> {
        if bits == 0 || bits > 128 {
            return Err(CellError::RangeCheck { bits });
        }
        let raw = self.load_uint(bits)?;
        if bits == 128 {
            return Ok(raw as i128);
        }
        let sign = 1u128 << (bits - 1);
        Ok(if raw & sign != 0 {
            (raw as i128) - (1i128 << bits)
        } else {
            raw as i128
        })
    }

    /// Reads a 32-bit unsigned integer.
    pub fn load_u32(&mut self) -> Result<u32, CellError> {
        Ok(self.load_uint(32)? as u32)
    }

    /// Reads a 64-bit unsigned integer.
    pub fn load_u64(&mut self) -> Result<u64, CellError> {
        Ok(self.load_uint(64)? as u64)
    }

    /// Reads `len` whole bytes.
    pub fn load_bytes(&mut self, len: usize) -> Result<Vec<u8>, CellError> {
        self.ensure_bits(len * 8)?;
        let mut out = Vec::with_capacity(len);
        for _ in 0..len {
            out.push(self.load_uint(8)? as u8);
        }
        Ok(out)
    }

    /// Reads a `Coins` amount.
    pub fn load_coins(&mut self) -> Result<u128, CellError> {
        let start = self.bit_pos;
        let len = self.load_uint(4)? as usize;
        match self.load_uint(len * 8) {
            Ok(value) => Ok(value),
            Err(err) => {
                self.bit_pos = start;
                Err(err)
            }
        }
    }

    /// Reads an address, mapping `addr_none` to `None`.
    pub fn load_maybe_address(&mut self) -> Result<Option<Address>, CellError> {
        let start = self.bit_pos;
        let result = self.load_maybe_address_inner();
        if result.is_err() {
            self.bit_pos = start;
        }
        result
    }

    fn load_maybe_address_inner(&mut self) -> Result<Option<Address>, CellError> {
        match self.load_uint(2)? {
            0b00 => Ok(None),
            0b10 => {
                if self.load_bit()? {
                    return Err(CellError::InvalidAddress);
                }
                let workchain = self.load_int(8)? as i8;
                let bytes = self.load_bytes(32)?;
                let mut hash = [0u8; 32];
                hash.copy_from_slice(&bytes);
                Ok(Some(Address::new(workchain, hash)))
            }
            _ => Err(CellError::InvalidAddress),
        }
    }

    /// Reads an address that must not be `addr_none`.
    pub fn load_address(&mut self) -> Result<Address, CellError> {
        let start = self.bit_pos;
        match self.load_maybe_address()? {
            Some(address) => Ok(address),
            None => {
                self.bit_pos = start;
                Err(CellError::InvalidAddress)
            }
        }
    }

    /// Takes the next reference.
    pub fn load_ref(&mut self) -> Result<Arc<Cell>, CellError> {
        let cell = self
            .cell
            .refs
            .get(self.ref_pos)
            .cloned()
            .ok_or(CellError::NoReference)?;
        self.ref_pos += 1;
        Ok(cell)
    }

    /// Reads `Maybe ^Cell`.
    pub fn load_maybe_ref(&mut self) -> Result<Option<Arc<Cell>>, CellError> {
        if self.remaining_bits() >= 1 && self.cell.bit(self.bit_pos) && self.remaining_refs() == 0 {
            return Err(CellError::NoReference);
        }
        if self.load_bit()? {
            self.load_ref().map(Some)
        } else {
            Ok(None)
        }
    }

    /// Copies the unread remainder into a standalone cell.
    pub fn to_cell(&self) -> Result<Cell, CellError> {
        let mut builder = Cell::builder();
        builder.store_slice(self)?;
        Ok(builder.build())
    }
}

// =============================================================================
// TESTS
// =============================================================================
