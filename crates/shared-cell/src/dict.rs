//! # Dictionaries
//!
//! `HashmapE n X`: a binary Patricia trie over fixed-width keys. An empty
//! dictionary is a single `0` bit; a non-empty one is a `1` bit plus a
//! reference to the root edge.
//!
//! Each edge carries a label in whichever of the three encodings is
//! shortest (short `0`, long `10`, same `11`, short preferred on ties),
//! followed by either the leaf value or two fork references.

use crate::address::Address;
use crate::builder::CellBuilder;
use crate::cell::Cell;
use crate::errors::CellError;
use crate::slice::CellSlice;
use std::collections::BTreeMap;
use std::sync::Arc;

// =============================================================================
// KEY / VALUE CODECS
// =============================================================================

/// Fixed-width dictionary key.
pub trait DictKey: Ord + Clone {
    /// Key width in bits.
    const BITS: usize;

    fn to_bits(&self) -> Result<Vec<bool>, CellError>;

    fn from_bits(bits: &[bool]) -> Result<Self, CellError>;
}

/// Value stored at a dictionary leaf.
pub trait DictValue: Sized {
    fn store(&self, builder: &mut CellBuilder) -> Result<(), CellError>;

    fn load(slice: &mut CellSlice<'_>) -> Result<Self, CellError>;
}

impl DictKey for Address {
    const BITS: usize = Address::STD_BITS;

    fn to_bits(&self) -> Result<Vec<bool>, CellError> {
        let mut b = CellBuilder::new();
        b.store_address(self)?;
        let cell = b.build();
        Ok(cell.parse().peek_bits(Self::BITS).collect())
    }

    fn from_bits(bits: &[bool]) -> Result<Self, CellError> {
        let mut b = CellBuilder::new();
        b.store_bits(bits)?;
        let cell = b.build();
        let mut slice = cell.parse();
        slice.load_address()
    }
}

impl DictKey for u32 {
    const BITS: usize = 32;

    fn to_bits(&self) -> Result<Vec<bool>, CellError> {
        Ok((0..32).rev().map(|i| (self >> i) & 1 == 1).collect())
    }

    fn from_bits(bits: &[bool]) -> Result<Self, CellError> {
        if bits.len() != 32 {
            return Err(CellError::InvalidDictionary("key width"));
        }
        Ok(bits.iter().fold(0u32, |acc, bit| (acc << 1) | u32::from(*bit)))
    }
}

impl DictValue for bool {
    fn store(&self, builder: &mut CellBuilder) -> Result<(), CellError> {
        builder.store_bit(*self)?;
        Ok(())
    }

    fn load(slice: &mut CellSlice<'_>) -> Result<Self, CellError> {
        slice.load_bit()
    }
}

// =============================================================================
// DICTIONARY
// =============================================================================

/// An in-memory dictionary with a canonical cell encoding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dictionary<K: DictKey, V> {
    entries: BTreeMap<K, V>,
}

impl<K: DictKey, V> Default for Dictionary<K, V> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<K: DictKey, V: DictValue> Dictionary<K, V> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.entries.insert(key, value)
    }

    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.entries.remove(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.entries.iter()
    }

    /// Root edge cell, `None` when empty.
    pub fn root_cell(&self) -> Result<Option<Arc<Cell>>, CellError> {
        if self.entries.is_empty() {
            return Ok(None);
        }
        let mut keyed = Vec::with_capacity(self.entries.len());
        for (key, value) in &self.entries {
            keyed.push((key.to_bits()?, value));
        }
        let refs: Vec<(&[bool], &V)> = keyed.iter().map(|(k, v)| (k.as_slice(), *v)).collect();
        write_edge(&refs, K::BITS).map(|cell| Some(Arc::new(cell)))
    }

    /// Writes `HashmapE` (presence bit and optional root reference).
    pub fn store(&self, builder: &mut CellBuilder) -> Result<(), CellError> {
        builder.store_maybe_ref(self.root_cell()?)?;
        Ok(())
    }

    /// Reads `HashmapE`.
    pub fn load(slice: &mut CellSlice<'_>) -> Result<Self, CellError> {
        let mut dict = Self::new();
        if let Some(root) = slice.load_maybe_ref()? {
            let mut prefix = Vec::with_capacity(K::BITS);
            read_edge(&root, K::BITS, &mut prefix, &mut dict.entries)?;
        }
        Ok(dict)
    }
}

impl<K: DictKey, V> FromIterator<(K, V)> for Dictionary<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl CellBuilder {
    /// Stores a dictionary as `HashmapE`.
    pub fn store_dict<K: DictKey, V: DictValue>(
        &mut self,
        dict: &Dictionary<K, V>,
    ) -> Result<&mut Self, CellError> {
        dict.store(self)?;
        Ok(self)
    }
}

impl CellSlice<'_> {
    /// Loads a `HashmapE` dictionary.
    pub fn load_dict<K: DictKey, V: DictValue>(&mut self) -> Result<Dictionary<K, V>, CellError> {
        Dictionary::load(self)
    }
}

// =============================================================================
// LABELS
// =============================================================================

/// Bits needed to store any integer in `0..=max`.
fn bits_for(max: usize) -> usize {
    (usize::BITS - max.leading_zeros()) as usize
}

fn write_label(builder: &mut CellBuilder, label: &[bool], max: usize) -> Result<(), CellError> {
    let n = label.len();
    let k = bits_for(max);
    let short_len = 2 * n + 2;
    let long_len = 2 + k + n;
    let same_len = 3 + k;
    let uniform = n > 0 && label.iter().all(|bit| *bit == label[0]);

    let mut best = short_len;
    let mut kind = 0u8;
    if long_len < best {
        best = long_len;
        kind = 1;
    }
    if uniform && same_len < best {
        kind = 2;
    }

    match kind {
        0 => {
            builder.store_bit(false)?;
            for _ in 0..n {
                builder.store_bit(true)?;
            }
            builder.store_bit(false)?;
            builder.store_bits(label)?;
        }
        1 => {
            builder.store_uint(0b10, 2)?;
            builder.store_uint(n as u128, k)?;
            builder.store_bits(label)?;
        }
        _ => {
            builder.store_uint(0b11, 2)?;
            builder.store_bit(label[0])?;
            builder.store_uint(n as u128, k)?;
        }
    }
    Ok(())
}

fn read_label(slice: &mut CellSlice<'_>, max: usize) -> Result<Vec<bool>, CellError> {
    let k = bits_for(max);
    let label = if !slice.load_bit()? {
        let mut n = 0;
        while slice.load_bit()? {
            n += 1;
        }
        if n > max {
            return Err(CellError::InvalidDictionary("label longer than key"));
        }
        (0..n).map(|_| slice.load_bit()).collect::<Result<Vec<_>, _>>()?
    } else if !slice.load_bit()? {
        let n = slice.load_uint(k)? as usize;
        if n > max {
            return Err(CellError::InvalidDictionary("label longer than key"));
        }
        (0..n).map(|_| slice.load_bit()).collect::<Result<Vec<_>, _>>()?
    } else {
        let bit = slice.load_bit()?;
        let n = slice.load_uint(k)? as usize;
        if n > max {
            return Err(CellError::InvalidDictionary("label longer than key"));
        }
        vec![bit; n]
    };
    Ok(label)
}

// =============================================================================
// TRIE
// =============================================================================

fn write_edge<V: DictValue>(entries: &[(&[bool], &V)], remaining: usize) -> Result<Cell, CellError> {
    let (first, _) = entries[0];
    let mut common = first.len();
    for (key, _) in &entries[1..] {
        common = common.min(first.iter().zip(key.iter()).take_while(|(a, b)| a == b).count());
    }

    let mut builder = CellBuilder::new();
    write_label(&mut builder, &first[..common], remaining)?;

    if common == remaining {
        entries[0].1.store(&mut builder)?;
        return Ok(builder.build());
    }

    let (left, right): (Vec<_>, Vec<_>) = entries
        .iter()
        .map(|(key, value)| (&key[common..], *value))
        .partition(|(suffix, _)| !suffix[0]);
    let left: Vec<(&[bool], &V)> = left.into_iter().map(|(k, v)| (&k[1..], v)).collect();
    let right: Vec<(&[bool], &V)> = right.into_iter().map(|(k, v)| (&k[1..], v)).collect();
    if left.is_empty() || right.is_empty() {
        return Err(CellError::InvalidDictionary("fork with empty branch"));
    }

    let child_len = remaining - common - 1;
    builder.store_ref(Arc::new(write_edge(&left, child_len)?))?;
    builder.store_ref(Arc::new(write_edge(&right, child_len)?))?;
    Ok(builder.build())
}

fn read_edge<K: DictKey, V: DictValue>(
    cell: &Cell,
    remaining: usize,
    prefix: &mut Vec<bool>,
    out: &mut BTreeMap<K, V>,
) -> Result<(), CellError> {
    let mut slice = cell.parse();
    let label = read_label(&mut slice, remaining)?;
    let depth = prefix.len();
    prefix.extend_from_slice(&label);

    if label.len() == remaining {
        let value = V::load(&mut slice)?;
        out.insert(K::from_bits(prefix)?, value);
    } else {
        let left = slice.load_ref()?;
        let right = slice.load_ref()?;
        let child_len = remaining - label.len() - 1;
        for (bit, child) in [(false, left), (true, right)] {
            prefix.push(bit);
            read_edge(&child, child_len, prefix, out)?;
            prefix.pop();
        }
    }

    prefix.truncate(depth);
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================
