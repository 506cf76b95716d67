//! # Addresses
//!
//! Standard internal addresses (`addr_std`): a signed 8-bit workchain and a
//! 256-bit account hash. Two text forms are supported:
//!
//! - raw: `<workchain>:<64 hex chars>`
//! - user-friendly: 48 base64 chars encoding flags, workchain, hash and a
//!   CRC16-XMODEM checksum

use crate::cell::Hash;
use crate::errors::CellError;
use base64::engine::general_purpose::{STANDARD, URL_SAFE};
use base64::Engine as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

const TAG_BOUNCEABLE: u8 = 0x11;
const TAG_NON_BOUNCEABLE: u8 = 0x51;
const TAG_TESTNET: u8 = 0x80;

/// A standard internal address.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address {
    pub workchain: i8,
    pub hash: [u8; 32],
}

/// Flags carried by the user-friendly form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct FriendlyFlags {
    pub bounceable: bool,
    pub testnet: bool,
}

impl Address {
    /// Serialized width of `addr_std` without anycast.
    pub const STD_BITS: usize = 2 + 1 + 8 + 256;

    #[must_use]
    pub const fn new(workchain: i8, hash: [u8; 32]) -> Self {
        Self { workchain, hash }
    }

    /// Address of the account whose initial state hashes to `hash`.
    #[must_use]
    pub fn from_hash(workchain: i8, hash: Hash) -> Self {
        Self::new(workchain, *hash.as_bytes())
    }

    /// `<workchain>:<hex>` form.
    #[must_use]
    pub fn to_raw(&self) -> String {
        format!("{}:{}", self.workchain, hex::encode(self.hash))
    }

    /// Base64url user-friendly form.
    #[must_use]
    pub fn to_friendly(&self, flags: FriendlyFlags) -> String {
        let mut tag = if flags.bounceable {
            TAG_BOUNCEABLE
        } else {
            TAG_NON_BOUNCEABLE
        };
        if flags.testnet {
            tag |= TAG_TESTNET;
        }
        let mut bytes = Vec::with_capacity(36);
        bytes.push(tag);
        bytes.push(self.workchain as u8);
        bytes.extend_from_slice(&self.hash);
        let crc = crc16(&bytes);
        bytes.extend_from_slice(&crc.to_be_bytes());
        URL_SAFE.encode(bytes)
    }

    /// Parses `<workchain>:<hex>`.
    pub fn parse_raw(text: &str) -> Result<Self, CellError> {
        let (wc, hash_hex) = text
            .split_once(':')
            .ok_or_else(|| CellError::InvalidAddressText(text.to_string()))?;
        let workchain: i8 = wc
            .parse()
            .map_err(|_| CellError::InvalidAddressText(text.to_string()))?;
        let bytes =
            hex::decode(hash_hex).map_err(|_| CellError::InvalidAddressText(text.to_string()))?;
        let hash: [u8; 32] = bytes
            .try_into()
            .map_err(|_| CellError::InvalidAddressText(text.to_string()))?;
        Ok(Self::new(workchain, hash))
    }

    /// Parses the 48-character user-friendly form (url-safe or standard base64).
    pub fn parse_friendly(text: &str) -> Result<(Self, FriendlyFlags), CellError> {
        let invalid = || CellError::InvalidAddressText(text.to_string());
        if text.len() != 48 {
            return Err(invalid());
        }
        let bytes = URL_SAFE
            .decode(text)
            .or_else(|_| STANDARD.decode(text))
            .map_err(|_| invalid())?;
        if bytes.len() != 36 {
            return Err(invalid());
        }
        let expected = u16::from_be_bytes([bytes[34], bytes[35]]);
        if crc16(&bytes[..34]) != expected {
            return Err(invalid());
        }
        let mut tag = bytes[0];
        let testnet = tag & TAG_TESTNET != 0;
        tag &= !TAG_TESTNET;
        let bounceable = match tag {
            TAG_BOUNCEABLE => true,
            TAG_NON_BOUNCEABLE => false,
            _ => return Err(invalid()),
        };
        let mut hash = [0u8; 32];
        hash.copy_from_slice(&bytes[2..34]);
        Ok((
            Self::new(bytes[1] as i8, hash),
            FriendlyFlags {
                bounceable,
                testnet,
            },
        ))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_raw())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hex = hex::encode(self.hash);
        write!(f, "Address({}:{}..{})", self.workchain, &hex[..6], &hex[58..])
    }
}

impl FromStr for Address {
    type Err = CellError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.contains(':') {
            Self::parse_raw(s)
        } else {
            Self::parse_friendly(s).map(|(address, _)| address)
        }
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

/// CRC16-XMODEM (poly 0x1021, init 0).
fn crc16(data: &[u8]) -> u16 {
    let mut crc: u16 = 0;
    for byte in data {
        crc ^= u16::from(*byte) << 8;
        for _ in 0..8 {
            crc = if crc & 0x8000 != 0 {
                (crc << 1) ^ 0x1021
            } else {
                crc << 1
            };
        }
    }
    crc
}

// =============================================================================
// TESTS
// =============================================================================
