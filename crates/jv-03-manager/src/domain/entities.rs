//! # Manager State
//!
//! ```text
//! primary:   bits256 admin_pubkey, addr s_token, addr y_token, ^secondary
//! secondary: addr treasury, bit is_vault, HashmapE(267, bool) assets
//! ```

use serde::{Deserialize, Serialize};
use shared_cell::{Address, Cell, CellError, CellSlice, Dictionary};
use std::sync::Arc;

/// Committed data of the Manager.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ManagerState {
    /// Raw Ed25519 public key authorizing every change.
    pub admin_pubkey: [u8; 32],
    pub s_token: Address,
    pub y_token: Address,
    pub treasury: Address,
    pub is_vault: bool,
    pub assets: Dictionary<Address, bool>,
}

impl ManagerState {
    pub fn load(cell: &Cell) -> Result<Self, CellError> {
        let mut s = cell.parse();
        let admin_pubkey = load_bytes32(&mut s)?;
        let s_token = s.load_address()?;
        let y_token = s.load_address()?;
        let secondary = s.load_ref()?;

        let mut s = secondary.parse();
        Ok(Self {
            admin_pubkey,
            s_token,
            y_token,
            treasury: s.load_address()?,
            is_vault: s.load_bit()?,
            assets: s.load_dict()?,
        })
    }

    pub fn to_cell(&self) -> Result<Arc<Cell>, CellError> {
        let mut secondary = Cell::builder();
        secondary
            .store_address(&self.treasury)?
            .store_bit(self.is_vault)?
            .store_dict(&self.assets)?;

        let mut b = Cell::builder();
        b.store_bytes(&self.admin_pubkey)?
            .store_address(&self.s_token)?
            .store_address(&self.y_token)?
            .store_ref(secondary.build_ref())?;
        Ok(b.build_ref())
    }

    #[must_use]
    pub fn is_asset_enabled(&self, asset: &Address) -> bool {
        self.assets.get(asset).copied().unwrap_or(false)
    }

    /// Upserts the flag. Disabled assets stay listed.
    pub fn set_asset(&mut self, asset: Address, enabled: bool) {
        self.assets.insert(asset, enabled);
    }
}

fn load_bytes32(s: &mut CellSlice<'_>) -> Result<[u8; 32], CellError> {
    s.load_bytes(32)?
        .try_into()
        .map_err(|_| CellError::InvalidLayout("256-bit public key"))
}

// =============================================================================
// DEPLOY CONFIGURATION
// =============================================================================

/// Deploy-time Manager configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagerConfig {
    /// Hex-encoded Ed25519 public key.
    pub admin_pubkey: String,
    pub s_token: Address,
    pub y_token: Address,
    pub treasury: Address,
    #[serde(default)]
    pub is_vault: bool,
}

impl ManagerConfig {
    /// Initial state with an empty asset list.
    pub fn initial_state(&self) -> Result<ManagerState, CellError> {
        let bytes = hex::decode(self.admin_pubkey.trim())
            .map_err(|_| CellError::InvalidLayout("admin public key is not hex"))?;
        let admin_pubkey: [u8; 32] = bytes
            .try_into()
            .map_err(|_| CellError::InvalidLayout("admin public key is not 32 bytes"))?;
        Ok(ManagerState {
            admin_pubkey,
            s_token: self.s_token,
            y_token: self.y_token,
            treasury: self.treasury,
            is_vault: self.is_vault,
            assets: Dictionary::new(),
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================
