//! # Node Configuration
//!
//! Defaults, then an optional JSON file, then `JV_*` environment variables.
//!
//! | Variable | Field |
//! |----------|-------|
//! | `JV_WORKCHAIN` | `workchain` |
//! | `JV_MAX_TRANSACTIONS` | `max_transactions` |
//! | `JV_MANAGER_SEED_HEX` | `manager.seed_hex` |
//! | `JV_SCENARIO` | `scenario_path` |

use serde::{Deserialize, Serialize};
use shared_cell::Address;
use shared_runtime::domain::Coins;
use std::path::{Path, PathBuf};
use thiserror::Error;

const TON: Coins = 1_000_000_000;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("invalid value {value:?} for {var}")]
    InvalidEnv { var: &'static str, value: String },
}

/// A harness wallet created at genesis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletSpec {
    pub label: String,
    pub balance: Coins,
}

/// Issuer deployment parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IssuerSection {
    /// Wallet label that becomes the admin.
    pub admin: String,
    pub content_uri: String,
    pub price: i32,
    pub balance: Coins,
}

impl Default for IssuerSection {
    fn default() -> Self {
        Self {
            admin: "admin".to_string(),
            content_uri: "https://example.com/jetton.json".to_string(),
            price: 1,
            balance: TON,
        }
    }
}

/// Manager deployment parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManagerSection {
    /// Hex seed of the admin signing key; random when absent.
    pub seed_hex: Option<String>,
    pub s_token: Address,
    pub y_token: Address,
    pub treasury: Address,
    pub is_vault: bool,
    pub balance: Coins,
}

impl Default for ManagerSection {
    fn default() -> Self {
        Self {
            seed_hex: None,
            s_token: Address::new(0, [0x01; 32]),
            y_token: Address::new(0, [0x02; 32]),
            treasury: Address::new(0, [0x03; 32]),
            is_vault: false,
            balance: TON,
        }
    }
}

/// Complete node configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeConfig {
    pub workchain: i8,
    /// Step limit of one queue drain.
    pub max_transactions: usize,
    pub wallets: Vec<WalletSpec>,
    pub issuer: IssuerSection,
    pub manager: ManagerSection,
    /// Scenario to replay; the built-in demo runs when absent.
    pub scenario_path: Option<PathBuf>,
}

impl Default for NodeConfig {
    fn default() -> Self {
        let wallet = |label: &str| WalletSpec {
            label: label.to_string(),
            balance: 100 * TON,
        };
        Self {
            workchain: 0,
            max_transactions: 10_000,
            wallets: vec![wallet("admin"), wallet("alice"), wallet("bob")],
            issuer: IssuerSection::default(),
            manager: ManagerSection::default(),
            scenario_path: None,
        }
    }
}

impl NodeConfig {
    /// Loads `path` when given, otherwise the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Applies `JV_*` overrides from the process environment.
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides from an arbitrary variable source.
    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(value) = lookup("JV_WORKCHAIN") {
            self.workchain = value.parse().map_err(|_| ConfigError::InvalidEnv {
                var: "JV_WORKCHAIN",
                value,
            })?;
        }
        if let Some(value) = lookup("JV_MAX_TRANSACTIONS") {
            self.max_transactions = value
                .parse()
                .ok()
                .filter(|limit| *limit > 0)
                .ok_or(ConfigError::InvalidEnv {
                    var: "JV_MAX_TRANSACTIONS",
                    value,
                })?;
        }
        if let Some(value) = lookup("JV_MANAGER_SEED_HEX") {
            self.manager.seed_hex = Some(value);
        }
        if let Some(value) = lookup("JV_SCENARIO") {
            self.scenario_path = Some(PathBuf::from(value));
        }
        Ok(())
    }
}
