//! # Scenarios
//!
//! A scenario is a JSON list of steps. Actors are wallet labels from the
//! node configuration or raw `workchain:hex` addresses.
//!
//! ```json
//! { "steps": [
//!     { "action": "mint", "to": "alice", "amount": 100 },
//!     { "action": "transfer", "from": "alice", "to": "bob", "amount": 40 },
//!     { "action": "manager_set_asset", "relayer": "bob", "asset": "alice", "enabled": true }
//! ] }
//! ```

use serde::{Deserialize, Serialize};
use shared_runtime::domain::Coins;
use std::path::Path;

/// Native value attached when a step leaves it out.
pub const DEFAULT_VALUE: Coins = 100_000_000;
/// Native value forwarded with each mint when a step leaves it out.
pub const DEFAULT_FORWARD_VALUE: Coins = 20_000_000;

fn default_value() -> Coins {
    DEFAULT_VALUE
}

fn default_forward_value() -> Coins {
    DEFAULT_FORWARD_VALUE
}

/// One externally initiated action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    /// Admin mints `amount` to `to`.
    Mint {
        to: String,
        amount: Coins,
        #[serde(default = "default_forward_value")]
        forward_value: Coins,
        #[serde(default = "default_value")]
        value: Coins,
    },
    /// Holder transfer between two owners.
    Transfer {
        from: String,
        to: String,
        amount: Coins,
        #[serde(default)]
        forward_amount: Coins,
        #[serde(default = "default_value")]
        value: Coins,
    },
    Burn {
        from: String,
        amount: Coins,
        #[serde(default = "default_value")]
        value: Coins,
    },
    Deposit {
        receiver: String,
        amount: Coins,
        #[serde(default = "default_value")]
        value: Coins,
    },
    Withdraw {
        owner: String,
        receiver: String,
        shares: Coins,
        #[serde(default = "default_value")]
        value: Coins,
    },
    SetPrice {
        price: i32,
    },
    SetBlacklisted {
        address: String,
        flag: bool,
    },
    SetBackingToken {
        address: String,
    },
    SyncJetton,
    ChangeAdmin {
        new_admin: String,
    },
    Rescue {
        to: String,
        amount: Coins,
    },
    ManagerSetTokens {
        relayer: String,
        s_token: String,
        y_token: String,
        treasury: Option<String>,
        is_vault: bool,
    },
    ManagerSetTreasury {
        relayer: String,
        treasury: String,
    },
    ManagerDeposit {
        relayer: String,
        amount: u32,
    },
    ManagerWithdraw {
        relayer: String,
        amount: u32,
    },
    ManagerSetAsset {
        relayer: String,
        asset: String,
        enabled: bool,
    },
}

impl Step {
    /// Metric and log label.
    #[must_use]
    pub fn action(&self) -> &'static str {
        match self {
            Self::Mint { .. } => "mint",
            Self::Transfer { .. } => "transfer",
            Self::Burn { .. } => "burn",
            Self::Deposit { .. } => "deposit",
            Self::Withdraw { .. } => "withdraw",
            Self::SetPrice { .. } => "set_price",
            Self::SetBlacklisted { .. } => "set_blacklisted",
            Self::SetBackingToken { .. } => "set_backing_token",
            Self::SyncJetton => "sync_jetton",
            Self::ChangeAdmin { .. } => "change_admin",
            Self::Rescue { .. } => "rescue",
            Self::ManagerSetTokens { .. } => "manager_set_tokens",
            Self::ManagerSetTreasury { .. } => "manager_set_treasury",
            Self::ManagerDeposit { .. } => "manager_deposit",
            Self::ManagerWithdraw { .. } => "manager_withdraw",
            Self::ManagerSetAsset { .. } => "manager_set_asset",
        }
    }
}

/// Ordered list of steps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub steps: Vec<Step>,
}

impl Scenario {
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(Self::from_json(&text)?)
    }

    /// Mint, transfer, a refused mint to a blacklisted owner and a signed
    /// Manager update.
    #[must_use]
    pub fn demo() -> Self {
        let mint = |to: &str, amount| Step::Mint {
            to: to.into(),
            amount,
            forward_value: DEFAULT_FORWARD_VALUE,
            value: DEFAULT_VALUE,
        };
        Self {
            steps: vec![
                mint("alice", 100),
                Step::Transfer {
                    from: "alice".into(),
                    to: "bob".into(),
                    amount: 40,
                    forward_amount: 0,
                    value: DEFAULT_VALUE,
                },
                Step::SetBlacklisted {
                    address: "bob".into(),
                    flag: true,
                },
                mint("bob", 10),
                Step::SetBlacklisted {
                    address: "bob".into(),
                    flag: false,
                },
                Step::Withdraw {
                    owner: "alice".into(),
                    receiver: "alice".into(),
                    shares: 50,
                    value: DEFAULT_VALUE,
                },
                Step::SyncJetton,
                Step::ManagerSetAsset {
                    relayer: "bob".into(),
                    asset: "alice".into(),
                    enabled: true,
                },
            ],
        }
    }
}
