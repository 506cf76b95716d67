//! # Jetton Node
//!
//! Owns the runtime, the genesis accounts and the harness wallets, and
//! turns scenario steps into client calls.
//!
//! ## Genesis
//!
//! 1. Register Holder, Issuer and Manager logic
//! 2. Create the configured wallets (and the admin wallet if missing)
//! 3. Deploy the Issuer with the admin wallet as admin
//! 4. Deploy the Manager with the configured signing key

use crate::config::NodeConfig;
use crate::scenario::{Step, DEFAULT_VALUE};
use jv_01_holder::domain::{forward_payload, BurnRequest, HolderFees, TransferRequest};
use jv_01_holder::prelude::{HolderApi, HolderClient};
use jv_02_issuer::prelude::{IssuerApi, IssuerClient, IssuerConfig, IssuerMessage};
use jv_03_manager::prelude::{
    ManagerApi, ManagerClient, ManagerConfig, ManagerRequest, ManagerSettings, TokenUpdate,
};
use serde::Serialize;
use shared_cell::{Address, Cell, CellError};
use shared_crypto::{CryptoError, Ed25519KeyPair};
use shared_runtime::adapters::{BroadcastEventBus, ContractRegistry};
use shared_runtime::domain::{Coins, Transaction};
use shared_runtime::errors::{ClientError, RuntimeError};
use shared_runtime::ports::RuntimeApi;
use shared_runtime::service::{Runtime, RuntimeConfig};
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, instrument, warn};

/// Node-level failures. Contract failures are reported on the step instead.
#[derive(Debug, Error)]
pub enum NodeError {
    #[error("unknown actor {0:?}: not a wallet label or raw address")]
    UnknownActor(String),

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Runtime(#[from] RuntimeError),

    #[error("cell error: {0}")]
    Cell(#[from] CellError),

    #[error("manager key: {0}")]
    Crypto(#[from] CryptoError),
}

/// Outcome of one scenario step.
#[derive(Debug, Clone, Serialize)]
pub struct StepReport {
    pub action: &'static str,
    /// The first transaction (the one the step's message started) succeeded.
    pub success: bool,
    pub exit_code: i32,
    pub transactions: Vec<Transaction>,
}

/// Supply and balances after a run.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub issuer: Address,
    pub total_supply: Coins,
    pub last_sync_supply: Coins,
    pub price: i32,
    /// Holder balance per wallet label.
    pub balances: BTreeMap<String, Coins>,
    pub manager: Address,
    pub s_token: Address,
    pub y_token: Address,
    pub treasury: Address,
    pub is_vault: bool,
    pub admin_pubkey: String,
}

/// Runtime plus genesis accounts.
pub struct JettonNode {
    runtime: Runtime,
    bus: Arc<BroadcastEventBus>,
    wallets: BTreeMap<String, Address>,
    admin: Address,
    holder_code: Arc<Cell>,
    issuer: IssuerClient,
    manager: ManagerClient,
    manager_key: Ed25519KeyPair,
    next_query_id: u64,
}

impl JettonNode {
    /// Builds the runtime and deploys the genesis accounts.
    #[instrument(skip_all, fields(workchain = config.workchain))]
    pub fn genesis(config: &NodeConfig) -> Result<Self, NodeError> {
        let mut registry = ContractRegistry::new();
        let holder_code = jv_01_holder::register(&mut registry, HolderFees::DEFAULT)?;
        jv_02_issuer::register(&mut registry)?;
        jv_03_manager::register(&mut registry)?;

        let bus = Arc::new(BroadcastEventBus::new());
        let runtime_config = RuntimeConfig {
            workchain: config.workchain,
            max_transactions_per_run: config.max_transactions,
        };
        let mut runtime = Runtime::new(runtime_config, registry).with_event_sink(bus.clone());

        let mut wallets = BTreeMap::new();
        for spec in &config.wallets {
            let address = runtime.create_wallet(&spec.label, spec.balance);
            wallets.insert(spec.label.clone(), address);
        }
        let admin = match wallets.get(&config.issuer.admin) {
            Some(address) => *address,
            None => {
                let address = runtime.create_wallet(&config.issuer.admin, 100 * DEFAULT_VALUE);
                wallets.insert(config.issuer.admin.clone(), address);
                address
            }
        };

        let mut issuer_config = IssuerConfig::new(admin, config.issuer.content_uri.clone());
        issuer_config.price = config.issuer.price;
        let issuer = IssuerClient::new(jv_02_issuer::deploy(
            &mut runtime,
            &issuer_config,
            holder_code.clone(),
            config.issuer.balance,
        )?);

        let manager_key = match &config.manager.seed_hex {
            Some(seed) => Ed25519KeyPair::from_seed_hex(seed)?,
            None => {
                warn!("No manager seed configured, using a random signing key");
                Ed25519KeyPair::generate()
            }
        };
        let manager_config = ManagerConfig {
            admin_pubkey: manager_key.public_key().to_hex(),
            s_token: config.manager.s_token,
            y_token: config.manager.y_token,
            treasury: config.manager.treasury,
            is_vault: config.manager.is_vault,
        };
        let manager = ManagerClient::new(jv_03_manager::deploy(
            &mut runtime,
            &manager_config,
            config.manager.balance,
        )?);

        info!(
            issuer = %issuer.address,
            manager = %manager.address,
            admin = %admin,
            wallets = wallets.len(),
            "Genesis complete"
        );

        Ok(Self {
            runtime,
            bus,
            wallets,
            admin,
            holder_code,
            issuer,
            manager,
            manager_key,
            next_query_id: 1,
        })
    }

    #[must_use]
    pub fn bus(&self) -> Arc<BroadcastEventBus> {
        self.bus.clone()
    }

    #[must_use]
    pub fn runtime(&self) -> &Runtime {
        &self.runtime
    }

    #[must_use]
    pub fn issuer(&self) -> IssuerClient {
        self.issuer
    }

    #[must_use]
    pub fn manager(&self) -> ManagerClient {
        self.manager
    }

    /// Wallet label or raw address text.
    pub fn resolve(&self, actor: &str) -> Result<Address, NodeError> {
        if let Some(address) = self.wallets.get(actor) {
            return Ok(*address);
        }
        actor
            .parse()
            .map_err(|_| NodeError::UnknownActor(actor.to_string()))
    }

    fn holder(&self, owner: &Address) -> Result<HolderClient, NodeError> {
        Ok(HolderClient::for_owner(
            owner,
            &self.issuer.address,
            &self.holder_code,
            self.runtime.workchain(),
        )?)
    }

    fn query_id(&mut self) -> u64 {
        let id = self.next_query_id;
        self.next_query_id += 1;
        id
    }

    fn admin_send(
        &mut self,
        value: Coins,
        message: &IssuerMessage,
    ) -> Result<Vec<Transaction>, NodeError> {
        let admin = self.admin;
        Ok(self.issuer.send(&mut self.runtime, admin, value, message)?)
    }

    fn manager_submit(
        &mut self,
        relayer: &str,
        request: ManagerRequest,
    ) -> Result<Vec<Transaction>, NodeError> {
        let relayer = self.resolve(relayer)?;
        let query_id = self.query_id();
        Ok(self.manager.submit(
            &mut self.runtime,
            relayer,
            DEFAULT_VALUE,
            &self.manager_key,
            query_id,
            request,
        )?)
    }

    /// Executes one step and drains the queue.
    #[instrument(skip_all, fields(action = step.action()))]
    pub fn apply(&mut self, step: &Step) -> Result<StepReport, NodeError> {
        let _timer = jv_telemetry::time_histogram!(jv_telemetry::STEP_DURATION);
        let query_id = self.query_id();
        let transactions = match step {
            Step::Mint {
                to,
                amount,
                forward_value,
                value,
            } => {
                let to = self.resolve(to)?;
                let admin = self.admin;
                self.issuer.mint(
                    &mut self.runtime,
                    admin,
                    to,
                    *amount,
                    *forward_value,
                    *value,
                )?
            }
            Step::Transfer {
                from,
                to,
                amount,
                forward_amount,
                value,
            } => {
                let from = self.resolve(from)?;
                let request = TransferRequest {
                    query_id,
                    amount: *amount,
                    destination: self.resolve(to)?,
                    response: Some(from),
                    forward_amount: *forward_amount,
                    forward_payload: forward_payload(None)?,
                };
                self.holder(&from)?
                    .transfer(&mut self.runtime, from, *value, &request)?
            }
            Step::Burn {
                from,
                amount,
                value,
            } => {
                let from = self.resolve(from)?;
                let request = BurnRequest {
                    query_id,
                    amount: *amount,
                    response: Some(from),
                };
                self.holder(&from)?
                    .burn(&mut self.runtime, from, *value, &request)?
            }
            Step::Deposit {
                receiver,
                amount,
                value,
            } => {
                let message = IssuerMessage::Deposit {
                    query_id,
                    backing: self.admin,
                    amount: *amount,
                    receiver: self.resolve(receiver)?,
                };
                self.admin_send(*value, &message)?
            }
            Step::Withdraw {
                owner,
                receiver,
                shares,
                value,
            } => {
                let message = IssuerMessage::Withdraw {
                    query_id,
                    shares: *shares,
                    receiver: self.resolve(receiver)?,
                    owner: self.resolve(owner)?,
                };
                self.admin_send(*value, &message)?
            }
            Step::SetPrice { price } => self.admin_send(
                DEFAULT_VALUE,
                &IssuerMessage::SetPrice {
                    query_id,
                    price: *price,
                },
            )?,
            Step::SetBlacklisted { address, flag } => {
                let message = IssuerMessage::SetBlacklisted {
                    query_id,
                    address: self.resolve(address)?,
                    flag: *flag,
                };
                self.admin_send(DEFAULT_VALUE, &message)?
            }
            Step::SetBackingToken { address } => {
                let message = IssuerMessage::SetBackingToken {
                    query_id,
                    address: self.resolve(address)?,
                };
                self.admin_send(DEFAULT_VALUE, &message)?
            }
            Step::SyncJetton => {
                self.admin_send(DEFAULT_VALUE, &IssuerMessage::SyncJetton { query_id })?
            }
            Step::ChangeAdmin { new_admin } => {
                let new_admin = self.resolve(new_admin)?;
                let transactions = self.admin_send(
                    DEFAULT_VALUE,
                    &IssuerMessage::ChangeAdmin {
                        query_id,
                        new_admin,
                    },
                )?;
                if transactions.first().is_some_and(|tx| tx.success) {
                    self.admin = new_admin;
                }
                transactions
            }
            Step::Rescue { to, amount } => {
                let message = IssuerMessage::Rescue {
                    query_id,
                    to: self.resolve(to)?,
                    amount: *amount,
                };
                self.admin_send(DEFAULT_VALUE, &message)?
            }
            Step::ManagerSetTokens {
                relayer,
                s_token,
                y_token,
                treasury,
                is_vault,
            } => {
                let update = TokenUpdate {
                    s_token: self.resolve(s_token)?,
                    y_token: self.resolve(y_token)?,
                    treasury: treasury.as_deref().map(|t| self.resolve(t)).transpose()?,
                    is_vault: *is_vault,
                };
                self.manager_submit(relayer, ManagerRequest::SetTokens(update))?
            }
            Step::ManagerSetTreasury { relayer, treasury } => {
                let treasury = self.resolve(treasury)?;
                self.manager_submit(relayer, ManagerRequest::SetTreasury { treasury })?
            }
            Step::ManagerDeposit { relayer, amount } => {
                self.manager_submit(relayer, ManagerRequest::Deposit { amount: *amount })?
            }
            Step::ManagerWithdraw { relayer, amount } => {
                self.manager_submit(relayer, ManagerRequest::Withdraw { amount: *amount })?
            }
            Step::ManagerSetAsset {
                relayer,
                asset,
                enabled,
            } => {
                let asset = self.resolve(asset)?;
                self.manager_submit(
                    relayer,
                    ManagerRequest::SetAsset {
                        asset,
                        enabled: *enabled,
                    },
                )?
            }
        };

        let (success, exit_code) = transactions
            .first()
            .map_or((false, 0), |tx| (tx.success, tx.exit_code.code()));
        jv_telemetry::record_step(step.action(), success);
        if success {
            info!(transactions = transactions.len(), "Step applied");
        } else {
            warn!(exit_code, "Step failed");
        }
        Ok(StepReport {
            action: step.action(),
            success,
            exit_code,
            transactions,
        })
    }

    /// Reads supply, per-wallet balances and Manager settings.
    pub fn snapshot(&self) -> Result<Snapshot, NodeError> {
        let data = self.issuer.jetton_data(&self.runtime)?;
        let mut balances = BTreeMap::new();
        for (label, owner) in &self.wallets {
            balances.insert(label.clone(), self.holder(owner)?.balance(&self.runtime)?);
        }
        let ManagerSettings {
            s_token,
            y_token,
            treasury,
            is_vault,
            admin_pubkey,
        } = self.manager.settings(&self.runtime)?;
        Ok(Snapshot {
            issuer: self.issuer.address,
            total_supply: data.total_supply,
            last_sync_supply: self.issuer.last_sync_supply(&self.runtime)?,
            price: self.issuer.price(&self.runtime)?,
            balances,
            manager: self.manager.address,
            s_token,
            y_token,
            treasury,
            is_vault,
            admin_pubkey: hex::encode(admin_pubkey),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::Scenario;

    fn node() -> JettonNode {
        let mut config = NodeConfig::default();
        config.manager.seed_hex = Some("07".repeat(32));
        JettonNode::genesis(&config).unwrap()
    }

    #[test]
    fn test_genesis_deploys_both_accounts() {
        let node = node();
        let snapshot = node.snapshot().unwrap();
        assert_eq!(snapshot.total_supply, 0);
        assert_eq!(snapshot.price, 1);
        assert!(snapshot.balances.values().all(|b| *b == 0));
        let key = Ed25519KeyPair::from_seed_hex(&"07".repeat(32)).unwrap();
        assert_eq!(snapshot.admin_pubkey, key.public_key().to_hex());
    }

    #[test]
    fn test_demo_scenario() {
        let mut node = node();
        let reports: Vec<StepReport> = Scenario::demo()
            .steps
            .iter()
            .map(|step| node.apply(step).unwrap())
            .collect();

        let outcomes: Vec<(&str, bool)> = reports.iter().map(|r| (r.action, r.success)).collect();
        assert_eq!(
            outcomes,
            vec![
                ("mint", true),
                ("transfer", true),
                ("set_blacklisted", true),
                ("mint", false),
                ("set_blacklisted", true),
                ("withdraw", true),
                ("sync_jetton", true),
                ("manager_set_asset", true),
            ]
        );
        assert_eq!(reports[3].exit_code, 76);

        let snapshot = node.snapshot().unwrap();
        assert_eq!(snapshot.total_supply, 50);
        assert_eq!(snapshot.last_sync_supply, 50);
        assert_eq!(snapshot.balances["alice"], 10);
        assert_eq!(snapshot.balances["bob"], 40);
        let alice = node.resolve("alice").unwrap();
        assert!(node
            .manager()
            .is_asset_enabled(node.runtime(), &alice)
            .unwrap());
    }

    #[test]
    fn test_resolve_raw_address() {
        let node = node();
        let raw = format!("0:{}", "ab".repeat(32));
        assert_eq!(node.resolve(&raw).unwrap(), Address::new(0, [0xAB; 32]));
        assert!(matches!(
            node.resolve("carol"),
            Err(NodeError::UnknownActor(_))
        ));
    }
}
