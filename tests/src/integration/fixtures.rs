//! Shared test world: runtime, Issuer, Manager and three funded wallets.

use jv_01_holder::prelude::{HolderApi, HolderClient, HolderFees};
use jv_02_issuer::prelude::*;
use jv_03_manager::prelude::{ManagerClient, ManagerConfig};
use shared_cell::{Address, Cell};
use shared_crypto::Ed25519KeyPair;
use shared_runtime::prelude::*;
use std::sync::Arc;

pub const TON: Coins = 1_000_000_000;
pub const VALUE: Coins = 100_000_000;
pub const FORWARD: Coins = 20_000_000;

pub const MANAGER_SEED: [u8; 32] = [0x11; 32];

pub struct World {
    pub runtime: Runtime,
    pub log: Arc<InMemoryEventLog>,
    pub admin: Address,
    pub alice: Address,
    pub bob: Address,
    pub mallory: Address,
    pub issuer: IssuerClient,
    pub manager: ManagerClient,
    pub manager_key: Ed25519KeyPair,
    pub holder_code: Arc<Cell>,
}

impl World {
    pub fn new() -> Self {
        let mut registry = ContractRegistry::new();
        let holder_code = jv_01_holder::register(&mut registry, HolderFees::DEFAULT).unwrap();
        jv_02_issuer::register(&mut registry).unwrap();
        jv_03_manager::register(&mut registry).unwrap();

        let log = Arc::new(InMemoryEventLog::new());
        let mut runtime =
            Runtime::new(RuntimeConfig::default(), registry).with_event_sink(log.clone());
        let admin = runtime.create_wallet("admin", 100 * TON);
        let alice = runtime.create_wallet("alice", 100 * TON);
        let bob = runtime.create_wallet("bob", 100 * TON);
        let mallory = runtime.create_wallet("mallory", 100 * TON);

        let config = IssuerConfig::new(admin, "https://example.com/vault.json");
        let issuer = IssuerClient::new(
            jv_02_issuer::deploy(&mut runtime, &config, holder_code.clone(), TON).unwrap(),
        );

        let manager_key = Ed25519KeyPair::from_seed(MANAGER_SEED);
        let manager_config = ManagerConfig {
            admin_pubkey: manager_key.public_key().to_hex(),
            s_token: Address::new(0, [0xA1; 32]),
            y_token: Address::new(0, [0xA2; 32]),
            treasury: Address::new(0, [0xA3; 32]),
            is_vault: false,
        };
        let manager =
            ManagerClient::new(jv_03_manager::deploy(&mut runtime, &manager_config, TON).unwrap());

        Self {
            runtime,
            log,
            admin,
            alice,
            bob,
            mallory,
            issuer,
            manager,
            manager_key,
            holder_code,
        }
    }

    pub fn holder(&self, owner: &Address) -> HolderClient {
        HolderClient::for_owner(owner, &self.issuer.address, &self.holder_code, 0).unwrap()
    }

    pub fn balance_of(&self, owner: &Address) -> Coins {
        self.holder(owner).balance(&self.runtime).unwrap()
    }

    pub fn supply(&self) -> Coins {
        self.issuer.jetton_data(&self.runtime).unwrap().total_supply
    }

    pub fn mint(&mut self, to: Address, amount: Coins) -> Vec<Transaction> {
        let admin = self.admin;
        self.issuer
            .mint(&mut self.runtime, admin, to, amount, FORWARD, VALUE)
            .unwrap()
    }

    pub fn admin_send(&mut self, message: &IssuerMessage) -> Vec<Transaction> {
        let admin = self.admin;
        self.issuer
            .send(&mut self.runtime, admin, VALUE, message)
            .unwrap()
    }

    /// Sum of balances over every active Holder bound to this Issuer.
    pub fn holder_balance_sum(&self) -> Coins {
        let holder_hash = self.holder_code.hash();
        self.runtime
            .accounts()
            .filter(|account| account.is_active())
            .filter(|account| account.code().is_some_and(|code| code.hash() == holder_hash))
            .map(|account| {
                let data = HolderClient::new(account.address)
                    .wallet_data(&self.runtime)
                    .unwrap();
                assert_eq!(data.issuer, self.issuer.address);
                data.balance
            })
            .sum()
    }
}
