//! # Runtime Service
//!
//! Deterministic, single-threaded message delivery.
//!
//! ## Transaction Phases
//!
//! 1. **Credit**: the inbound value is added to the destination balance
//! 2. **Deploy**: an `Uninit` account whose address matches the attached
//!    `StateInit` becomes `Active`
//! 3. **Compute**: the contract handler runs on the committed data
//! 4. **Action**: outbound sends are funded according to their send mode
//!
//! A failure in compute or action discards every effect of the message.
//! If the message was bounceable (and not itself a bounce) its value goes
//! back to the sender in a bounced message; otherwise the value stays.
//!
//! ## Ordering
//!
//! Messages are queued in creation order, which is also logical-time order.
//! Messages between a fixed pair of accounts are therefore delivered in the
//! order they were sent.

use crate::adapters::{ContractRegistry, NoopEventSink};
use crate::domain::{
    bounce_body, check_value_conservation, peek_op, resolve_send_value, wallet_address, Account,
    AccountStatus, Coins, ExitCode, GetMethodContext, InternalMessage, LogicalTime,
    MessageContext, MessageSummary, OutAction, OutboundMessage, SendMode, SendValue, StackValue,
    StateInit, Transaction,
};
use crate::errors::{RuntimeError, RuntimeResult};
use crate::events::RuntimeEvent;
use crate::metrics;
use crate::ports::{EventSink, RuntimeApi};
use serde::{Deserialize, Serialize};
use shared_cell::{Address, Cell};
use std::collections::{BTreeMap, VecDeque};
use std::sync::Arc;
use tracing::{debug, info, instrument};

// =============================================================================
// CONFIGURATION
// =============================================================================

/// Runtime configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Workchain for wallets and derived addresses.
    pub workchain: i8,
    /// Upper bound on transactions per `run_until_idle` drain.
    pub max_transactions_per_run: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            workchain: 0,
            max_transactions_per_run: 10_000,
        }
    }
}

// =============================================================================
// RUNTIME
// =============================================================================

/// Result of a successful compute and action phase.
struct Plan {
    data: Option<Arc<Cell>>,
    balance: Coins,
    sends: Vec<OutboundMessage>,
}

/// The message-driven account runtime.
pub struct Runtime {
    config: RuntimeConfig,
    registry: ContractRegistry,
    accounts: BTreeMap<Address, Account>,
    queue: VecDeque<InternalMessage>,
    lt: LogicalTime,
    issued: Coins,
    sink: Arc<dyn EventSink>,
}

impl Runtime {
    /// Creates an empty runtime.
    #[must_use]
    pub fn new(config: RuntimeConfig, registry: ContractRegistry) -> Self {
        Self {
            config,
            registry,
            accounts: BTreeMap::new(),
            queue: VecDeque::new(),
            lt: 0,
            issued: 0,
            sink: Arc::new(NoopEventSink),
        }
    }

    /// Routes events to `sink` instead of dropping them.
    #[must_use]
    pub fn with_event_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = sink;
        self
    }

    #[must_use]
    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    #[must_use]
    pub fn registry(&self) -> &ContractRegistry {
        &self.registry
    }

    /// Messages waiting for delivery.
    #[must_use]
    pub fn pending_messages(&self) -> usize {
        self.queue.len()
    }

    /// Current logical time.
    #[must_use]
    pub fn logical_time(&self) -> LogicalTime {
        self.lt
    }

    /// Committed data of an active account.
    #[must_use]
    pub fn account_data(&self, address: &Address) -> Option<Arc<Cell>> {
        self.accounts.get(address).and_then(|a| a.data().cloned())
    }

    /// Every account touched so far.
    pub fn accounts(&self) -> impl Iterator<Item = &Account> {
        self.accounts.values()
    }

    /// Verifies that balances plus queued value equal all value ever issued.
    pub fn check_value_conservation(&self) -> RuntimeResult<()> {
        check_value_conservation(
            self.issued,
            self.accounts.values().map(|a| a.balance),
            self.queue.iter().map(|m| m.value),
        )?;
        Ok(())
    }

    fn next_lt(&mut self) -> LogicalTime {
        self.lt += 1;
        self.lt
    }

    fn enqueue(&mut self, src: Address, message: OutboundMessage) -> MessageSummary {
        let created_lt = self.next_lt();
        let summary = MessageSummary {
            dest: message.to,
            value: message.value,
            op: peek_op(&message.body),
            bounce: message.bounce,
            bounced: false,
        };
        self.queue.push_back(InternalMessage {
            src,
            dest: message.to,
            value: message.value,
            bounce: message.bounce,
            bounced: false,
            body: message.body,
            state_init: message.state_init,
            created_lt,
        });
        summary
    }

    fn enqueue_bounce(&mut self, original: &InternalMessage) -> RuntimeResult<MessageSummary> {
        let body = Arc::new(bounce_body(&original.body)?);
        let created_lt = self.next_lt();
        let summary = MessageSummary {
            dest: original.src,
            value: original.value,
            op: peek_op(&body),
            bounce: false,
            bounced: true,
        };
        self.queue.push_back(InternalMessage {
            src: original.dest,
            dest: original.src,
            value: original.value,
            bounce: false,
            bounced: true,
            body,
            state_init: None,
            created_lt,
        });
        Ok(summary)
    }

    /// Returns the `StateInit` to deploy if it matches `address` and its code is known.
    fn deployable(&self, msg: &InternalMessage) -> RuntimeResult<Option<StateInit>> {
        let Some(init) = &msg.state_init else {
            return Ok(None);
        };
        if init.address(msg.dest.workchain)? != msg.dest {
            debug!(dest = %msg.dest, "StateInit does not match destination");
            return Ok(None);
        }
        if !self.registry.contains(&init.code.hash()) {
            debug!(dest = %msg.dest, "StateInit code is not registered");
            return Ok(None);
        }
        Ok(Some(init.clone()))
    }

    /// Compute and action phases. The outer error is a harness failure, the
    /// inner one a contract exit code.
    fn compute_and_act(
        &self,
        msg: &InternalMessage,
        account: &Account,
        code: &Arc<Cell>,
        data: &Cell,
        lt: LogicalTime,
    ) -> RuntimeResult<Result<Plan, ExitCode>> {
        let code_hash = code.hash();
        let logic = self
            .registry
            .resolve(&code_hash)
            .ok_or(RuntimeError::UnknownCode(code_hash))?;

        let ctx = MessageContext {
            self_address: msg.dest,
            sender: msg.src,
            value: msg.value,
            balance: account.balance,
            body: msg.body.clone(),
            bounced: msg.bounced,
            lt,
            code: code.clone(),
        };

        let outcome = match logic.on_internal(&ctx, data) {
            Ok(outcome) => outcome,
            Err(exit_code) => {
                debug!(contract = logic.name(), exit_code = exit_code.code(), "Compute phase failed");
                return Ok(Err(exit_code));
            }
        };

        let mut balance = account.balance;
        let mut remaining_inbound = msg.value;
        let mut sends = Vec::with_capacity(outcome.actions.len());
        for action in outcome.actions {
            let OutAction::SendMessage { message, mode } = action;
            match resolve_send_value(message.value, mode, balance, remaining_inbound) {
                SendValue::Send(value) => {
                    balance -= value;
                    if mode.contains(SendMode::CARRY_REMAINING_VALUE) {
                        remaining_inbound = 0;
                    }
                    sends.push(OutboundMessage { value, ..message });
                }
                SendValue::Skip => {
                    debug!(to = %message.to, mode = mode.0, "Send skipped, insufficient balance");
                }
                SendValue::Insufficient { needed } => {
                    debug!(to = %message.to, needed, balance, "Action phase failed");
                    return Ok(Err(ExitCode::NOT_ENOUGH_VALUE));
                }
            }
        }

        Ok(Ok(Plan {
            data: Some(outcome.data),
            balance,
            sends,
        }))
    }

    /// Processes one inbound message to completion.
    fn execute(&mut self, msg: InternalMessage) -> RuntimeResult<Transaction> {
        let lt = self.next_lt();
        let dest = msg.dest;
        let snapshot = self
            .accounts
            .get(&dest)
            .cloned()
            .unwrap_or_else(|| Account::uninit(dest));

        // Credit
        let mut account = snapshot.clone();
        account.last_lt = lt;
        account.balance = account.balance.saturating_add(msg.value);

        // Deploy
        let mut deployed = false;
        if account.status == AccountStatus::Uninit {
            if let Some(init) = self.deployable(&msg)? {
                account.status = AccountStatus::Active {
                    code: init.code,
                    data: init.data,
                };
                deployed = true;
            }
        }

        // Compute + action
        let result = match &account.status {
            AccountStatus::Wallet => Ok(Plan {
                data: None,
                balance: account.balance,
                sends: Vec::new(),
            }),
            AccountStatus::Uninit => {
                if msg.bounce && !msg.bounced {
                    Err(ExitCode::ACCOUNT_NOT_ACTIVE)
                } else {
                    Ok(Plan {
                        data: None,
                        balance: account.balance,
                        sends: Vec::new(),
                    })
                }
            }
            AccountStatus::Active { code, data } => {
                let (code, data) = (code.clone(), data.clone());
                self.compute_and_act(&msg, &account, &code, &data, lt)?
            }
        };

        let (success, exit_code, out_messages) = match result {
            Ok(plan) => {
                if let (Some(new_data), AccountStatus::Active { data, .. }) =
                    (plan.data, &mut account.status)
                {
                    *data = new_data;
                }
                account.balance = plan.balance;
                self.accounts.insert(dest, account);
                let summaries: Vec<MessageSummary> = plan
                    .sends
                    .into_iter()
                    .map(|send| self.enqueue(dest, send))
                    .collect();
                (true, ExitCode::SUCCESS, summaries)
            }
            Err(exit_code) => {
                deployed = false;
                let mut restored = snapshot;
                restored.last_lt = lt;
                let mut summaries = Vec::new();
                if msg.bounce && !msg.bounced {
                    summaries.push(self.enqueue_bounce(&msg)?);
                    metrics::record_bounce();
                    self.sink.publish(&RuntimeEvent::MessageBounced {
                        from: dest,
                        to: msg.src,
                        value: msg.value,
                        lt,
                    });
                } else {
                    restored.balance = restored.balance.saturating_add(msg.value);
                }
                self.accounts.insert(dest, restored);
                (false, exit_code, summaries)
            }
        };

        let tx = Transaction {
            lt,
            account: dest,
            source: msg.src,
            op: peek_op(&msg.body),
            value: msg.value,
            inbound_bounced: msg.bounced,
            success,
            exit_code,
            deployed,
            out_messages,
        };

        debug!(
            lt,
            account = %dest,
            op = ?tx.op.map(|op| format!("{op:#010x}")),
            success,
            exit_code = exit_code.code(),
            out = tx.out_messages.len(),
            "Transaction executed"
        );

        if deployed {
            let contract = self
                .accounts
                .get(&dest)
                .and_then(|a| a.code())
                .and_then(|code| self.registry.resolve(&code.hash()))
                .map_or("unknown", |logic| logic.name());
            info!(address = %dest, contract, "Account deployed");
            metrics::record_deploy();
            self.sink.publish(&RuntimeEvent::AccountDeployed {
                address: dest,
                contract: contract.to_string(),
                lt,
            });
        }

        metrics::record_transaction(success, exit_code.code());
        self.sink
            .publish(&RuntimeEvent::TransactionExecuted(tx.clone()));
        Ok(tx)
    }
}

impl RuntimeApi for Runtime {
    fn workchain(&self) -> i8 {
        self.config.workchain
    }

    #[instrument(skip(self))]
    fn create_wallet(&mut self, label: &str, balance: Coins) -> Address {
        let address = wallet_address(self.config.workchain, label);
        let account = self
            .accounts
            .entry(address)
            .or_insert_with(|| Account::uninit(address));
        if account.status == AccountStatus::Uninit {
            account.status = AccountStatus::Wallet;
        }
        account.balance = account.balance.saturating_add(balance);
        self.issued = self.issued.saturating_add(balance);
        debug!(%address, balance, "Wallet funded");
        address
    }

    #[instrument(skip(self, state_init))]
    fn deploy(&mut self, state_init: StateInit, balance: Coins) -> RuntimeResult<Address> {
        let address = state_init.address(self.config.workchain)?;
        let code_hash = state_init.code.hash();
        let logic = self
            .registry
            .resolve(&code_hash)
            .ok_or(RuntimeError::UnknownCode(code_hash))?;

        if let Some(existing) = self.accounts.get(&address) {
            if existing.status != AccountStatus::Uninit {
                return Err(RuntimeError::AccountExists(address));
            }
        }

        let lt = self.next_lt();
        let account = self
            .accounts
            .entry(address)
            .or_insert_with(|| Account::uninit(address));
        account.status = AccountStatus::Active {
            code: state_init.code,
            data: state_init.data,
        };
        account.balance = account.balance.saturating_add(balance);
        account.last_lt = lt;
        self.issued = self.issued.saturating_add(balance);

        info!(%address, contract = logic.name(), "Account deployed at genesis");
        metrics::record_deploy();
        self.sink.publish(&RuntimeEvent::AccountDeployed {
            address,
            contract: logic.name().to_string(),
            lt,
        });
        Ok(address)
    }

    #[instrument(skip(self, body, state_init))]
    fn send_internal(
        &mut self,
        from: Address,
        to: Address,
        value: Coins,
        body: Arc<Cell>,
        state_init: Option<StateInit>,
        bounce: bool,
    ) -> RuntimeResult<()> {
        let wallet = self
            .accounts
            .get_mut(&from)
            .filter(|a| a.status == AccountStatus::Wallet)
            .ok_or(RuntimeError::NotAWallet(from))?;
        if wallet.balance < value {
            return Err(RuntimeError::InsufficientBalance {
                address: from,
                balance: wallet.balance,
                needed: value,
            });
        }
        wallet.balance -= value;

        let mut message = OutboundMessage::new(to, value, body).with_bounce(bounce);
        message.state_init = state_init;
        self.enqueue(from, message);
        Ok(())
    }

    #[instrument(skip(self))]
    fn run_until_idle(&mut self) -> RuntimeResult<Vec<Transaction>> {
        let limit = self.config.max_transactions_per_run;
        let mut transactions = Vec::new();
        while let Some(msg) = self.queue.pop_front() {
            if transactions.len() >= limit {
                self.queue.push_front(msg);
                metrics::set_queue_depth(self.queue.len());
                return Err(RuntimeError::StepLimitExceeded { limit });
            }
            transactions.push(self.execute(msg)?);
        }
        metrics::set_queue_depth(0);
        debug!(count = transactions.len(), "Queue drained");
        Ok(transactions)
    }

    fn run_get_method(
        &self,
        address: &Address,
        method: &str,
        args: &[StackValue],
    ) -> RuntimeResult<Vec<StackValue>> {
        let account = self
            .accounts
            .get(address)
            .ok_or(RuntimeError::AccountNotActive(*address))?;
        let AccountStatus::Active { code, data } = &account.status else {
            return Err(RuntimeError::AccountNotActive(*address));
        };
        let code_hash = code.hash();
        let logic = self
            .registry
            .resolve(&code_hash)
            .ok_or(RuntimeError::UnknownCode(code_hash))?;
        let ctx = GetMethodContext {
            self_address: *address,
            balance: account.balance,
            code: code.clone(),
        };
        logic
            .get_method(&ctx, data, method, args)
            .map_err(|exit_code| RuntimeError::GetMethodFailed {
                method: method.to_string(),
                exit_code,
            })
    }

    fn account(&self, address: &Address) -> Option<Account> {
        self.accounts.get(address).cloned()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryEventLog;
    use crate::domain::{check_lt_monotonic, ContractOutcome, BOUNCE_PREFIX};
    use crate::ports::ContractLogic;

    const OP_INCREMENT: u32 = 1;
    const OP_FAIL: u32 = 2;
    const OP_FORWARD: u32 = 3;
    const OP_PING_SELF: u32 = 4;

    /// Counter contract: data is a single `uint64`.
    struct Counter;

    fn counter_data(value: u64) -> Arc<Cell> {
        let mut b = Cell::builder();
        b.store_uint(u128::from(value), 64).unwrap();
        b.build_ref()
    }

    fn counter_code() -> Arc<Cell> {
        let mut b = Cell::builder();
        b.store_bytes(b"counter").unwrap();
        b.build_ref()
    }

    impl ContractLogic for Counter {
        fn name(&self) -> &'static str {
            "counter"
        }

        fn on_internal(
            &self,
            ctx: &MessageContext,
            data: &Cell,
        ) -> Result<ContractOutcome, ExitCode> {
            let current = data.parse().load_u64()?;
            let mut body = ctx.body.parse();
            if body.remaining_bits() == 0 || ctx.bounced {
                return Ok(ContractOutcome::new(Arc::new(data.clone())));
            }
            match body.load_u32()? {
                OP_INCREMENT => Ok(ContractOutcome::new(counter_data(current + 1))),
                OP_FAIL => Err(ExitCode(100)),
                OP_FORWARD => {
                    let to = body.load_address()?;
                    let amount = body.load_coins()?;
                    let mode = SendMode(body.load_uint(8)? as u8);
                    Ok(ContractOutcome::new(counter_data(current + 1)).send(
                        OutboundMessage::new(to, amount, Arc::new(Cell::empty())),
                        mode,
                    ))
                }
                OP_PING_SELF => {
                    let mut b = Cell::builder();
                    b.store_uint(u128::from(OP_PING_SELF), 32)?;
                    Ok(ContractOutcome::new(counter_data(current)).send(
                        OutboundMessage::new(ctx.self_address, 0, b.build_ref()),
                        SendMode::CARRY_REMAINING_VALUE,
                    ))
                }
                _ => Err(ExitCode::UNKNOWN_OP),
            }
        }

        fn get_method(
            &self,
            _ctx: &GetMethodContext,
            data: &Cell,
            method: &str,
            _args: &[StackValue],
        ) -> Result<Vec<StackValue>, ExitCode> {
            match method {
                "counter" => Ok(vec![StackValue::Int(i128::from(data.parse().load_u64()?))]),
                _ => Err(ExitCode(11)),
            }
        }
    }

    fn op_body(op: u32) -> Arc<Cell> {
        let mut b = Cell::builder();
        b.store_uint(u128::from(op), 32).unwrap();
        b.build_ref()
    }

    fn forward_body(to: &Address, amount: Coins, mode: SendMode) -> Arc<Cell> {
        let mut b = Cell::builder();
        b.store_uint(u128::from(OP_FORWARD), 32)
            .unwrap()
            .store_address(to)
            .unwrap()
            .store_coins(amount)
            .unwrap()
            .store_uint(u128::from(mode.0), 8)
            .unwrap();
        b.build_ref()
    }

    fn setup() -> (Runtime, Arc<InMemoryEventLog>, Address, StateInit) {
        let mut registry = ContractRegistry::new();
        registry.register(&counter_code(), Arc::new(Counter));
        let log = Arc::new(InMemoryEventLog::new());
        let mut runtime =
            Runtime::new(RuntimeConfig::default(), registry).with_event_sink(log.clone());
        let alice = runtime.create_wallet("alice", 1_000);
        let init = StateInit::new(counter_code(), counter_data(0));
        (runtime, log, alice, init)
    }

    fn counter_value(runtime: &Runtime, address: &Address) -> i128 {
        runtime.run_get_method(address, "counter", &[]).unwrap()[0]
            .as_int()
            .unwrap()
    }

    #[test]
    fn test_wallet_to_wallet_transfer() {
        let (mut runtime, _, alice, _) = setup();
        let bob = runtime.create_wallet("bob", 0);
        runtime
            .send_internal(alice, bob, 300, Arc::new(Cell::empty()), None, true)
            .unwrap();
        let txs = runtime.run_until_idle().unwrap();
        assert_eq!(txs.len(), 1);
        assert!(txs[0].success);
        assert_eq!(runtime.balance(&alice), 700);
        assert_eq!(runtime.balance(&bob), 300);
        runtime.check_value_conservation().unwrap();
    }

    #[test]
    fn test_send_requires_wallet_and_balance() {
        let (mut runtime, _, alice, init) = setup();
        let counter = runtime.deploy(init, 0).unwrap();
        assert_eq!(
            runtime.send_internal(counter, alice, 1, Arc::new(Cell::empty()), None, false),
            Err(RuntimeError::NotAWallet(counter))
        );
        assert!(matches!(
            runtime.send_internal(alice, counter, 5_000, Arc::new(Cell::empty()), None, false),
            Err(RuntimeError::InsufficientBalance { .. })
        ));
    }

    #[test]
    fn test_deploy_with_state_init_then_compute() {
        let (mut runtime, log, alice, init) = setup();
        let counter = init.address(0).unwrap();
        runtime
            .send_internal(alice, counter, 100, op_body(OP_INCREMENT), Some(init), true)
            .unwrap();
        let txs = runtime.run_until_idle().unwrap();
        assert!(txs[0].deployed);
        assert!(txs[0].success);
        assert_eq!(counter_value(&runtime, &counter), 1);
        assert_eq!(log.by_topic("deploy").len(), 1);
    }

    #[test]
    fn test_mismatched_state_init_is_not_deployed() {
        let (mut runtime, _, alice, init) = setup();
        let wrong = Address::new(0, [9; 32]);
        runtime
            .send_internal(alice, wrong, 100, op_body(OP_INCREMENT), Some(init), true)
            .unwrap();
        let txs = runtime.run_until_idle().unwrap();
        assert!(!txs[0].success);
        assert_eq!(txs[0].exit_code, ExitCode::ACCOUNT_NOT_ACTIVE);
        assert!(!runtime.account(&wrong).unwrap().is_active());
    }

    #[test]
    fn test_uninit_bounce_returns_value() {
        let (mut runtime, _, alice, _) = setup();
        let nobody = Address::new(0, [7; 32]);
        runtime
            .send_internal(alice, nobody, 250, op_body(OP_INCREMENT), None, true)
            .unwrap();
        let txs = runtime.run_until_idle().unwrap();
        assert_eq!(txs.len(), 2);
        assert_eq!(txs[0].exit_code, ExitCode::ACCOUNT_NOT_ACTIVE);
        assert!(txs[0].produced_bounce());
        assert!(txs[1].inbound_bounced);
        assert_eq!(txs[1].op, Some(BOUNCE_PREFIX));
        assert_eq!(runtime.balance(&alice), 1_000);
        assert_eq!(runtime.balance(&nobody), 0);
        runtime.check_value_conservation().unwrap();
    }

    #[test]
    fn test_uninit_without_bounce_keeps_value() {
        let (mut runtime, _, alice, _) = setup();
        let nobody = Address::new(0, [7; 32]);
        runtime
            .send_internal(alice, nobody, 250, Arc::new(Cell::empty()), None, false)
            .unwrap();
        let txs = runtime.run_until_idle().unwrap();
        assert_eq!(txs.len(), 1);
        assert!(txs[0].success);
        assert_eq!(runtime.balance(&nobody), 250);
        assert!(!runtime.account(&nobody).unwrap().is_active());
    }

    #[test]
    fn test_compute_failure_rolls_back_and_bounces() {
        let (mut runtime, log, alice, init) = setup();
        let counter = runtime.deploy(init, 10).unwrap();
        runtime
            .send_internal(alice, counter, 100, op_body(OP_FAIL), None, true)
            .unwrap();
        let txs = runtime.run_until_idle().unwrap();
        assert_eq!(txs[0].exit_code, ExitCode(100));
        assert_eq!(runtime.balance(&counter), 10);
        assert_eq!(runtime.balance(&alice), 1_000);
        assert_eq!(counter_value(&runtime, &counter), 0);
        assert_eq!(log.by_topic("bounce").len(), 1);
    }

    #[test]
    fn test_compute_failure_without_bounce_keeps_value() {
        let (mut runtime, _, alice, init) = setup();
        let counter = runtime.deploy(init, 0).unwrap();
        runtime
            .send_internal(alice, counter, 100, op_body(OP_FAIL), None, false)
            .unwrap();
        let txs = runtime.run_until_idle().unwrap();
        assert_eq!(txs.len(), 1);
        assert!(!txs[0].success);
        assert_eq!(runtime.balance(&counter), 100);
    }

    #[test]
    fn test_action_phase_insufficient_value() {
        let (mut runtime, _, alice, init) = setup();
        let counter = runtime.deploy(init, 0).unwrap();
        let body = forward_body(&alice, 500, SendMode::ORDINARY);
        runtime
            .send_internal(alice, counter, 100, body, None, true)
            .unwrap();
        let txs = runtime.run_until_idle().unwrap();
        assert_eq!(txs[0].exit_code, ExitCode::NOT_ENOUGH_VALUE);
        assert_eq!(counter_value(&runtime, &counter), 0);
        assert_eq!(runtime.balance(&alice), 1_000);
    }

    #[test]
    fn test_ignore_errors_skips_send() {
        let (mut runtime, _, alice, init) = setup();
        let counter = runtime.deploy(init, 0).unwrap();
        let body = forward_body(&alice, 500, SendMode::IGNORE_ERRORS);
        runtime
            .send_internal(alice, counter, 100, body, None, true)
            .unwrap();
        let txs = runtime.run_until_idle().unwrap();
        assert!(txs[0].success);
        assert!(txs[0].out_messages.is_empty());
        assert_eq!(counter_value(&runtime, &counter), 1);
        assert_eq!(runtime.balance(&counter), 100);
    }

    #[test]
    fn test_carry_remaining_value() {
        let (mut runtime, _, alice, init) = setup();
        let counter = runtime.deploy(init, 40).unwrap();
        let bob = runtime.create_wallet("bob", 0);
        let body = forward_body(&bob, 5, SendMode::CARRY_REMAINING_VALUE);
        runtime
            .send_internal(alice, counter, 100, body, None, true)
            .unwrap();
        runtime.run_until_idle().unwrap();
        assert_eq!(runtime.balance(&bob), 105);
        assert_eq!(runtime.balance(&counter), 35);
        runtime.check_value_conservation().unwrap();
    }

    #[test]
    fn test_carry_all_balance() {
        let (mut runtime, _, alice, init) = setup();
        let counter = runtime.deploy(init, 40).unwrap();
        let bob = runtime.create_wallet("bob", 0);
        let body = forward_body(&bob, 0, SendMode::CARRY_ALL_BALANCE);
        runtime
            .send_internal(alice, counter, 100, body, None, true)
            .unwrap();
        runtime.run_until_idle().unwrap();
        assert_eq!(runtime.balance(&bob), 140);
        assert_eq!(runtime.balance(&counter), 0);
    }

    #[test]
    fn test_step_limit() {
        let mut registry = ContractRegistry::new();
        registry.register(&counter_code(), Arc::new(Counter));
        let config = RuntimeConfig {
            max_transactions_per_run: 5,
            ..RuntimeConfig::default()
        };
        let mut runtime = Runtime::new(config, registry);
        let alice = runtime.create_wallet("alice", 10);
        let counter = runtime
            .deploy(StateInit::new(counter_code(), counter_data(0)), 0)
            .unwrap();
        runtime
            .send_internal(alice, counter, 1, op_body(OP_PING_SELF), None, false)
            .unwrap();
        assert_eq!(
            runtime.run_until_idle(),
            Err(RuntimeError::StepLimitExceeded { limit: 5 })
        );
        assert_eq!(runtime.pending_messages(), 1);
    }

    #[test]
    fn test_get_method_errors() {
        let (runtime, _, alice, _) = setup();
        assert_eq!(
            runtime.run_get_method(&alice, "counter", &[]),
            Err(RuntimeError::AccountNotActive(alice))
        );
        let (mut runtime, _, _, init) = setup();
        let counter = runtime.deploy(init, 0).unwrap();
        assert!(matches!(
            runtime.run_get_method(&counter, "missing", &[]),
            Err(RuntimeError::GetMethodFailed { exit_code: ExitCode(11), .. })
        ));
    }

    #[test]
    fn test_deploy_twice_rejected() {
        let (mut runtime, _, _, init) = setup();
        runtime.deploy(init.clone(), 0).unwrap();
        assert!(matches!(
            runtime.deploy(init, 0),
            Err(RuntimeError::AccountExists(_))
        ));
    }

    #[test]
    fn test_logical_time_monotonic() {
        let (mut runtime, _, alice, init) = setup();
        let counter = runtime.deploy(init, 0).unwrap();
        for _ in 0..3 {
            runtime
                .send_internal(alice, counter, 1, op_body(OP_INCREMENT), None, true)
                .unwrap();
        }
        let txs = runtime.run_until_idle().unwrap();
        check_lt_monotonic(&txs).unwrap();
        assert_eq!(counter_value(&runtime, &counter), 3);
    }
}
