//! Node-level flows: JSON configuration, JSON scenarios and the event bus.

use jv_03_manager::prelude::ManagerApi;
use jv_node::{JettonNode, NodeConfig, Scenario};
use shared_cell::Address;
use shared_runtime::prelude::RuntimeEvent;

const SEED_HEX: &str = "4242424242424242424242424242424242424242424242424242424242424242";

fn config() -> NodeConfig {
    let text = format!(
        r#"{{
            "wallets": [
                {{ "label": "ops", "balance": 50000000000 }},
                {{ "label": "carol", "balance": 50000000000 }},
                {{ "label": "dave", "balance": 50000000000 }}
            ],
            "issuer": {{ "admin": "ops", "price": 2 }},
            "manager": {{ "seed_hex": "{SEED_HEX}", "is_vault": true }}
        }}"#
    );
    serde_json::from_str(&text).unwrap()
}

#[test]
fn test_genesis_from_json_config() {
    let node = JettonNode::genesis(&config()).unwrap();
    let snapshot = node.snapshot().unwrap();
    assert_eq!(snapshot.price, 2);
    assert!(snapshot.is_vault);
    assert_eq!(
        snapshot.balances.keys().map(String::as_str).collect::<Vec<_>>(),
        vec!["carol", "dave", "ops"]
    );
    let key = shared_crypto::Ed25519KeyPair::from_seed_hex(SEED_HEX).unwrap();
    assert_eq!(snapshot.admin_pubkey, key.public_key().to_hex());
}

#[test]
fn test_json_scenario_end_to_end() {
    let mut node = JettonNode::genesis(&config()).unwrap();
    let treasury = format!("0:{}", "5a".repeat(32));
    let scenario = Scenario::from_json(&format!(
        r#"{{ "steps": [
            {{ "action": "deposit", "receiver": "carol", "amount": 1 }},
            {{ "action": "deposit", "receiver": "carol", "amount": 21 }},
            {{ "action": "transfer", "from": "carol", "to": "dave", "amount": 4 }},
            {{ "action": "burn", "from": "dave", "amount": 1 }},
            {{ "action": "set_price", "price": 0 }},
            {{ "action": "change_admin", "new_admin": "carol" }},
            {{ "action": "mint", "to": "dave", "amount": 2 }},
            {{ "action": "sync_jetton" }},
            {{ "action": "manager_set_tokens", "relayer": "dave", "s_token": "carol",
               "y_token": "dave", "treasury": "{treasury}", "is_vault": false }},
            {{ "action": "manager_set_asset", "relayer": "carol", "asset": "dave", "enabled": false }}
        ] }}"#
    ))
    .unwrap();

    let reports: Vec<_> = scenario
        .steps
        .iter()
        .map(|step| node.apply(step).unwrap())
        .collect();
    let outcomes: Vec<(&str, bool, i32)> = reports
        .iter()
        .map(|r| (r.action, r.success, r.exit_code))
        .collect();
    assert_eq!(
        outcomes,
        vec![
            ("deposit", true, 0),
            ("deposit", true, 0),
            ("transfer", true, 0),
            ("burn", true, 0),
            ("set_price", false, 75),
            ("change_admin", true, 0),
            ("mint", true, 0),
            ("sync_jetton", true, 0),
            ("manager_set_tokens", true, 0),
            ("manager_set_asset", true, 0),
        ]
    );

    let snapshot = node.snapshot().unwrap();
    // 1/2 mints nothing, 21/2 mints 10; one burned, two minted.
    assert_eq!(snapshot.total_supply, 11);
    assert_eq!(snapshot.last_sync_supply, 11);
    assert_eq!(snapshot.balances["carol"], 6);
    assert_eq!(snapshot.balances["dave"], 5);
    assert_eq!(snapshot.price, 2);
    assert_eq!(snapshot.s_token, node.resolve("carol").unwrap());
    assert_eq!(snapshot.y_token, node.resolve("dave").unwrap());
    assert_eq!(snapshot.treasury, treasury.parse::<Address>().unwrap());
    assert!(!snapshot.is_vault);

    let dave = node.resolve("dave").unwrap();
    assert!(!node
        .manager()
        .is_asset_enabled(node.runtime(), &dave)
        .unwrap());
    node.runtime().check_value_conservation().unwrap();
}

#[test]
fn test_unknown_actor_is_a_node_error() {
    let mut node = JettonNode::genesis(&config()).unwrap();
    let scenario =
        Scenario::from_json(r#"{ "steps": [ { "action": "mint", "to": "zed", "amount": 1 } ] }"#)
            .unwrap();
    assert!(matches!(
        node.apply(&scenario.steps[0]),
        Err(jv_node::NodeError::UnknownActor(actor)) if actor == "zed"
    ));
}

#[tokio::test]
async fn test_event_bus_sees_mint_flow() {
    let mut node = JettonNode::genesis(&config()).unwrap();
    let mut events = node.bus().subscribe();
    let carol = node.resolve("carol").unwrap();

    let scenario =
        Scenario::from_json(r#"{ "steps": [ { "action": "mint", "to": "carol", "amount": 3 } ] }"#)
            .unwrap();
    let report = node.apply(&scenario.steps[0]).unwrap();
    assert!(report.success);

    let mut received = Vec::new();
    while let Ok(event) = events.try_recv() {
        received.push(event);
    }
    assert!(received.iter().any(|event| matches!(
        event,
        RuntimeEvent::AccountDeployed { contract, .. } if contract == "holder"
    )));
    let executed = received
        .iter()
        .filter(|event| matches!(event, RuntimeEvent::TransactionExecuted(_)))
        .count();
    assert_eq!(executed, report.transactions.len());
    assert!(report.transactions.iter().any(|tx| tx.account == carol));

    // Logical time only moves forward.
    let lts: Vec<_> = received.iter().map(RuntimeEvent::lt).collect();
    assert!(lts.windows(2).all(|pair| pair[0] <= pair[1]));
}
