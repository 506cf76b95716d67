//! Two authorization models side by side: Issuer admin address check and
//! Manager Ed25519 signature check.

use super::fixtures::*;
use jv_02_issuer::prelude::*;
use jv_03_manager::prelude::*;
use shared_cell::Address;
use shared_crypto::Ed25519KeyPair;
use shared_runtime::prelude::*;

// =============================================================================
// ISSUER: ADMIN ADDRESS
// =============================================================================

fn privileged_issuer_messages(w: &World) -> Vec<IssuerMessage> {
    let credit = jv_01_holder::domain::InternalTransfer::credit(
        0,
        100,
        jv_01_holder::domain::forward_payload(None).unwrap(),
    );
    vec![
        IssuerMessage::Mint {
            query_id: 0,
            to: w.mallory,
            forward_value: FORWARD,
            credit,
        },
        IssuerMessage::ChangeAdmin {
            query_id: 0,
            new_admin: w.mallory,
        },
        IssuerMessage::ChangeContent {
            query_id: 0,
            content: offchain_content("https://evil.example/x.json").unwrap(),
        },
        IssuerMessage::SetPrice {
            query_id: 0,
            price: 1000,
        },
        IssuerMessage::SetBlacklisted {
            query_id: 0,
            address: w.alice,
            flag: true,
        },
        IssuerMessage::SetBackingToken {
            query_id: 0,
            address: w.mallory,
        },
        IssuerMessage::SyncJetton { query_id: 0 },
        IssuerMessage::Deposit {
            query_id: 0,
            backing: w.mallory,
            amount: 1000,
            receiver: w.mallory,
        },
        IssuerMessage::Withdraw {
            query_id: 0,
            shares: 10,
            receiver: w.mallory,
            owner: w.alice,
        },
        IssuerMessage::Rescue {
            query_id: 0,
            to: w.mallory,
            amount: TON / 2,
        },
    ]
}

#[test]
fn test_issuer_privileged_ops_reject_non_admin() {
    let mut w = World::new();
    w.mint(w.alice, 100);
    w.admin_send(&IssuerMessage::SyncJetton { query_id: 0 });
    let before = w.issuer.jetton_data(&w.runtime).unwrap();
    let price = w.issuer.price(&w.runtime).unwrap();
    let issuer_balance = w.runtime.balance(&w.issuer.address);

    let mallory = w.mallory;
    for message in privileged_issuer_messages(&w) {
        assert!(message.requires_admin());
        let txs = w
            .issuer
            .send(&mut w.runtime, mallory, VALUE, &message)
            .unwrap();
        assert_eq!(txs[0].exit_code, exit::UNAUTHORIZED, "{}", message.name());
        // Only the bounce back to the sender follows.
        assert!(txs[1..].iter().all(|tx| tx.account == mallory));
    }

    let after = w.issuer.jetton_data(&w.runtime).unwrap();
    assert_eq!(after.total_supply, before.total_supply);
    assert_eq!(after.admin, w.admin);
    assert_eq!(after.content.hash(), before.content.hash());
    assert_eq!(w.issuer.price(&w.runtime).unwrap(), price);
    assert!(!w.issuer.is_blacklisted(&w.runtime, &w.alice).unwrap());
    assert_eq!(w.issuer.last_sync_supply(&w.runtime).unwrap(), 100);
    assert_eq!(w.balance_of(&w.alice), 100);
    assert_eq!(w.balance_of(&w.mallory), 0);
    assert_eq!(w.runtime.balance(&w.issuer.address), issuer_balance);
}

#[test]
fn test_issuer_admin_handover() {
    let mut w = World::new();
    let (old, new) = (w.admin, w.bob);
    w.admin_send(&IssuerMessage::ChangeAdmin {
        query_id: 0,
        new_admin: new,
    });

    let txs = w
        .issuer
        .mint(&mut w.runtime, old, w.alice, 1, FORWARD, VALUE)
        .unwrap();
    assert_eq!(txs[0].exit_code, exit::UNAUTHORIZED);

    let txs = w
        .issuer
        .mint(&mut w.runtime, new, w.alice, 1, FORWARD, VALUE)
        .unwrap();
    assert!(txs[0].success);
    assert_eq!(w.supply(), 1);
}

// =============================================================================
// MANAGER: SIGNATURE
// =============================================================================

fn manager_requests() -> Vec<ManagerRequest> {
    let a = Address::new(0, [0xC1; 32]);
    let b = Address::new(0, [0xC2; 32]);
    let c = Address::new(0, [0xC3; 32]);
    vec![
        ManagerRequest::SetTokens(TokenUpdate {
            s_token: a,
            y_token: b,
            treasury: None,
            is_vault: true,
        }),
        ManagerRequest::SetTokens(TokenUpdate {
            s_token: a,
            y_token: b,
            treasury: Some(c),
            is_vault: true,
        }),
        ManagerRequest::SetTreasury { treasury: c },
        ManagerRequest::Deposit { amount: 500 },
        ManagerRequest::Withdraw { amount: 500 },
        ManagerRequest::SetAsset {
            asset: a,
            enabled: true,
        },
    ]
}

#[test]
fn test_manager_rejects_foreign_signer() {
    let mut w = World::new();
    let before = w.manager.settings(&w.runtime).unwrap();
    let forger = Ed25519KeyPair::from_seed([0x22; 32]);
    let relayer = w.mallory;

    for (query_id, request) in manager_requests().into_iter().enumerate() {
        let txs = w
            .manager
            .submit(&mut w.runtime, relayer, VALUE, &forger, query_id as u64, request)
            .unwrap();
        assert_eq!(txs[0].exit_code, ExitCode::SIGNATURE_FAILED, "{}", request.name());
    }

    assert_eq!(w.manager.settings(&w.runtime).unwrap(), before);
    let asset = Address::new(0, [0xC1; 32]);
    assert!(!w.manager.is_asset_enabled(&w.runtime, &asset).unwrap());
}

#[test]
fn test_manager_rejects_signature_over_other_payload() {
    let mut w = World::new();
    let before = w.manager.settings(&w.runtime).unwrap();
    let honest = ManagerRequest::SetTreasury {
        treasury: Address::new(0, [0xD1; 32]),
    };
    let Ok(ManagerMessage::Signed {
        query_id,
        signature,
        ..
    }) = honest.sign(&w.manager_key, 9)
    else {
        panic!("signing produced an unsigned message");
    };

    // Valid signature, swapped payload.
    let tampered = ManagerMessage::Signed {
        query_id,
        signature,
        request: ManagerRequest::SetTreasury {
            treasury: w.mallory,
        },
    };
    let relayer = w.mallory;
    let txs = w
        .manager
        .send(&mut w.runtime, relayer, VALUE, &tampered)
        .unwrap();
    assert_eq!(txs[0].exit_code, ExitCode::SIGNATURE_FAILED);
    assert_eq!(w.manager.settings(&w.runtime).unwrap(), before);
}

#[test]
fn test_manager_accepts_admin_signature_from_any_relayer() {
    let mut w = World::new();
    let treasury = Address::new(0, [0xE1; 32]);
    let key = Ed25519KeyPair::from_seed(MANAGER_SEED);

    for (query_id, relayer) in [w.alice, w.mallory].into_iter().enumerate() {
        let txs = w
            .manager
            .submit(
                &mut w.runtime,
                relayer,
                VALUE,
                &key,
                query_id as u64,
                ManagerRequest::SetTreasury { treasury },
            )
            .unwrap();
        assert!(txs[0].success);
    }
    let settings = w.manager.settings(&w.runtime).unwrap();
    assert_eq!(settings.treasury, treasury);
    assert_eq!(settings.admin_pubkey, *key.public_key().as_bytes());
}

#[test]
fn test_issuer_admin_has_no_manager_authority() {
    let mut w = World::new();
    let before = w.manager.settings(&w.runtime).unwrap();
    // The Issuer admin relays a request signed with a key it controls.
    let admin_key = Ed25519KeyPair::from_seed([0x33; 32]);
    let admin = w.admin;
    let txs = w
        .manager
        .submit(
            &mut w.runtime,
            admin,
            VALUE,
            &admin_key,
            0,
            ManagerRequest::SetTreasury { treasury: admin },
        )
        .unwrap();
    assert_eq!(txs[0].exit_code, ExitCode::SIGNATURE_FAILED);
    assert_eq!(w.manager.settings(&w.runtime).unwrap(), before);
}
