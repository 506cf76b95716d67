//! Supply accounting across Issuer and Holders.

use super::fixtures::*;
use jv_01_holder::domain::{
    derive_holder_address, exit as holder_exit, forward_payload, BurnRequest, TransferRequest,
};
use jv_01_holder::prelude::HolderApi;
use jv_02_issuer::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use shared_runtime::prelude::*;

// =============================================================================
// ADDRESS DERIVATION
// =============================================================================

#[test]
fn test_holder_address_is_deterministic() {
    let w = World::new();
    let first = derive_holder_address(&w.alice, &w.issuer.address, &w.holder_code, 0).unwrap();
    let second = derive_holder_address(&w.alice, &w.issuer.address, &w.holder_code, 0).unwrap();
    assert_eq!(first, second);
    assert_eq!(w.issuer.wallet_address(&w.runtime, &w.alice).unwrap(), first);

    let other = derive_holder_address(&w.bob, &w.issuer.address, &w.holder_code, 0).unwrap();
    assert_ne!(first, other);
}

#[test]
fn test_holder_deployed_at_derived_address() {
    let mut w = World::new();
    let expected = w.holder(&w.alice).address;
    assert!(w.runtime.account(&expected).is_none());

    let txs = w.mint(w.alice, 5);
    assert!(txs.iter().any(|tx| tx.account == expected && tx.deployed));
    assert!(w.runtime.account(&expected).unwrap().is_active());

    // Second credit reuses the deployed Holder.
    let txs = w.mint(w.alice, 5);
    assert!(txs.iter().all(|tx| !tx.deployed));
    assert_eq!(w.balance_of(&w.alice), 10);
}

// =============================================================================
// SUPPLY INVARIANT
// =============================================================================

#[test]
fn test_supply_matches_holder_sum_under_random_operations() {
    let mut w = World::new();
    let mut rng = StdRng::seed_from_u64(7);
    let owners = [w.alice, w.bob, w.mallory];

    for round in 0..60u64 {
        let owner = owners[rng.gen_range(0..owners.len())];
        match rng.gen_range(0..4) {
            0 => {
                w.mint(owner, rng.gen_range(1..500));
            }
            1 => {
                let shares = rng.gen_range(1..200);
                w.admin_send(&IssuerMessage::Withdraw {
                    query_id: round,
                    shares,
                    receiver: owner,
                    owner,
                });
            }
            2 => {
                let destination = owners[rng.gen_range(0..owners.len())];
                let request = TransferRequest {
                    query_id: round,
                    amount: rng.gen_range(1..300),
                    destination,
                    response: Some(owner),
                    forward_amount: 0,
                    forward_payload: forward_payload(None).unwrap(),
                };
                w.holder(&owner)
                    .transfer(&mut w.runtime, owner, VALUE, &request)
                    .unwrap();
            }
            _ => {
                let request = BurnRequest {
                    query_id: round,
                    amount: rng.gen_range(1..100),
                    response: Some(owner),
                };
                w.holder(&owner)
                    .burn(&mut w.runtime, owner, VALUE, &request)
                    .unwrap();
            }
        }
        assert_eq!(w.supply(), w.holder_balance_sum(), "round {round}");
    }
    w.runtime.check_value_conservation().unwrap();
}

// =============================================================================
// WITHDRAW
// =============================================================================

#[test]
fn test_mint_then_withdraw_scenario() {
    let mut w = World::new();
    let txs = w.mint(w.alice, 100);
    assert!(txs.iter().all(|tx| tx.success));
    assert_eq!(w.balance_of(&w.alice), 100);
    assert_eq!(w.supply(), 100);

    let txs = w.admin_send(&IssuerMessage::Withdraw {
        query_id: 1,
        shares: 101,
        receiver: w.alice,
        owner: w.alice,
    });
    assert_eq!(txs[0].exit_code, exit::INSUFFICIENT_SUPPLY);
    assert_eq!(w.supply(), 100);
    assert_eq!(w.balance_of(&w.alice), 100);

    let txs = w.admin_send(&IssuerMessage::Withdraw {
        query_id: 2,
        shares: 50,
        receiver: w.alice,
        owner: w.alice,
    });
    assert!(txs[0].success);
    assert_eq!(w.supply(), 50);
    assert_eq!(w.balance_of(&w.alice), 50);
}

#[test]
fn test_withdraw_releases_backing_after_holder_debit() {
    let mut w = World::new();
    let (bob, alice) = (w.bob, w.alice);
    w.admin_send(&IssuerMessage::SetBackingToken {
        query_id: 0,
        address: bob,
    });
    w.mint(alice, 100);

    let txs = w.admin_send(&IssuerMessage::Withdraw {
        query_id: 1,
        shares: 40,
        receiver: alice,
        owner: alice,
    });
    assert!(txs.iter().all(|tx| tx.success));
    let holder = w.holder(&alice).address;
    let debit = txs
        .iter()
        .position(|tx| tx.account == holder && tx.op == Some(opcodes::WITHDRAW_BURN))
        .unwrap();
    let release = txs
        .iter()
        .position(|tx| tx.account == bob && tx.op == Some(opcodes::WITHDRAW_RELEASE))
        .unwrap();
    assert!(debit < release);
    assert!(txs.iter().any(|tx| tx.account == w.issuer.address
        && tx.op == Some(opcodes::WITHDRAW_BURNED)
        && tx.source == holder));
    assert_eq!(w.supply(), 60);
    assert_eq!(w.balance_of(&alice), 60);
}

#[test]
fn test_withdraw_for_owner_without_holder_releases_nothing() {
    let mut w = World::new();
    let (bob, mallory) = (w.bob, w.mallory);
    w.admin_send(&IssuerMessage::SetBackingToken {
        query_id: 0,
        address: bob,
    });
    w.mint(w.alice, 100);
    assert!(w.runtime.account(&w.holder(&mallory).address).is_none());

    let txs = w.admin_send(&IssuerMessage::Withdraw {
        query_id: 1,
        shares: 60,
        receiver: mallory,
        owner: mallory,
    });
    assert!(txs[0].success);
    assert!(!txs
        .iter()
        .any(|tx| tx.account == bob && tx.op == Some(opcodes::WITHDRAW_RELEASE)));
    assert_eq!(w.supply(), 100);
    assert_eq!(w.supply(), w.holder_balance_sum());
}

#[test]
fn test_withdraw_over_holder_balance_releases_nothing() {
    let mut w = World::new();
    let (bob, alice) = (w.bob, w.alice);
    w.admin_send(&IssuerMessage::SetBackingToken {
        query_id: 0,
        address: bob,
    });
    w.mint(alice, 30);
    w.mint(w.mallory, 70);

    let txs = w.admin_send(&IssuerMessage::Withdraw {
        query_id: 1,
        shares: 50,
        receiver: alice,
        owner: alice,
    });
    assert!(txs.iter().any(|tx| {
        tx.op == Some(opcodes::WITHDRAW_BURN) && tx.exit_code == holder_exit::INSUFFICIENT_BALANCE
    }));
    assert!(!txs
        .iter()
        .any(|tx| tx.account == bob && tx.op == Some(opcodes::WITHDRAW_RELEASE)));
    assert_eq!(w.supply(), 100);
    assert_eq!(w.balance_of(&alice), 30);
}

#[test]
fn test_withdraw_burned_from_stranger_rejected() {
    let mut w = World::new();
    let (bob, alice, mallory) = (w.bob, w.alice, w.mallory);
    w.admin_send(&IssuerMessage::SetBackingToken {
        query_id: 0,
        address: bob,
    });
    w.mint(alice, 100);

    let forged = IssuerMessage::WithdrawBurned {
        query_id: 2,
        shares: 100,
        owner: alice,
        receiver: mallory,
    };
    let txs = w
        .issuer
        .send(&mut w.runtime, mallory, VALUE, &forged)
        .unwrap();
    assert_eq!(txs[0].exit_code, exit::UNAUTHORIZED_BURN);
    assert!(!txs
        .iter()
        .any(|tx| tx.account == bob && tx.op == Some(opcodes::WITHDRAW_RELEASE)));
}

#[test]
fn test_withdraw_zero_shares_rejected() {
    let mut w = World::new();
    w.mint(w.alice, 10);
    let txs = w.admin_send(&IssuerMessage::Withdraw {
        query_id: 0,
        shares: 0,
        receiver: w.alice,
        owner: w.alice,
    });
    assert_eq!(txs[0].exit_code, exit::ZERO_SHARES);
}

// =============================================================================
// BLACKLIST
// =============================================================================

#[test]
fn test_blacklist_blocks_mint_until_cleared() {
    let mut w = World::new();
    let bob = w.bob;
    w.admin_send(&IssuerMessage::SetBlacklisted {
        query_id: 0,
        address: bob,
        flag: true,
    });
    assert!(w.issuer.is_blacklisted(&w.runtime, &bob).unwrap());

    let txs = w.mint(bob, 25);
    assert_eq!(txs[0].exit_code, exit::BLACKLISTED);
    assert_eq!(w.balance_of(&bob), 0);
    assert_eq!(w.supply(), 0);

    w.admin_send(&IssuerMessage::SetBlacklisted {
        query_id: 1,
        address: bob,
        flag: false,
    });
    assert!(!w.issuer.is_blacklisted(&w.runtime, &bob).unwrap());

    let before = w.balance_of(&bob);
    let txs = w.mint(bob, 25);
    assert!(txs.iter().all(|tx| tx.success));
    assert_eq!(w.balance_of(&bob), before + 25);
}

#[test]
fn test_blacklisted_deposit_receiver_rejected() {
    let mut w = World::new();
    let alice = w.alice;
    w.admin_send(&IssuerMessage::SetBlacklisted {
        query_id: 0,
        address: alice,
        flag: true,
    });
    let admin = w.admin;
    let txs = w
        .issuer
        .deposit(&mut w.runtime, admin, admin, 10, alice, VALUE)
        .unwrap();
    assert_eq!(txs[0].exit_code, exit::BLACKLISTED);
}

// =============================================================================
// PRICE AND SYNC
// =============================================================================

#[test]
fn test_non_positive_price_rejected_and_unchanged() {
    let mut w = World::new();
    w.admin_send(&IssuerMessage::SetPrice {
        query_id: 0,
        price: 3,
    });
    assert_eq!(w.issuer.price(&w.runtime).unwrap(), 3);

    for price in [0, -1, i32::MIN] {
        let txs = w.admin_send(&IssuerMessage::SetPrice { query_id: 1, price });
        assert_eq!(txs[0].exit_code, exit::INVALID_PRICE, "price {price}");
        assert_eq!(w.issuer.price(&w.runtime).unwrap(), 3);
    }
}

#[test]
fn test_deposit_truncation_is_success() {
    let mut w = World::new();
    w.admin_send(&IssuerMessage::SetPrice {
        query_id: 0,
        price: 2,
    });
    let (admin, alice) = (w.admin, w.alice);

    let txs = w
        .issuer
        .deposit(&mut w.runtime, admin, admin, 1, alice, VALUE)
        .unwrap();
    assert!(txs[0].success);
    assert_eq!(w.supply(), 0);
    assert_eq!(w.balance_of(&alice), 0);

    let txs = w
        .issuer
        .deposit(&mut w.runtime, admin, admin, 9, alice, VALUE)
        .unwrap();
    assert!(txs.iter().all(|tx| tx.success));
    assert_eq!(w.supply(), 4);
    assert_eq!(w.balance_of(&alice), 4);
}

#[test]
fn test_zero_deposit_rejected() {
    let mut w = World::new();
    let (admin, alice) = (w.admin, w.alice);
    let txs = w
        .issuer
        .deposit(&mut w.runtime, admin, admin, 0, alice, VALUE)
        .unwrap();
    assert_eq!(txs[0].exit_code, exit::ZERO_DEPOSIT);
}

#[test]
fn test_sync_jetton_idempotent() {
    let mut w = World::new();
    w.mint(w.alice, 70);
    assert_eq!(w.issuer.last_sync_supply(&w.runtime).unwrap(), 0);

    w.admin_send(&IssuerMessage::SyncJetton { query_id: 0 });
    assert_eq!(w.issuer.last_sync_supply(&w.runtime).unwrap(), 70);

    let txs = w.admin_send(&IssuerMessage::SyncJetton { query_id: 1 });
    assert!(txs[0].success);
    assert_eq!(w.issuer.last_sync_supply(&w.runtime).unwrap(), 70);
}

#[test]
fn test_backing_token_update() {
    let mut w = World::new();
    let backing = shared_cell::Address::new(0, [0xBB; 32]);
    w.admin_send(&IssuerMessage::SetBackingToken {
        query_id: 0,
        address: backing,
    });
    assert_eq!(w.issuer.backing_token(&w.runtime).unwrap(), backing);
}
