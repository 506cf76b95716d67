//! # Jetton Vault Protocol Benchmarks
//!
//! | Area | Operation |
//! |------|-----------|
//! | shared-cell | Representation hash of a Holder state cell |
//! | jv-01-holder | Deterministic Holder address derivation |
//! | jv-03-manager | Sign and verify a Manager request |
//! | shared-runtime | Mint plus transfer through the message queue |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use jv_01_holder::domain::{derive_holder_address, forward_payload, TransferRequest};
use jv_01_holder::prelude::{HolderApi, HolderClient, HolderFees};
use jv_02_issuer::prelude::{IssuerClient, IssuerConfig};
use jv_03_manager::prelude::{ManagerRequest, SignaturePolicy};
use rand::Rng;
use shared_cell::{Address, Cell};
use shared_crypto::Ed25519KeyPair;
use shared_runtime::prelude::*;
use std::time::Duration;

const TON: Coins = 1_000_000_000;

fn random_address() -> Address {
    Address::new(0, rand::thread_rng().gen())
}

// ============================================================================
// CELL AND ADDRESS
// ============================================================================

fn bench_cell_hash(c: &mut Criterion) {
    let mut group = c.benchmark_group("shared-cell");
    let owner = random_address();
    let issuer = random_address();
    let holder_code = jv_01_holder::domain::holder_code().unwrap();

    group.bench_function("state_cell_hash", |b| {
        b.iter(|| {
            let mut builder = Cell::builder();
            builder
                .store_coins(black_box(1_000_000))
                .unwrap()
                .store_address(&owner)
                .unwrap()
                .store_address(&issuer)
                .unwrap()
                .store_ref(holder_code.clone())
                .unwrap();
            black_box(builder.build().hash())
        })
    });

    group.bench_function("derive_holder_address", |b| {
        b.iter(|| derive_holder_address(black_box(&owner), &issuer, &holder_code, 0).unwrap())
    });
    group.finish();
}

// ============================================================================
// MANAGER SIGNATURES
// ============================================================================

fn bench_manager_signature(c: &mut Criterion) {
    let mut group = c.benchmark_group("jv-03-manager");
    let key = Ed25519KeyPair::from_seed([9; 32]);
    let policy = SignaturePolicy::new(*key.public_key().as_bytes());
    let request = ManagerRequest::SetTreasury {
        treasury: random_address(),
    };
    let message = request.sign(&key, 1).unwrap();
    let relayer = random_address();

    group.bench_function("sign_request", |b| {
        b.iter(|| black_box(request).sign(&key, 1).unwrap())
    });
    group.bench_function("authorize_request", |b| {
        b.iter(|| {
            let signed = request.signed_cell().unwrap();
            let jv_03_manager::prelude::ManagerMessage::Signed { signature, .. } = &message else {
                unreachable!()
            };
            let ctx = AuthContext::from_sender(&relayer).with_signature(signature, &signed);
            black_box(policy.authorize(&message, &ctx).is_ok())
        })
    });
    group.finish();
}

// ============================================================================
// RUNTIME
// ============================================================================

fn bench_mint_and_transfer(c: &mut Criterion) {
    let mut group = c.benchmark_group("shared-runtime");
    group.measurement_time(Duration::from_secs(10));

    for rounds in [1usize, 10, 50] {
        group.throughput(Throughput::Elements(rounds as u64));
        group.bench_with_input(
            BenchmarkId::new("mint_transfer_rounds", rounds),
            &rounds,
            |b, &rounds| {
                b.iter(|| {
                    let mut registry = ContractRegistry::new();
                    let holder_code =
                        jv_01_holder::register(&mut registry, HolderFees::DEFAULT).unwrap();
                    jv_02_issuer::register(&mut registry).unwrap();
                    let mut runtime = Runtime::new(RuntimeConfig::default(), registry);
                    let admin = runtime.create_wallet("admin", 1_000 * TON);
                    let alice = runtime.create_wallet("alice", 1_000 * TON);
                    let bob = runtime.create_wallet("bob", 1_000 * TON);
                    let config = IssuerConfig::new(admin, "https://example.com/bench.json");
                    let issuer = IssuerClient::new(
                        jv_02_issuer::deploy(&mut runtime, &config, holder_code.clone(), TON)
                            .unwrap(),
                    );
                    let holder = HolderClient::for_owner(&alice, &issuer.address, &holder_code, 0)
                        .unwrap();

                    for round in 0..rounds {
                        issuer
                            .mint(&mut runtime, admin, alice, 10, 20_000_000, 100_000_000)
                            .unwrap();
                        let request = TransferRequest {
                            query_id: round as u64,
                            amount: 5,
                            destination: bob,
                            response: Some(alice),
                            forward_amount: 0,
                            forward_payload: forward_payload(None).unwrap(),
                        };
                        holder
                            .transfer(&mut runtime, alice, 100_000_000, &request)
                            .unwrap();
                    }
                    black_box(runtime.balance(&issuer.address))
                })
            },
        );
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_cell_hash,
    bench_manager_signature,
    bench_mint_and_transfer
);
criterion_main!(benches);
