//! # Inscription-Chain Component Benchmarks
//!
//! | Component | Operation | Scaling |
//! |-----------|-----------|---------|
//! | ic-01 Content Store | chunked store / read | content size |
//! | ic-03 Inscription Registry | create through the runtime | batch size |
//! | ic-04 Token Protocol | mint + lot transfer | mints per block |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ic_01_content_store::{ContentConfig, ContentStore};
use ic_tests::fixtures::{chain, deploy, inscription_with_index, mint, ALICE, BOB, CAROL};
use shared_types::{Hash, InMemoryKVStore};
use std::time::Duration;

// ============================================================================
// IC-01: Content Store
// ============================================================================

fn bench_content_store(c: &mut Criterion) {
    let mut group = c.benchmark_group("ic-01-content-store");
    group.measurement_time(Duration::from_secs(5));

    for size in [1_024usize, 24_575, 100_000, 1_000_000] {
        let content: Vec<u8> = (0..size).map(|i| (i % 251) as u8).collect();
        group.throughput(Throughput::Bytes(size as u64));

        group.bench_with_input(BenchmarkId::new("store", size), &content, |b, content| {
            b.iter(|| {
                let mut store =
                    ContentStore::new(InMemoryKVStore::new(), ContentConfig::default()).unwrap();
                black_box(store.store(content).unwrap())
            })
        });

        let mut store = ContentStore::new(InMemoryKVStore::new(), ContentConfig::default()).unwrap();
        let hash = store.store(&content).unwrap();
        group.bench_with_input(BenchmarkId::new("read", size), &hash, |b, hash| {
            b.iter(|| black_box(store.read(hash).unwrap()))
        });
    }
    group.finish();
}

// ============================================================================
// IC-03: Inscription Registry
// ============================================================================

fn bench_registry_create(c: &mut Criterion) {
    let mut group = c.benchmark_group("ic-03-inscription-registry");

    for count in [100u32, 1_000] {
        group.throughput(Throughput::Elements(u64::from(count)));
        group.bench_with_input(BenchmarkId::new("create", count), &count, |b, &count| {
            b.iter(|| {
                let mut chain = chain();
                for index in 0..count {
                    chain.create(ALICE, inscription_with_index(index, BOB)).unwrap();
                }
                black_box(chain.registry().total_supply())
            })
        });
    }
    group.finish();
}

// ============================================================================
// IC-04: Token Protocol
// ============================================================================

fn bench_token_flow(c: &mut Criterion) {
    let mut group = c.benchmark_group("ic-04-token-protocol");

    for mints in [10u8, 100] {
        group.throughput(Throughput::Elements(u64::from(mints)));
        group.bench_with_input(BenchmarkId::new("mint_and_transfer", mints), &mints, |b, &mints| {
            b.iter(|| {
                let mut chain = chain();
                chain.create(ALICE, deploy(0xff, ALICE, "bench", "1000000", "1000")).unwrap();
                for seed in 1..=mints {
                    chain
                        .create(ALICE, mint(seed, BOB, "bench", u64::from(seed), "1000"))
                        .unwrap();
                    chain.transfer(BOB, CAROL, Hash::repeat_byte(seed)).unwrap();
                }
                black_box(chain.token_balance("bench", CAROL).unwrap())
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_content_store, bench_registry_create, bench_token_flow);
criterion_main!(benches);
