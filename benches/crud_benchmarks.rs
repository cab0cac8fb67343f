use avl_tree::AvlTreeMap;
use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::collections::BTreeMap;
use std::hint::black_box;

const N: usize = 10_000;

// ─── Helper functions to generate key sequences ─────────────────────────────

fn ordered_keys(n: usize) -> Vec<i64> {
    (0..n as i64).collect()
}

fn reverse_ordered_keys(n: usize) -> Vec<i64> {
    (0..n as i64).rev().collect()
}

fn random_keys(n: usize) -> Vec<i64> {
    let mut keys = ordered_keys(n);
    keys.shuffle(&mut StdRng::seed_from_u64(12345));
    keys
}

fn key_orders() -> [(&'static str, Vec<i64>); 3] {
    [("ordered", ordered_keys(N)), ("reverse", reverse_ordered_keys(N)), ("random", random_keys(N))]
}

// ─── Map Benchmarks ─────────────────────────────────────────────────────────

fn bench_map_insert(c: &mut Criterion) {
    for (order, keys) in key_orders() {
        let mut group = c.benchmark_group(format!("map_insert_{order}"));

        group.bench_function(BenchmarkId::new("AvlTreeMap", N), |b| {
            b.iter(|| {
                let mut map = AvlTreeMap::new();
                for &k in &keys {
                    map.insert(k, k);
                }
                map
            });
        });

        group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
            b.iter(|| {
                let mut map = BTreeMap::new();
                for &k in &keys {
                    map.insert(k, k);
                }
                map
            });
        });

        group.finish();
    }
}

fn bench_map_get(c: &mut Criterion) {
    let avl_map: AvlTreeMap<i64, i64> = ordered_keys(N).into_iter().map(|k| (k, k)).collect();
    let bt_map: BTreeMap<i64, i64> = ordered_keys(N).into_iter().map(|k| (k, k)).collect();

    for (order, keys) in key_orders() {
        let mut group = c.benchmark_group(format!("map_get_{order}"));

        group.bench_function(BenchmarkId::new("AvlTreeMap", N), |b| {
            b.iter(|| {
                let mut sum = 0i64;
                for &k in &keys {
                    if let Some(&v) = avl_map.get(&k) {
                        sum = sum.wrapping_add(v);
                    }
                }
                black_box(sum)
            });
        });

        group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
            b.iter(|| {
                let mut sum = 0i64;
                for &k in &keys {
                    if let Some(&v) = bt_map.get(&k) {
                        sum = sum.wrapping_add(v);
                    }
                }
                black_box(sum)
            });
        });

        group.finish();
    }
}

fn bench_map_remove(c: &mut Criterion) {
    let avl_map: AvlTreeMap<i64, i64> = ordered_keys(N).into_iter().map(|k| (k, k)).collect();
    let bt_map: BTreeMap<i64, i64> = ordered_keys(N).into_iter().map(|k| (k, k)).collect();

    for (order, keys) in key_orders() {
        let mut group = c.benchmark_group(format!("map_remove_{order}"));

        group.bench_function(BenchmarkId::new("AvlTreeMap", N), |b| {
            b.iter_batched(
                || avl_map.clone(),
                |mut map| {
                    for &k in &keys {
                        map.remove(&k);
                    }
                    map
                },
                BatchSize::SmallInput,
            );
        });

        group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
            b.iter_batched(
                || bt_map.clone(),
                |mut map| {
                    for &k in &keys {
                        map.remove(&k);
                    }
                    map
                },
                BatchSize::SmallInput,
            );
        });

        group.finish();
    }
}

fn bench_map_iter(c: &mut Criterion) {
    let avl_map: AvlTreeMap<i64, i64> = random_keys(N).into_iter().map(|k| (k, k)).collect();
    let bt_map: BTreeMap<i64, i64> = random_keys(N).into_iter().map(|k| (k, k)).collect();

    let mut group = c.benchmark_group("map_iter");

    group.bench_function(BenchmarkId::new("AvlTreeMap", N), |b| {
        b.iter(|| black_box(avl_map.iter().fold(0i64, |acc, (_, &v)| acc.wrapping_add(v))));
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter(|| black_box(bt_map.iter().fold(0i64, |acc, (_, &v)| acc.wrapping_add(v))));
    });

    group.finish();
}

criterion_group!(map_benches, bench_map_insert, bench_map_get, bench_map_remove, bench_map_iter,);

criterion_main!(map_benches);
