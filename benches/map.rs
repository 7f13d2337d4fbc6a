//! Benchmarks for observable-map
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use observable_map::ObservableMap;

// =============================================================================
// SET BENCHMARKS
// =============================================================================

fn bench_set_new_key(c: &mut Criterion) {
    c.bench_function("set_new_key", |b| {
        let mut map: ObservableMap<u64, u64> = ObservableMap::new();
        let mut i = 0u64;
        b.iter(|| {
            map.set(black_box(i), 1);
            i += 1;
        })
    });
}

fn bench_set_same_value(c: &mut Criterion) {
    let mut map: ObservableMap<u64, u64> = ObservableMap::new();
    map.set(1, 42);
    let _sub = map.on_event().subscribe(|e| {
        black_box(e);
    });
    c.bench_function("set_same_value", |b| {
        b.iter(|| {
            map.set(1, black_box(42));
        })
    });
}

fn bench_set_changed_with_observers(c: &mut Criterion) {
    let mut group = c.benchmark_group("set_changed_observers");
    for observers in [0usize, 1, 4, 16] {
        let mut map: ObservableMap<u64, u64> = ObservableMap::new();
        map.set(1, 1);
        let subs: Vec<_> = (0..observers)
            .map(|_| {
                map.on_changed().subscribe(|e| {
                    black_box(e);
                })
            })
            .collect();

        group.bench_with_input(BenchmarkId::from_parameter(observers), &observers, |b, _| {
            let mut v = 2u64;
            b.iter(|| {
                map.set(1, v);
                v += 1;
            })
        });
        drop(subs);
    }
    group.finish();
}

// =============================================================================
// DELETE / CLEAR BENCHMARKS
// =============================================================================

fn bench_delete_front(c: &mut Criterion) {
    let mut group = c.benchmark_group("delete_front");
    for size in [16u64, 256, 4096] {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter_batched(
                || (0..size).map(|k| (k, k + 1)).collect::<ObservableMap<u64, u64>>(),
                |mut map| {
                    black_box(map.delete(&0));
                    map
                },
                criterion::BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_clear(c: &mut Criterion) {
    c.bench_function("clear_1000_with_observer", |b| {
        b.iter_batched(
            || {
                let map: ObservableMap<u64, u64> = (0..1000).map(|k| (k, k + 1)).collect();
                map
            },
            |mut map| {
                let _sub = map.on_removed().subscribe(|e| {
                    black_box(e);
                });
                map.clear();
            },
            criterion::BatchSize::SmallInput,
        )
    });
}

// =============================================================================
// QUERY BENCHMARKS
// =============================================================================

fn bench_get(c: &mut Criterion) {
    let map: ObservableMap<u64, u64> = (0..1000).map(|k| (k, k)).collect();
    c.bench_function("get", |b| b.iter(|| black_box(map.get(&black_box(500)))));
}

fn bench_iterate(c: &mut Criterion) {
    let map: ObservableMap<u64, u64> = (0..1000).map(|k| (k, k)).collect();
    c.bench_function("iterate_values_1000", |b| {
        b.iter(|| black_box(map.values().sum::<u64>()))
    });
}

// =============================================================================
// CRITERION SETUP
// =============================================================================

criterion_group!(
    write_benches,
    bench_set_new_key,
    bench_set_same_value,
    bench_set_changed_with_observers,
    bench_delete_front,
    bench_clear,
);

criterion_group!(read_benches, bench_get, bench_iterate);

criterion_main!(write_benches, read_benches);
