use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;

use tincan_reset::{create_with_reset, State, Store};

fn wide_state(fields: usize) -> State {
    (0..fields).map(|i| (format!("field{i}"), i as i64)).collect()
}

fn wide_store(fields: usize) -> Store {
    let state = wide_state(fields);
    create_with_reset(move |_| Ok(state.into())).expect("store creation")
}

fn store_creation_benchmark(c: &mut Criterion) {
    c.bench_function("store_creation", |b| {
        b.iter(|| {
            let state = wide_state(black_box(16));
            create_with_reset(move |_| Ok(state.into())).expect("store creation")
        });
    });
}

fn store_write_benchmark(c: &mut Criterion) {
    let store = wide_store(16);

    c.bench_function("store_write", |b| {
        let mut i = 0i64;
        b.iter(|| {
            store.set_state(State::new().with("field0", black_box(i)));
            i += 1;
        });
    });
}

fn reset_store_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("reset_store");

    for fields in [1, 16, 256].iter() {
        let store = wide_store(*fields);

        group.bench_with_input(BenchmarkId::from_parameter(fields), fields, |b, _| {
            b.iter(|| store.reset_store().expect("reset"));
        });
    }
    group.finish();
}

fn reset_state_benchmark(c: &mut Criterion) {
    let store = wide_store(256);

    c.bench_function("reset_state_two_keys", |b| {
        b.iter(|| {
            store
                .reset_state([black_box("field3"), black_box("field200")])
                .expect("reset")
        });
    });
}

fn store_subscribe_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("store_subscribe");

    for subscriber_count in [1, 10, 100].iter() {
        let store = wide_store(4);

        for _ in 0..*subscriber_count {
            store
                .subscribe(|_, _| {
                    // Empty subscriber
                })
                .detach();
        }

        group.bench_with_input(
            BenchmarkId::from_parameter(subscriber_count),
            subscriber_count,
            |b, _| {
                b.iter(|| store.reset_store().expect("reset"));
            },
        );
    }
    group.finish();
}

criterion_group!(
    benches,
    store_creation_benchmark,
    store_write_benchmark,
    reset_store_benchmark,
    reset_state_benchmark,
    store_subscribe_benchmark,
);
criterion_main!(benches);
