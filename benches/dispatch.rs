// SPDX-License-Identifier: MPL-2.0
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use std::time::Duration;
use toast_hub::store::{ManualScheduler, NotificationInput, StoreOptions, ToastHub};

fn dispatch_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch");

    group.bench_function("notify_at_capacity", |b| {
        let options = StoreOptions::new(3, Duration::from_millis(3000)).unwrap();
        let hub = ToastHub::with_scheduler(options, ManualScheduler::new());
        b.iter(|| {
            let handle = hub.notify(black_box(NotificationInput::new().title("bench")));
            black_box(handle.id());
        });
    });

    group.bench_function("notify_dismiss_remove_cycle", |b| {
        let scheduler = ManualScheduler::new();
        let options = StoreOptions::new(3, Duration::from_millis(3000)).unwrap();
        let hub = ToastHub::with_scheduler(options, scheduler.clone());
        b.iter(|| {
            let handle = hub.notify(NotificationInput::new().title("bench"));
            handle.dismiss();
            scheduler.fire_all();
            black_box(hub.snapshot().len());
        });
    });

    group.bench_function("snapshot_with_observer", |b| {
        let options = StoreOptions::new(3, Duration::from_millis(3000)).unwrap();
        let hub = ToastHub::with_scheduler(options, ManualScheduler::new());
        let _subscription = hub.subscribe(|state| {
            black_box(state.len());
        });
        b.iter(|| {
            hub.notify(black_box(NotificationInput::new()));
        });
    });

    group.finish();
}

criterion_group!(benches, dispatch_benchmark);
criterion_main!(benches);
