//! Basic benchmarks for the `tagged_pool` package.

#![allow(
    missing_docs,
    reason = "No need for API documentation in benchmark code"
)]

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use tagged_pool::{ItemSpec, Poolable, TaggedPool};

criterion_group!(benches, entrypoint);
criterion_main!(benches);

#[derive(Clone, Copy, Debug, Default)]
struct TestItem {
    visible: bool,
}

impl Poolable for TestItem {
    fn instantiate(&self) -> Self {
        *self
    }

    fn set_active(&mut self, active: bool) {
        self.visible = active;
    }
}

const TAGS: [&str; 8] = [
    "after_image",
    "dust",
    "spark",
    "smoke",
    "splash",
    "decal",
    "shell",
    "flash",
];

fn pool_with(amount: usize, expandable: bool) -> TaggedPool<TestItem> {
    TaggedPool::builder()
        .register_all(TAGS.iter().map(|&tag| {
            ItemSpec::new(tag, TestItem::default())
                .amount(amount)
                .expandable(expandable)
        }))
        .build()
        .unwrap()
}

fn entrypoint(c: &mut Criterion) {
    let mut group = c.benchmark_group("tp_build");

    group.bench_function("empty", |b| {
        b.iter(|| {
            drop(black_box(TaggedPool::<TestItem>::builder().build().unwrap()));
        });
    });

    group.bench_function("eight_tags_of_128", |b| {
        b.iter(|| black_box(pool_with(128, false)));
    });

    group.finish();

    let mut group = c.benchmark_group("tp_churn");

    group.bench_function("get_return_one", |b| {
        let mut pool = pool_with(128, false);

        b.iter(|| {
            let key = pool.get(black_box("spark")).unwrap();
            pool.return_item(key);
        });
    });

    group.bench_function("get_return_half_full", |b| {
        let mut pool = pool_with(128, false);

        // Occupy the first half so every lookup scans past it.
        let _held = (0..64)
            .map(|_| pool.get("spark").unwrap())
            .collect::<Vec<_>>();

        b.iter(|| {
            let key = pool.get(black_box("spark")).unwrap();
            pool.return_item(key);
        });
    });

    group.bench_function("miss_unknown_tag", |b| {
        let mut pool = pool_with(128, false);

        b.iter(|| black_box(pool.get(black_box("unknown"))));
    });

    group.finish();

    let mut group = c.benchmark_group("tp_expand");

    group.bench_function("thousand_from_empty", |b| {
        b.iter(|| {
            let mut pool = pool_with(0, true);

            for _ in 0..1_000 {
                _ = black_box(pool.get("after_image"));
            }

            pool
        });
    });

    group.finish();
}
