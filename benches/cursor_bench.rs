use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use lazycursor::{ExecutionEngine, MemoryResultSet, PushAdapter, RowShape, Value, Window};

fn result_set(rows: i64) -> MemoryResultSet {
    MemoryResultSet::new(
        vec!["id".into(), "name".into(), "score".into()],
        (0..rows)
            .map(|i| {
                vec![
                    Value::Integer(i),
                    Value::Text(format!("row{}", i)),
                    Value::Float(i as f64 * 0.5),
                ]
            })
            .collect(),
    )
}

fn bench_full_scan(c: &mut Criterion) {
    let engine = ExecutionEngine::new();
    let mut group = c.benchmark_group("full_scan");

    for size in [1_000i64, 10_000, 100_000] {
        group.bench_with_input(BenchmarkId::new("pull", size), &size, |b, &size| {
            b.iter_batched(
                || result_set(size),
                |rs| {
                    let mut cursor = engine.scan(rs, RowShape::All, None);
                    let mut count = 0usize;
                    for row in cursor.iterator().unwrap() {
                        black_box(row.unwrap());
                        count += 1;
                    }
                    count
                },
                criterion::BatchSize::LargeInput,
            );
        });

        group.bench_with_input(BenchmarkId::new("push_adapter", size), &size, |b, &size| {
            b.iter_batched(
                || result_set(size),
                |rs| {
                    let mut cursor =
                        engine.open_cursor(PushAdapter::<MemoryResultSet>::new(), RowShape::All, rs, None);
                    cursor.iterator().unwrap().count()
                },
                criterion::BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

fn bench_deep_offset(c: &mut Criterion) {
    let engine = ExecutionEngine::new();

    c.bench_function("offset_90k_limit_100", |b| {
        b.iter_batched(
            || result_set(100_000),
            |rs| {
                let mut cursor =
                    engine.scan(rs, RowShape::columns([0]), Some(Window::new(90_000, 100)));
                cursor.iterator().unwrap().count()
            },
            criterion::BatchSize::LargeInput,
        );
    });
}

criterion_group!(benches, bench_full_scan, bench_deep_offset);
criterion_main!(benches);
