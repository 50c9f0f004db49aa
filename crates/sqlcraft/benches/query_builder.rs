use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use sqlcraft::{BuildResult, QueryBuilder, WithBuilder};

/// Build a query with `n` columns and `n` equality predicates:
/// SELECT col0, col1, ... FROM t WHERE col0 = ? AND col1 = ? ...
fn build_select(n: usize) -> BuildResult<QueryBuilder> {
    let mut qb = QueryBuilder::table("t");
    for i in 0..n {
        qb = qb.column(format!("col{i}"));
    }
    for i in 0..n {
        qb = qb.col(format!("col{i}")).eq(i as i64)?.and();
    }
    Ok(qb)
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("query_builder/build");

    for n in [1, 5, 10, 50, 100] {
        let qb = build_select(n).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(n), &qb, |b, qb| {
            b.iter(|| black_box(qb.build()));
        });
    }

    group.finish();
}

fn bench_construct_and_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("query_builder/construct_and_build");

    for n in [1, 5, 10, 50, 100] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| {
                let qb = build_select(n).unwrap();
                black_box(qb.build());
            });
        });
    }

    group.finish();
}

fn bench_in_list_expansion(c: &mut Criterion) {
    let mut group = c.benchmark_group("query_builder/in_list");

    for n in [5, 20, 100, 500] {
        let values: Vec<i64> = (0..n).collect();
        group.bench_with_input(BenchmarkId::from_parameter(n), &values, |b, values| {
            b.iter(|| {
                let qb = QueryBuilder::table("t")
                    .col("id")
                    .in_list(values.clone())
                    .unwrap()
                    .end();
                black_box((qb.build(), qb.bind_values()));
            });
        });
    }

    group.finish();
}

fn bench_cte(c: &mut Criterion) {
    let mut group = c.benchmark_group("query_builder/cte");

    for n in [1, 5, 10, 50] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| {
                let inner = build_select(n).unwrap();
                let cte = WithBuilder::new("c", inner);
                black_box((cte.build(), cte.bind_values()));
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_build,
    bench_construct_and_build,
    bench_in_list_expansion,
    bench_cte
);
criterion_main!(benches);
