use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use tripleq::{
    Aggregating, Constraint, Equality, Value,
    normalization::{after_being, lower_cased},
    recursive::{has_perfect_matching, set},
};

fn words(n: usize, upper: bool) -> Vec<Value> {
    (0..n)
        .map(|i| {
            let word = format!("word{i}");
            Value::str(if upper { word.to_uppercase() } else { word })
        })
        .collect()
}

pub fn matching(c: &mut Criterion) {
    let mut group = c.benchmark_group("matching");

    for n in [1, 5, 10, 50, 100] {
        group.throughput(Throughput::Elements(n));
        let lhs: Vec<usize> = (0..n as usize).collect();
        let rhs: Vec<usize> = lhs.iter().rev().copied().collect();
        group.bench_with_input(BenchmarkId::new("reversed", n), &(lhs, rhs), |b, (l, r)| {
            b.iter(|| has_perfect_matching(black_box(l.as_slice()), black_box(r.as_slice()), |x, y| x == y))
        });
    }
    group.finish();
}

pub fn recursive_set(c: &mut Criterion) {
    let mut group = c.benchmark_group("recursive_set");
    let equality = set(after_being(lower_cased()));

    for n in [1, 5, 10, 50, 100] {
        group.throughput(Throughput::Elements(n));
        let lhs = Value::set(words(n as usize, false));
        let rhs = Value::set(words(n as usize, true).into_iter().rev());
        group.bench_with_input(BenchmarkId::new("lowercased", n), &(lhs, rhs), |b, (l, r)| {
            b.iter(|| equality.are_equal(black_box(l), black_box(r)))
        });
    }
    group.finish();
}

pub fn same_elements(c: &mut Criterion) {
    let mut group = c.benchmark_group("same_elements");
    let agg = Aggregating::new(Constraint::basic(after_being(lower_cased())));

    for n in [1, 5, 10, 50, 100] {
        group.throughput(Throughput::Elements(n));
        let lhs = Value::vector(words(n as usize, false));
        let rhs = Value::list(words(n as usize, true));
        group.bench_with_input(BenchmarkId::new("vector_list", n), &(lhs, rhs), |b, (l, r)| {
            b.iter(|| agg.contains_the_same_elements_as(black_box(l), black_box(r)))
        });
    }
    group.finish();
}

criterion_group!(benches, matching, recursive_set, same_elements);
criterion_main!(benches);
