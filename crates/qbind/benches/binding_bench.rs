//! Criterion micro-benchmarks for query binding.
//!
//! Benchmarks:
//! - Tokenizing with a cold lexer vs. a warm token cache
//! - IN-clause expansion at several collection sizes
//! - Rebinding to the dollar dialect

use std::hint::black_box;
use std::num::NonZeroUsize;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

use qbind::{Arg, BindDialect, Lexer, TokenCache, rebind_with, rewrite_in_with};

const QUERY: &str = "/* list users */ select id, name, email from users \
                     where id in (?) and status = ? and name like '%?%' \
                     order by created_at desc limit ?";

fn criterion_config() -> Criterion {
    Criterion::default().configure_from_args()
}

fn cache() -> TokenCache {
    TokenCache::new(NonZeroUsize::new(1024).unwrap())
}

fn bench_tokenize(c: &mut Criterion) {
    let mut group = c.benchmark_group("tokenize");
    group.throughput(Throughput::Bytes(QUERY.len() as u64));

    group.bench_function("lexer", |b| {
        b.iter(|| Lexer::new(black_box(QUERY)).count());
    });

    let warm = cache();
    warm.tokenize(QUERY);
    group.bench_function("cached", |b| {
        b.iter(|| warm.tokenize(black_box(QUERY)).len());
    });

    group.finish();
}

fn bench_rewrite_in(c: &mut Criterion) {
    let mut group = c.benchmark_group("rewrite_in");
    let cache = cache();
    for n in [1_i64, 16, 256] {
        let ids = Arg::seq(0..n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &ids, |b, ids| {
            b.iter(|| {
                let args = vec![ids.clone(), Arg::from("active"), Arg::from(10)];
                rewrite_in_with(&cache, black_box(QUERY), args)
            });
        });
    }
    group.finish();
}

fn bench_rebind(c: &mut Criterion) {
    let cache = cache();
    c.bench_function("rebind/dollar", |b| {
        b.iter(|| rebind_with(&cache, BindDialect::Dollar, black_box(QUERY)));
    });
}

criterion_group!(
    name = tokenize;
    config = criterion_config();
    targets = bench_tokenize
);

criterion_group!(
    name = binding;
    config = criterion_config();
    targets = bench_rewrite_in, bench_rebind
);

criterion_main!(tokenize, binding);
