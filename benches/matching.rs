//! Benchmarks for NFA compilation and matching.
//!
//! The pathological group documents the linear-time guarantee: doubling the
//! input length should roughly double the match time, where a backtracking
//! engine would go exponential.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use antimirov::{Nfa, Rx};

const EMAIL_PATTERN: &str = r"[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,6}";

fn bench_pathological(c: &mut Criterion) {
    let rx = Rx::parse("(o*)*a").unwrap();
    let nfa = Nfa::from_rx(&rx).unwrap();

    for n in [64usize, 256, 1024] {
        let input = "o".repeat(n);
        c.bench_function(&format!("pathological_{}_os", n), |b| {
            b.iter(|| nfa.rejects(black_box(&input)))
        });
    }
}

fn bench_email_match(c: &mut Criterion) {
    let rx = Rx::parse(EMAIL_PATTERN).unwrap();
    let nfa = Nfa::from_rx(&rx).unwrap();

    c.bench_function("email_accept", |b| {
        b.iter(|| nfa.accepts(black_box("erik@osheim.org")))
    });
    c.bench_function("email_reject", |b| {
        b.iter(|| nfa.accepts(black_box("erik@osheim.org.")))
    });
}

fn bench_compile(c: &mut Criterion) {
    c.bench_function("compile_email", |b| {
        b.iter(|| {
            let rx = Rx::parse(black_box(EMAIL_PATTERN)).unwrap();
            Nfa::from_rx(&rx).unwrap()
        })
    });
}

criterion_group!(
    benches,
    bench_pathological,
    bench_email_match,
    bench_compile
);
criterion_main!(benches);
