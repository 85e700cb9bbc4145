//! Benchmarks for parsing and resolving bang expressions
//!
//! Run with: cargo bench

use criterion::{Criterion, criterion_group, criterion_main};
use bang_history::domain::{ExpansionParser, HistoryConfig, MemoryHistoryStore, resolve};
use std::hint::black_box;

fn full_store() -> MemoryHistoryStore {
    let store = MemoryHistoryStore::new(&HistoryConfig::default());
    for i in 0..500 {
        store.push("chan", &format!("kubectl get pods -n team-{i}"));
    }
    store
}

fn benchmark_parse(c: &mut Criterion) {
    let parser = ExpansionParser::new();
    let mut group = c.benchmark_group("parse");

    for body in ["!", "-42", "kubectl", "?team-250", "not an expression", "17:p"] {
        group.bench_function(body, |b| b.iter(|| parser.parse(black_box(body))));
    }

    group.finish();
}

fn benchmark_resolve(c: &mut Criterion) {
    let parser = ExpansionParser::new();
    let record = full_store().record("chan");
    let mut group = c.benchmark_group("resolve");

    for body in ["!", "1", "-1", "kubectl", "?team-499", "?missing"] {
        let expression = parser.parse(body).expression;
        group.bench_function(body, |b| {
            b.iter(|| resolve(black_box("chan"), record.as_ref(), black_box(&expression)))
        });
    }

    group.finish();
}

fn benchmark_append(c: &mut Criterion) {
    c.bench_function("append_at_capacity", |b| {
        let store = full_store();
        b.iter(|| store.push(black_box("chan"), black_box("ls -la")));
    });
}

criterion_group!(benches, benchmark_parse, benchmark_resolve, benchmark_append);
criterion_main!(benches);
