//! Benchmarks for XCL lexing and parsing.
//!
//! Run with: cargo bench --bench parse

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use xcl_core::{lex, loads};

/// Flat document of `count` scalar assignments.
fn flat_document(count: usize) -> String {
    let mut doc = String::new();
    for i in 0..count {
        doc.push_str(&format!("key_{i} = {i}\n"));
        doc.push_str(&format!("name_{i} = \"value number {i}\"\n"));
        doc.push_str(&format!("ratio_{i} = {i}.5\n"));
    }
    doc
}

/// Document of `count` sections, each a dict holding lists.
fn nested_document(count: usize) -> String {
    let mut doc = String::new();
    for i in 0..count {
        doc.push_str(&format!(
            "section_{i} = {{\n  enabled = true\n  ports = [80, 443, {i}]\n  matrix = [[1 2] [3 4]]\n  note = |\"\n    first line\n    second line\n  \"\n}}\n"
        ));
    }
    doc
}

fn bench_lex(c: &mut Criterion) {
    let mut group = c.benchmark_group("lex");
    for count in [10, 100, 1000] {
        let input = flat_document(count);
        group.throughput(Throughput::Bytes(input.len() as u64));
        group.bench_with_input(BenchmarkId::new("flat", count), &input, |b, input| {
            b.iter(|| lex(black_box(input)).count())
        });
    }
    group.finish();
}

fn bench_loads(c: &mut Criterion) {
    let mut group = c.benchmark_group("loads");
    for count in [10, 100, 1000] {
        let flat = flat_document(count);
        group.throughput(Throughput::Bytes(flat.len() as u64));
        group.bench_with_input(BenchmarkId::new("flat", count), &flat, |b, input| {
            b.iter(|| loads(black_box(input)))
        });

        let nested = nested_document(count);
        group.throughput(Throughput::Bytes(nested.len() as u64));
        group.bench_with_input(BenchmarkId::new("nested", count), &nested, |b, input| {
            b.iter(|| loads(black_box(input)))
        });
    }
    group.finish();
}

fn bench_simple(c: &mut Criterion) {
    let mut group = c.benchmark_group("loads_simple");

    group.bench_function("empty", |b| b.iter(|| loads(black_box(""))));

    let example = "name = \"foo\"\nls = [1, 2, 3,]\np = { tl = [1 2] br = [3 4] }\n";
    group.throughput(Throughput::Bytes(example.len() as u64));
    group.bench_function("example", |b| b.iter(|| loads(black_box(example))));

    group.finish();
}

criterion_group!(benches, bench_lex, bench_loads, bench_simple);
criterion_main!(benches);
