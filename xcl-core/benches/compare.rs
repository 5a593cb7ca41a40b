//! Cross-parser comparison benchmarks.
//!
//! Compares XCL against:
//! - serde_json (JSON into `serde_json::Value`)
//! - toml (TOML into `toml::Value`)
//!
//! Each format encodes the same records, and every parser builds a full
//! value tree, so throughput is comparable.
//!
//! Run with: cargo bench --bench compare

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

/// Generate equivalent XCL, JSON and TOML documents with `count` records.
fn generate_documents(count: usize) -> (String, String, String) {
    let mut xcl = String::new();
    let mut json = String::from("{\n");
    let mut toml = String::new();

    for i in 0..count {
        xcl.push_str(&format!(
            "item_{i} = {{ id = {i} name = \"item number {i}\" tags = [\"a\" \"b\"] weight = {i}.25 }}\n"
        ));

        if i > 0 {
            json.push_str(",\n");
        }
        json.push_str(&format!(
            "  \"item_{i}\": {{\"id\": {i}, \"name\": \"item number {i}\", \"tags\": [\"a\", \"b\"], \"weight\": {i}.25}}"
        ));

        toml.push_str(&format!(
            "[item_{i}]\nid = {i}\nname = \"item number {i}\"\ntags = [\"a\", \"b\"]\nweight = {i}.25\n\n"
        ));
    }

    json.push_str("\n}\n");
    (xcl, json, toml)
}

/// Count top-level entries so every parser does the same observable work.
fn parse_xcl(input: &str) -> usize {
    xcl_core::loads(input)
        .ok()
        .and_then(|doc| doc.as_map().map(|map| map.len()))
        .unwrap_or(0)
}

fn parse_json(input: &str) -> usize {
    serde_json::from_str::<serde_json::Value>(input)
        .ok()
        .and_then(|doc| doc.as_object().map(|map| map.len()))
        .unwrap_or(0)
}

fn parse_toml(input: &str) -> usize {
    input
        .parse::<toml::Table>()
        .map(|table| table.len())
        .unwrap_or(0)
}

fn bench_compare(c: &mut Criterion) {
    let mut group = c.benchmark_group("compare");

    for count in [10, 100, 1000] {
        let (xcl, json, toml) = generate_documents(count);
        assert_eq!(parse_xcl(&xcl), count);
        assert_eq!(parse_json(&json), count);
        assert_eq!(parse_toml(&toml), count);

        group.throughput(Throughput::Bytes(xcl.len() as u64));
        group.bench_with_input(BenchmarkId::new("xcl", count), &xcl, |b, input| {
            b.iter(|| parse_xcl(black_box(input)))
        });

        group.throughput(Throughput::Bytes(json.len() as u64));
        group.bench_with_input(BenchmarkId::new("json", count), &json, |b, input| {
            b.iter(|| parse_json(black_box(input)))
        });

        group.throughput(Throughput::Bytes(toml.len() as u64));
        group.bench_with_input(BenchmarkId::new("toml", count), &toml, |b, input| {
            b.iter(|| parse_toml(black_box(input)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_compare);
criterion_main!(benches);
