use criterion::{Criterion, black_box, criterion_group, criterion_main};
use isbn_confirm::EngineConfig;
use isbn_confirm::tools::{parse_trace, replay};

mod common;

fn bench_replay(c: &mut Criterion) {
    let reads = common::noisy_session(1000);
    let config = EngineConfig::default();
    c.bench_function("replay_1000_reads", |b| {
        b.iter(|| replay(black_box(&reads), black_box(&config)))
    });
}

fn bench_parse_trace(c: &mut Criterion) {
    let text: String = common::noisy_session(1000)
        .iter()
        .filter_map(|r| serde_json::to_string(r).ok())
        .map(|line| line + "\n")
        .collect();
    c.bench_function("parse_trace_1000_lines", |b| {
        b.iter(|| parse_trace(black_box(&text)))
    });
}

criterion_group!(benches, bench_replay, bench_parse_trace);
criterion_main!(benches);
