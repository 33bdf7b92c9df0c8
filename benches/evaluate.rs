use criterion::{Criterion, black_box, criterion_group, criterion_main};
use isbn_confirm::engine::{EngineConfig, QualityScore};
use isbn_confirm::{ConfirmationEngine, RawCandidate};

mod common;

fn bench_evaluate_clean(c: &mut Criterion) {
    let candidate = RawCandidate::with_errors("9780306406157", &[0.1, 0.2, 0.15, 0.3]);
    c.bench_function("evaluate_clean_session", |b| {
        b.iter(|| {
            let mut engine = ConfirmationEngine::new();
            for _ in 0..3 {
                black_box(engine.evaluate(black_box(&candidate)));
            }
        })
    });
}

fn bench_evaluate_noisy(c: &mut Criterion) {
    let reads = common::noisy_session(64);
    let config = EngineConfig {
        stable_required: 64,
        ..EngineConfig::default()
    };
    c.bench_function("evaluate_noisy_64_reads", |b| {
        b.iter(|| {
            let mut engine = ConfirmationEngine::with_config(config.clone());
            for read in &reads {
                black_box(engine.assess(black_box(read)));
            }
        })
    });
}

fn bench_quality_score(c: &mut Criterion) {
    let candidate = RawCandidate::with_errors("9780306406157", &[0.12; 64]);
    c.bench_function("quality_score_64_lines", |b| {
        b.iter(|| QualityScore::from_line_errors(black_box(&candidate.line_errors)))
    });
}

criterion_group!(
    benches,
    bench_evaluate_clean,
    bench_evaluate_noisy,
    bench_quality_score
);
criterion_main!(benches);
