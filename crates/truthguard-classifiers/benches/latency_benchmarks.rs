//! Latency benchmarks for the pre- and post-processing around the graph
//!
//! Tokenization dominates the non-model cost of a request; calibration is
//! included as a baseline.
//!
//! Run with: cargo bench -p truthguard-classifiers

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::path::PathBuf;

use truthguard_classifiers::{calibrate, TextTokenizer, TokenizerConfig};

fn fixture_tokenizer() -> TextTokenizer {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/tokenizer.json");
    TextTokenizer::from_file(path, &TokenizerConfig::default())
        .expect("Failed to load fixture tokenizer")
}

/// Benchmark tokenization at different input sizes
fn benchmark_tokenize(c: &mut Criterion) {
    let tokenizer = fixture_tokenizer();

    let sentence = "The report says the earth is flat and the moon is made of cheese.";
    let test_cases = vec![
        ("empty", String::new()),
        ("sentence", sentence.to_string()),
        ("article", sentence.repeat(20)),
        ("truncated", sentence.repeat(200)),
    ];

    let mut group = c.benchmark_group("Tokenizer");
    group.sample_size(100);

    for (name, text) in &test_cases {
        group.bench_with_input(BenchmarkId::new("tokenize", name), text, |b, text| {
            b.iter(|| tokenizer.tokenize(black_box(text)).unwrap());
        });
    }

    group.finish();
}

fn benchmark_calibrate(c: &mut Criterion) {
    c.bench_function("calibrate", |b| {
        b.iter(|| {
            for logit in [-50.0, -3.0, 0.0, 3.0, 50.0] {
                black_box(calibrate(black_box(logit)));
            }
        });
    });
}

criterion_group!(benches, benchmark_tokenize, benchmark_calibrate);
criterion_main!(benches);
