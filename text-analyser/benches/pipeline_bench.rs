//! Benchmarks for the analysis pipeline and the heavier analyzers.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use serde_json::json;
use std::hint::black_box;
use std::time::Duration;
use text_analyser::analysis::{LanguageDetector, TextDiff, TextSummarizer};
use text_analyser::prelude::*;
use tokio::runtime::Runtime;

const PARAGRAPH: &str = "Rust gives you control over memory without a garbage collector. \
    The borrow checker catches data races at compile time. Many teams find the \
    learning curve steep but worth it. Cargo makes building and sharing crates easy. \
    Visit https://www.rust-lang.org or ping @rustlang with #rust questions!";

fn corpus(paragraphs: usize) -> String {
    vec![PARAGRAPH; paragraphs].join("\n")
}

fn full_pipeline() -> OperationConfig {
    OperationConfig::new()
        .enable("remove-newlines")
        .enable("extract-urls")
        .enable("extract-hashtags")
        .enable("extract-mentions")
        .enable("count-words")
        .enable("count-sentences")
        .enable("analyze-sentiment")
        .enable("readability")
        .enable("detect-language")
        .configure("summarize", json!({ "sentenceCount": 2 }))
}

fn bench_pipeline(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();

    let mut group = c.benchmark_group("pipeline");
    group.measurement_time(Duration::from_secs(8));

    for paragraphs in [1, 10, 50] {
        let text = corpus(paragraphs);
        group.bench_with_input(
            BenchmarkId::new("full", paragraphs),
            &text,
            |b, text| {
                b.iter(|| {
                    let mut analyser = Analyser::new(black_box(text.as_str()), full_pipeline());
                    rt.block_on(analyser.run()).unwrap()
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("transforms_only", paragraphs),
            &text,
            |b, text| {
                b.iter(|| {
                    let mut analyser = Analyser::create_with_enabled_operations(
                        black_box(text.as_str()),
                        ["remove-punctuation", "remove-extra-spaces", "title-case"],
                    )
                    .unwrap();
                    rt.block_on(analyser.run()).unwrap()
                });
            },
        );
    }

    group.finish();
}

fn bench_analyzers(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyzers");

    let text = corpus(10);
    let summarizer = TextSummarizer::new();
    group.bench_function("summarize", |b| {
        b.iter(|| summarizer.summarize(black_box(&text), 3));
    });

    let detector = LanguageDetector::new();
    group.bench_function("detect_language", |b| {
        b.iter(|| detector.detect(black_box(&text)));
    });

    // quadratic in both inputs
    for len in [32usize, 128, 512] {
        let a: String = PARAGRAPH.chars().cycle().take(len).collect();
        let b: String = PARAGRAPH.chars().rev().cycle().take(len).collect();
        group.bench_with_input(BenchmarkId::new("compare", len), &(a, b), |bench, (a, b)| {
            bench.iter(|| TextDiff::compare(black_box(a), black_box(b)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_pipeline, bench_analyzers);
criterion_main!(benches);
