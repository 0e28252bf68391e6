//! Benchmarks for ranking metrics and tree evaluation.
//!
//! Run with: `cargo bench -p rankeval-core --bench metrics`
//!
//! These benchmarks measure:
//! - Each metric over result lists of increasing length
//! - A full `evaluate` pass over a batch of queries with chunked results

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rankeval_core::evaluation::NoopSink;
use rankeval_core::{
    Document, EvaluatorConfig, MetricKind, MetricParams, RankedItem, RankingEvaluator,
    TraversalSpec,
};
use std::sync::Arc;

// =============================================================================
// Test Data Generation
// =============================================================================

/// Ranked list where every third item is relevant, with decreasing scores.
fn ranked_items(len: usize) -> (Vec<RankedItem>, Vec<RankedItem>) {
    let actual = (0..len)
        .map(|i| RankedItem::graded(i as i64, 1.0 - i as f64 / len as f64))
        .collect();
    let desired = (0..len)
        .step_by(3)
        .map(|i| RankedItem::graded(i as i64, (i % 4) as f64))
        .collect();
    (actual, desired)
}

/// `queries` roots, each with `chunks` chunks holding `matches` ranked matches.
fn document_batch(queries: usize, chunks: usize, matches: usize) -> (Vec<Document>, Vec<Document>) {
    let build = |offset: i64| {
        (0..queries)
            .map(|_| {
                Document::new().with_chunks(
                    (0..chunks)
                        .map(|_| {
                            Document::new().with_matches(
                                (0..matches as i64)
                                    .map(|id| {
                                        Document::new()
                                            .with_tag("id", id * offset)
                                            .with_score("relevance", 1.0 / (id + 1) as f64)
                                    })
                                    .collect(),
                            )
                        })
                        .collect(),
                )
            })
            .collect::<Vec<_>>()
    };
    (build(1), build(2))
}

// =============================================================================
// Benchmarks
// =============================================================================

fn bench_metrics_varying_length(c: &mut Criterion) {
    let mut group = c.benchmark_group("metrics");
    let params = MetricParams {
        eval_at: Some(10),
        ..MetricParams::default()
    };

    for len in [10, 100, 1000] {
        let (actual, desired) = ranked_items(len);
        group.throughput(Throughput::Elements(len as u64));

        for kind in MetricKind::ALL {
            let metric = kind.function();
            group.bench_with_input(BenchmarkId::new(kind.as_str(), len), &len, |b, _| {
                b.iter(|| metric(black_box(&actual), black_box(&desired), black_box(&params)))
            });
        }
    }

    group.finish();
}

fn bench_evaluate_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate");
    let spec = TraversalSpec::parse("r,c").unwrap();

    for queries in [10, 100] {
        let (docs, truths) = document_batch(queries, 4, 20);
        let config = EvaluatorConfig::new(MetricKind::Ndcg)
            .with_eval_at(10)
            .with_attribute_fields(["tags__id", "scores__relevance__value"]);
        let evaluator = RankingEvaluator::with_sink(config, Arc::new(NoopSink)).unwrap();

        group.throughput(Throughput::Elements(queries as u64));
        group.bench_with_input(BenchmarkId::new("ndcg_r_c", queries), &queries, |b, _| {
            b.iter_batched(
                || docs.clone(),
                |mut docs| {
                    evaluator
                        .evaluate(Some(docs.as_mut_slice()), Some(truths.as_slice()), Some(&spec))
                        .unwrap();
                    docs
                },
                criterion::BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

criterion_group!(benches, bench_metrics_varying_length, bench_evaluate_batch);
criterion_main!(benches);
