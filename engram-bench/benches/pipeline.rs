//! Engram benchmark suite — pipeline hot paths.
//!
//! Indicative targets on commodity hardware:
//!   quality_assess_single ............ < 5μs
//!   pairwise_similarity .............. < 5μs
//!   rerank_150_candidates ............ < 1ms
//!   consolidation_scan_200_records ... < 50ms (O(n²))

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use engram_core::config::{DedupConfig, QualityConfig, RecallConfig};
use engram_core::consolidation::ConsolidationScanner;
use engram_core::dedup::token_set_similarity;
use engram_core::quality::QualityGate;
use engram_core::recall::RecallReranker;
use engram_core::types::{MemoryRecord, SearchHit};

fn make_hit(i: usize) -> SearchHit {
    let score = 0.95 - (i as f32) * 0.003;
    SearchHit {
        id: format!("m{i}"),
        content: format!(
            "User mentioned preference number {i} about tools and languages used at work"
        ),
        categories: vec![if i % 3 == 0 { "preferences" } else { "work" }.to_string()],
        score,
        created_at: None,
    }
}

fn make_record(i: usize) -> MemoryRecord {
    MemoryRecord {
        id: format!("m{i}"),
        content: format!("User fact {i} concerning projects schedule and daily routine {i}"),
        categories: Vec::new(),
        metadata: None,
        agent_id: None,
        run_id: None,
        created_at: None,
        user_id: "bench".to_string(),
    }
}

/// Benchmark: single quality assessment.
fn bench_quality_assess(c: &mut Criterion) {
    let gate = QualityGate::new(QualityConfig::default());
    c.bench_function("quality_assess_single", |b| {
        b.iter(|| {
            let verdict = gate.assess(
                black_box("User prefers Rust for systems work and plans to learn embedded development"),
                false,
            );
            black_box(verdict);
        });
    });
}

/// Benchmark: one pairwise similarity comparison.
fn bench_pairwise_similarity(c: &mut Criterion) {
    c.bench_function("pairwise_similarity", |b| {
        b.iter(|| {
            let similarity = token_set_similarity(
                black_box("User prefers Python for data science work"),
                black_box("User likes Python for machine learning projects"),
            );
            black_box(similarity);
        });
    });
}

/// Benchmark: rerank 150 over-fetched candidates down to 50.
fn bench_rerank(c: &mut Criterion) {
    let reranker = RecallReranker::new(RecallConfig::default());
    let candidates: Vec<SearchHit> = (0..150).map(make_hit).collect();
    let query = "What tools and languages does the user prefer for work projects?";

    c.bench_function("rerank_150_candidates", |b| {
        b.iter(|| {
            let outcome = reranker.rerank(black_box(query), black_box(&candidates), 50);
            black_box(outcome);
        });
    });
}

/// Benchmark: full O(n²) consolidation scan over 200 records.
fn bench_consolidation_scan(c: &mut Criterion) {
    let scanner = ConsolidationScanner::new(DedupConfig::default());
    let records: Vec<MemoryRecord> = (0..200).map(make_record).collect();

    c.bench_function("consolidation_scan_200_records", |b| {
        b.iter(|| {
            let candidates = scanner.scan(black_box(&records));
            black_box(candidates);
        });
    });
}

criterion_group!(
    benches,
    bench_quality_assess,
    bench_pairwise_similarity,
    bench_rerank,
    bench_consolidation_scan,
);
criterion_main!(benches);
