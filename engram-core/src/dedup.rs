//! Duplicate detection — pairwise similarity over memory text.
//!
//! Similarity is token-set overlap (Jaccard): stable, explainable, symmetric
//! and bounded to `[0, 1]`. The same comparison serves two thresholds: a
//! strict write-time gate that suppresses near-duplicate writes, and a looser
//! consolidation band that surfaces existing pairs worth a merge review.
//!
//! Everything here is read-only. Merging and deletion stay with the operator
//! through explicit store calls.

use std::collections::HashSet;

use tracing::debug;

use crate::config::DedupConfig;
use crate::types::{ConsolidationCandidate, DuplicateVerdict, MemoryRecord, SearchHit};

/// Token-set overlap ratio between two texts.
///
/// Tokens are lowercased whitespace-delimited words. Returns 0.0 when either
/// side has no tokens; identical token sets yield 1.0. Symmetric by
/// construction.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn token_set_similarity(first: &str, second: &str) -> f32 {
    let tokens_a: HashSet<String> = first
        .to_lowercase()
        .split_whitespace()
        .map(ToString::to_string)
        .collect();
    let tokens_b: HashSet<String> = second
        .to_lowercase()
        .split_whitespace()
        .map(ToString::to_string)
        .collect();

    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0.0;
    }

    let intersection = tokens_a.intersection(&tokens_b).count();
    let union = tokens_a.union(&tokens_b).count();

    intersection as f32 / union as f32
}

/// Write-time and batch duplicate detector.
pub struct DuplicateDetector {
    config: DedupConfig,
}

impl DuplicateDetector {
    /// Create a detector with the given configuration.
    #[must_use]
    pub fn new(config: DedupConfig) -> Self {
        Self { config }
    }

    /// Check a candidate against existing records before a write.
    ///
    /// The verdict carries the highest similarity observed and, when that
    /// similarity reaches the write-time threshold, the matched record so
    /// the caller can suggest an update instead.
    #[must_use]
    pub fn check_duplicate(&self, candidate: &str, existing: &[SearchHit]) -> DuplicateVerdict {
        let mut best_similarity = 0.0_f32;
        let mut best_match: Option<&SearchHit> = None;

        for hit in existing {
            let similarity = token_set_similarity(candidate, &hit.content);
            if similarity > best_similarity {
                best_similarity = similarity;
                best_match = Some(hit);
            }
        }

        let is_duplicate = best_similarity >= self.config.duplicate_threshold;
        if is_duplicate {
            debug!(
                similarity = best_similarity,
                matched_id = best_match.map(|h| h.id.as_str()),
                "write suppressed: near-duplicate"
            );
        }

        DuplicateVerdict {
            is_duplicate,
            similarity: best_similarity,
            matched_id: is_duplicate.then(|| best_match.map(|h| h.id.clone())).flatten(),
            matched_content: is_duplicate
                .then(|| best_match.map(|h| h.content.clone()))
                .flatten(),
        }
    }

    /// Compare every pair of existing records against the consolidation
    /// threshold.
    ///
    /// O(n²) over the record set. Each unordered pair is reported at most
    /// once and records are never compared against themselves. Comparisons
    /// are independent, so the scan can be interrupted between pairs with
    /// no correctness impact.
    #[must_use]
    pub fn find_all_pairs(&self, records: &[MemoryRecord]) -> Vec<ConsolidationCandidate> {
        let mut candidates = Vec::new();

        for (i, first) in records.iter().enumerate() {
            for second in records.iter().skip(i + 1) {
                let similarity = token_set_similarity(&first.content, &second.content);
                if similarity >= self.config.consolidation_threshold {
                    candidates.push(ConsolidationCandidate {
                        first_id: first.id.clone(),
                        first_content: first.content.clone(),
                        second_id: second.id.clone(),
                        second_content: second.content.clone(),
                        similarity,
                    });
                }
            }
        }

        debug!(
            records = records.len(),
            pairs = candidates.len(),
            "consolidation pair scan complete"
        );
        candidates
    }
}
