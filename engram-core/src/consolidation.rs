//! Consolidation scan — surfacing redundant memory pairs for review.
//!
//! Runs the duplicate detector's batch comparison across the entire record
//! set and sorts the resulting pairs so the most obviously redundant ones
//! surface first. The scan only ever reports: merging or deleting is an
//! operator decision carried out through explicit store calls.

use std::cmp::Reverse;

use tracing::debug;

use crate::config::DedupConfig;
use crate::dedup::DuplicateDetector;
use crate::types::{ConsolidationCandidate, MemoryRecord, Score};

/// Batch scanner reusing the pairwise duplicate comparison.
pub struct ConsolidationScanner {
    detector: DuplicateDetector,
}

impl ConsolidationScanner {
    /// Create a scanner with the given deduplication configuration.
    #[must_use]
    pub fn new(config: DedupConfig) -> Self {
        Self {
            detector: DuplicateDetector::new(config),
        }
    }

    /// Scan all records and return merge candidates, most similar first.
    ///
    /// Ties keep the pair-scan order, so output is deterministic for a
    /// given record ordering.
    #[must_use]
    pub fn scan(&self, records: &[MemoryRecord]) -> Vec<ConsolidationCandidate> {
        let mut candidates = self.detector.find_all_pairs(records);
        candidates.sort_by_key(|c| Reverse(Score::new(c.similarity)));

        debug!(
            records = records.len(),
            candidates = candidates.len(),
            "consolidation scan"
        );
        candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, content: &str) -> MemoryRecord {
        MemoryRecord {
            id: id.to_string(),
            content: content.to_string(),
            categories: Vec::new(),
            metadata: None,
            agent_id: None,
            run_id: None,
            created_at: None,
            user_id: "u1".to_string(),
        }
    }

    #[test]
    fn similar_pair_is_reported_and_unrelated_pair_is_not() {
        let scanner = ConsolidationScanner::new(DedupConfig::default());
        let records = vec![
            record("a", "User prefers Python for data science work"),
            record("b", "User prefers Python for data science projects"),
            record("c", "User works at Google"),
            record("d", "User is allergic to peanuts"),
        ];

        let candidates = scanner.scan(&records);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].first_id, "a");
        assert_eq!(candidates[0].second_id, "b");
        assert!(candidates[0].similarity >= 0.75);
    }

    #[test]
    fn candidates_sorted_most_similar_first() {
        let scanner = ConsolidationScanner::new(DedupConfig {
            consolidation_threshold: 0.2,
            ..DedupConfig::default()
        });
        let records = vec![
            record("a", "User drinks espresso every single morning"),
            record("b", "User drinks espresso every single morning"),
            record("c", "User drinks tea some mornings"),
        ];

        let candidates = scanner.scan(&records);
        assert!(candidates.len() >= 2);
        for pair in candidates.windows(2) {
            assert!(pair[0].similarity >= pair[1].similarity);
        }
        // The identical pair leads.
        assert!((candidates[0].similarity - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn no_pair_reported_twice_and_no_self_pairs() {
        let scanner = ConsolidationScanner::new(DedupConfig {
            consolidation_threshold: 0.0,
            ..DedupConfig::default()
        });
        let records = vec![
            record("a", "alpha beta gamma"),
            record("b", "alpha beta delta"),
            record("c", "alpha epsilon zeta"),
        ];

        let candidates = scanner.scan(&records);
        // 3 records → exactly C(3,2) unordered pairs at threshold 0.
        assert_eq!(candidates.len(), 3);
        let mut seen = std::collections::HashSet::new();
        for c in &candidates {
            assert_ne!(c.first_id, c.second_id);
            let key = if c.first_id < c.second_id {
                (c.first_id.clone(), c.second_id.clone())
            } else {
                (c.second_id.clone(), c.first_id.clone())
            };
            assert!(seen.insert(key), "pair reported twice");
        }
    }

    #[test]
    fn empty_and_single_record_sets_produce_nothing() {
        let scanner = ConsolidationScanner::new(DedupConfig::default());
        assert!(scanner.scan(&[]).is_empty());
        assert!(scanner.scan(&[record("a", "only one memory")]).is_empty());
    }
}
