//! Proactive recall — hybrid semantic + lexical reranking.
//!
//! The store's semantic search is good at meaning but blind to exact
//! vocabulary; live conversations reward both. The reranker over-fetches
//! candidates, boosts each candidate's semantic score by the distinct query
//! keywords its content contains, and formats the survivors into a grouped
//! context block ready for prompt injection.
//!
//!   hybrid = semantic × (1 + boost × matched_keywords)
//!
//! A candidate with zero keyword matches keeps its raw semantic score, so
//! the boost can only promote, never bury.

pub mod keywords;

use std::cmp::Reverse;

use tracing::debug;

use crate::config::RecallConfig;
use crate::types::{RankedMemory, RecallOutcome, Score, SearchHit};

/// Category bucket for memories without labels.
const UNCATEGORIZED: &str = "uncategorized";

/// Reranks over-fetched semantic candidates for a live conversation.
pub struct RecallReranker {
    config: RecallConfig,
}

impl RecallReranker {
    /// Create a reranker with the given configuration.
    #[must_use]
    pub fn new(config: RecallConfig) -> Self {
        Self { config }
    }

    /// How many candidates to request from the store for a desired result
    /// count. The over-fetch factor is process configuration, never a
    /// caller choice.
    #[must_use]
    pub fn overfetch_limit(&self, max_results: usize) -> usize {
        max_results.saturating_mul(self.config.overfetch_factor)
    }

    /// Build the combined query: the current message first, then recent
    /// turns most-recent-first (callers supply `recent` in chronological
    /// order).
    #[must_use]
    pub fn build_query(current_message: &str, recent: &[String]) -> String {
        let mut parts = Vec::with_capacity(recent.len() + 1);
        parts.push(current_message.trim());
        for turn in recent.iter().rev() {
            parts.push(turn.trim());
        }
        parts.retain(|p| !p.is_empty());
        parts.join("\n")
    }

    /// Rerank candidates against the combined query and truncate to
    /// `max_results`.
    ///
    /// Ordering is deterministic: descending hybrid score, ties broken by
    /// the store's original semantic rank (earlier wins). When the store
    /// returned fewer candidates than requested, whatever exists is
    /// returned — never an error.
    #[must_use]
    pub fn rerank(
        &self,
        query: &str,
        candidates: &[SearchHit],
        max_results: usize,
    ) -> RecallOutcome {
        let query_keywords = keywords::extract_keywords(query, &self.config.stop_words);
        let candidates_searched = candidates.len();

        let mut ranked: Vec<RankedMemory> = candidates
            .iter()
            .enumerate()
            .map(|(semantic_rank, hit)| {
                let keyword_matches = self.count_matches(&hit.content, &query_keywords);
                #[allow(clippy::cast_precision_loss)]
                let boost = 1.0 + self.config.keyword_boost * keyword_matches as f32;
                RankedMemory {
                    id: hit.id.clone(),
                    content: hit.content.clone(),
                    categories: hit.categories.clone(),
                    semantic_score: hit.score,
                    keyword_matches,
                    hybrid_score: hit.score * boost,
                    semantic_rank,
                }
            })
            .collect();

        ranked.sort_by_key(|m| (Reverse(Score::new(m.hybrid_score)), m.semantic_rank));
        ranked.truncate(max_results);

        debug!(
            keywords = query_keywords.len(),
            candidates_searched,
            returned = ranked.len(),
            "recall rerank"
        );

        RecallOutcome {
            context_text: format_context(&ranked),
            memories: ranked,
            candidates_searched,
        }
    }

    /// Count distinct query keywords present in the candidate content.
    fn count_matches(&self, content: &str, query_keywords: &[String]) -> usize {
        let content_lower = content.to_lowercase();
        if self.config.whole_word_matching {
            let content_words: Vec<String> =
                keywords::extract_keywords(&content_lower, &[]);
            query_keywords
                .iter()
                .filter(|k| content_words.iter().any(|w| w == *k))
                .count()
        } else {
            query_keywords
                .iter()
                .filter(|k| content_lower.contains(k.as_str()))
                .count()
        }
    }
}

/// Render ranked memories as a grouped, human-readable context block.
///
/// Memories are grouped by their first category label (or an
/// "uncategorized" bucket); groups appear in the order of their
/// best-ranked member, and bullets within a group stay in descending
/// hybrid-score order.
#[must_use]
pub fn format_context(ranked: &[RankedMemory]) -> String {
    if ranked.is_empty() {
        return String::new();
    }

    let mut groups: Vec<(&str, Vec<&RankedMemory>)> = Vec::new();
    for memory in ranked {
        let label = memory
            .categories
            .first()
            .map_or(UNCATEGORIZED, String::as_str);
        match groups.iter_mut().find(|(l, _)| *l == label) {
            Some((_, members)) => members.push(memory),
            None => groups.push((label, vec![memory])),
        }
    }

    let mut out = String::new();
    for (label, members) in groups {
        out.push_str("### ");
        out.push_str(label);
        out.push('\n');
        for memory in members {
            out.push_str("- ");
            out.push_str(&memory.content);
            out.push('\n');
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(id: &str, content: &str, categories: &[&str], score: f32) -> SearchHit {
        SearchHit {
            id: id.to_string(),
            content: content.to_string(),
            categories: categories.iter().map(ToString::to_string).collect(),
            score,
            created_at: None,
        }
    }

    fn reranker() -> RecallReranker {
        RecallReranker::new(RecallConfig::default())
    }

    #[test]
    fn overfetch_is_three_times_requested() {
        assert_eq!(reranker().overfetch_limit(10), 30);
        assert_eq!(reranker().overfetch_limit(0), 0);
    }

    #[test]
    fn query_puts_current_message_first_then_most_recent() {
        let recent = vec!["oldest turn".to_string(), "newest turn".to_string()];
        let query = RecallReranker::build_query("current", &recent);
        assert_eq!(query, "current\nnewest turn\noldest turn");
    }

    #[test]
    fn keyword_overlap_wins_at_equal_semantic_score() {
        let candidates = vec![
            hit("m1", "User lives in Chicago", &["location"], 0.8),
            hit("m2", "User loves pizza for dinner", &["food"], 0.8),
        ];

        let outcome = reranker().rerank(
            "What should I eat for dinner tonight? I'm really hungry",
            &candidates,
            2,
        );

        assert_eq!(outcome.memories[0].id, "m2");
        assert!(outcome.memories[0].keyword_matches >= 1);
        assert_eq!(outcome.memories[1].id, "m1");
    }

    #[test]
    fn zero_matches_keeps_raw_semantic_score() {
        let candidates = vec![hit("m1", "User collects vintage stamps", &[], 0.73)];
        let outcome = reranker().rerank("completely unrelated query about databases", &candidates, 5);

        assert_eq!(outcome.memories[0].keyword_matches, 0);
        assert!(
            (outcome.memories[0].hybrid_score - outcome.memories[0].semantic_score).abs()
                < f32::EPSILON
        );
    }

    #[test]
    fn exact_score_tie_preserves_semantic_rank() {
        let candidates = vec![
            hit("first", "completely unrelated one", &[], 0.5),
            hit("second", "completely unrelated two", &[], 0.5),
        ];
        let outcome = reranker().rerank("query with no overlap here", &candidates, 2);
        assert_eq!(outcome.memories[0].id, "first");
        assert_eq!(outcome.memories[1].id, "second");
    }

    #[test]
    fn truncates_to_max_results_after_reranking() {
        let candidates: Vec<SearchHit> = (0u16..9)
            .map(|i| hit(&format!("m{i}"), "some stored fact", &[], 0.9 - f32::from(i) * 0.05))
            .collect();

        let outcome = reranker().rerank("anything", &candidates, 3);
        assert_eq!(outcome.memories.len(), 3);
        assert_eq!(outcome.candidates_searched, 9);
        // Descending order invariant.
        for pair in outcome.memories.windows(2) {
            assert!(pair[0].hybrid_score >= pair[1].hybrid_score);
        }
    }

    #[test]
    fn fewer_candidates_than_requested_is_fine() {
        let candidates = vec![hit("m1", "User plays chess", &[], 0.9)];
        let outcome = reranker().rerank("chess openings", &candidates, 10);
        assert_eq!(outcome.memories.len(), 1);
        assert_eq!(outcome.candidates_searched, 1);
    }

    #[test]
    fn context_groups_by_category_with_uncategorized_bucket() {
        let candidates = vec![
            hit("m1", "User loves pizza", &["food"], 0.9),
            hit("m2", "User hates cilantro", &["food"], 0.8),
            hit("m3", "User plays chess", &[], 0.7),
        ];
        let outcome = reranker().rerank("no keyword overlap whatsoever", &candidates, 3);

        let expected = "### food\n- User loves pizza\n- User hates cilantro\n\
                        ### uncategorized\n- User plays chess\n";
        assert_eq!(outcome.context_text, expected);
    }

    #[test]
    fn whole_word_matching_rejects_substrings() {
        let strict = RecallReranker::new(RecallConfig {
            whole_word_matching: true,
            ..RecallConfig::default()
        });

        let candidates = vec![hit("m1", "User studies pineapples", &[], 0.8)];
        // "pine" is a substring of "pineapples" but not a whole word.
        let outcome = strict.rerank("pine furniture", &candidates, 1);
        assert_eq!(outcome.memories[0].keyword_matches, 0);

        let loose = reranker();
        let outcome = loose.rerank("pine furniture", &candidates, 1);
        assert_eq!(outcome.memories[0].keyword_matches, 1);
    }

    #[test]
    fn empty_candidate_set_produces_empty_outcome() {
        let outcome = reranker().rerank("anything", &[], 5);
        assert!(outcome.memories.is_empty());
        assert!(outcome.context_text.is_empty());
        assert_eq!(outcome.candidates_searched, 0);
    }
}
