//! Core type definitions shared across the pipeline and the store.

use chrono::{DateTime, Utc};
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// A single stored memory, as held by the external store.
///
/// The pipeline only ever works on transient copies of these; the store owns
/// the canonical record and its lifecycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryRecord {
    /// Opaque identifier assigned by the store.
    pub id: String,
    /// The memory text itself.
    pub content: String,
    /// Category labels attached at creation. Insertion order is not
    /// significant; labels are immutable except through an explicit update.
    #[serde(default)]
    pub categories: Vec<String>,
    /// Arbitrary structured metadata (capture timestamp, kind tags, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
    /// Agent that created the record, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_id: Option<String>,
    /// Run / session the record belongs to, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_id: Option<String>,
    /// When the store created the record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Owner of the record.
    pub user_id: String,
}

/// A semantically-ranked search result returned by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    /// Identifier of the matched record.
    pub id: String,
    /// Content of the matched record.
    pub content: String,
    /// Category labels of the matched record.
    #[serde(default)]
    pub categories: Vec<String>,
    /// Semantic relevance score assigned by the store, higher is better.
    pub score: f32,
    /// When the record was created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

// ---------------------------------------------------------------------------
// Verdicts
// ---------------------------------------------------------------------------

/// Outcome of a quality assessment on candidate text.
///
/// Created fresh per candidate and never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityVerdict {
    /// Whether the text clears the gate.
    pub accepted: bool,
    /// Quality score: base score plus indicator bonuses, minus penalties.
    pub score: i32,
    /// Human-readable issues found during assessment. Populated on
    /// rejection; may also carry non-fatal warnings on acceptance.
    pub issues: Vec<String>,
    /// Context-indicator categories that matched (each at most once).
    pub indicators: Vec<String>,
    /// True when the caller bypassed the gate explicitly.
    pub forced: bool,
}

/// Outcome of a duplicate check against existing records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DuplicateVerdict {
    /// Whether the candidate is considered a duplicate.
    pub is_duplicate: bool,
    /// Highest pairwise similarity observed, in `[0, 1]`.
    pub similarity: f32,
    /// Identifier of the best-matching existing record, when one exists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matched_id: Option<String>,
    /// Content of the best-matching existing record, when one exists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matched_content: Option<String>,
}

/// A pair of existing memories similar enough to warrant human review.
///
/// Produced in batches by the consolidation scan, never mutated, and
/// discarded after the caller reviews them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsolidationCandidate {
    /// Identifier of the first record in the pair.
    pub first_id: String,
    /// Content of the first record.
    pub first_content: String,
    /// Identifier of the second record in the pair.
    pub second_id: String,
    /// Content of the second record.
    pub second_content: String,
    /// Pairwise similarity, in `[0, 1]`.
    pub similarity: f32,
}

// ---------------------------------------------------------------------------
// Recall results
// ---------------------------------------------------------------------------

/// A memory that survived hybrid reranking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedMemory {
    /// Identifier of the record.
    pub id: String,
    /// Content of the record.
    pub content: String,
    /// Category labels of the record.
    pub categories: Vec<String>,
    /// Raw semantic score the store assigned.
    pub semantic_score: f32,
    /// Number of distinct query keywords found in the content.
    pub keyword_matches: usize,
    /// Semantic score after the lexical keyword boost.
    pub hybrid_score: f32,
    /// Zero-based rank in the store's original semantic ordering.
    pub semantic_rank: usize,
}

/// Result of a proactive recall pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecallOutcome {
    /// Grouped, human-readable context block ready for prompt injection.
    pub context_text: String,
    /// Reranked memories, best first, truncated to the requested count.
    pub memories: Vec<RankedMemory>,
    /// How many candidates the store returned before truncation.
    pub candidates_searched: usize,
}

// ---------------------------------------------------------------------------
// Score
// ---------------------------------------------------------------------------

/// Totally-ordered score key used wherever ranked output must be
/// deterministic (plain `f32` is not `Ord`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Score(pub OrderedFloat<f32>);

impl Score {
    /// Create a score from a raw f32.
    #[must_use]
    pub fn new(score: f32) -> Self {
        Self(OrderedFloat(score))
    }

    /// Get the raw score value.
    #[must_use]
    pub fn value(self) -> f32 {
        self.0.into_inner()
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0.into_inner())
    }
}
