//! Response serialization — the presentation-policy boundary.
//!
//! Handlers always produce complete structured outcomes; how much of that
//! detail reaches the end of the wire is a policy choice made here, at the
//! boundary, not in the pipeline. `Minimal` collapses write-path outcomes
//! to bare success/failure indicators while read payloads pass through.

use serde_json::{Value, json};

use engram_core::types::{MemoryRecord, RecallOutcome, SearchHit};

use crate::service::{AddOutcome, ConsolidationReport};

/// How much outcome detail responses carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseStyle {
    /// Full verdict detail, suggestions included.
    #[default]
    Verbose,
    /// Bare success/failure indicators for write-path operations.
    Minimal,
}

/// Serialize the write-path outcome.
#[must_use]
pub fn add_outcome(outcome: &AddOutcome, style: ResponseStyle) -> Value {
    match outcome {
        AddOutcome::Saved { records, quality } => match style {
            ResponseStyle::Minimal => json!({ "ok": true }),
            ResponseStyle::Verbose => json!({
                "ok": true,
                "memoryIds": records.iter().map(|r| r.id.clone()).collect::<Vec<_>>(),
                "qualityScore": quality.score,
                "message": "Memory saved successfully",
            }),
        },
        AddOutcome::RejectedByQuality(verdict) => match style {
            ResponseStyle::Minimal => json!({ "ok": false, "rejected": true }),
            ResponseStyle::Verbose => json!({
                "ok": false,
                "rejected": true,
                "reason": "Quality threshold not met",
                "issues": verdict.issues,
                "qualityScore": verdict.score,
                "suggestion": "Provide more context or use 'force: true' to override",
            }),
        },
        AddOutcome::RejectedAsDuplicate(verdict) => match style {
            ResponseStyle::Minimal => json!({ "ok": false, "duplicate": true }),
            ResponseStyle::Verbose => json!({
                "ok": false,
                "duplicate": true,
                "existingMemoryId": verdict.matched_id,
                "existingContent": verdict.matched_content,
                "similarity": verdict.similarity,
                "suggestion": "Use update-memory to modify the existing memory instead",
            }),
        },
    }
}

/// Serialize semantic search results.
#[must_use]
pub fn search_results(hits: &[SearchHit]) -> Value {
    json!({
        "results": hits,
        "count": hits.len(),
    })
}

/// Serialize a proactive recall outcome.
#[must_use]
pub fn recall_outcome(outcome: &RecallOutcome) -> Value {
    json!({
        "context": outcome.context_text,
        "memories": outcome.memories,
        "candidatesSearched": outcome.candidates_searched,
    })
}

/// Serialize a full memory listing.
#[must_use]
pub fn all_memories(records: &[MemoryRecord]) -> Value {
    json!({
        "memories": records,
        "total": records.len(),
    })
}

/// Serialize a bare mutation acknowledgment.
#[must_use]
pub fn simple_ok(message: &str, style: ResponseStyle) -> Value {
    match style {
        ResponseStyle::Minimal => json!({ "ok": true }),
        ResponseStyle::Verbose => json!({ "ok": true, "message": message }),
    }
}

/// Serialize a consolidation report.
#[must_use]
pub fn consolidation_report(report: &ConsolidationReport, style: ResponseStyle) -> Value {
    match style {
        ResponseStyle::Minimal => json!({
            "ok": true,
            "count": report.candidates.len(),
        }),
        ResponseStyle::Verbose => {
            if report.candidates.is_empty() {
                json!({
                    "ok": true,
                    "dryRun": report.dry_run,
                    "candidates": [],
                    "count": 0,
                    "totalMemories": report.total_memories,
                    "message": "No similar memories found to consolidate",
                })
            } else {
                json!({
                    "ok": true,
                    "dryRun": report.dry_run,
                    "candidates": report.candidates,
                    "count": report.candidates.len(),
                    "totalMemories": report.total_memories,
                    "message": "Review these candidates. Use update-memory and delete-memory to consolidate manually.",
                })
            }
        }
    }
}
