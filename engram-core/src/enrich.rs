//! Context enrichment — metadata attached to accepted memories.
//!
//! Enrichment never touches the content string: the text that passed the
//! quality gate is stored byte-identical. Recency and kind information
//! travel in record metadata instead, where later retrieval and
//! consolidation passes can reason about them.

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Value};

use crate::config::QualityConfig;

/// Metadata key carrying the capture timestamp (RFC 3339, UTC).
pub const CAPTURED_AT_KEY: &str = "captured_at";

/// Metadata key carrying the inferred kind of a memory.
pub const KIND_KEY: &str = "kind";

/// Deterministic metadata enrichment for accepted memories.
pub struct ContextEnricher {
    preference_verbs: Vec<String>,
}

impl ContextEnricher {
    /// Create an enricher sharing the quality gate's preference phrases.
    #[must_use]
    pub fn new(config: &QualityConfig) -> Self {
        Self {
            preference_verbs: config.preference_verbs.clone(),
        }
    }

    /// Enrich metadata for a memory captured now.
    #[must_use]
    pub fn enrich(
        &self,
        content: &str,
        metadata: Option<Map<String, Value>>,
    ) -> Map<String, Value> {
        self.enrich_at(content, metadata, Utc::now())
    }

    /// Enrich metadata for a memory captured at an explicit instant.
    ///
    /// Idempotent: re-enriching already-enriched metadata changes nothing —
    /// `captured_at` and `kind` are only written when absent.
    #[must_use]
    pub fn enrich_at(
        &self,
        content: &str,
        metadata: Option<Map<String, Value>>,
        at: DateTime<Utc>,
    ) -> Map<String, Value> {
        let mut metadata = metadata.unwrap_or_default();

        metadata.entry(CAPTURED_AT_KEY.to_string()).or_insert_with(|| {
            Value::String(at.to_rfc3339_opts(SecondsFormat::Secs, true))
        });

        if !metadata.contains_key(KIND_KEY) {
            let lower = content.to_lowercase();
            if self.preference_verbs.iter().any(|v| lower.contains(v.as_str())) {
                metadata.insert(
                    KIND_KEY.to_string(),
                    Value::String("preference".to_string()),
                );
            }
        }

        metadata
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn enricher() -> ContextEnricher {
        ContextEnricher::new(&QualityConfig::default())
    }

    fn instant() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 14, 9, 26, 53).single().expect("valid")
    }

    #[test]
    fn stamps_capture_time() {
        let meta = enricher().enrich_at("User works at Globex", None, instant());
        assert_eq!(
            meta.get(CAPTURED_AT_KEY).and_then(Value::as_str),
            Some("2026-03-14T09:26:53Z")
        );
    }

    #[test]
    fn re_enrichment_does_not_duplicate_or_overwrite() {
        let e = enricher();
        let first = e.enrich_at("User works at Globex", None, instant());
        let later = Utc.with_ymd_and_hms(2026, 6, 1, 0, 0, 0).single().expect("valid");
        let second = e.enrich_at("User works at Globex", Some(first.clone()), later);

        assert_eq!(first, second);
    }

    #[test]
    fn tags_preference_content() {
        let meta = enricher().enrich_at("User prefers dark roast coffee", None, instant());
        assert_eq!(meta.get(KIND_KEY).and_then(Value::as_str), Some("preference"));
    }

    #[test]
    fn existing_kind_is_preserved() {
        let mut seed = Map::new();
        seed.insert(KIND_KEY.to_string(), Value::String("fact".to_string()));
        let meta = enricher().enrich_at("User prefers dark roast coffee", Some(seed), instant());
        assert_eq!(meta.get(KIND_KEY).and_then(Value::as_str), Some("fact"));
    }

    #[test]
    fn caller_metadata_survives() {
        let mut seed = Map::new();
        seed.insert("source".to_string(), Value::String("chat".to_string()));
        let meta = enricher().enrich_at("User lives in Lisbon these days", Some(seed), instant());
        assert_eq!(meta.get("source").and_then(Value::as_str), Some("chat"));
        assert!(meta.contains_key(CAPTURED_AT_KEY));
    }
}
