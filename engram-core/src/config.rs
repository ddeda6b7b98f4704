//! Configuration for the Engram memory pipeline.
//!
//! Maps directly to `engram.toml`. Every threshold the pipeline consults is
//! configuration, not hard-coded business logic; the phrase lists driving
//! quality gating and keyword extraction are data here so they can be tested
//! and localized without touching code.

use serde::{Deserialize, Serialize};

/// Environment variable consulted for the store API key when the config
/// file leaves it unset.
pub const API_KEY_ENV: &str = "ENGRAM_API_KEY";

/// Top-level Engram configuration, loadable from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngramConfig {
    /// Quality gate thresholds and phrase lists.
    #[serde(default)]
    pub quality: QualityConfig,
    /// Duplicate detection thresholds.
    #[serde(default)]
    pub dedup: DedupConfig,
    /// Recall reranking settings.
    #[serde(default)]
    pub recall: RecallConfig,
    /// Remote store connection settings.
    #[serde(default)]
    pub store: StoreConfig,
}

impl EngramConfig {
    /// Load configuration from a TOML string.
    ///
    /// # Errors
    /// Returns `EngramError::Config` if the TOML is invalid.
    pub fn from_toml(toml_str: &str) -> crate::error::Result<Self> {
        toml::from_str(toml_str).map_err(|e| crate::EngramError::Config(e.to_string()))
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }
}

// ---------------------------------------------------------------------------
// Sub-configs
// ---------------------------------------------------------------------------

/// Quality gate configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityConfig {
    /// Minimum character count for a memory.
    #[serde(default = "default_min_length")]
    pub min_length: usize,
    /// Minimum whitespace-delimited word count.
    #[serde(default = "default_min_word_count")]
    pub min_word_count: usize,
    /// Length above which a non-fatal "may need summarization" warning is
    /// emitted.
    #[serde(default = "default_max_length_warning")]
    pub max_length_warning: usize,
    /// Base score every candidate starts from.
    #[serde(default = "default_base_score")]
    pub base_score: i32,
    /// Bonus added once per matched indicator category.
    #[serde(default = "default_indicator_bonus")]
    pub indicator_bonus: i32,
    /// Low-value phrases rejected on exact (trimmed, lowercased) match.
    #[serde(default = "default_acknowledgment_phrases")]
    pub acknowledgment_phrases: Vec<String>,
    /// Preference-verb indicator phrases.
    #[serde(default = "default_preference_verbs")]
    pub preference_verbs: Vec<String>,
    /// Technical-noun indicator phrases.
    #[serde(default = "default_technical_nouns")]
    pub technical_nouns: Vec<String>,
    /// Personal-identity indicator phrases.
    #[serde(default = "default_identity_phrases")]
    pub identity_phrases: Vec<String>,
    /// Goal indicator phrases.
    #[serde(default = "default_goal_phrases")]
    pub goal_phrases: Vec<String>,
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            min_length: 20,
            min_word_count: 4,
            max_length_warning: 500,
            base_score: 100,
            indicator_bonus: 20,
            acknowledgment_phrases: default_acknowledgment_phrases(),
            preference_verbs: default_preference_verbs(),
            technical_nouns: default_technical_nouns(),
            identity_phrases: default_identity_phrases(),
            goal_phrases: default_goal_phrases(),
        }
    }
}

/// Duplicate detection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DedupConfig {
    /// Similarity at or above which a write-time candidate is suppressed.
    #[serde(default = "default_duplicate_threshold")]
    pub duplicate_threshold: f32,
    /// Similarity at or above which an existing pair is surfaced for
    /// review. Kept separate from the write-time threshold: the review
    /// report wants the 0.75–0.95 band, not just near-identical pairs.
    #[serde(default = "default_consolidation_threshold")]
    pub consolidation_threshold: f32,
    /// How many semantic-search hits to fetch as duplicate candidates
    /// before a write.
    #[serde(default = "default_candidate_fetch_limit")]
    pub candidate_fetch_limit: usize,
}

impl Default for DedupConfig {
    fn default() -> Self {
        Self {
            duplicate_threshold: 0.85,
            consolidation_threshold: 0.75,
            candidate_fetch_limit: 5,
        }
    }
}

/// Recall reranking configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecallConfig {
    /// Over-fetch multiplier applied to the requested result count before
    /// reranking. Process configuration only — never caller-settable.
    #[serde(default = "default_overfetch_factor")]
    pub overfetch_factor: usize,
    /// Per-keyword multiplicative boost applied to the semantic score.
    #[serde(default = "default_keyword_boost")]
    pub keyword_boost: f32,
    /// Require whole-word keyword matches instead of substring matches.
    #[serde(default)]
    pub whole_word_matching: bool,
    /// Hard cap on caller-supplied search limits.
    #[serde(default = "default_search_limit_cap")]
    pub search_limit_cap: usize,
    /// Words carrying no topical content, dropped during keyword
    /// extraction.
    #[serde(default = "default_stop_words")]
    pub stop_words: Vec<String>,
}

impl Default for RecallConfig {
    fn default() -> Self {
        Self {
            overfetch_factor: 3,
            keyword_boost: 0.15,
            whole_word_matching: false,
            search_limit_cap: 50,
            stop_words: default_stop_words(),
        }
    }
}

/// Remote store connection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Base URL of the remote memory service.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// API key. Falls back to the `ENGRAM_API_KEY` environment variable
    /// when unset here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Hard timeout for any store call in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Max retries before a store call is reported failed.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// User the pipeline operates on behalf of when the caller names none.
    #[serde(default = "default_user_id")]
    pub default_user_id: String,
}

impl StoreConfig {
    /// The API key from configuration, falling back to the environment.
    #[must_use]
    pub fn resolved_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var(API_KEY_ENV).ok())
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.mem.example".to_string(),
            api_key: None,
            timeout_ms: 10_000,
            max_retries: 2,
            default_user_id: "default".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Serde default helpers
// ---------------------------------------------------------------------------

fn default_min_length() -> usize { 20 }
fn default_min_word_count() -> usize { 4 }
fn default_max_length_warning() -> usize { 500 }
fn default_base_score() -> i32 { 100 }
fn default_indicator_bonus() -> i32 { 20 }
fn default_duplicate_threshold() -> f32 { 0.85 }
fn default_consolidation_threshold() -> f32 { 0.75 }
fn default_candidate_fetch_limit() -> usize { 5 }
fn default_overfetch_factor() -> usize { 3 }
fn default_keyword_boost() -> f32 { 0.15 }
fn default_search_limit_cap() -> usize { 50 }
fn default_timeout_ms() -> u64 { 10_000 }
fn default_max_retries() -> u32 { 2 }
fn default_base_url() -> String { "https://api.mem.example".to_string() }
fn default_user_id() -> String { "default".to_string() }

fn owned(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| (*w).to_string()).collect()
}

fn default_acknowledgment_phrases() -> Vec<String> {
    owned(&[
        "ok", "okay", "got it", "understood", "sure", "thanks", "thank you",
        "yes", "no", "maybe", "i see", "alright", "cool", "nice",
    ])
}

fn default_preference_verbs() -> Vec<String> {
    owned(&[
        "prefer", "like", "love", "hate", "dislike", "always", "never",
        "favorite",
    ])
}

fn default_technical_nouns() -> Vec<String> {
    owned(&[
        "project", "work", "use", "technology", "tool", "language",
        "framework", "library", "database",
    ])
}

fn default_identity_phrases() -> Vec<String> {
    owned(&[
        "name is", "location", "timezone", "schedule", "routine", "lives in",
        "works at", "based in",
    ])
}

fn default_goal_phrases() -> Vec<String> {
    owned(&[
        "goal", "objective", "plan", "want to", "need to", "deadline",
    ])
}

fn default_stop_words() -> Vec<String> {
    owned(&[
        "the", "a", "an", "is", "are", "was", "were", "be", "been", "am",
        "in", "on", "at", "to", "for", "of", "and", "or", "but", "with",
        "from", "i", "i'm", "im", "me", "my", "we", "our", "you", "your",
        "it", "its", "this", "that", "these", "those", "what", "when",
        "where", "which", "who", "how", "should", "would", "could", "can",
        "will", "do", "does", "did", "have", "has", "had", "not", "so",
        "just", "very", "really",
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_thresholds() {
        let config = EngramConfig::default();
        assert_eq!(config.quality.min_length, 20);
        assert_eq!(config.quality.min_word_count, 4);
        assert!((config.dedup.duplicate_threshold - 0.85).abs() < f32::EPSILON);
        assert!((config.dedup.consolidation_threshold - 0.75).abs() < f32::EPSILON);
        assert_eq!(config.recall.overfetch_factor, 3);
        assert!((config.recall.keyword_boost - 0.15).abs() < f32::EPSILON);
    }

    #[test]
    fn thresholds_are_independently_configurable() {
        let config = EngramConfig::from_toml(
            r#"
            [dedup]
            duplicate_threshold = 0.9
            consolidation_threshold = 0.7
            "#,
        )
        .expect("valid toml");
        assert!((config.dedup.duplicate_threshold - 0.9).abs() < f32::EPSILON);
        assert!((config.dedup.consolidation_threshold - 0.7).abs() < f32::EPSILON);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config = EngramConfig::from_toml(
            r#"
            [quality]
            min_length = 10

            [store]
            base_url = "http://localhost:8321"
            "#,
        )
        .expect("valid toml");
        assert_eq!(config.quality.min_length, 10);
        assert_eq!(config.quality.min_word_count, 4);
        assert_eq!(config.store.base_url, "http://localhost:8321");
        assert_eq!(config.store.default_user_id, "default");
    }

    #[test]
    fn config_file_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("engram.toml");
        std::fs::write(&path, "[recall]\noverfetch_factor = 4\n").expect("write");

        let config = EngramConfig::from_file(&path).expect("load");
        assert_eq!(config.recall.overfetch_factor, 4);
    }

    #[test]
    fn invalid_toml_is_a_config_error() {
        let err = EngramConfig::from_toml("[quality\nmin_length = ").expect_err("must fail");
        assert!(matches!(err, crate::EngramError::Config(_)));
    }
}
