//! Quality gate — admission check for candidate memories.
//!
//! Raw text only becomes a memory when it carries enough context to be
//! useful later. The gate rejects fragments and bare acknowledgments,
//! rewards text containing contextual indicators (preferences, technical
//! subjects, identity facts, goals), and flags over-long content for
//! possible summarization without blocking it.

use tracing::debug;

use crate::config::QualityConfig;
use crate::types::QualityVerdict;

/// Admission gate scoring candidate text before persistence.
///
/// Pure over text + configuration: identical inputs always produce the
/// same verdict.
pub struct QualityGate {
    config: QualityConfig,
}

impl QualityGate {
    /// Create a gate with the given configuration.
    #[must_use]
    pub fn new(config: QualityConfig) -> Self {
        Self { config }
    }

    /// Assess candidate text.
    ///
    /// `force` bypasses every check: the verdict is accepted with score 0
    /// and the `forced` marker set, regardless of content.
    #[must_use]
    pub fn assess(&self, content: &str, force: bool) -> QualityVerdict {
        if force {
            return QualityVerdict {
                accepted: true,
                score: 0,
                issues: Vec::new(),
                indicators: Vec::new(),
                forced: true,
            };
        }

        let mut accepted = true;
        let mut score = self.config.base_score;
        let mut issues = Vec::new();
        let mut indicators = Vec::new();

        let char_count = content.chars().count();
        if char_count < self.config.min_length {
            accepted = false;
            score -= 50;
            issues.push(format!(
                "Too short (min {} chars)",
                self.config.min_length
            ));
        }

        let word_count = content.split_whitespace().count();
        if word_count < self.config.min_word_count {
            accepted = false;
            score -= 30;
            issues.push(format!(
                "Too few words (min {} words)",
                self.config.min_word_count
            ));
        }

        // Exact match only — longer sentences that merely contain "ok" or
        // "thanks" must not trip this.
        let normalized = content.trim().to_lowercase();
        if self
            .config
            .acknowledgment_phrases
            .iter()
            .any(|phrase| *phrase == normalized)
        {
            accepted = false;
            score -= 40;
            issues.push("Low-value acknowledgment".to_string());
        }

        // Each indicator category contributes once, however many of its
        // phrases occur — repetition must not inflate the score.
        let categories: [(&str, &[String]); 4] = [
            ("preference", &self.config.preference_verbs),
            ("technical", &self.config.technical_nouns),
            ("identity", &self.config.identity_phrases),
            ("goal", &self.config.goal_phrases),
        ];
        for (name, phrases) in categories {
            if phrases.iter().any(|p| normalized.contains(p.as_str())) {
                score += self.config.indicator_bonus;
                indicators.push(name.to_string());
            }
        }

        // Warning only: very long content may need summarization upstream,
        // but it is never rejected for length.
        if char_count > self.config.max_length_warning {
            score -= 10;
            issues.push("Very long (may need summarization)".to_string());
        }

        debug!(
            accepted,
            score,
            char_count,
            word_count,
            indicators = ?indicators,
            "quality assessment"
        );

        QualityVerdict {
            accepted,
            score,
            issues,
            indicators,
            forced: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate() -> QualityGate {
        QualityGate::new(QualityConfig::default())
    }

    #[test]
    fn accepts_contextual_content() {
        let verdict = gate().assess(
            "User prefers Python over JavaScript for backend services",
            false,
        );
        assert!(verdict.accepted);
        assert!(verdict.score > 100, "indicator bonus expected");
        assert!(!verdict.forced);
    }

    #[test]
    fn rejects_acknowledgment() {
        let verdict = gate().assess("ok", false);
        assert!(!verdict.accepted);
        assert!(
            verdict.issues.iter().any(|i| i.contains("Too short")),
            "short-content issue expected, got {:?}",
            verdict.issues
        );
        assert!(
            verdict
                .issues
                .iter()
                .any(|i| i.contains("acknowledgment")),
            "acknowledgment issue expected, got {:?}",
            verdict.issues
        );
    }

    #[test]
    fn acknowledgment_match_is_exact_not_substring() {
        // "thanks" appears inside, but the sentence carries real content.
        let verdict = gate().assess(
            "User said thanks and mentioned they use Rust for systems work daily",
            false,
        );
        assert!(verdict.accepted);
    }

    #[test]
    fn acknowledgment_match_ignores_case_and_whitespace() {
        let verdict = gate().assess("  Thank You  ", false);
        assert!(!verdict.accepted);
    }

    #[test]
    fn force_bypasses_every_check() {
        let verdict = gate().assess("ok", true);
        assert!(verdict.accepted);
        assert!(verdict.forced);
        assert_eq!(verdict.score, 0);
        assert!(verdict.issues.is_empty());
    }

    #[test]
    fn preference_indicator_raises_score_above_base() {
        let verdict = gate().assess(
            "I absolutely love pizza but hate pineapple on it",
            false,
        );
        assert!(verdict.accepted);
        assert!(verdict.score > 100);
        assert!(verdict.indicators.contains(&"preference".to_string()));
    }

    #[test]
    fn indicator_category_counted_once_per_match() {
        // Four preference phrases, still a single preference bonus.
        let once = gate().assess("User likes one specific text editor setup", false);
        let many = gate().assess("love love hate hate like dislike the editor", false);
        let preference_hits = |v: &QualityVerdict| {
            v.indicators.iter().filter(|i| *i == "preference").count()
        };
        assert_eq!(preference_hits(&once), 1);
        assert_eq!(preference_hits(&many), 1);
    }

    #[test]
    fn overlong_content_warns_without_rejecting() {
        let long = format!("User prefers detailed notes. {}", "word ".repeat(150));
        let verdict = gate().assess(&long, false);
        assert!(verdict.accepted);
        assert!(
            verdict.issues.iter().any(|i| i.contains("Very long")),
            "length warning expected, got {:?}",
            verdict.issues
        );
    }

    #[test]
    fn deterministic_for_identical_input() {
        let a = gate().assess("User works at a robotics startup in Boston", false);
        let b = gate().assess("User works at a robotics startup in Boston", false);
        assert_eq!(a.accepted, b.accepted);
        assert_eq!(a.score, b.score);
        assert_eq!(a.issues, b.issues);
        assert_eq!(a.indicators, b.indicators);
    }
}
