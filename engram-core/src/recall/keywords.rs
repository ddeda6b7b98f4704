//! Keyword extraction for lexical reranking.

use std::collections::HashSet;

/// Extract topical keywords from free text.
///
/// Tokens are split on whitespace, stripped of leading/trailing punctuation,
/// lowercased, filtered against the stop-word list, and deduplicated with
/// first-occurrence order preserved — the result is deterministic for
/// identical input.
#[must_use]
pub fn extract_keywords(text: &str, stop_words: &[String]) -> Vec<String> {
    let stop: HashSet<&str> = stop_words.iter().map(String::as_str).collect();
    let mut seen = HashSet::new();
    let mut keywords = Vec::new();

    for raw in text.split_whitespace() {
        let token = raw
            .trim_matches(|c: char| !c.is_alphanumeric())
            .to_lowercase();
        if token.is_empty() || stop.contains(token.as_str()) {
            continue;
        }
        if seen.insert(token.clone()) {
            keywords.push(token);
        }
    }

    keywords
}
