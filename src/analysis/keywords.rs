//! Frequency-ranked keyword extraction.

use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

use super::round_to;
use crate::domain::models::{KeywordEntry, KeywordProfile, MAX_KEYWORDS};

const STOP_WORDS: &[&str] = &[
    "the", "and", "are", "for", "was", "with", "this", "that", "from", "they", "were", "have",
    "what", "your", "will", "been",
];

fn keyword_token() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b[a-zA-Z]{3,15}\b").unwrap())
}

pub fn is_stop_word(token: &str) -> bool {
    STOP_WORDS.contains(&token)
}

/// Lower-cased alphabetic tokens of 3-15 letters with stop words removed.
pub fn keyword_tokens(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    keyword_token()
        .find_iter(&lowered)
        .map(|m| m.as_str())
        .filter(|token| !is_stop_word(token))
        .map(str::to_string)
        .collect()
}

/// Rank the retained tokens by count, ties kept in first-seen order, and
/// keep the top `MAX_KEYWORDS`.
pub fn extract_keywords(text: &str) -> KeywordProfile {
    let tokens = keyword_tokens(text);
    let total = tokens.len();
    if total == 0 {
        return KeywordProfile::default();
    }

    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, usize> = HashMap::new();
    for token in tokens {
        match counts.get_mut(&token) {
            Some(count) => *count += 1,
            None => {
                counts.insert(token.clone(), 1);
                order.push(token);
            }
        }
    }

    let mut ranked: Vec<(String, usize)> = order
        .into_iter()
        .map(|term| {
            let count = counts[&term];
            (term, count)
        })
        .collect();
    // sort_by is stable
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    let entries = ranked
        .into_iter()
        .take(MAX_KEYWORDS)
        .map(|(term, count)| KeywordEntry {
            term,
            count,
            density: round_to(count as f64 / total as f64 * 100.0, 2),
        })
        .collect();

    KeywordProfile::new(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranks_by_count_and_computes_density() {
        let profile = extract_keywords("Rust rust RUST cargo cargo crate");
        let terms: Vec<&str> = profile.iter().map(|e| e.term.as_str()).collect();
        assert_eq!(terms, vec!["rust", "cargo", "crate"]);
        assert_eq!(profile.entries()[0].count, 3);
        assert_eq!(profile.entries()[0].density, 50.0);
        assert_eq!(profile.entries()[1].density, 33.33);
        assert_eq!(profile.entries()[2].density, 16.67);
    }

    #[test]
    fn ties_keep_first_seen_order() {
        let profile = extract_keywords("zebra apple mango apple zebra mango");
        let terms: Vec<&str> = profile.iter().map(|e| e.term.as_str()).collect();
        assert_eq!(terms, vec!["zebra", "apple", "mango"]);
    }

    #[test]
    fn stop_words_and_short_or_long_tokens_are_dropped() {
        let tokens = keyword_tokens(
            "The cat and an ox were with this supercalifragilistic thing, 123abc done",
        );
        assert_eq!(tokens, vec!["cat", "thing", "done"]);
    }

    #[test]
    fn stop_words_do_not_count_towards_density() {
        let profile = extract_keywords("the the the seo seo guide");
        assert_eq!(profile.entries()[0].term, "seo");
        assert_eq!(profile.entries()[0].density, 66.67);
    }

    #[test]
    fn empty_or_stop_word_only_text_gives_empty_profile() {
        assert!(extract_keywords("").is_empty());
        assert!(extract_keywords("the and are for was").is_empty());
        assert!(extract_keywords("a an to of 42").is_empty());
    }

    #[test]
    fn profile_is_capped_and_densities_sum_to_at_most_100() {
        let text = (0..30)
            .map(|i| format!("word{} ", i))
            .collect::<String>()
            .replace(|c: char| c.is_ascii_digit(), "");
        // every token collapses to "word"; add distinct terms as well
        let distinct = "alpha bravo charlie delta echo foxtrot golf hotel india juliet kilo lima mike";
        let profile = extract_keywords(&format!("{} {}", text, distinct));
        assert!(profile.len() <= MAX_KEYWORDS);
        let sum: f64 = profile.iter().map(|e| e.density).sum();
        assert!(sum <= 100.0 + 0.01 * profile.len() as f64);
        assert_eq!(profile.entries()[0].term, "word");
        assert_eq!(profile.entries()[0].count, 30);
    }
}
