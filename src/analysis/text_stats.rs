//! Word, sentence and paragraph counts plus a Flesch reading-ease estimate.

use regex::Regex;
use std::sync::OnceLock;

use crate::domain::models::{ReadabilityLevel, TextMetrics};

const VOWELS: &[char] = &['a', 'e', 'i', 'o', 'u', 'y'];

fn paragraph_break() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\n\s*\n").unwrap())
}

fn sentence_terminators() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[.!?]+").unwrap())
}

impl TextMetrics {
    /// Compute counts and readability for one page's extracted text.
    ///
    /// Syllables are summed over the raw whitespace tokens, never over the
    /// filtered keyword tokens.
    pub fn from_text(text: &str) -> Self {
        let words: Vec<&str> = text.split_whitespace().collect();
        let word_count = words.len();
        let paragraph_count = count_paragraphs(text);
        let sentence_count = count_sentences(text);

        let readability_score = if word_count == 0 || sentence_count == 0 {
            0.0
        } else {
            let syllables: usize = words.iter().map(|w| count_syllables(w)).sum();
            flesch_reading_ease(word_count, sentence_count, syllables)
        };

        Self {
            word_count,
            paragraph_count,
            sentence_count,
            readability_score,
            readability_level: ReadabilityLevel::from_score(readability_score),
        }
    }
}

/// Blocks separated by a blank line. Whitespace-only text has none.
pub fn count_paragraphs(text: &str) -> usize {
    if text.trim().is_empty() {
        return 0;
    }
    paragraph_break().split(text).count()
}

pub fn count_sentences(text: &str) -> usize {
    sentence_terminators()
        .split(text)
        .filter(|s| !s.trim().is_empty())
        .count()
}

/// Heuristic syllable estimate for a single token.
pub fn count_syllables(word: &str) -> usize {
    let word = word.to_lowercase();
    if word.chars().count() <= 3 {
        return 1;
    }

    let stem = word
        .strip_suffix("es")
        .or_else(|| word.strip_suffix("ed"))
        .or_else(|| word.strip_suffix('e'))
        .unwrap_or(&word);

    let mut groups = 0;
    let mut prev_is_vowel = false;
    for c in stem.chars() {
        let is_vowel = VOWELS.contains(&c);
        if is_vowel && !prev_is_vowel {
            groups += 1;
        }
        prev_is_vowel = is_vowel;
    }

    groups.max(1)
}

/// 206.835 - 1.015 * ASL - 84.6 * ASW, clamped to 0-100.
pub fn flesch_reading_ease(words: usize, sentences: usize, syllables: usize) -> f64 {
    if words == 0 || sentences == 0 {
        return 0.0;
    }
    let avg_sentence_length = words as f64 / sentences as f64;
    let avg_syllables_per_word = syllables as f64 / words as f64;
    let score = 206.835 - 1.015 * avg_sentence_length - 84.6 * avg_syllables_per_word;
    score.clamp(0.0, 100.0)
}
