//! Loaded-language bias analyzer.
//!
//! Counts tokens from five vocabularies (emotional, authority, ideological,
//! affiliation, certainty), converts each to a per-word density and folds
//! the densities into one risk-oriented score in [0,1].

use crate::domain::models::{clamp01, BiasRecord, CategoryHits};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

// Hyphen kept so compound vocabulary entries like "world-class" match.
static TOKEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[a-z'-]+").unwrap());

const EMOTIONAL_WORDS: &[&str] = &[
    "outrageous",
    "shocking",
    "alarming",
    "unprecedented",
    "remarkable",
    "astonishing",
    "incredible",
    "dramatic",
    "catastrophic",
    "revolutionary",
    "groundbreaking",
];

const AUTHORITY_TERMS: &[&str] = &[
    "famous",
    "renowned",
    "leading",
    "prestigious",
    "top",
    "world-class",
    "celebrated",
    "influential",
    "nobel",
    "ivy-league",
];

const IDEOLOGICAL_TERMS: &[&str] = &[
    "ideology",
    "dogma",
    "orthodox",
    "heretical",
    "mainstream",
    "fringe",
    "consensus",
    "denier",
];

const AFFILIATION_MARKERS: &[&str] = &[
    "elite",
    "institution",
    "ivy",
    "industry-funded",
    "independent",
    "grassroots",
];

const CERTAINTY_WORDS: &[&str] = &[
    "obviously",
    "clearly",
    "undeniably",
    "certainly",
    "conclusively",
];

pub fn analyze(text: &str) -> BiasRecord {
    let lowered = text.to_lowercase();
    let tokens: Vec<&str> = TOKEN_RE.find_iter(&lowered).map(|m| m.as_str()).collect();
    let total_words = tokens.len();

    let emotional = category_hits(&tokens, EMOTIONAL_WORDS, total_words);
    let authority = category_hits(&tokens, AUTHORITY_TERMS, total_words);
    let ideological = category_hits(&tokens, IDEOLOGICAL_TERMS, total_words);
    let affiliation = category_hits(&tokens, AFFILIATION_MARKERS, total_words);
    let certainty = category_hits(&tokens, CERTAINTY_WORDS, total_words);

    let score = clamp01(
        emotional.density * 3.0
            + authority.density * 2.0
            + ideological.density * 2.0
            + affiliation.density * 1.5
            + certainty.density * 2.5,
    );

    BiasRecord {
        total_words,
        emotional_language: emotional,
        authority_appeals: authority,
        ideological_language: ideological,
        affiliation_markers: affiliation,
        certainty_language: certainty,
        score,
    }
}

fn category_hits(tokens: &[&str], vocab: &[&str], total_words: usize) -> CategoryHits {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    let mut count = 0usize;
    for &t in tokens {
        if vocab.contains(&t) {
            count += 1;
            *counts.entry(t).or_default() += 1;
        }
    }

    // Up to 10 distinct examples, most frequent first.
    let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
    let examples = ranked
        .into_iter()
        .take(10)
        .map(|(w, _)| w.to_string())
        .collect();

    let density = if total_words == 0 {
        0.0
    } else {
        count as f64 / total_words as f64
    };

    CategoryHits {
        count,
        density,
        examples,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_yields_zero_baseline() {
        let r = analyze("   \n  ");
        assert_eq!(r.total_words, 0);
        assert_eq!(r.score, 0.0);
        assert_eq!(r.emotional_language.count, 0);
        assert_eq!(r.certainty_language.density, 0.0);
    }

    #[test]
    fn loaded_text_scores_above_neutral_text() {
        let loaded = analyze("This groundbreaking, unprecedented study clearly proves it.");
        let neutral = analyze("We measured the reaction time of the samples twice.");
        assert!(loaded.score > neutral.score);
        assert!(loaded.emotional_language.count >= 2);
        assert!(loaded.certainty_language.count >= 1);
    }

    #[test]
    fn examples_are_capped_and_deduplicated() {
        let text = "clearly clearly clearly obviously";
        let r = analyze(text);
        assert_eq!(r.certainty_language.count, 4);
        assert_eq!(r.certainty_language.examples[0], "clearly");
        assert_eq!(r.certainty_language.examples.len(), 2);
    }

    #[test]
    fn score_stays_clamped_for_pathological_input() {
        let text = "outrageous shocking alarming catastrophic ".repeat(50);
        let r = analyze(&text);
        assert!(r.score <= 1.0);
        assert!(r.score > 0.9);
    }
}
