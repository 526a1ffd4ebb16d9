//! Internal redundancy / reuse analyzer.
//!
//! Flags heavy reuse of 5-gram phrases, repeated sentences and low
//! unique-phrase ratios. This is a suspicion signal, not a corpus-wide
//! plagiarism comparison.

use crate::domain::models::{clamp01, PlagiarismRecord};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

static TOKEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[a-z0-9']+").unwrap());
static SENTENCE_SPLIT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]+").unwrap());
static WS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

const NGRAM_LEN: usize = 5;

pub fn analyze(text: &str) -> PlagiarismRecord {
    if text.trim().is_empty() {
        return PlagiarismRecord {
            ngram_repetition_ratio: 0.0,
            highest_ngram_frequency: 0,
            top_repeated_ngrams: Vec::new(),
            repeated_sentence_ratio: 0.0,
            top_repeated_sentences: Vec::new(),
            score: 0.0,
        };
    }

    let lowered = text.to_lowercase();
    let tokens: Vec<&str> = TOKEN_RE.find_iter(&lowered).map(|m| m.as_str()).collect();
    let sentences = split_sentences(text);

    let (total_ngrams, unique_ngrams, highest_ngram_frequency, top_repeated_ngrams) =
        ngram_stats(&tokens);
    let (repeated_sentence_ratio, top_repeated_sentences) = sentence_redundancy(&sentences);

    let ngram_repetition_ratio = if total_ngrams > 0 {
        1.0 - unique_ngrams as f64 / total_ngrams as f64
    } else {
        0.0
    };

    // Base from n-gram repetition (up to 0.7), plus bumps for repeated
    // sentences (up to 0.2) and a very frequent single 5-gram (up to 0.1).
    let base = (ngram_repetition_ratio * 0.7 * 2.0).min(0.7);
    let sentence_component = (repeated_sentence_ratio * 0.4).min(0.2);
    let frequency_component = if highest_ngram_frequency >= 8 {
        0.1
    } else if highest_ngram_frequency >= 5 {
        0.05
    } else {
        0.0
    };
    let score = clamp01(base + sentence_component + frequency_component);

    PlagiarismRecord {
        ngram_repetition_ratio,
        highest_ngram_frequency,
        top_repeated_ngrams,
        repeated_sentence_ratio,
        top_repeated_sentences,
        score,
    }
}

fn split_sentences(text: &str) -> Vec<String> {
    SENTENCE_SPLIT_RE
        .split(text)
        .filter_map(|s| {
            let norm = WS_RE.replace_all(s.trim(), " ").into_owned();
            if norm.is_empty() {
                None
            } else {
                Some(norm)
            }
        })
        .collect()
}

fn ngram_stats(tokens: &[&str]) -> (usize, usize, usize, Vec<String>) {
    if tokens.len() < NGRAM_LEN {
        return (0, 0, 0, Vec::new());
    }

    let mut counts: HashMap<String, usize> = HashMap::new();
    let total = tokens.len() - NGRAM_LEN + 1;
    for window in tokens.windows(NGRAM_LEN) {
        *counts.entry(window.join(" ")).or_default() += 1;
    }
    let unique = counts.len();
    let max_freq = counts.values().copied().max().unwrap_or(0);

    let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    let top = ranked.into_iter().take(5).map(|(ng, _)| ng).collect();

    (total, unique, max_freq, top)
}

fn sentence_redundancy(sentences: &[String]) -> (f64, Vec<String>) {
    if sentences.is_empty() {
        return (0.0, Vec::new());
    }

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for s in sentences {
        *counts.entry(s.as_str()).or_default() += 1;
    }

    let repeated_occurrences: usize = counts.values().filter(|c| **c > 1).sum();
    let ratio = repeated_occurrences as f64 / sentences.len() as f64;

    let mut ranked: Vec<(&str, usize)> = counts.into_iter().filter(|(_, c)| *c > 1).collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
    let top = ranked.into_iter().take(5).map(|(s, _)| s.to_string()).collect();

    (ratio, top)
}
