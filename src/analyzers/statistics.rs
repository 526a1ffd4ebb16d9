//! Statistical rigor analyzer.
//!
//! Detects p-values, confidence intervals, named tests and effect-size or
//! power terminology. The goodness-oriented score rewards diversity across
//! those four categories plus a small bonus per reported p-value.

use crate::domain::models::{clamp01, StatisticsRecord, TermHits};
use once_cell::sync::Lazy;
use regex::Regex;

static P_VALUE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bp\s*[<=>]\s*0\.\d+").unwrap());
static CI_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\d+%\s*ci\b|\bci\s*\[").unwrap());

const TEST_TERMS: &[&str] = &[
    "t-test",
    "t test",
    "anova",
    "regression",
    "chi-square",
    "chi square",
    "manova",
    "wilcoxon",
    "kruskal-wallis",
    "pearson correlation",
    "spearman correlation",
    "mixed model",
    "linear model",
];

const EFFECT_AND_POWER_TERMS: &[&str] = &[
    "effect size",
    "cohen's d",
    "eta-squared",
    "eta squared",
    "standardized effect",
    "power analysis",
    "statistical power",
    "hedges g",
    "omega-squared",
];

pub fn analyze(text: &str) -> StatisticsRecord {
    let lowered = text.to_lowercase();

    let p_values = collect_matches(&P_VALUE_RE, &lowered);
    let confidence_intervals = collect_matches(&CI_RE, &lowered);

    let tests: Vec<String> = TEST_TERMS
        .iter()
        .filter(|t| lowered.contains(*t))
        .take(10)
        .map(|t| t.to_string())
        .collect();
    let effect_terms: Vec<String> = EFFECT_AND_POWER_TERMS
        .iter()
        .filter(|t| lowered.contains(*t))
        .take(10)
        .map(|t| t.to_string())
        .collect();

    let has_statistical_content = p_values.count > 0
        || confidence_intervals.count > 0
        || !tests.is_empty()
        || !effect_terms.is_empty();

    // Diversity across the four categories, plus up to +0.25 for p-values.
    let categories_present = [
        p_values.count > 0,
        confidence_intervals.count > 0,
        !tests.is_empty(),
        !effect_terms.is_empty(),
    ]
    .iter()
    .filter(|b| **b)
    .count();
    let diversity = categories_present as f64 / 4.0;
    let bonus = p_values.count.min(5) as f64 * 0.05;
    let score = clamp01(diversity + bonus);

    StatisticsRecord {
        has_statistical_content,
        p_values,
        confidence_intervals,
        tests,
        effect_terms,
        score,
    }
}

fn collect_matches(re: &Regex, text: &str) -> TermHits {
    let mut count = 0usize;
    let mut examples = Vec::new();
    for m in re.find_iter(text) {
        count += 1;
        if examples.len() < 5 {
            examples.push(m.as_str().to_string());
        }
    }
    TermHits { count, examples }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_yields_zero_baseline() {
        let r = analyze("");
        assert!(!r.has_statistical_content);
        assert_eq!(r.p_values.count, 0);
        assert_eq!(r.score, 0.0);
    }

    #[test]
    fn p_values_and_tests_are_detected() {
        let r = analyze("We ran a t-test; the effect was significant (p < 0.01, p = 0.032).");
        assert!(r.has_statistical_content);
        assert_eq!(r.p_values.count, 2);
        assert_eq!(r.tests, vec!["t-test".to_string()]);
        // two of four categories plus two p-values
        assert!((r.score - (0.5 + 0.10)).abs() < 1e-12);
    }

    #[test]
    fn confidence_interval_notations_match() {
        let r = analyze("A 95% CI [1.2, 2.3] was computed.");
        assert!(r.confidence_intervals.count >= 1);
        assert!(r.has_statistical_content);
    }

    #[test]
    fn p_value_bonus_is_capped() {
        let many = "p < 0.01, ".repeat(20);
        let r = analyze(&many);
        // one category (0.25) plus the capped bonus (0.25)
        assert!((r.score - 0.5).abs() < 1e-12);
    }

    #[test]
    fn prose_about_p_values_without_numbers_is_no_content() {
        let r = analyze("n = 200 participants. No p-values reported.");
        assert!(!r.has_statistical_content);
        assert_eq!(r.score, 0.0);
    }
}
