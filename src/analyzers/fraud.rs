//! Fraud / anomaly analyzer.
//!
//! Purely textual heuristics: impossible p-values, p-values clustered just
//! under the significance threshold, extreme-effect language, sentences
//! whose significance claim contradicts the reported p-value, and a small
//! set of data-handling red-flag phrases.

use crate::domain::models::{clamp01, FraudRecord, FraudSignals, PClusteringInfo, TermHits};
use once_cell::sync::Lazy;
use regex::Regex;

static P_VALUE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bp\s*(?:<=|>=|[<>=])\s*(\d+(?:\.\d+)?|\.\d+)").unwrap());
static SENTENCE_SPLIT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]\s+").unwrap());

const DATA_REFUSAL_PHRASES: &[&str] = &[
    "we do not share raw data",
    "we do not share data",
    "data cannot be shared",
    "data cannot be made public",
    "due to proprietary concerns",
    "cannot release the raw data",
    "data not available",
    "code not available",
];

const IDENTICAL_P_PHRASES: &[&str] = &[
    "identical p-values",
    "same p-value for all tests",
    "all tests yielded p = 0.049",
];

const MANUAL_ADJUSTMENT_PHRASES: &[&str] = &[
    "manually adjusted",
    "manually modified",
    "manually corrected",
    "adjusted to better reflect the theory",
    "tuned the data",
    "observations were manually adjusted",
    "data were adjusted",
];

const P_HACKING_PHRASES: &[&str] = &[
    "after inspecting the data we adjusted",
    "after looking at the data we decided",
    "after seeing the initial results",
    "ran multiple analyses until",
    "repeatedly re-ran tests until",
    "post hoc",
    "removed outliers",
    "excluding outliers",
    "multiple comparisons",
];

const EXTREME_EFFECT_TERMS: &[&str] = &[
    "groundbreaking",
    "unprecedented",
    "clearly proves",
    "obvious that",
    "definitively",
    "revolutionary",
    "no doubt",
];

pub fn analyze(text: &str) -> FraudRecord {
    let lowered = text.to_lowercase();
    if lowered.trim().is_empty() {
        return FraudRecord {
            impossible_p_values: TermHits::default(),
            suspicious_p_clustering: PClusteringInfo::default(),
            extreme_effect_language: TermHits::default(),
            mismatched_significance: TermHits::default(),
            signals: FraudSignals::default(),
            score: 0.0,
        };
    }

    let signals = FraudSignals {
        refuses_data_sharing: contains_any(&lowered, DATA_REFUSAL_PHRASES),
        identical_p_values: contains_any(&lowered, IDENTICAL_P_PHRASES),
        manual_adjustment_language: contains_any(&lowered, MANUAL_ADJUSTMENT_PHRASES),
        p_hacking_language: contains_any(&lowered, P_HACKING_PHRASES),
    };

    let mut all_p_values = Vec::new();
    let mut impossible = Vec::new();
    let mut cluster_examples = Vec::new();
    for c in P_VALUE_RE.captures_iter(text) {
        let Ok(v) = c[1].parse::<f64>() else { continue };
        all_p_values.push(v);
        if !(0.0..=1.0).contains(&v) && impossible.len() < 10 {
            impossible.push(c[0].trim().to_string());
        }
        if (0.045..=0.05).contains(&v) && cluster_examples.len() < 10 {
            cluster_examples.push(c[0].trim().to_string());
        }
    }

    let cluster_ratio = if all_p_values.is_empty() {
        0.0
    } else {
        cluster_examples.len() as f64 / all_p_values.len() as f64
    };
    let suspicious_p_clustering = PClusteringInfo {
        count: cluster_examples.len(),
        cluster_ratio,
        examples: cluster_examples,
    };
    let impossible_p_values = TermHits {
        count: impossible.len(),
        examples: impossible,
    };

    let extreme_hits: Vec<String> = EXTREME_EFFECT_TERMS
        .iter()
        .filter(|t| lowered.contains(*t))
        .map(|t| t.to_string())
        .collect();
    let extreme_effect_language = TermHits {
        count: extreme_hits.len(),
        examples: extreme_hits,
    };

    let mismatched_significance = find_significance_mismatches(text);

    // Bounded weighted blend of the five signal families.
    let signal_fraction = [
        signals.refuses_data_sharing,
        signals.identical_p_values,
        signals.manual_adjustment_language,
        signals.p_hacking_language,
    ]
    .iter()
    .filter(|b| **b)
    .count() as f64
        / 4.0;
    let cluster_score = (suspicious_p_clustering.cluster_ratio * 2.0).min(1.0);
    let mismatch_score = (mismatched_significance.count as f64 / 3.0).min(1.0);
    let impossible_score = if impossible_p_values.count > 0 { 1.0 } else { 0.0 };
    let extreme_score = (extreme_effect_language.count as f64 / 4.0).min(0.5);

    let score = clamp01(
        0.35 * signal_fraction
            + 0.25 * cluster_score
            + 0.20 * mismatch_score
            + 0.10 * impossible_score
            + 0.10 * extreme_score,
    );

    FraudRecord {
        impossible_p_values,
        suspicious_p_clustering,
        extreme_effect_language,
        mismatched_significance,
        signals,
        score,
    }
}

fn contains_any(lowered: &str, phrases: &[&str]) -> bool {
    phrases.iter().any(|p| lowered.contains(p))
}

/// Sentences claiming significance with p > 0.05, or claiming
/// non-significance with p <= 0.05.
fn find_significance_mismatches(text: &str) -> TermHits {
    let mut count = 0usize;
    let mut examples = Vec::new();
    for sentence in SENTENCE_SPLIT_RE.split(text) {
        let lowered = sentence.to_lowercase();
        if !lowered.contains('p') {
            continue;
        }
        let Some(c) = P_VALUE_RE.captures(sentence) else {
            continue;
        };
        let Ok(v) = c[1].parse::<f64>() else { continue };

        let claims_nonsig = lowered.contains("not significant") || lowered.contains("non-significant");
        let claims_sig = lowered.contains("significant") && !claims_nonsig;

        if (claims_sig && v > 0.05) || (claims_nonsig && v <= 0.05) {
            count += 1;
            if examples.len() < 5 {
                examples.push(sentence.trim().to_string());
            }
        }
    }
    TermHits { count, examples }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_yields_zero_baseline() {
        let r = analyze("  ");
        assert_eq!(r.score, 0.0);
        assert!(!r.signals.p_hacking_language);
        assert_eq!(r.suspicious_p_clustering.cluster_ratio, 0.0);
    }

    #[test]
    fn clean_text_scores_low() {
        let r = analyze("We report all analyses, p = 0.003, with open data and code.");
        assert!(r.score < 0.25);
        assert_eq!(r.mismatched_significance.count, 0);
    }

    #[test]
    fn impossible_p_values_are_flagged() {
        let r = analyze("The effect was strong (p = 1.7).");
        assert_eq!(r.impossible_p_values.count, 1);
        assert!(r.score >= 0.10);
    }

    #[test]
    fn clustering_just_under_threshold_is_suspicious() {
        let r = analyze("Tests gave p = 0.049, p = 0.047, p = 0.046 and p = 0.048.");
        assert_eq!(r.suspicious_p_clustering.count, 4);
        assert!((r.suspicious_p_clustering.cluster_ratio - 1.0).abs() < 1e-12);
        assert!(r.score >= 0.25);
    }

    #[test]
    fn significance_mismatch_is_detected() {
        let r = analyze("The difference was significant (p = 0.21). More text follows here.");
        assert_eq!(r.mismatched_significance.count, 1);
    }

    #[test]
    fn data_handling_red_flags_raise_the_score() {
        let r = analyze(
            "We removed outliers after seeing the initial results. \
             The raw data cannot be shared due to proprietary concerns.",
        );
        assert!(r.signals.p_hacking_language);
        assert!(r.signals.refuses_data_sharing);
        assert!(r.score >= 0.35 * 0.5);
    }
}
