//! Final verdict engine.
//!
//! Consumes the eight analyzer records and produces one bounded trust
//! estimate with propagated uncertainty, a categorical label, and a ranked
//! reason list. Risk-oriented scores are inverted into goodness, folded by
//! the configured weight table, then checked against hard overrides before
//! labeling. Reasons come from a declarative rule table evaluated once and
//! sorted by priority.

use crate::domain::config::ReviewConfig;
use crate::domain::models::{clamp01, AnalysisSet, VerdictLabel, VerdictResult};

/// Flat view of the record set the rules read from.
struct VerdictInput {
    stats: f64,
    methodology: f64,
    citations: f64,
    replication: f64,
    bias_risk: f64,
    plagiarism_risk: f64,
    fraud_risk: f64,
    ethics_risk: f64,
    p_value_count: usize,
    /// Words in the submitted document; zero means the whitespace-only
    /// baseline, where the weak-evidence override must not fire.
    document_word_count: usize,
}

impl VerdictInput {
    fn from_records(records: &AnalysisSet, document_word_count: usize) -> Self {
        Self {
            stats: clamp01(records.statistics.score),
            methodology: clamp01(records.methodology.score),
            citations: clamp01(records.citations.score),
            replication: clamp01(records.replication.score),
            bias_risk: clamp01(records.bias.score),
            plagiarism_risk: clamp01(records.plagiarism.score),
            fraud_risk: clamp01(records.fraud.score),
            ethics_risk: clamp01(records.ethics.score),
            p_value_count: records.statistics.p_values.count,
            document_word_count,
        }
    }
}

pub fn build_verdict(
    records: &AnalysisSet,
    document_word_count: usize,
    cfg: &ReviewConfig,
) -> VerdictResult {
    let input = VerdictInput::from_records(records, document_word_count);
    let w = &cfg.weights;

    // Risk-oriented components invert into goodness.
    let trust = clamp01(
        w.statistics * input.stats
            + w.methodology * input.methodology
            + w.citations * input.citations
            + w.replication * input.replication
            + w.bias * (1.0 - input.bias_risk)
            + w.plagiarism * (1.0 - input.plagiarism_risk)
            + w.fraud * (1.0 - input.fraud_risk)
            + w.ethics * (1.0 - input.ethics_risk),
    );

    let std_dev = propagated_std_dev(&input, cfg);
    let confidence_interval = [
        clamp01(trust - 1.96 * std_dev),
        clamp01(trust + 1.96 * std_dev),
    ];

    let overrides = triggered_overrides(&input, cfg);

    // Inclusive bounds: exactly 0.70 is Reliable, exactly 0.40 is High Risk.
    // The epsilon keeps that inclusivity through accumulated float error.
    const LABEL_EPS: f64 = 1e-9;
    let label = if !overrides.is_empty() {
        VerdictLabel::HighRisk
    } else if trust >= cfg.thresholds.reliable_min - LABEL_EPS {
        VerdictLabel::Reliable
    } else if trust <= cfg.thresholds.high_risk_max + LABEL_EPS {
        VerdictLabel::HighRisk
    } else {
        VerdictLabel::Mixed
    };

    let reasons = build_reasons(&input, trust, std_dev, confidence_interval, label, &overrides);

    VerdictResult {
        trust_score: trust,
        std_dev,
        confidence_interval,
        label,
        reasons,
    }
}

/// Independent per-component uncertainties folded as
/// `variance = sum(weight^2 * uncertainty^2)`.
fn propagated_std_dev(input: &VerdictInput, cfg: &ReviewConfig) -> f64 {
    let w = &cfg.weights;
    let u = &cfg.uncertainty;
    let terms = [
        (w.statistics, u.statistics.pick(input.stats)),
        (w.methodology, u.methodology.pick(input.methodology)),
        (w.citations, u.citations.pick(input.citations)),
        (w.replication, u.replication.pick(input.replication)),
        (w.bias, u.bias),
        (w.plagiarism, u.plagiarism),
        (w.fraud, u.fraud),
        (w.ethics, u.ethics),
    ];
    terms
        .iter()
        .map(|(weight, unc)| weight * weight * unc * unc)
        .sum::<f64>()
        .sqrt()
}

fn triggered_overrides(input: &VerdictInput, cfg: &ReviewConfig) -> Vec<&'static str> {
    let t = &cfg.thresholds;
    let mut overrides = Vec::new();
    if input.fraud_risk >= t.override_risk {
        overrides.push("High fraud/anomaly suspicion signals were detected.");
    }
    if input.plagiarism_risk >= t.override_risk {
        overrides.push("High plagiarism/redundancy suspicion signals were detected.");
    }
    if input.ethics_risk >= t.override_risk {
        overrides.push("High ethics/safety risk signals were detected.");
    }
    // An empty document has nothing to support; only real text with weak
    // statistics and methodology is an evidence failure.
    if input.document_word_count > 0
        && input.stats < t.weak_signal
        && input.methodology < t.weak_signal
    {
        overrides.push("Statistical and methodology support appears very weak.");
    }
    overrides
}

// ---------------------------------------------------------------------------
// Reason ranking
// ---------------------------------------------------------------------------

struct ReasonRule {
    priority: u8,
    applies: fn(&VerdictInput) -> bool,
    message: &'static str,
}

const REASON_RULES: &[ReasonRule] = &[
    ReasonRule {
        priority: 80,
        applies: |i| i.fraud_risk >= 0.50,
        message: "Fraud/anomaly heuristics raised notable concerns.",
    },
    ReasonRule {
        priority: 80,
        applies: |i| i.plagiarism_risk >= 0.50,
        message: "Plagiarism/redundancy heuristics raised notable concerns.",
    },
    ReasonRule {
        priority: 80,
        applies: |i| i.ethics_risk >= 0.50,
        message: "Ethics/safety heuristics raised notable concerns.",
    },
    ReasonRule {
        priority: 70,
        applies: |i| i.stats <= 0.25,
        message: "Statistical rigor signals were weak or missing.",
    },
    ReasonRule {
        priority: 65,
        applies: |i| i.methodology <= 0.25,
        message: "Methodology/design signals appear weak or underspecified.",
    },
    ReasonRule {
        priority: 60,
        applies: |i| i.stats >= 0.70,
        message: "Strong statistical rigor signals were detected.",
    },
    ReasonRule {
        priority: 55,
        applies: |i| i.methodology >= 0.60,
        message: "Methodology/design signals appear reasonably strong.",
    },
    ReasonRule {
        priority: 55,
        applies: |i| i.replication <= 0.33,
        message: "Replicability signals are fragile (limited robustness/openness).",
    },
    ReasonRule {
        priority: 52,
        applies: |i| i.p_value_count == 0 && i.stats <= 0.30,
        message: "Few or no p-values were detected; statistical reporting may be limited.",
    },
    ReasonRule {
        priority: 50,
        applies: |i| i.citations <= 0.25,
        message: "Citation/reference signals are weak (few or unclear references).",
    },
    ReasonRule {
        priority: 45,
        applies: |i| i.replication >= 0.67,
        message: "Replicability signals are strong (robustness/openness/claims).",
    },
    ReasonRule {
        priority: 40,
        applies: |i| i.citations >= 0.60,
        message: "Citation/reference signals suggest decent sourcing.",
    },
];

const FALLBACK_REASONS: &[&str] = &[
    "These signals are heuristic; interpret them as guidance, not proof.",
    "Consider a manual review of methods, data availability, and citations.",
];

fn build_reasons(
    input: &VerdictInput,
    trust: f64,
    std_dev: f64,
    ci: [f64; 2],
    label: VerdictLabel,
    overrides: &[&'static str],
) -> Vec<String> {
    let mut candidates: Vec<(u8, String)> = Vec::new();

    for o in overrides {
        candidates.push((100, (*o).to_string()));
    }
    for rule in REASON_RULES {
        if (rule.applies)(input) {
            candidates.push((rule.priority, rule.message.to_string()));
        }
    }
    candidates.push((
        10,
        format!(
            "Final verdict: **{label}** (trust {trust:.2}, stddev {std_dev:.2}, 95% CI [{:.2}, {:.2}]).",
            ci[0], ci[1]
        ),
    ));

    // Stable sort keeps rule order within equal priorities.
    candidates.sort_by(|a, b| b.0.cmp(&a.0));

    let mut reasons: Vec<String> = Vec::new();
    for (_, text) in candidates {
        if reasons.iter().any(|r| *r == text) {
            continue;
        }
        reasons.push(text);
        if reasons.len() >= 5 {
            break;
        }
    }
    for fallback in FALLBACK_REASONS {
        if reasons.len() >= 3 {
            break;
        }
        reasons.push((*fallback).to_string());
    }
    reasons
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers;

    fn records_for(text: &str) -> AnalysisSet {
        AnalysisSet {
            bias: analyzers::bias::analyze(text),
            statistics: analyzers::statistics::analyze(text),
            methodology: analyzers::methodology::analyze(text),
            citations: analyzers::citations::analyze(text),
            plagiarism: analyzers::plagiarism::analyze(text),
            fraud: analyzers::fraud::analyze(text),
            ethics: analyzers::ethics::analyze(text),
            replication: analyzers::replication::analyze(text),
        }
    }

    /// Synthetic set with every goodness component at `good` and every risk
    /// component at `1 - good`, so the weighted trust equals `good` exactly.
    fn uniform_records(good: f64) -> AnalysisSet {
        let mut set = records_for("");
        set.statistics.score = good;
        set.methodology.score = good;
        set.citations.score = good;
        set.replication.score = good;
        set.bias.score = 1.0 - good;
        set.plagiarism.score = 1.0 - good;
        set.fraud.score = 1.0 - good;
        set.ethics.score = 1.0 - good;
        set
    }

    #[test]
    fn trust_is_a_convex_combination() {
        let cfg = ReviewConfig::default();
        let set = records_for(
            "A randomized controlled experiment, n = 150, with a t-test (p = 0.01) \
             and preregistered open data. References\nSmith, J. (2020). Prior work.",
        );
        let v = build_verdict(&set, 30, &cfg);
        assert!((0.0..=1.0).contains(&v.trust_score));
        assert!(v.confidence_interval[0] <= v.trust_score);
        assert!(v.trust_score <= v.confidence_interval[1]);
        assert!((0.0..=1.0).contains(&v.confidence_interval[0]));
        assert!((0.0..=1.0).contains(&v.confidence_interval[1]));
    }

    #[test]
    fn label_bounds_are_inclusive() {
        let cfg = ReviewConfig::default();
        let reliable = build_verdict(&uniform_records(0.70), 100, &cfg);
        assert_eq!(reliable.label, VerdictLabel::Reliable);

        let high_risk = build_verdict(&uniform_records(0.40), 100, &cfg);
        assert_eq!(high_risk.label, VerdictLabel::HighRisk);

        let mixed = build_verdict(&uniform_records(0.55), 100, &cfg);
        assert_eq!(mixed.label, VerdictLabel::Mixed);
    }

    #[test]
    fn fraud_override_beats_a_reliable_trust_score() {
        let cfg = ReviewConfig::default();
        let mut set = uniform_records(0.95);
        set.fraud.score = 0.75;
        let v = build_verdict(&set, 100, &cfg);
        // Weighted trust is still comfortably reliable, but the override wins.
        assert!(v.trust_score > cfg.thresholds.reliable_min);
        assert_eq!(v.label, VerdictLabel::HighRisk);
        assert!(v.reasons[0].contains("fraud"));
    }

    #[test]
    fn weak_evidence_override_requires_a_nonempty_document() {
        let cfg = ReviewConfig::default();
        let empty = records_for("   \n  ");
        let v = build_verdict(&empty, 0, &cfg);
        // Baseline trust is 0.38: High Risk via thresholds, not via override.
        assert!((v.trust_score - 0.38).abs() < 1e-9);
        assert_eq!(v.label, VerdictLabel::HighRisk);
        assert!(!v
            .reasons
            .iter()
            .any(|r| r.contains("very weak")));

        let v2 = build_verdict(&empty, 50, &cfg);
        assert!(v2.reasons.iter().any(|r| r.contains("very weak")));
        assert_eq!(v2.label, VerdictLabel::HighRisk);
    }

    #[test]
    fn reasons_are_bounded_and_padded() {
        let cfg = ReviewConfig::default();
        let v = build_verdict(&uniform_records(0.55), 100, &cfg);
        assert!(v.reasons.len() >= 3);
        assert!(v.reasons.len() <= 5);

        let busy = build_verdict(&uniform_records(0.05), 100, &cfg);
        assert_eq!(busy.reasons.len(), 5);
        let unique: std::collections::HashSet<&String> = busy.reasons.iter().collect();
        assert_eq!(unique.len(), busy.reasons.len());
    }

    #[test]
    fn summary_reason_carries_the_numbers() {
        let cfg = ReviewConfig::default();
        let v = build_verdict(&uniform_records(0.55), 100, &cfg);
        let summary = v
            .reasons
            .iter()
            .find(|r| r.starts_with("Final verdict"))
            .expect("summary reason present");
        assert!(summary.contains("Mixed"));
        assert!(summary.contains("95% CI"));
    }

    #[test]
    fn stddev_matches_the_propagation_formula_for_the_baseline() {
        let cfg = ReviewConfig::default();
        let v = build_verdict(&records_for(""), 0, &cfg);
        // All goodness components sit below their thresholds.
        let expected: f64 = [
            (0.18f64, 0.30f64),
            (0.18, 0.30),
            (0.12, 0.30),
            (0.14, 0.30),
            (0.08, 0.25),
            (0.10, 0.20),
            (0.10, 0.25),
            (0.10, 0.22),
        ]
        .iter()
        .map(|(w, u)| w * w * u * u)
        .sum::<f64>()
        .sqrt();
        assert!((v.std_dev - expected).abs() < 1e-12);
    }
}
