//! Replicability analyzer.
//!
//! Averages three signal families — explicit replication claims, robustness
//! checks (bootstrap, Monte Carlo, sensitivity analyses), and openness
//! (data, code, preregistration) — and buckets the result into a simulated
//! replication outcome.

use crate::domain::models::{
    clamp01, OpennessSignals, ReplicationOutcome, ReplicationRecord, RobustnessSignals,
};

const REPLICATION_CLAIM_PHRASES: &[&str] = &[
    "we replicate",
    "we replicated",
    "replication of prior work",
    "explicitly replicates prior findings",
    "replicate previous results",
    "direct replication",
    "conceptual replication",
];

const SENSITIVITY_PHRASES: &[&str] = &["sensitivity analysis", "robustness check", "stress test"];

const OPEN_DATA_PHRASES: &[&str] = &[
    "open data",
    "data repository",
    "osf.io",
    "zenodo",
    "figshare",
    "dryad",
];
const OPEN_CODE_PHRASES: &[&str] = &[
    "analysis code",
    "github.com",
    "gitlab",
    "code repository",
];
const PREREG_PHRASES: &[&str] = &["preregistered", "registered report", "preregistration"];

pub fn analyze(text: &str) -> ReplicationRecord {
    let lowered = text.to_lowercase();
    if lowered.trim().is_empty() {
        return ReplicationRecord {
            outcome: ReplicationOutcome::Uncertain,
            has_replication_claims: false,
            robustness: RobustnessSignals::default(),
            openness: OpennessSignals::default(),
            score: 0.0,
        };
    }

    let has_replication_claims = contains_any(&lowered, REPLICATION_CLAIM_PHRASES);

    let robustness = RobustnessSignals {
        mentions_bootstrap: lowered.contains("bootstrap"),
        mentions_monte_carlo: lowered.contains("monte carlo"),
        mentions_sensitivity_analysis: contains_any(&lowered, SENSITIVITY_PHRASES),
    };

    let openness = OpennessSignals {
        has_open_data: contains_any(&lowered, OPEN_DATA_PHRASES),
        has_open_code: contains_any(&lowered, OPEN_CODE_PHRASES),
        has_preregistration: contains_any(&lowered, PREREG_PHRASES),
    };

    let robustness_fraction = [
        robustness.mentions_bootstrap,
        robustness.mentions_monte_carlo,
        robustness.mentions_sensitivity_analysis,
    ]
    .iter()
    .filter(|b| **b)
    .count() as f64
        / 3.0;
    let openness_fraction = [
        openness.has_open_data,
        openness.has_open_code,
        openness.has_preregistration,
    ]
    .iter()
    .filter(|b| **b)
    .count() as f64
        / 3.0;

    let claims_part = if has_replication_claims { 1.0 } else { 0.0 };
    let score = clamp01((claims_part + robustness_fraction + openness_fraction) / 3.0);

    let outcome = if score >= 0.67 {
        ReplicationOutcome::LikelyReplicable
    } else if score <= 0.33 {
        ReplicationOutcome::Fragile
    } else {
        ReplicationOutcome::Uncertain
    };

    ReplicationRecord {
        outcome,
        has_replication_claims,
        robustness,
        openness,
        score,
    }
}

fn contains_any(lowered: &str, phrases: &[&str]) -> bool {
    phrases.iter().any(|p| lowered.contains(p))
}
