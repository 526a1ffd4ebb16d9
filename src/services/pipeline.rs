//! Review pipeline orchestrator.
//!
//! Owns the invocation order: analyzers in a fixed sequence, the single
//! cross-wiring correction, the self-audit pass, then the verdict. All
//! per-invocation state (trace, audit accumulator) is created inside
//! `review` and returned with the result, so concurrent reviews never share
//! mutable state.

use crate::analyzers;
use crate::domain::config::ReviewConfig;
use crate::domain::models::{AnalysisSet, Document, ReviewResult};
use crate::services::{audit, trace::ReasoningTrace, verdict};
use serde_json::json;
use tracing::debug;

pub fn review(document: &Document, cfg: &ReviewConfig) -> ReviewResult {
    let text = document.text.as_str();
    let word_count = text.split_whitespace().count();
    let mut trace = ReasoningTrace::new();

    trace.add_step_with(
        "ingest",
        format!("Loaded document with {word_count} words."),
        json!({
            "word_count": word_count,
            "size_bytes": document.metadata.size_bytes,
            "section_count": document.metadata.section_count,
        }),
    );

    let bias = analyzers::bias::analyze(text);
    trace.add_step_with(
        "bias_analysis",
        format!("Overall bias score={:.4}", bias.score),
        json!({
            "emotional_density": bias.emotional_language.density,
            "authority_density": bias.authority_appeals.density,
            "certainty_density": bias.certainty_language.density,
        }),
    );

    let mut statistics = analyzers::statistics::analyze(text);
    let methodology = analyzers::methodology::analyze(text);

    // Cross-wiring: a paper reporting sample sizes is making statistical
    // claims even if no p-values were textually detected. Floor only; a
    // stronger signal already found is never lowered.
    if !statistics.has_statistical_content && methodology.sample_size.count >= 1 {
        statistics.has_statistical_content = true;
        if statistics.score < cfg.thresholds.rescue_floor {
            statistics.score = cfg.thresholds.rescue_floor;
        }
        debug!(
            sample_size_count = methodology.sample_size.count,
            rescued_score = statistics.score,
            "statistics rescue fired"
        );
        trace.add_step_with(
            "statistics_rescue",
            "Methodology reports sample sizes; statistics record upgraded.",
            json!({
                "sample_size_count": methodology.sample_size.count,
                "rescued_score": statistics.score,
            }),
        );
    }

    trace.add_step_with(
        "statistical_analysis",
        format!("Overall rigor score={:.4}", statistics.score),
        json!({
            "has_statistical_content": statistics.has_statistical_content,
            "p_value_count": statistics.p_values.count,
            "ci_count": statistics.confidence_intervals.count,
        }),
    );
    trace.add_step_with(
        "methodology_analysis",
        format!("Overall methodology score={:.4}", methodology.score),
        json!({
            "sample_size_count": methodology.sample_size.count,
            "small_sample_warning": methodology.sample_size.small_sample_warning,
            "has_control_group": methodology.control_and_blinding.has_control_group,
            "has_randomization": methodology.design.has_randomization,
        }),
    );

    let citations = analyzers::citations::analyze(text);
    trace.add_step_with(
        "citation_analysis",
        format!("Overall citation quality score={:.4}", citations.score),
        json!({
            "has_references_section": citations.has_references_section,
            "estimated_reference_count": citations.estimated_reference_count,
            "doi_count": citations.dois.count,
        }),
    );

    let plagiarism = analyzers::plagiarism::analyze(text);
    trace.add_step_with(
        "plagiarism_analysis",
        format!("Overall plagiarism suspicion score={:.4}", plagiarism.score),
        json!({
            "ngram_repetition_ratio": plagiarism.ngram_repetition_ratio,
            "repeated_sentence_ratio": plagiarism.repeated_sentence_ratio,
        }),
    );

    let fraud = analyzers::fraud::analyze(text);
    trace.add_step_with(
        "fraud_analysis",
        format!("Overall fraud suspicion score={:.4}", fraud.score),
        json!({
            "cluster_ratio": fraud.suspicious_p_clustering.cluster_ratio,
            "mismatch_count": fraud.mismatched_significance.count,
        }),
    );

    let ethics = analyzers::ethics::analyze(text);
    trace.add_step_with(
        "ethics_analysis",
        format!("Overall ethics risk score={:.4}", ethics.score),
        json!({
            "has_human_subjects": ethics.has_human_subjects,
            "has_ethics_approval": ethics.has_ethics_approval_mention,
        }),
    );

    let replication = analyzers::replication::analyze(text);
    trace.add_step_with(
        "replication_analysis",
        format!("Overall replicability score={:.4}", replication.score),
        json!({
            "outcome": replication.outcome,
            "has_replication_claims": replication.has_replication_claims,
        }),
    );

    let records = AnalysisSet {
        bias,
        statistics,
        methodology,
        citations,
        plagiarism,
        fraud,
        ethics,
        replication,
    };

    // Fresh audit accumulator per invocation.
    let module_audits = audit::audit_all(&records, cfg.thresholds.audit_pass_risk);
    for a in &module_audits {
        trace.add_step_with_confidence(
            "self_audit",
            format!(
                "Audited {}: {} findings ({} high-severity).",
                a.module, a.findings_count, a.high_severity_count
            ),
            Some(json!({"module": a.module, "risk_score": a.risk_score, "passed": a.passed})),
            1.0 - a.risk_score,
        );
    }
    let overall = audit::overall_audit(&module_audits);

    let verdict = verdict::build_verdict(&records, word_count, cfg);
    trace.add_step_with_confidence(
        "final_verdict",
        format!(
            "Verdict {} with trust score={:.4}",
            verdict.label, verdict.trust_score
        ),
        Some(json!({
            "label": verdict.label,
            "std_dev": verdict.std_dev,
            "confidence_interval": verdict.confidence_interval,
        })),
        verdict.trust_score,
    );

    debug!(
        trust = verdict.trust_score,
        label = %verdict.label,
        audit_risk = overall.overall_risk,
        "review complete"
    );

    ReviewResult {
        document: document.metadata.clone(),
        records,
        module_audits,
        audit: overall,
        verdict,
        trace: trace.export(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::ingest;

    fn doc(text: &str) -> Document {
        ingest::document_from_text("sample", text)
    }

    #[test]
    fn whitespace_document_yields_zero_baselines() {
        let cfg = ReviewConfig::default();
        let result = review(&doc("   \n  "), &cfg);

        assert_eq!(result.records.bias.score, 0.0);
        assert_eq!(result.records.statistics.score, 0.0);
        assert_eq!(result.records.plagiarism.score, 0.0);
        assert_eq!(result.records.fraud.score, 0.0);
        assert_eq!(result.records.ethics.score, 0.0);
        assert!(!result.records.statistics.has_statistical_content);
        assert_eq!(result.audit.overall_risk, 0.0);
        assert!(result.audit.passed_all);
        // High Risk comes from the low baseline trust, not an override.
        assert!(!result
            .verdict
            .reasons
            .iter()
            .any(|r| r.contains("very weak")));
    }

    #[test]
    fn cross_wiring_rescues_sample_size_only_text() {
        let cfg = ReviewConfig::default();
        let result = review(&doc("n = 200 participants. No p-values reported."), &cfg);

        let stats = &result.records.statistics;
        assert!(stats.has_statistical_content);
        assert!(stats.score >= cfg.thresholds.rescue_floor);
        assert!(result.records.methodology.sample_size.count >= 1);
        assert!(result.trace.iter().any(|s| s.tag == "statistics_rescue"));
    }

    #[test]
    fn cross_wiring_never_lowers_an_existing_score() {
        let cfg = ReviewConfig::default();
        // Statistical content present: rescue must not fire at all.
        let result = review(&doc("We ran a t-test with p = 0.01 on n = 40 samples."), &cfg);
        assert!(!result.trace.iter().any(|s| s.tag == "statistics_rescue"));
        assert!(result.records.statistics.score > cfg.thresholds.rescue_floor);
    }

    #[test]
    fn trace_covers_every_stage_in_order() {
        let cfg = ReviewConfig::default();
        let result = review(&doc("Participants (n = 30) were surveyed."), &cfg);

        let tags: Vec<&str> = result.trace.iter().map(|s| s.tag.as_str()).collect();
        let ingest_pos = tags.iter().position(|t| *t == "ingest").unwrap();
        let verdict_pos = tags.iter().position(|t| *t == "final_verdict").unwrap();
        assert_eq!(ingest_pos, 0);
        assert_eq!(verdict_pos, tags.len() - 1);
        assert_eq!(tags.iter().filter(|t| **t == "self_audit").count(), 6);
        assert!(tags.contains(&"bias_analysis"));
        assert!(tags.contains(&"replication_analysis"));
    }

    #[test]
    fn overconfident_text_is_caught_by_bias_and_self_audit() {
        let cfg = ReviewConfig::default();
        let result = review(
            &doc("This clearly proves the theory is correct without doubt."),
            &cfg,
        );

        assert!(result.records.bias.certainty_language.count >= 1);
        assert!(!result.records.statistics.has_statistical_content);
        let bias_audit = result
            .module_audits
            .iter()
            .find(|a| a.module == "bias")
            .unwrap();
        assert!(bias_audit.high_severity_count >= 1);
        assert!(result.audit.overall_risk > 0.0);
    }

    #[test]
    fn all_scores_stay_bounded_on_a_rich_document() {
        let cfg = ReviewConfig::default();
        let text = "This groundbreaking study clearly proves our theory. \
            We conducted a randomized controlled experiment with a control group; \
            participants were randomly assigned and the study was double-blind. \
            The sample size was n = 120 in treatment and n = 118 in control. \
            A t-test and one-way ANOVA were significant (p < 0.01, p = 0.032). \
            A 95% CI [1.2, 2.3] was computed; Cohen's d and a power analysis are reported. \
            The protocol was preregistered on osf.io and anonymized open data are available.";
        let result = review(&doc(text), &cfg);

        for score in [
            result.records.bias.score,
            result.records.statistics.score,
            result.records.methodology.score,
            result.records.citations.score,
            result.records.plagiarism.score,
            result.records.fraud.score,
            result.records.ethics.score,
            result.records.replication.score,
        ] {
            assert!((0.0..=1.0).contains(&score));
        }
        assert!(result.records.statistics.has_statistical_content);
        assert!(result.records.statistics.p_values.count >= 1);
        let v = &result.verdict;
        assert!(v.confidence_interval[0] <= v.trust_score);
        assert!(v.trust_score <= v.confidence_interval[1]);
        assert!(v.reasons.len() >= 3 && v.reasons.len() <= 5);
    }
}
