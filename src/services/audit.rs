//! Self-audit of the pipeline's own textual output.
//!
//! This never looks at the submitted document. It re-reads the free text
//! each module produced (example strings, summaries) and flags absolutist
//! claims and local contradictions, so the system distrusts its own
//! overconfident phrasing the same way it distrusts a paper's.

use crate::domain::models::{
    AnalysisSet, AuditCategory, AuditFinding, AuditSeverity, BiasRecord, EthicsRecord, FraudRecord,
    MethodologyRecord, ModuleAuditResult, OverallAudit, ReplicationOutcome, ReplicationRecord,
    StatisticsRecord,
};
use once_cell::sync::Lazy;
use regex::Regex;

/// Phrases that demand stronger evidence than a heuristic can provide.
static OVERCONFIDENCE_RES: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)\bproven?\b",
        r"(?i)\bestablished fact\b",
        r"(?i)\bdefinitive\b",
        r"(?i)\birrefutable\b",
        r"(?i)\bobviously\b",
        r"(?i)\bclearly\b",
        r"(?i)\bwithout doubt\b",
        r"(?i)\bunanimous consensus\b",
        r"(?i)\ball experts agree\b",
        r"(?i)\bno serious scientist disputes\b",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// Claim/denial pairs inside one sentence window.
static CONTRADICTION_RES: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)however.*not significant",
        r"(?i)significant.*however.*no effect",
        r"(?i)strong evidence.*cannot conclude",
        r"(?i)results show.*but we reject",
        r"(?i)supports? the hypothesis.*fails? to reach significance",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// A module output whose free text can be re-audited.
pub trait Auditable {
    fn audit_name(&self) -> &'static str;
    /// All free-text the module emitted, concatenated for scanning.
    fn audit_text(&self) -> String;
}

pub fn audit_module(module: &str, text: &str, pass_risk: f64) -> ModuleAuditResult {
    let mut findings = Vec::new();

    for re in OVERCONFIDENCE_RES.iter() {
        for m in re.find_iter(text) {
            findings.push(AuditFinding {
                category: AuditCategory::Overconfidence,
                matched: m.as_str().to_string(),
                context: context_window(text, m.start(), m.end(), 60),
                severity: AuditSeverity::High,
                recommendation: "Requires direct empirical backing or citation".to_string(),
            });
        }
    }
    for re in CONTRADICTION_RES.iter() {
        for m in re.find_iter(text) {
            findings.push(AuditFinding {
                category: AuditCategory::Contradiction,
                matched: m.as_str().to_string(),
                context: context_window(text, m.start(), m.end(), 100),
                severity: AuditSeverity::Medium,
                recommendation: "Verify logical consistency between claim and evidence"
                    .to_string(),
            });
        }
    }

    let high_severity_count = findings
        .iter()
        .filter(|f| f.severity == AuditSeverity::High)
        .count();
    let findings_count = findings.len();
    let risk_score =
        (0.4 * high_severity_count as f64 + 0.08 * findings_count as f64).min(1.0);

    ModuleAuditResult {
        module: module.to_string(),
        risk_score,
        findings_count,
        high_severity_count,
        findings,
        passed: risk_score < pass_risk,
    }
}

/// Fold per-module audits: risk is the max, findings sum, passed is AND.
/// No audited modules means zero risk.
pub fn overall_audit(audits: &[ModuleAuditResult]) -> OverallAudit {
    OverallAudit {
        overall_risk: audits
            .iter()
            .map(|a| a.risk_score)
            .fold(0.0, f64::max),
        total_findings: audits.iter().map(|a| a.findings_count).sum(),
        passed_all: audits.iter().all(|a| a.passed),
        module_count: audits.len(),
    }
}

/// ± `pad` characters around the match, clamped to char boundaries.
fn context_window(text: &str, start: usize, end: usize, pad: usize) -> String {
    let mut lo = start.saturating_sub(pad);
    while lo > 0 && !text.is_char_boundary(lo) {
        lo -= 1;
    }
    let mut hi = (end + pad).min(text.len());
    while hi < text.len() && !text.is_char_boundary(hi) {
        hi += 1;
    }
    text[lo..hi].trim().to_string()
}

// ---------------------------------------------------------------------------
// What each audited module exposes for scanning
// ---------------------------------------------------------------------------

fn join(parts: Vec<String>) -> String {
    parts.join(" ")
}

impl Auditable for BiasRecord {
    fn audit_name(&self) -> &'static str {
        "bias"
    }

    fn audit_text(&self) -> String {
        let mut parts: Vec<String> = Vec::new();
        for hits in [
            &self.emotional_language,
            &self.authority_appeals,
            &self.ideological_language,
            &self.affiliation_markers,
            &self.certainty_language,
        ] {
            parts.extend(hits.examples.iter().cloned());
        }
        parts.push(format!(
            "Loaded-language scan over {} words scored {:.4}.",
            self.total_words, self.score
        ));
        join(parts)
    }
}

impl Auditable for StatisticsRecord {
    fn audit_name(&self) -> &'static str {
        "statistics"
    }

    fn audit_text(&self) -> String {
        let mut parts: Vec<String> = Vec::new();
        parts.extend(self.p_values.examples.iter().cloned());
        parts.extend(self.confidence_intervals.examples.iter().cloned());
        parts.extend(self.tests.iter().cloned());
        parts.extend(self.effect_terms.iter().cloned());
        parts.push(format!(
            "Rigor signals across {} p-values scored {:.4}.",
            self.p_values.count, self.score
        ));
        join(parts)
    }
}

impl Auditable for MethodologyRecord {
    fn audit_name(&self) -> &'static str {
        "methodology"
    }

    fn audit_text(&self) -> String {
        let mut parts: Vec<String> = Vec::new();
        parts.extend(self.design.terms_found.iter().cloned());
        parts.extend(self.control_and_blinding.terms_found.iter().cloned());
        parts.extend(self.transparency.terms_found.iter().cloned());
        parts.push(format!(
            "Design quality with {} sample-size mentions scored {:.4}.",
            self.sample_size.count, self.score
        ));
        join(parts)
    }
}

impl Auditable for FraudRecord {
    fn audit_name(&self) -> &'static str {
        "fraud"
    }

    fn audit_text(&self) -> String {
        let mut parts: Vec<String> = Vec::new();
        parts.extend(self.extreme_effect_language.examples.iter().cloned());
        parts.extend(self.mismatched_significance.examples.iter().cloned());
        parts.extend(self.impossible_p_values.examples.iter().cloned());
        parts.extend(self.suspicious_p_clustering.examples.iter().cloned());
        parts.push(format!("Anomaly suspicion scored {:.4}.", self.score));
        join(parts)
    }
}

impl Auditable for EthicsRecord {
    fn audit_name(&self) -> &'static str {
        "ethics"
    }

    fn audit_text(&self) -> String {
        let mut parts: Vec<String> = self.risk_terms.examples.clone();
        parts.push(format!("Ethics risk scored {:.4}.", self.score));
        join(parts)
    }
}

impl Auditable for ReplicationRecord {
    fn audit_name(&self) -> &'static str {
        "replication"
    }

    fn audit_text(&self) -> String {
        let outcome = match self.outcome {
            ReplicationOutcome::LikelyReplicable => "likely replicable",
            ReplicationOutcome::Uncertain => "uncertain",
            ReplicationOutcome::Fragile => "fragile",
        };
        format!(
            "Replicability looks {} with score {:.4}; replication claims present: {}.",
            outcome, self.score, self.has_replication_claims
        )
    }
}

/// Audit the six downstream modules whose output carries free text.
pub fn audit_all(records: &AnalysisSet, pass_risk: f64) -> Vec<ModuleAuditResult> {
    let modules: [&dyn Auditable; 6] = [
        &records.bias,
        &records.statistics,
        &records.methodology,
        &records.fraud,
        &records.ethics,
        &records.replication,
    ];
    modules
        .iter()
        .map(|m| audit_module(m.audit_name(), &m.audit_text(), pass_risk))
        .collect()
}
