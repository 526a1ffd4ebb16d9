use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Serialize)]
pub struct JsonOut<T: Serialize> {
    pub ok: bool,
    pub data: T,
}

/// Input handed to the review pipeline by the ingestion layer.
/// The core only ever reads `text`; metadata rides along for reporting.
#[derive(Debug, Clone, Serialize)]
pub struct Document {
    pub text: String,
    pub metadata: DocumentMetadata,
}

#[derive(Debug, Clone, Serialize)]
pub struct DocumentMetadata {
    pub name: String,
    pub kind: String,
    pub size_bytes: usize,
    pub word_count: usize,
    pub section_count: usize,
}

/// Whether a higher analyzer scalar means a better or a worse document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreOrientation {
    /// Higher is better (statistics, methodology, citations, replication).
    Goodness,
    /// Higher is worse (bias, plagiarism, fraud, ethics).
    Risk,
}

/// Count + capped example list, the common shape of a keyword sub-finding.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TermHits {
    pub count: usize,
    pub examples: Vec<String>,
}

/// `TermHits` plus a per-word density, used by the bias analyzer.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CategoryHits {
    pub count: usize,
    pub density: f64,
    pub examples: Vec<String>,
}

// ---------------------------------------------------------------------------
// Analyzer records
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct BiasRecord {
    pub total_words: usize,
    pub emotional_language: CategoryHits,
    pub authority_appeals: CategoryHits,
    pub ideological_language: CategoryHits,
    pub affiliation_markers: CategoryHits,
    pub certainty_language: CategoryHits,
    /// Risk-oriented: higher means more biased framing.
    pub score: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatisticsRecord {
    pub has_statistical_content: bool,
    pub p_values: TermHits,
    pub confidence_intervals: TermHits,
    pub tests: Vec<String>,
    pub effect_terms: Vec<String>,
    /// Goodness-oriented rigor score.
    pub score: f64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct DesignSignals {
    pub has_experimental: bool,
    pub has_observational: bool,
    pub has_randomization: bool,
    pub has_longitudinal_or_cross_sectional: bool,
    pub terms_found: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SampleSizeInfo {
    pub count: usize,
    pub values: Vec<u32>,
    pub small_sample_warning: bool,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ControlSignals {
    pub has_control_group: bool,
    pub has_placebo_or_comparison: bool,
    pub has_blinding: bool,
    pub terms_found: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct TransparencySignals {
    pub has_preregistration: bool,
    pub has_data_sharing: bool,
    pub has_protocol_or_repository: bool,
    pub terms_found: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MethodologyRecord {
    pub design: DesignSignals,
    pub sample_size: SampleSizeInfo,
    pub control_and_blinding: ControlSignals,
    pub transparency: TransparencySignals,
    /// Goodness-oriented design quality score.
    pub score: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CitationsRecord {
    pub has_references_section: bool,
    pub estimated_reference_count: usize,
    pub dois: TermHits,
    pub urls: TermHits,
    pub in_text_citations: TermHits,
    pub bracket_citations: TermHits,
    /// Goodness-oriented citation quality score.
    pub score: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlagiarismRecord {
    pub ngram_repetition_ratio: f64,
    pub highest_ngram_frequency: usize,
    pub top_repeated_ngrams: Vec<String>,
    pub repeated_sentence_ratio: f64,
    pub top_repeated_sentences: Vec<String>,
    /// Risk-oriented suspicion score.
    pub score: f64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PClusteringInfo {
    pub count: usize,
    pub cluster_ratio: f64,
    pub examples: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct FraudSignals {
    pub refuses_data_sharing: bool,
    pub identical_p_values: bool,
    pub manual_adjustment_language: bool,
    pub p_hacking_language: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct FraudRecord {
    pub impossible_p_values: TermHits,
    pub suspicious_p_clustering: PClusteringInfo,
    pub extreme_effect_language: TermHits,
    pub mismatched_significance: TermHits,
    pub signals: FraudSignals,
    /// Risk-oriented suspicion score.
    pub score: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct EthicsRecord {
    pub has_human_subjects: bool,
    pub has_vulnerable_population: bool,
    pub has_ethics_approval_mention: bool,
    pub has_informed_consent_mention: bool,
    pub mentions_data_protection: bool,
    pub risk_terms: TermHits,
    /// Risk-oriented ethics risk score.
    pub score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplicationOutcome {
    LikelyReplicable,
    Uncertain,
    Fragile,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RobustnessSignals {
    pub mentions_bootstrap: bool,
    pub mentions_monte_carlo: bool,
    pub mentions_sensitivity_analysis: bool,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct OpennessSignals {
    pub has_open_data: bool,
    pub has_open_code: bool,
    pub has_preregistration: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReplicationRecord {
    pub outcome: ReplicationOutcome,
    pub has_replication_claims: bool,
    pub robustness: RobustnessSignals,
    pub openness: OpennessSignals,
    /// Goodness-oriented replicability score.
    pub score: f64,
}

/// One record per analyzer, assembled by the pipeline.
/// Downstream consumers (verdict, audit) take this whole struct, so a missing
/// record is a compile error rather than a late lookup failure.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisSet {
    pub bias: BiasRecord,
    pub statistics: StatisticsRecord,
    pub methodology: MethodologyRecord,
    pub citations: CitationsRecord,
    pub plagiarism: PlagiarismRecord,
    pub fraud: FraudRecord,
    pub ethics: EthicsRecord,
    pub replication: ReplicationRecord,
}

// ---------------------------------------------------------------------------
// Reasoning trace
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct TraceStep {
    pub timestamp: DateTime<Utc>,
    pub tag: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

// ---------------------------------------------------------------------------
// Self-audit
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditCategory {
    Overconfidence,
    Contradiction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditSeverity {
    High,
    Medium,
}

#[derive(Debug, Clone, Serialize)]
pub struct AuditFinding {
    pub category: AuditCategory,
    pub matched: String,
    pub context: String,
    pub severity: AuditSeverity,
    pub recommendation: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ModuleAuditResult {
    pub module: String,
    pub risk_score: f64,
    pub findings_count: usize,
    pub high_severity_count: usize,
    pub findings: Vec<AuditFinding>,
    pub passed: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct OverallAudit {
    pub overall_risk: f64,
    pub total_findings: usize,
    pub passed_all: bool,
    pub module_count: usize,
}

// ---------------------------------------------------------------------------
// Verdict
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum VerdictLabel {
    Reliable,
    Mixed,
    #[serde(rename = "High Risk")]
    HighRisk,
}

impl std::fmt::Display for VerdictLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            VerdictLabel::Reliable => "Reliable",
            VerdictLabel::Mixed => "Mixed",
            VerdictLabel::HighRisk => "High Risk",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct VerdictResult {
    pub trust_score: f64,
    pub std_dev: f64,
    /// 95% interval clamped into [0,1]; lo <= trust <= hi holds.
    pub confidence_interval: [f64; 2],
    pub label: VerdictLabel,
    pub reasons: Vec<String>,
}

// ---------------------------------------------------------------------------
// Top-level result + boundary summary
// ---------------------------------------------------------------------------

/// Everything one review invocation produced. Constructed fresh per call and
/// handed to report/output collaborators read-only.
#[derive(Debug, Clone, Serialize)]
pub struct ReviewResult {
    pub document: DocumentMetadata,
    pub records: AnalysisSet,
    pub module_audits: Vec<ModuleAuditResult>,
    pub audit: OverallAudit,
    pub verdict: VerdictResult,
    pub trace: Vec<TraceStep>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FinalVerdictSummary {
    pub overall_trust_score: f64,
    pub verdict_label: VerdictLabel,
    pub reasons: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AuditSummary {
    pub overall_hallucination_risk: f64,
    pub passed_all_audits: bool,
    pub total_findings: usize,
}

/// Boundary-facing summary of one review, mirroring what report/API
/// collaborators consume.
#[derive(Debug, Clone, Serialize)]
pub struct ReviewSummary {
    pub paper_name: String,
    pub status: String,
    pub final_verdict: FinalVerdictSummary,
    pub hallucination_audit: AuditSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_url: Option<String>,
}

impl ReviewSummary {
    pub fn from_result(name: &str, result: &ReviewResult, report_url: Option<String>) -> Self {
        Self {
            paper_name: name.to_string(),
            status: "review_complete".to_string(),
            final_verdict: FinalVerdictSummary {
                overall_trust_score: result.verdict.trust_score,
                verdict_label: result.verdict.label,
                reasons: result.verdict.reasons.clone(),
            },
            hallucination_audit: AuditSummary {
                overall_hallucination_risk: result.audit.overall_risk,
                passed_all_audits: result.audit.passed_all,
                total_findings: result.audit.total_findings,
            },
            report_url,
        }
    }
}

pub fn clamp01(x: f64) -> f64 {
    x.clamp(0.0, 1.0)
}
