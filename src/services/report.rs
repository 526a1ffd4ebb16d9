//! Markdown review report rendering and persistence.

use crate::domain::models::{AuditSeverity, ReviewResult, ScoreOrientation};
use anyhow::{Context, Result};
use chrono::Utc;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

pub fn render_markdown(name: &str, result: &ReviewResult) -> String {
    let v = &result.verdict;
    let mut out = String::new();

    let _ = writeln!(out, "# Review: {name}");
    let _ = writeln!(out);
    let _ = writeln!(out, "Generated: {}", Utc::now().to_rfc3339());
    let _ = writeln!(
        out,
        "Document: {} words, {} sections, {} bytes ({})",
        result.document.word_count,
        result.document.section_count,
        result.document.size_bytes,
        result.document.kind
    );
    let _ = writeln!(out);

    let _ = writeln!(out, "## Verdict");
    let _ = writeln!(out);
    let _ = writeln!(out, "| Metric | Value |");
    let _ = writeln!(out, "|---|---|");
    let _ = writeln!(out, "| Label | {} |", v.label);
    let _ = writeln!(out, "| Trust score | {:.4} |", v.trust_score);
    let _ = writeln!(out, "| Std dev | {:.4} |", v.std_dev);
    let _ = writeln!(
        out,
        "| 95% CI | [{:.4}, {:.4}] |",
        v.confidence_interval[0], v.confidence_interval[1]
    );
    let _ = writeln!(out);
    for reason in &v.reasons {
        let _ = writeln!(out, "- {reason}");
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "## Module scores");
    let _ = writeln!(out);
    let _ = writeln!(out, "| Module | Score | Orientation |");
    let _ = writeln!(out, "|---|---|---|");
    let rows = [
        ("bias", result.records.bias.score, ScoreOrientation::Risk),
        (
            "statistics",
            result.records.statistics.score,
            ScoreOrientation::Goodness,
        ),
        (
            "methodology",
            result.records.methodology.score,
            ScoreOrientation::Goodness,
        ),
        (
            "citations",
            result.records.citations.score,
            ScoreOrientation::Goodness,
        ),
        (
            "plagiarism",
            result.records.plagiarism.score,
            ScoreOrientation::Risk,
        ),
        ("fraud", result.records.fraud.score, ScoreOrientation::Risk),
        ("ethics", result.records.ethics.score, ScoreOrientation::Risk),
        (
            "replication",
            result.records.replication.score,
            ScoreOrientation::Goodness,
        ),
    ];
    for (module, score, orientation) in rows {
        let orientation = match orientation {
            ScoreOrientation::Goodness => "goodness",
            ScoreOrientation::Risk => "risk",
        };
        let _ = writeln!(out, "| {module} | {score:.4} | {orientation} |");
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "## Self-audit");
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Overall risk {:.4}; {} findings across {} modules; passed: {}",
        result.audit.overall_risk,
        result.audit.total_findings,
        result.audit.module_count,
        result.audit.passed_all
    );
    let _ = writeln!(out);
    for audit in &result.module_audits {
        if audit.findings.is_empty() {
            continue;
        }
        let _ = writeln!(
            out,
            "### {} (risk {:.4})",
            audit.module, audit.risk_score
        );
        for finding in &audit.findings {
            let severity = match finding.severity {
                AuditSeverity::High => "high",
                AuditSeverity::Medium => "medium",
            };
            let _ = writeln!(
                out,
                "- [{severity}] `{}` — {}",
                finding.matched, finding.recommendation
            );
        }
        let _ = writeln!(out);
    }

    let _ = writeln!(out, "## Reasoning trace");
    let _ = writeln!(out);
    for step in &result.trace {
        let _ = writeln!(
            out,
            "- `{}` {} — {}",
            step.tag,
            step.timestamp.to_rfc3339(),
            step.description
        );
    }

    out
}

pub fn save(dir: &Path, name: &str, markdown: &str) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("creating report directory {}", dir.display()))?;
    let path = dir.join(format!("{}-review.md", sanitize_name(name)));
    std::fs::write(&path, markdown)
        .with_context(|| format!("writing report {}", path.display()))?;
    Ok(path)
}

/// Filesystem-safe slug: alphanumerics kept, runs of anything else become
/// a single hyphen.
pub fn sanitize_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut last_dash = true;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
            last_dash = false;
        } else if !last_dash {
            out.push('-');
            last_dash = true;
        }
    }
    while out.ends_with('-') {
        out.pop();
    }
    if out.is_empty() {
        "document".to_string()
    } else {
        out
    }
}
