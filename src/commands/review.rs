use crate::analyzers;
use crate::cli::{AnalyzerKind, Cli, Commands};
use crate::domain::config::ReviewConfig;
use crate::domain::models::ReviewSummary;
use crate::services::{ingest, output, pipeline, report};
use anyhow::Result;
use tracing::info;

pub fn handle_command(cli: &Cli) -> Result<()> {
    let cfg = match &cli.config {
        Some(path) => ReviewConfig::load(path)?,
        None => ReviewConfig::default(),
    };

    match &cli.command {
        Commands::Review {
            input,
            name,
            report_dir,
        } => {
            let document = ingest::load_input(input)?;
            let display_name = name
                .clone()
                .unwrap_or_else(|| document.metadata.name.clone());
            info!(paper = %display_name, words = document.metadata.word_count, "starting review");
            let result = pipeline::review(&document, &cfg);

            let report_url = match report_dir {
                Some(dir) => {
                    let markdown = report::render_markdown(&display_name, &result);
                    let path = report::save(dir, &display_name, &markdown)?;
                    Some(path.display().to_string())
                }
                None => None,
            };

            let summary = ReviewSummary::from_result(&display_name, &result, report_url);
            output::print_one(cli.json, summary, |s| {
                let mut lines = vec![
                    format!("paper: {}", s.paper_name),
                    format!(
                        "verdict: {} (trust {:.2})",
                        s.final_verdict.verdict_label, s.final_verdict.overall_trust_score
                    ),
                    format!(
                        "audit: risk {:.2}, findings {}, passed={}",
                        s.hallucination_audit.overall_hallucination_risk,
                        s.hallucination_audit.total_findings,
                        s.hallucination_audit.passed_all_audits
                    ),
                ];
                for reason in &s.final_verdict.reasons {
                    lines.push(format!("  - {reason}"));
                }
                if let Some(url) = &s.report_url {
                    lines.push(format!("report: {url}"));
                }
                lines.join("\n")
            })
        }
        Commands::Analyze { analyzer, input } => {
            let document = ingest::load_input(input)?;
            run_analyzer(cli.json, *analyzer, &document.text)
        }
        Commands::Trace { input } => {
            let document = ingest::load_input(input)?;
            let result = pipeline::review(&document, &cfg);
            output::print_out(cli.json, &result.trace, |s| {
                format!(
                    "{}\t{}\t{}",
                    s.timestamp.to_rfc3339(),
                    s.tag,
                    s.description
                )
            })
        }
    }
}

fn run_analyzer(json: bool, kind: AnalyzerKind, text: &str) -> Result<()> {
    match kind {
        AnalyzerKind::Bias => output::print_one(json, analyzers::bias::analyze(text), |r| {
            format!("bias\tscore={:.4}\twords={}", r.score, r.total_words)
        }),
        AnalyzerKind::Statistics => {
            output::print_one(json, analyzers::statistics::analyze(text), |r| {
                format!(
                    "statistics\tscore={:.4}\tp_values={}",
                    r.score, r.p_values.count
                )
            })
        }
        AnalyzerKind::Methodology => {
            output::print_one(json, analyzers::methodology::analyze(text), |r| {
                format!(
                    "methodology\tscore={:.4}\tsample_sizes={}",
                    r.score, r.sample_size.count
                )
            })
        }
        AnalyzerKind::Citations => {
            output::print_one(json, analyzers::citations::analyze(text), |r| {
                format!(
                    "citations\tscore={:.4}\treferences={}",
                    r.score, r.estimated_reference_count
                )
            })
        }
        AnalyzerKind::Plagiarism => {
            output::print_one(json, analyzers::plagiarism::analyze(text), |r| {
                format!(
                    "plagiarism\tscore={:.4}\tngram_repetition={:.4}",
                    r.score, r.ngram_repetition_ratio
                )
            })
        }
        AnalyzerKind::Fraud => output::print_one(json, analyzers::fraud::analyze(text), |r| {
            format!(
                "fraud\tscore={:.4}\tmismatches={}",
                r.score, r.mismatched_significance.count
            )
        }),
        AnalyzerKind::Ethics => output::print_one(json, analyzers::ethics::analyze(text), |r| {
            format!(
                "ethics\tscore={:.4}\thuman_subjects={}",
                r.score, r.has_human_subjects
            )
        }),
        AnalyzerKind::Replication => {
            output::print_one(json, analyzers::replication::analyze(text), |r| {
                format!("replication\tscore={:.4}\toutcome={:?}", r.score, r.outcome)
            })
        }
    }
}
