use assert_cmd::Command;
use predicates::str::contains;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const SAMPLE: &str = "\
We conducted a randomized controlled experiment with a control group. \
The treatment group (n = 120) and control group (n = 118) completed tests. \
A t-test showed a difference (p = 0.003) with a 95% CI [0.4, 1.1]. \
Participants provided informed consent and the institutional review board \
approved the study.\n";

struct TestEnv {
    _tmp: TempDir,
    paper: PathBuf,
}

impl TestEnv {
    fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let paper = tmp.path().join("paper.txt");
        fs::write(&paper, SAMPLE).expect("write sample paper");
        Self { _tmp: tmp, paper }
    }

    fn path(&self) -> &Path {
        self._tmp.path()
    }

    fn cmd(&self) -> Command {
        Command::cargo_bin("papercheck").unwrap()
    }

    fn run_json(&self, args: &[&str]) -> Value {
        let out = self
            .cmd()
            .arg("--json")
            .args(args)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&out).expect("valid json output")
    }
}

#[test]
fn review_json_carries_the_summary_schema() {
    let env = TestEnv::new();
    let v = env.run_json(&["review", env.paper.to_str().unwrap()]);

    assert_eq!(v["ok"], true);
    let data = &v["data"];
    assert_eq!(data["paper_name"], "paper");
    assert_eq!(data["status"], "review_complete");
    assert!(data["final_verdict"]["overall_trust_score"].is_f64());
    assert!(data["final_verdict"]["verdict_label"].is_string());
    let reasons = data["final_verdict"]["reasons"].as_array().unwrap();
    assert!(reasons.len() >= 3 && reasons.len() <= 5);
    assert!(data["hallucination_audit"]["overall_hallucination_risk"].is_f64());
    assert!(data["report_url"].is_null());
}

#[test]
fn review_text_mode_prints_a_verdict_line() {
    let env = TestEnv::new();
    env.cmd()
        .args(["review", env.paper.to_str().unwrap(), "--name", "My Study"])
        .assert()
        .success()
        .stdout(contains("paper: My Study"))
        .stdout(contains("verdict:"))
        .stdout(contains("audit:"));
}

#[test]
fn review_writes_a_markdown_report() {
    let env = TestEnv::new();
    let report_dir = env.path().join("reports");
    env.cmd()
        .args([
            "review",
            env.paper.to_str().unwrap(),
            "--report-dir",
            report_dir.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(contains("report:"));

    let report = report_dir.join("paper-review.md");
    let body = fs::read_to_string(report).expect("report written");
    assert!(body.contains("## Verdict"));
    assert!(body.contains("## Reasoning trace"));
}

#[test]
fn analyze_runs_a_single_analyzer() {
    let env = TestEnv::new();
    let v = env.run_json(&["analyze", "statistics", env.paper.to_str().unwrap()]);
    assert_eq!(v["ok"], true);
    assert_eq!(v["data"]["has_statistical_content"], true);
    assert!(v["data"]["p_values"]["count"].as_u64().unwrap() >= 1);

    env.cmd()
        .args(["analyze", "bias", env.paper.to_str().unwrap()])
        .assert()
        .success()
        .stdout(contains("bias\tscore="));
}

#[test]
fn trace_lists_every_pipeline_stage() {
    let env = TestEnv::new();
    let v = env.run_json(&["trace", env.paper.to_str().unwrap()]);
    let steps = v["data"].as_array().unwrap();
    let tags: Vec<&str> = steps
        .iter()
        .map(|s| s["tag"].as_str().unwrap())
        .collect();
    assert_eq!(tags.first(), Some(&"ingest"));
    assert_eq!(tags.last(), Some(&"final_verdict"));
    assert!(tags.contains(&"self_audit"));
}

#[test]
fn review_reads_stdin_with_dash() {
    let env = TestEnv::new();
    let out = env
        .cmd()
        .arg("--json")
        .args(["review", "-"])
        .write_stdin(SAMPLE)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let v: Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(v["data"]["paper_name"], "stdin");
    assert!(v["data"]["final_verdict"]["overall_trust_score"].is_f64());
}

#[test]
fn unsupported_extension_is_rejected() {
    let env = TestEnv::new();
    let pdf = env.path().join("paper.pdf");
    fs::write(&pdf, b"%PDF").unwrap();
    env.cmd()
        .args(["review", pdf.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(contains("unsupported document type"));
}

#[test]
fn invalid_config_weights_are_rejected() {
    let env = TestEnv::new();
    let cfg = env.path().join("bad.toml");
    fs::write(&cfg, "[weights]\nstatistics = 0.9\n").unwrap();
    env.cmd()
        .args([
            "--config",
            cfg.to_str().unwrap(),
            "review",
            env.paper.to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(contains("weights"));
}

#[test]
fn config_thresholds_are_honored() {
    let env = TestEnv::new();
    let cfg = env.path().join("strict.toml");
    fs::write(&cfg, "[thresholds]\nreliable_min = 1.01\n").unwrap();
    let v = env.run_json(&[
        "--config",
        cfg.to_str().unwrap(),
        "review",
        env.paper.to_str().unwrap(),
    ]);
    assert_ne!(v["data"]["final_verdict"]["verdict_label"], "Reliable");
}
