//! The eight independent document analyzers.
//!
//! Every analyzer is a pure, total function `&str -> Record`: no I/O, no
//! shared state, deterministic, and never failing — empty or whitespace-only
//! input yields the analyzer's documented zero-signal baseline record.
//! Analyzers do not call each other; the single documented exception to
//! their independence (the statistics rescue) lives in the pipeline, not
//! here.
//!
//! ## Files
//! - `bias.rs` — loaded-language densities (risk).
//! - `statistics.rs` — p-values, intervals, test/effect terms (goodness).
//! - `methodology.rs` — design, sample sizes, controls, transparency (goodness).
//! - `citations.rs` — references section, DOIs, in-text citations (goodness).
//! - `plagiarism.rs` — n-gram and sentence redundancy (risk).
//! - `fraud.rs` — p-value anomalies and data-handling language (risk).
//! - `ethics.rs` — human subjects, consent, dual-use terms (risk).
//! - `replication.rs` — replication claims, robustness, openness (goodness).

pub mod bias;
pub mod citations;
pub mod ethics;
pub mod fraud;
pub mod methodology;
pub mod plagiarism;
pub mod replication;
pub mod statistics;
