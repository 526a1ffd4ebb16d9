//! Heuristic trustworthiness review for scientific-style documents.
//!
//! Eight keyword/regex analyzers score a document, a verdict engine folds
//! the scores into a trust verdict with propagated uncertainty, and a
//! self-audit pass re-reads the system's own output for overconfident
//! phrasing. Everything is deterministic; no model calls, no network.

pub mod analyzers;
pub mod cli;
pub mod commands;
pub mod domain;
pub mod services;
