//! Service layer containing business logic and side-effect helpers.
//!
//! ## Service map
//! - `ingest.rs` — document loading, extension gating, metadata extraction.
//! - `pipeline.rs` — analyzer orchestration, cross-wiring, result assembly.
//! - `verdict.rs` — weighted trust score, uncertainty propagation, reasons.
//! - `audit.rs` — self-audit of module output text.
//! - `trace.rs` — append-only reasoning trace.
//! - `report.rs` — markdown report rendering + persistence.
//! - `output.rs` — JSON/text output helpers.
//!
//! ## Conventions
//! - Prefer pure helpers where possible.
//! - Side effects should be explicit and localized.
//! - Keep command handlers thin; delegate to services.

pub mod audit;
pub mod ingest;
pub mod output;
pub mod pipeline;
pub mod report;
pub mod trace;
pub mod verdict;
