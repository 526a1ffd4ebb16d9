//! Shared data model layer (structs/constants only).
//!
//! ## Purpose
//! - Keep record/verdict/report structs in one place.
//! - Avoid cyclic imports and duplicated type definitions.
//! - Make JSON output schema changes explicit and reviewable.
//!
//! ## Files
//! - `models.rs` — analyzer records, audit/verdict/trace/result structs.
//! - `config.rs` — tunable weights, thresholds and uncertainty tables.
//!
//! ## Rule of thumb
//! Domain types should be data-only: no filesystem/network side effects.
//!
//! ## Compatibility note
//! Changes in these structs can affect `--json` outputs and report contents.
//! Keep schema-impacting changes explicit.

pub mod config;
pub mod models;
