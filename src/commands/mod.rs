//! Command handler layer.
//!
//! ## Files
//! - `review.rs` — review/analyze/trace command handling.
//!
//! ## Principles
//! - Parse/match CLI inputs here.
//! - Delegate business logic to `services/*`.
//! - Keep behavior and output schema stable.

pub mod review;

pub use review::handle_command;
