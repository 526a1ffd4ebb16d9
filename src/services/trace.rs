//! Append-only reasoning trace.
//!
//! One `ReasoningTrace` lives for exactly one review invocation; steps are
//! appended, never mutated or removed, and export preserves insertion order.

use crate::domain::models::TraceStep;
use chrono::Utc;

#[derive(Debug, Default)]
pub struct ReasoningTrace {
    steps: Vec<TraceStep>,
}

impl ReasoningTrace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_step(&mut self, tag: &str, description: impl Into<String>) {
        self.push(tag, description.into(), None, None);
    }

    pub fn add_step_with(
        &mut self,
        tag: &str,
        description: impl Into<String>,
        metadata: serde_json::Value,
    ) {
        self.push(tag, description.into(), Some(metadata), None);
    }

    pub fn add_step_with_confidence(
        &mut self,
        tag: &str,
        description: impl Into<String>,
        metadata: Option<serde_json::Value>,
        confidence: f64,
    ) {
        self.push(tag, description.into(), metadata, Some(confidence));
    }

    fn push(
        &mut self,
        tag: &str,
        description: String,
        metadata: Option<serde_json::Value>,
        confidence: Option<f64>,
    ) {
        // Confidence is reporting-only; round to 3 decimals at the door.
        let confidence = confidence.map(|c| (c * 1000.0).round() / 1000.0);
        self.steps.push(TraceStep {
            timestamp: Utc::now(),
            tag: tag.to_string(),
            description,
            metadata,
            confidence,
        });
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Ordered snapshot; consumes the trace at the end of a review.
    pub fn export(self) -> Vec<TraceStep> {
        self.steps
    }
}
