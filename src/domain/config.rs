//! Tunable numeric constants for the verdict engine and audit module.
//!
//! The weights and thresholds here are calibration data, not algorithm:
//! defaults match the documented scoring scheme, and a TOML file can
//! override any subset of them.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::path::Path;

/// Per-component weights for the trust aggregate. Must sum to 1.0.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ComponentWeights {
    pub statistics: f64,
    pub methodology: f64,
    pub citations: f64,
    pub replication: f64,
    pub bias: f64,
    pub plagiarism: f64,
    pub fraud: f64,
    pub ethics: f64,
}

impl Default for ComponentWeights {
    fn default() -> Self {
        Self {
            statistics: 0.18,
            methodology: 0.18,
            citations: 0.12,
            replication: 0.14,
            bias: 0.08,
            plagiarism: 0.10,
            fraud: 0.10,
            ethics: 0.10,
        }
    }
}

impl ComponentWeights {
    pub fn sum(&self) -> f64 {
        self.statistics
            + self.methodology
            + self.citations
            + self.replication
            + self.bias
            + self.plagiarism
            + self.fraud
            + self.ethics
    }
}

/// Label and override thresholds. Bounds are inclusive as documented:
/// trust >= reliable_min is Reliable, trust <= high_risk_max is High Risk.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VerdictThresholds {
    pub reliable_min: f64,
    pub high_risk_max: f64,
    /// Any risk-oriented score at or above this forces High Risk.
    pub override_risk: f64,
    /// Statistics and methodology both below this force High Risk.
    pub weak_signal: f64,
    /// Cross-wiring floor applied to the statistics score on rescue.
    pub rescue_floor: f64,
    /// A module audit passes while its risk stays below this.
    pub audit_pass_risk: f64,
}

impl Default for VerdictThresholds {
    fn default() -> Self {
        Self {
            reliable_min: 0.70,
            high_risk_max: 0.40,
            override_risk: 0.70,
            weak_signal: 0.20,
            rescue_floor: 0.25,
            audit_pass_risk: 0.25,
        }
    }
}

/// Two-level uncertainty: a component whose raw score clears `threshold`
/// gets the tighter `above` value, otherwise `below`.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TwoLevelUncertainty {
    pub threshold: f64,
    pub above: f64,
    pub below: f64,
}

impl TwoLevelUncertainty {
    pub fn pick(&self, raw_score: f64) -> f64 {
        if raw_score > self.threshold {
            self.above
        } else {
            self.below
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UncertaintyTable {
    pub statistics: TwoLevelUncertainty,
    pub methodology: TwoLevelUncertainty,
    pub citations: TwoLevelUncertainty,
    pub replication: TwoLevelUncertainty,
    pub bias: f64,
    pub plagiarism: f64,
    pub fraud: f64,
    pub ethics: f64,
}

impl Default for UncertaintyTable {
    fn default() -> Self {
        Self {
            statistics: TwoLevelUncertainty {
                threshold: 0.5,
                above: 0.15,
                below: 0.30,
            },
            methodology: TwoLevelUncertainty {
                threshold: 0.5,
                above: 0.15,
                below: 0.30,
            },
            citations: TwoLevelUncertainty {
                threshold: 0.5,
                above: 0.18,
                below: 0.30,
            },
            replication: TwoLevelUncertainty {
                threshold: 0.5,
                above: 0.18,
                below: 0.30,
            },
            bias: 0.25,
            plagiarism: 0.20,
            fraud: 0.25,
            ethics: 0.22,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReviewConfig {
    pub weights: ComponentWeights,
    pub thresholds: VerdictThresholds,
    pub uncertainty: UncertaintyTable,
}

impl ReviewConfig {
    /// Load from a TOML file; missing keys fall back to defaults.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        let cfg: ReviewConfig =
            toml::from_str(&raw).with_context(|| format!("parse config {}", path.display()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        let sum = self.weights.sum();
        if (sum - 1.0).abs() > 1e-9 {
            bail!("component weights must sum to 1.0 (got {sum})");
        }
        Ok(())
    }
}
