//! Methodology and study-design analyzer.
//!
//! Scores four aspects with fixed weights: design terminology (0.30),
//! reported sample sizes (0.25), controls and blinding (0.25), and
//! transparency signals such as preregistration (0.20).

use crate::domain::models::{
    clamp01, ControlSignals, DesignSignals, MethodologyRecord, SampleSizeInfo, TransparencySignals,
};
use once_cell::sync::Lazy;
use regex::Regex;

static SAMPLE_SIZE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bn\s*=\s*(\d{1,5})").unwrap());

const EXPERIMENTAL_TERMS: &[&str] = &[
    "experiment",
    "experimental",
    "intervention",
    "manipulated",
    "treatment group",
];
const OBSERVATIONAL_TERMS: &[&str] = &[
    "observational",
    "survey",
    "case study",
    "cohort study",
    "case-control",
    "ecological study",
];
const RANDOMIZATION_TERMS: &[&str] = &[
    "randomized",
    "randomised",
    "randomization",
    "randomisation",
    "randomly assigned",
];
const LONG_CROSS_TERMS: &[&str] = &[
    "longitudinal",
    "cross-sectional",
    "cross sectional",
    "time series",
    "follow-up",
    "follow up",
];

const CONTROL_GROUP_TERMS: &[&str] = &[
    "control group",
    "control condition",
    "comparison group",
    "baseline group",
    "reference group",
];
const PLACEBO_TERMS: &[&str] = &["placebo", "sham", "dummy treatment"];
const BLINDING_TERMS: &[&str] = &[
    "double-blind",
    "double blind",
    "single-blind",
    "single blind",
    "triple-blind",
    "blinded",
    "masked",
    "observer-blind",
];

const PREREG_TERMS: &[&str] = &[
    "preregistered",
    "pre-registered",
    "registered report",
    "clinicaltrials.gov",
    "trial registration",
    "osf.io",
];
const DATA_SHARING_TERMS: &[&str] = &[
    "data are available",
    "data is available",
    "data available upon request",
    "open data",
    "data repository",
    "zenodo",
    "figshare",
    "dryad",
];
const PROTOCOL_TERMS: &[&str] = &[
    "protocol",
    "analysis plan",
    "study protocol",
    "supplementary methods",
    "supplementary material",
];

pub fn analyze(text: &str) -> MethodologyRecord {
    let lowered = text.to_lowercase();

    let design = find_design_terms(&lowered);
    let sample_size = extract_sample_sizes(&lowered);
    let control_and_blinding = find_control_and_blinding(&lowered);
    let transparency = find_transparency_signals(&lowered);

    let design_components = [
        design.has_experimental,
        design.has_observational,
        design.has_randomization,
        design.has_longitudinal_or_cross_sectional,
    ]
    .iter()
    .filter(|b| **b)
    .count();
    let design_score = design_components as f64 / 4.0;

    // 0 at n <= 10, 1 at n >= 200, linear in between on the mean.
    let sample_score = if sample_size.values.is_empty() {
        0.0
    } else {
        let avg = sample_size.values.iter().map(|v| *v as f64).sum::<f64>()
            / sample_size.values.len() as f64;
        ((avg - 10.0) / 190.0).clamp(0.0, 1.0)
    };

    let mut control_score = 0.0;
    if control_and_blinding.has_control_group {
        control_score += 0.4;
    }
    if control_and_blinding.has_placebo_or_comparison {
        control_score += 0.3;
    }
    if control_and_blinding.has_blinding {
        control_score += 0.3;
    }

    let mut transparency_score = 0.0;
    if transparency.has_preregistration {
        transparency_score += 0.4;
    }
    if transparency.has_data_sharing {
        transparency_score += 0.3;
    }
    if transparency.has_protocol_or_repository {
        transparency_score += 0.3;
    }

    let score = clamp01(
        0.30 * design_score + 0.25 * sample_score + 0.25 * control_score + 0.20 * transparency_score,
    );

    MethodologyRecord {
        design,
        sample_size,
        control_and_blinding,
        transparency,
        score,
    }
}

fn contains_any(lowered: &str, terms: &[&str]) -> bool {
    terms.iter().any(|t| lowered.contains(t))
}

fn found_terms(lowered: &str, groups: &[&[&str]]) -> Vec<String> {
    groups
        .iter()
        .flat_map(|g| g.iter())
        .filter(|t| lowered.contains(*t))
        .map(|t| t.to_string())
        .collect()
}

fn find_design_terms(lowered: &str) -> DesignSignals {
    DesignSignals {
        has_experimental: contains_any(lowered, EXPERIMENTAL_TERMS),
        has_observational: contains_any(lowered, OBSERVATIONAL_TERMS),
        has_randomization: contains_any(lowered, RANDOMIZATION_TERMS),
        has_longitudinal_or_cross_sectional: contains_any(lowered, LONG_CROSS_TERMS),
        terms_found: found_terms(
            lowered,
            &[
                EXPERIMENTAL_TERMS,
                OBSERVATIONAL_TERMS,
                RANDOMIZATION_TERMS,
                LONG_CROSS_TERMS,
            ],
        ),
    }
}

fn extract_sample_sizes(lowered: &str) -> SampleSizeInfo {
    let values: Vec<u32> = SAMPLE_SIZE_RE
        .captures_iter(lowered)
        .filter_map(|c| c[1].parse().ok())
        .collect();
    let small_sample_warning = values.iter().max().is_some_and(|max| *max < 30);
    SampleSizeInfo {
        count: values.len(),
        values,
        small_sample_warning,
    }
}

fn find_control_and_blinding(lowered: &str) -> ControlSignals {
    ControlSignals {
        has_control_group: contains_any(lowered, CONTROL_GROUP_TERMS),
        has_placebo_or_comparison: contains_any(lowered, PLACEBO_TERMS),
        has_blinding: contains_any(lowered, BLINDING_TERMS),
        terms_found: found_terms(lowered, &[CONTROL_GROUP_TERMS, PLACEBO_TERMS, BLINDING_TERMS]),
    }
}

fn find_transparency_signals(lowered: &str) -> TransparencySignals {
    TransparencySignals {
        has_preregistration: contains_any(lowered, PREREG_TERMS),
        has_data_sharing: contains_any(lowered, DATA_SHARING_TERMS),
        has_protocol_or_repository: contains_any(lowered, PROTOCOL_TERMS),
        terms_found: found_terms(lowered, &[PREREG_TERMS, DATA_SHARING_TERMS, PROTOCOL_TERMS]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_yields_zero_baseline() {
        let r = analyze("   ");
        assert_eq!(r.score, 0.0);
        assert_eq!(r.sample_size.count, 0);
        assert!(!r.sample_size.small_sample_warning);
        assert!(!r.design.has_experimental);
    }

    #[test]
    fn sample_sizes_are_extracted() {
        let r = analyze("The sample size was n = 120 in treatment and N=118 in control.");
        assert_eq!(r.sample_size.count, 2);
        assert_eq!(r.sample_size.values, vec![120, 118]);
        assert!(!r.sample_size.small_sample_warning);
    }

    #[test]
    fn small_samples_trigger_the_warning() {
        let r = analyze("We recruited n = 12 students.");
        assert!(r.sample_size.small_sample_warning);
    }

    #[test]
    fn rich_design_text_scores_high() {
        let text = "A randomized controlled experiment with a control group, double-blind, \
                    preregistered on osf.io with open data; n = 200 participants.";
        let r = analyze(text);
        assert!(r.design.has_randomization);
        assert!(r.control_and_blinding.has_control_group);
        assert!(r.transparency.has_preregistration);
        assert!(r.score > 0.6);
        assert!(r.score <= 1.0);
    }

    #[test]
    fn sample_mentions_alone_still_count() {
        let r = analyze("n = 200 participants. No p-values reported.");
        assert!(r.sample_size.count >= 1);
    }
}
