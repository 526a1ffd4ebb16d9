//! Ethics and safety analyzer.
//!
//! Flags likely human-subject research without approval or consent
//! language, vulnerable populations, dual-use/high-risk terms, and credits
//! data-protection language as a mitigation. Not a regulatory decision
//! engine; the score is a bounded risk signal.

use crate::domain::models::{clamp01, EthicsRecord, TermHits};

const HUMAN_SUBJECT_TERMS: &[&str] = &[
    "participant",
    "participants",
    "subject",
    "subjects",
    "patient",
    "patients",
    "respondent",
    "respondents",
    "interviewee",
    "interviewees",
    "survey",
    "surveys",
    "questionnaire",
    "human trial",
    "clinical trial",
    "human subjects",
];

const VULNERABLE_TERMS: &[&str] = &[
    "children",
    "minors",
    "adolescents",
    "pregnant women",
    "prisoners",
    "incarcerated",
    "inmates",
    "vulnerable population",
    "cognitively impaired",
    "mentally impaired",
    "elderly",
    "dementia",
];

const ETHICS_APPROVAL_TERMS: &[&str] = &[
    "institutional review board",
    "irb",
    "ethics committee",
    "ethics board",
    "research ethics committee",
    "ethics approval",
    "ethical approval",
];

const CONSENT_TERMS: &[&str] = &[
    "informed consent",
    "written consent",
    "verbal consent",
    "consent was obtained",
    "participants provided consent",
    "parental consent",
    "assent and consent",
];

const DATA_PROTECTION_TERMS: &[&str] = &[
    "gdpr",
    "hipaa",
    "anonymized",
    "de-identified",
    "pseudonymized",
    "data protection",
    "confidentiality",
    "secure storage",
    "encrypted",
    "privacy-preserving",
];

const HIGH_RISK_TERMS: &[&str] = &[
    "gain of function",
    "bioweapon",
    "bioterror",
    "weaponized",
    "dual-use",
    "dual use",
    "pathogen release",
    "pandemic potential",
    "lethal dose",
    "germline editing",
    "human challenge trial",
    "challenge study",
];

pub fn analyze(text: &str) -> EthicsRecord {
    if text.trim().is_empty() {
        return EthicsRecord {
            has_human_subjects: false,
            has_vulnerable_population: false,
            has_ethics_approval_mention: false,
            has_informed_consent_mention: false,
            mentions_data_protection: false,
            risk_terms: TermHits::default(),
            score: 0.0,
        };
    }

    let lowered = text.to_lowercase();

    let has_human_subjects = contains_any(&lowered, HUMAN_SUBJECT_TERMS);
    let has_vulnerable_population = contains_any(&lowered, VULNERABLE_TERMS);
    let has_ethics_approval_mention = contains_any(&lowered, ETHICS_APPROVAL_TERMS);
    let has_informed_consent_mention = contains_any(&lowered, CONSENT_TERMS);
    let mentions_data_protection = contains_any(&lowered, DATA_PROTECTION_TERMS);
    let risk_terms = collect_terms(&lowered, HIGH_RISK_TERMS);

    let mut score = 0.0;
    if has_human_subjects {
        if !has_ethics_approval_mention {
            score += 0.3;
        }
        if !has_informed_consent_mention {
            score += 0.2;
        }
    }
    if has_vulnerable_population {
        score += 0.2;
        if !has_ethics_approval_mention || !has_informed_consent_mention {
            score += 0.1;
        }
    }
    score += (0.05 * risk_terms.count as f64).min(0.3);
    if mentions_data_protection {
        score -= 0.1;
    }
    let score = clamp01(score);

    EthicsRecord {
        has_human_subjects,
        has_vulnerable_population,
        has_ethics_approval_mention,
        has_informed_consent_mention,
        mentions_data_protection,
        risk_terms,
        score,
    }
}

fn contains_any(lowered: &str, terms: &[&str]) -> bool {
    terms.iter().any(|t| lowered.contains(t))
}

fn collect_terms(lowered: &str, terms: &[&str]) -> TermHits {
    let mut count = 0usize;
    let mut examples = Vec::new();
    for term in terms {
        let occurrences = lowered.matches(term).count();
        if occurrences > 0 {
            count += occurrences;
            if examples.len() < 5 {
                examples.push(term.to_string());
            }
        }
    }
    TermHits { count, examples }
}
