//! Citation and reference analyzer.
//!
//! Looks for a references/bibliography section, DOIs, URLs, author-year
//! citations and numeric bracket citations. The score combines category
//! diversity with a small volume bump for longer reference lists.

use crate::domain::models::{clamp01, CitationsRecord, TermHits};
use once_cell::sync::Lazy;
use regex::Regex;

static DOI_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b10\.\d{4,9}/\S+").unwrap());
static URL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"https?://\S+").unwrap());
static IN_TEXT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\(([A-Z][A-Za-z]+(?: et al\.)?,?\s*(?:19|20)\d{2}[a-z]?)\)").unwrap());
static BRACKET_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[(\d+(?:\s*[,;]\s*\d+)*)\]").unwrap());
static YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?:19|20)\d{2}").unwrap());

const REF_KEYWORDS: &[&str] = &["references", "bibliography", "works cited", "reference list"];

pub fn analyze(text: &str) -> CitationsRecord {
    if text.trim().is_empty() {
        return CitationsRecord {
            has_references_section: false,
            estimated_reference_count: 0,
            dois: TermHits::default(),
            urls: TermHits::default(),
            in_text_citations: TermHits::default(),
            bracket_citations: TermHits::default(),
            score: 0.0,
        };
    }

    let ref_lines = reference_section_lines(text);
    let has_references_section = !ref_lines.is_empty();
    let estimated_reference_count = ref_lines.len();

    let dois = collect(&DOI_RE, text);
    let urls = collect(&URL_RE, text);
    let in_text_citations = collect(&IN_TEXT_RE, text);

    // Bracket citations count individual numbers: "[3, 4]" is two.
    let mut bracket_count = 0usize;
    let mut bracket_examples = Vec::new();
    for m in BRACKET_RE.captures_iter(text) {
        bracket_count += m[1].split([',', ';']).count();
        if bracket_examples.len() < 5 {
            bracket_examples.push(m[0].to_string());
        }
    }
    let bracket_citations = TermHits {
        count: bracket_count,
        examples: bracket_examples,
    };

    let categories_present = [
        has_references_section,
        estimated_reference_count > 0,
        dois.count > 0,
        urls.count > 0,
        in_text_citations.count > 0 || bracket_citations.count > 0,
    ]
    .iter()
    .filter(|b| **b)
    .count();
    let diversity = categories_present as f64 / 5.0;
    let volume = (estimated_reference_count.min(50) as f64 / 200.0).min(0.25);
    let score = clamp01(diversity + volume);

    CitationsRecord {
        has_references_section,
        estimated_reference_count,
        dois,
        urls,
        in_text_citations,
        bracket_citations,
        score,
    }
}

/// Slice out the tail after the earliest references heading and keep lines
/// that plausibly belong to a reference list (capped at 300 lines).
fn reference_section_lines(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    let start = REF_KEYWORDS
        .iter()
        .filter_map(|kw| lowered.find(kw))
        .min();
    let Some(start) = start else {
        return Vec::new();
    };

    // Offsets come from the lowercased copy; fall back to it if lowercasing
    // shifted byte positions (possible with some non-ASCII characters).
    let tail = text.get(start..).unwrap_or(&lowered[start..]);
    tail.lines()
        .skip(1)
        .take(300)
        .filter_map(|line| {
            let stripped = line.trim();
            if stripped.is_empty() {
                return None;
            }
            if YEAR_RE.is_match(stripped) || stripped.contains('.') {
                Some(stripped.to_string())
            } else {
                None
            }
        })
        .collect()
}

fn collect(re: &Regex, text: &str) -> TermHits {
    let mut count = 0usize;
    let mut examples = Vec::new();
    for m in re.find_iter(text) {
        count += 1;
        if examples.len() < 5 {
            examples.push(m.as_str().to_string());
        }
    }
    TermHits { count, examples }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_yields_zero_baseline() {
        let r = analyze("\n\t ");
        assert!(!r.has_references_section);
        assert_eq!(r.score, 0.0);
    }

    #[test]
    fn references_section_is_sliced_from_the_tail() {
        let text = "Body text.\n\nReferences\nSmith, J. (2019). A study. Journal.\nDoe, A. (2021). Another study.\n";
        let r = analyze(text);
        assert!(r.has_references_section);
        assert_eq!(r.estimated_reference_count, 2);
        assert!(r.score > 0.0);
    }

    #[test]
    fn dois_and_author_year_citations_are_counted() {
        let text = "As shown (Smith, 2019) and in doi 10.1234/abcd.5678, results hold.";
        let r = analyze(text);
        assert_eq!(r.in_text_citations.count, 1);
        assert_eq!(r.dois.count, 1);
    }

    #[test]
    fn bracket_citations_count_individual_numbers() {
        let r = analyze("Earlier work [1] and [3, 4; 7] agrees.");
        assert_eq!(r.bracket_citations.count, 4);
        assert_eq!(r.bracket_citations.examples.len(), 2);
    }

    #[test]
    fn score_is_bounded_for_reference_heavy_text() {
        let mut text = String::from("References\n");
        for i in 0..120 {
            text.push_str(&format!("Author {i}. (2020). Title number {i}. Venue.\n"));
        }
        let r = analyze(&text);
        assert!(r.score <= 1.0);
        assert!(r.estimated_reference_count >= 100);
    }
}
