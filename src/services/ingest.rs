//! Document ingestion.
//!
//! Plain-text and markdown files only; anything else is rejected at the
//! boundary so the analyzers never see binary garbage.

use crate::domain::models::{Document, DocumentMetadata};
use anyhow::{bail, Context, Result};
use std::io::Read;
use std::path::Path;

const SUPPORTED_EXTENSIONS: &[&str] = &["txt", "md", "markdown"];

/// `-` reads stdin; anything else is a file path.
pub fn load_input(input: &Path) -> Result<Document> {
    if input == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("reading document from stdin")?;
        return Ok(build("stdin".to_string(), "text".to_string(), text));
    }
    load(input)
}

pub fn load(path: &Path) -> Result<Document> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();
    if !SUPPORTED_EXTENSIONS.contains(&ext.as_str()) {
        bail!(
            "unsupported document type '{}' for {} (expected one of: {})",
            if ext.is_empty() { "<none>" } else { &ext },
            path.display(),
            SUPPORTED_EXTENSIONS.join(", ")
        );
    }
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading document {}", path.display()))?;
    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("document")
        .to_string();
    Ok(build(name, ext, text))
}

/// In-memory entry point used by library callers and tests.
pub fn document_from_text(name: &str, text: &str) -> Document {
    build(name.to_string(), "text".to_string(), text.to_string())
}

fn build(name: String, kind: String, text: String) -> Document {
    let word_count = text.split_whitespace().count();
    let section_count = count_sections(&text);
    Document {
        metadata: DocumentMetadata {
            name,
            kind,
            size_bytes: text.len(),
            word_count,
            section_count,
        },
        text,
    }
}

/// Markdown headings when present, otherwise blank-line separated blocks.
fn count_sections(text: &str) -> usize {
    let headings = text
        .lines()
        .filter(|l| l.trim_start().starts_with('#'))
        .count();
    if headings > 0 {
        return headings;
    }
    text.split("\n\n")
        .filter(|block| !block.trim().is_empty())
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn metadata_counts_words_and_sections() {
        let doc = document_from_text("demo", "First paragraph here.\n\nSecond one.");
        assert_eq!(doc.metadata.name, "demo");
        assert_eq!(doc.metadata.word_count, 5);
        assert_eq!(doc.metadata.section_count, 2);
        assert_eq!(doc.metadata.size_bytes, doc.text.len());
    }

    #[test]
    fn markdown_headings_win_over_paragraphs() {
        let doc = document_from_text("demo", "# Intro\n\ntext\n\n## Methods\n\nmore text");
        assert_eq!(doc.metadata.section_count, 2);
    }

    #[test]
    fn rejects_unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("paper.pdf");
        fs::write(&path, b"%PDF").unwrap();
        let err = load(&path).unwrap_err();
        assert!(err.to_string().contains("unsupported document type"));
    }

    #[test]
    fn loads_a_text_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("paper.txt");
        fs::write(&path, "We ran a t-test with p = 0.03.").unwrap();
        let doc = load(&path).unwrap();
        assert_eq!(doc.metadata.name, "paper");
        assert_eq!(doc.metadata.kind, "txt");
        assert!(doc.text.contains("t-test"));
    }

    #[test]
    fn missing_file_error_names_the_path() {
        let err = load(Path::new("/nonexistent/paper.txt")).unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/paper.txt"));
    }
}
