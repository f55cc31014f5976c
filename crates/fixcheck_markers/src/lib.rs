//! Extraction of inline position markers from annotated source.
//!
//! Test authors mark where a finding is expected by placing a `↓` directly
//! before the offending token:
//!
//! ```java
//! class A {
//!     private final int ↓_value = 0;
//! }
//! ```
//!
//! The marker is not part of the source under test. [`extract`] strips every
//! marker and reports where each one sat in the stripped text, so a marker's
//! position is unaffected by markers earlier in the same document.

use fixcheck_source::{LineColumn, LineIndex};

/// The marker character. Non-ASCII on purpose so it cannot collide with
/// ordinary source text.
pub const MARKER: char = '↓';

/// Result of stripping markers from one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    /// The source with every marker removed.
    pub text: String,
    /// Position of each marker in the stripped text, in document order.
    pub positions: Vec<LineColumn>,
}

/// A marker position tagged with the document it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkedPosition {
    pub path: String,
    pub position: LineColumn,
}

/// Strip `↓` markers from `annotated` and report where each one sat.
///
/// Returns zero positions when the source carries no markers; whether that
/// is an error is the caller's decision.
pub fn extract(annotated: &str) -> Extraction {
    let mut text = String::with_capacity(annotated.len());
    let mut offsets = Vec::new();

    for ch in annotated.chars() {
        if ch == MARKER {
            offsets.push(text.len());
        } else {
            text.push(ch);
        }
    }

    let index = LineIndex::from_source_text(&text);
    let positions = offsets
        .iter()
        .map(|&offset| index.line_column(offset, &text))
        .collect();

    Extraction { text, positions }
}

/// Strip markers from several documents at once.
///
/// Returns the stripped `(path, text)` pairs in input order plus every
/// marker position tagged with the path of the document that carried it.
pub fn extract_documents(documents: &[(&str, &str)]) -> (Vec<(String, String)>, Vec<MarkedPosition>) {
    let mut stripped = Vec::with_capacity(documents.len());
    let mut positions = Vec::new();

    for (path, annotated) in documents {
        let extraction = extract(annotated);
        positions.extend(extraction.positions.into_iter().map(|position| MarkedPosition {
            path: (*path).to_string(),
            position,
        }));
        stripped.push(((*path).to_string(), extraction.text));
    }

    (stripped, positions)
}
