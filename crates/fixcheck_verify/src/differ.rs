//! First-difference diffing of expected vs fixed documents.
//!
//! Not a general diff: the output is tuned for single-line mismatch triage.
//! The first differing line is reported with a caret under the first
//! differing character, followed by both full document bodies.

use fixcheck_diagnostics::DiffReport;
use fixcheck_source::OneIndexed;
use fixcheck_workspace::Document;

/// Compare an expected document set against an actual (post-fix) set.
///
/// Cardinality is checked first: a fix that added or removed documents is a
/// count mismatch, never a line diff. Documents then pair by path where the
/// paths match and by position for the remainder, so callers that cannot
/// predict a fix-introduced path still get a line diff instead of a
/// spurious pairing failure, and may supply expected documents in any
/// order.
///
/// Returns `None` when the sets are identical.
pub fn diff_documents(expected: &[Document], actual: &[Document]) -> Option<DiffReport> {
    if expected.len() != actual.len() {
        return Some(DiffReport::DocumentCount {
            expected: expected.iter().map(|d| d.path.clone()).collect(),
            actual: actual.iter().map(|d| d.path.clone()).collect(),
        });
    }

    let mut used = vec![false; actual.len()];
    let mut pairs: Vec<(&Document, &Document)> = Vec::with_capacity(expected.len());
    let mut unpaired: Vec<&Document> = Vec::new();

    for exp in expected {
        let by_path = actual
            .iter()
            .enumerate()
            .find(|(i, act)| !used[*i] && act.path == exp.path);
        match by_path {
            Some((i, act)) => {
                used[i] = true;
                pairs.push((exp, act));
            }
            None => unpaired.push(exp),
        }
    }

    let remaining = actual.iter().enumerate().filter(|(i, _)| !used[*i]);
    for (exp, (_, act)) in unpaired.into_iter().zip(remaining) {
        pairs.push((exp, act));
    }

    for (exp, act) in pairs {
        if let Some(report) = diff_text(&act.path, &exp.text, &act.text) {
            return Some(report);
        }
    }

    None
}

/// Compare two texts line by line; report the first differing line.
pub fn diff_text(path: &str, expected: &str, actual: &str) -> Option<DiffReport> {
    if expected == actual {
        return None;
    }

    // split('\n') rather than lines(): a missing trailing newline is a
    // real difference and must surface as one.
    let expected_lines: Vec<&str> = expected.split('\n').collect();
    let actual_lines: Vec<&str> = actual.split('\n').collect();

    let line_count = expected_lines.len().max(actual_lines.len());
    for i in 0..line_count {
        let expected_line = expected_lines.get(i).copied();
        let actual_line = actual_lines.get(i).copied();
        if expected_line == actual_line {
            continue;
        }

        let expected_line = expected_line.unwrap_or("");
        let actual_line = actual_line.unwrap_or("");
        return Some(DiffReport::FirstDifference {
            path: path.to_string(),
            line: OneIndexed::from_zero_indexed(i),
            expected_line: expected_line.to_string(),
            actual_line: actual_line.to_string(),
            column: first_difference_column(expected_line, actual_line),
            expected_text: expected.to_string(),
            actual_text: actual.to_string(),
        });
    }

    None
}

/// 1-based character position of the first differing character. When one
/// line is a prefix of the other the column points just past the prefix.
fn first_difference_column(expected: &str, actual: &str) -> OneIndexed {
    let common = expected
        .chars()
        .zip(actual.chars())
        .take_while(|(a, b)| a == b)
        .count();
    OneIndexed::from_zero_indexed(common)
}
