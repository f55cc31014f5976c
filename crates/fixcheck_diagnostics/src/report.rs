//! Failure reports rendered into assertion messages.

use std::fmt;

use fixcheck_source::OneIndexed;

use crate::{ActualFinding, ExpectedFinding};

/// Structured two-sided report produced when findings do not match.
///
/// Both sides are listed fully, not just the difference, so a reader can
/// re-derive the test's intent from the failure message alone.
#[derive(Debug, Clone, Default)]
pub struct MismatchReport {
    /// What the test expected, verbatim.
    pub expected: Vec<ExpectedFinding>,
    /// What the rule produced, in source order.
    pub actual: Vec<ActualFinding>,
    /// Expected findings no actual finding satisfied.
    pub missing: Vec<ExpectedFinding>,
    /// Actual findings no expected descriptor claimed.
    pub unexpected: Vec<ActualFinding>,
}

impl fmt::Display for MismatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "expected ({}):", self.expected.len())?;
        for finding in &self.expected {
            writeln!(f, "  {finding}")?;
        }
        writeln!(f, "actual ({}):", self.actual.len())?;
        for finding in &self.actual {
            writeln!(f, "  {finding}")?;
        }
        if !self.missing.is_empty() {
            writeln!(f, "missing ({}):", self.missing.len())?;
            for finding in &self.missing {
                writeln!(f, "  {finding}")?;
            }
        }
        if !self.unexpected.is_empty() {
            writeln!(f, "unexpected ({}):", self.unexpected.len())?;
            for finding in &self.unexpected {
                writeln!(f, "  {finding}")?;
            }
        }
        Ok(())
    }
}

/// First-difference report produced by the workspace differ.
#[derive(Debug, Clone)]
pub enum DiffReport {
    /// The compared document sets differ in cardinality. Reported before
    /// any line-level diffing: added or removed documents are not a line
    /// diff.
    DocumentCount {
        expected: Vec<String>,
        actual: Vec<String>,
    },
    /// Two paired documents differ, starting at `line`.
    FirstDifference {
        path: String,
        line: OneIndexed,
        expected_line: String,
        actual_line: String,
        /// 1-based character position of the first differing character.
        column: OneIndexed,
        expected_text: String,
        actual_text: String,
    },
}

impl fmt::Display for DiffReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiffReport::DocumentCount { expected, actual } => {
                write!(
                    f,
                    "document count mismatch: expected {} document(s) [{}], got {} [{}]",
                    expected.len(),
                    expected.join(", "),
                    actual.len(),
                    actual.join(", ")
                )
            }
            DiffReport::FirstDifference {
                path,
                line,
                expected_line,
                actual_line,
                column,
                expected_text,
                actual_text,
            } => {
                writeln!(f, "{path}:{line}: fixed source does not match")?;
                // The labels are both ten characters wide so the caret can
                // sit under the first differing column of either line.
                writeln!(f, "expected: {expected_line}")?;
                writeln!(f, "actual:   {actual_line}")?;
                writeln!(f, "          {}^", " ".repeat(column.to_zero_indexed()))?;
                writeln!(f, "--- expected ---")?;
                writeln!(f, "{expected_text}")?;
                writeln!(f, "--- actual ---")?;
                write!(f, "{actual_text}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fixcheck_source::{LineColumn, OneIndexed};

    fn at(line: usize, column: usize) -> LineColumn {
        LineColumn::new(
            OneIndexed::new(line).unwrap(),
            OneIndexed::new(column).unwrap(),
        )
    }

    #[test]
    fn test_mismatch_report_lists_both_sides() {
        let report = MismatchReport {
            expected: vec![ExpectedFinding::new("underscore-name").at(2, 9)],
            actual: vec![ActualFinding::new(
                "underscore-name",
                "name '_value' starts with an underscore",
                "Main.java",
                at(2, 10),
            )],
            missing: vec![ExpectedFinding::new("underscore-name").at(2, 9)],
            unexpected: vec![ActualFinding::new(
                "underscore-name",
                "name '_value' starts with an underscore",
                "Main.java",
                at(2, 10),
            )],
        };

        let rendered = report.to_string();
        assert!(rendered.contains("expected (1):"));
        assert!(rendered.contains("actual (1):"));
        assert!(rendered.contains("missing (1):"));
        assert!(rendered.contains("unexpected (1):"));
        assert!(rendered.contains("Main.java:2:10"));
    }

    #[test]
    fn test_diff_report_caret_alignment() {
        let report = DiffReport::FirstDifference {
            path: "Main.java".to_string(),
            line: OneIndexed::new(1).unwrap(),
            expected_line: "int bar;".to_string(),
            actual_line: "int value;".to_string(),
            column: OneIndexed::new(5).unwrap(),
            expected_text: "int bar;".to_string(),
            actual_text: "int value;".to_string(),
        };

        let rendered = report.to_string();
        let caret_line = rendered
            .lines()
            .find(|line| line.trim_end() == format!("{}^", " ".repeat(14)))
            .expect("caret line present");
        // Ten label characters plus four source characters precede the caret.
        assert_eq!(caret_line.find('^'), Some(14));
    }

    #[test]
    fn test_document_count_display() {
        let report = DiffReport::DocumentCount {
            expected: vec!["A.java".to_string()],
            actual: vec!["A.java".to_string(), "B.java".to_string()],
        };
        let rendered = report.to_string();
        assert!(rendered.contains("expected 1 document(s)"));
        assert!(rendered.contains("got 2"));
    }
}
