//! Pairing of expected findings against a rule's actual output.

use fixcheck_diagnostics::{ActualFinding, AssertionError, ConfigError, ExpectedFinding, MismatchReport};

use crate::VerifyResult;

/// Match expected descriptors against actual findings.
///
/// With an empty `expected` the caller's intent is "assert no findings":
/// any actual finding fails, reported verbatim. Otherwise each descriptor
/// claims the first unclaimed actual finding (in source order) that
/// satisfies its pairing key; more specific descriptors claim first so a
/// position-less descriptor cannot steal the finding a positioned one
/// needs. Descriptors of equal specificity claim in the order supplied —
/// a documented convention, not a stable contract.
///
/// Pure comparison: the only errors besides the structured mismatch are
/// configuration errors raised before pairing begins.
pub fn match_findings(
    expected: &[ExpectedFinding],
    actual: &[ActualFinding],
    document_count: usize,
) -> VerifyResult {
    if expected.is_empty() {
        if actual.is_empty() {
            return Ok(());
        }
        let mut actual = actual.to_vec();
        actual.sort_by(|a, b| a.source_order_key().cmp(&b.source_order_key()));
        return Err(AssertionError::FindingMismatch(MismatchReport {
            expected: Vec::new(),
            unexpected: actual.clone(),
            actual,
            missing: Vec::new(),
        })
        .into());
    }

    // A path-less descriptor against a multi-document workspace would have
    // to guess which document it means. That is a malformed test, not a
    // mismatch.
    if document_count > 1
        && let Some(ambiguous) = expected.iter().find(|exp| exp.path.is_none())
    {
        return Err(ConfigError::PathRequired {
            rule_id: ambiguous.rule_id.clone(),
            document_count,
        }
        .into());
    }

    let mut source_order: Vec<usize> = (0..actual.len()).collect();
    source_order.sort_by(|&a, &b| {
        actual[a]
            .source_order_key()
            .cmp(&actual[b].source_order_key())
    });

    // Most specific descriptors pair first; the sort is stable, so equally
    // specific descriptors keep their supplied order.
    let mut expected_order: Vec<usize> = (0..expected.len()).collect();
    expected_order.sort_by_key(|&i| std::cmp::Reverse(expected[i].specificity()));

    let mut claimed = vec![false; actual.len()];
    let mut missing = Vec::new();

    for &exp_index in &expected_order {
        let exp = &expected[exp_index];
        let found = source_order
            .iter()
            .copied()
            .find(|&i| !claimed[i] && exp.matches(&actual[i]));

        match found {
            Some(i) => {
                claimed[i] = true;
                // The most common authoring mistake gets the narrow error.
                if let Some(expected_message) = &exp.message
                    && *expected_message != actual[i].message
                {
                    return Err(AssertionError::MessageMismatch {
                        rule_id: actual[i].rule_id.clone(),
                        path: actual[i].path.clone(),
                        position: actual[i].position,
                        expected: expected_message.clone(),
                        actual: actual[i].message.clone(),
                    }
                    .into());
                }
            }
            None => missing.push(exp.clone()),
        }
    }

    let unexpected: Vec<ActualFinding> = source_order
        .iter()
        .filter(|&&i| !claimed[i])
        .map(|&i| actual[i].clone())
        .collect();

    if missing.is_empty() && unexpected.is_empty() {
        return Ok(());
    }

    missing.sort_by_key(|exp| exp.position);
    Err(AssertionError::FindingMismatch(MismatchReport {
        expected: expected.to_vec(),
        actual: source_order.iter().map(|&i| actual[i].clone()).collect(),
        missing,
        unexpected,
    })
    .into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::VerifyError;
    use fixcheck_source::{LineColumn, OneIndexed};

    fn at(line: usize, column: usize) -> LineColumn {
        LineColumn::new(
            OneIndexed::new(line).unwrap(),
            OneIndexed::new(column).unwrap(),
        )
    }

    fn finding(rule_id: &str, path: &str, line: usize, column: usize) -> ActualFinding {
        ActualFinding::new(rule_id, "msg", path, at(line, column))
    }

    #[test]
    fn test_empty_expected_and_actual_succeeds() {
        assert!(match_findings(&[], &[], 1).is_ok());
    }

    #[test]
    fn test_empty_expected_reports_actuals_verbatim() {
        let err = match_findings(&[], &[finding("r", "A.java", 1, 1)], 1).unwrap_err();
        let VerifyError::Assertion(AssertionError::FindingMismatch(report)) = err else {
            panic!("expected finding mismatch, got {err}");
        };
        assert!(report.expected.is_empty());
        assert_eq!(report.unexpected.len(), 1);
    }

    #[test]
    fn test_exact_pairing_succeeds() {
        let expected = [
            ExpectedFinding::new("r").at(1, 1),
            ExpectedFinding::new("r").at(2, 5),
        ];
        let actual = [finding("r", "Main.java", 2, 5), finding("r", "Main.java", 1, 1)];
        assert!(match_findings(&expected, &actual, 1).is_ok());
    }

    #[test]
    fn test_order_independence() {
        let a = [
            ExpectedFinding::new("r").at(2, 5),
            ExpectedFinding::new("r").at(1, 1),
        ];
        let b = [
            ExpectedFinding::new("r").at(1, 1),
            ExpectedFinding::new("r").at(2, 5),
        ];
        let actual = [finding("r", "Main.java", 1, 1), finding("r", "Main.java", 2, 5)];
        assert!(match_findings(&a, &actual, 1).is_ok());
        assert!(match_findings(&b, &actual, 1).is_ok());
    }

    #[test]
    fn test_position_mismatch_fails() {
        let expected = [ExpectedFinding::new("r").at(1, 2)];
        let actual = [finding("r", "Main.java", 1, 1)];
        let err = match_findings(&expected, &actual, 1).unwrap_err();
        assert!(matches!(
            err,
            VerifyError::Assertion(AssertionError::FindingMismatch(_))
        ));
    }

    #[test]
    fn test_mismatch_report_lists_both_sides_fully() {
        let expected = [
            ExpectedFinding::new("r").at(1, 1),
            ExpectedFinding::new("r").at(9, 9),
        ];
        let actual = [finding("r", "Main.java", 1, 1), finding("r", "Main.java", 3, 3)];
        let err = match_findings(&expected, &actual, 1).unwrap_err();
        let VerifyError::Assertion(AssertionError::FindingMismatch(report)) = err else {
            panic!("expected finding mismatch");
        };
        assert_eq!(report.expected.len(), 2);
        assert_eq!(report.actual.len(), 2);
        assert_eq!(report.missing.len(), 1);
        assert_eq!(report.unexpected.len(), 1);
    }

    #[test]
    fn test_message_mismatch_is_distinct() {
        let expected = [ExpectedFinding::new("r").at(1, 1).with_message("other")];
        let actual = [finding("r", "Main.java", 1, 1)];
        let err = match_findings(&expected, &actual, 1).unwrap_err();
        assert!(matches!(
            err,
            VerifyError::Assertion(AssertionError::MessageMismatch { .. })
        ));
    }

    #[test]
    fn test_pathless_descriptor_rejected_for_multi_document() {
        let expected = [ExpectedFinding::new("r")];
        let actual = [finding("r", "A.java", 1, 1)];
        let err = match_findings(&expected, &actual, 2).unwrap_err();
        assert!(matches!(
            err,
            VerifyError::Config(ConfigError::PathRequired { .. })
        ));
    }

    #[test]
    fn test_positioned_descriptor_pairs_before_positionless() {
        // Without the specificity ordering the position-less descriptor
        // could steal the finding at 1:1 and fail the positioned one.
        let expected = [
            ExpectedFinding::new("r"),
            ExpectedFinding::new("r").at(1, 1),
        ];
        let actual = [finding("r", "Main.java", 1, 1), finding("r", "Main.java", 5, 1)];
        assert!(match_findings(&expected, &actual, 1).is_ok());
    }

    #[test]
    fn test_tie_break_first_in_source_order_wins() {
        // Two identical position-less descriptors, three actuals: the two
        // earliest actuals are claimed, the last is unexpected.
        let expected = [ExpectedFinding::new("r"), ExpectedFinding::new("r")];
        let actual = [
            finding("r", "Main.java", 5, 1),
            finding("r", "Main.java", 1, 1),
            finding("r", "Main.java", 3, 1),
        ];
        let err = match_findings(&expected, &actual, 1).unwrap_err();
        let VerifyError::Assertion(AssertionError::FindingMismatch(report)) = err else {
            panic!("expected finding mismatch");
        };
        assert_eq!(report.unexpected.len(), 1);
        assert_eq!(report.unexpected[0].position, at(5, 1));
    }
}
