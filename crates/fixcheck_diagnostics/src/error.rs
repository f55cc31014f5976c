//! The two error tiers the verifier distinguishes.

use std::fmt;

use fixcheck_source::LineColumn;
use thiserror::Error;

use crate::{ActualFinding, DiffReport, MismatchReport};

/// The test itself is malformed.
///
/// Raised immediately, independent of comparison logic. A configuration
/// error never means the rule or fix under test is wrong.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("annotated source contains no position markers")]
    NoMarkers,

    #[error(
        "expected finding '{rule_id}' carries no path, but the workspace has \
         {document_count} documents; set a path to disambiguate"
    )]
    PathRequired {
        rule_id: String,
        document_count: usize,
    },

    #[error("expected one fix for '{rule_id}' at {path}:{position}, found 0")]
    NoFix {
        rule_id: String,
        path: String,
        position: LineColumn,
    },

    #[error("{} fixes are available; pass a title to pick one: {}", .titles.len(), .titles.join(", "))]
    AmbiguousFix { titles: Vec<String> },

    #[error("no fix titled '{title}'; available: {}", .available.join(", "))]
    UnknownFixTitle {
        title: String,
        available: Vec<String>,
    },

    #[error("rule '{rule}' declares no finding ids")]
    NoFindingIds { rule: String },

    #[error("rule '{rule}' declares finding id '{id}' more than once")]
    DuplicateFindingId { rule: String, id: String },

    #[error("rule '{rule}' reported findings but none of them has a fix")]
    NothingToFix { rule: String },

    #[error("rule '{rule}' reported no findings over the fix test input")]
    NoFindings { rule: String },
}

/// One compiler error a fix introduced, with the offending source line.
#[derive(Debug, Clone)]
pub struct CompileErrorReport {
    pub finding: ActualFinding,
    /// The text of the line the error points at.
    pub excerpt: String,
}

impl fmt::Display for CompileErrorReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.finding)?;
        write!(f, "    {}", self.excerpt)
    }
}

/// The expected terminal outcome of a failing test.
///
/// Always carries the full comparison or diff context needed to diagnose
/// the failure without re-running anything.
#[derive(Debug, Error)]
pub enum AssertionError {
    #[error("findings do not match\n{0}")]
    FindingMismatch(MismatchReport),

    #[error(
        "messages do not match for '{rule_id}' at {path}:{position}\n\
         expected: {expected}\n\
         actual:   {actual}"
    )]
    MessageMismatch {
        rule_id: String,
        path: String,
        position: LineColumn,
        expected: String,
        actual: String,
    },

    #[error("{0}")]
    TextMismatch(DiffReport),

    #[error("the fix introduced compiler errors:\n{}", render_compile_errors(.errors))]
    CompileErrors { errors: Vec<CompileErrorReport> },

    #[error(
        "fix application failed to converge: iteration {iteration} left {remaining} \
         fixable finding(s), was {previous}{}",
        render_last_diff(.last_diff)
    )]
    Diverged {
        iteration: usize,
        previous: usize,
        remaining: usize,
        last_diff: Option<DiffReport>,
    },
}

fn render_compile_errors(errors: &[CompileErrorReport]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_last_diff(last_diff: &Option<DiffReport>) -> String {
    match last_diff {
        Some(diff) => format!("\nlast attempted rewrite:\n{diff}"),
        None => String::new(),
    }
}
