//! Expected and actual finding value types.

use std::fmt;

use fixcheck_source::{LineColumn, OneIndexed};
use is_macro::Is;

/// Severity of a finding a rule or compiler produced.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Is)]
pub enum Severity {
    Error,
    #[default]
    Warning,
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => f.write_str("error"),
            Severity::Warning => f.write_str("warning"),
            Severity::Info => f.write_str("info"),
        }
    }
}

/// A finding a rule actually produced over a workspace.
///
/// Read-only and workspace-scoped; discarded after comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActualFinding {
    pub rule_id: String,
    pub message: String,
    pub path: String,
    pub position: LineColumn,
    pub severity: Severity,
}

impl ActualFinding {
    pub fn new(
        rule_id: impl Into<String>,
        message: impl Into<String>,
        path: impl Into<String>,
        position: LineColumn,
    ) -> Self {
        Self {
            rule_id: rule_id.into(),
            message: message.into(),
            path: path.into(),
            position,
            severity: Severity::default(),
        }
    }

    #[must_use]
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Key used to order findings in source order.
    pub fn source_order_key(&self) -> (&str, LineColumn, &str) {
        (&self.path, self.position, &self.rule_id)
    }
}

impl fmt::Display for ActualFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}:{} {}: {}",
            self.rule_id, self.path, self.position, self.severity, self.message
        )
    }
}

/// An expected finding, written by the test author.
///
/// Immutable once constructed. `path` and `position` are optional: an unset
/// field matches any value, at the cost of requiring the workspace to be
/// unambiguous (a path-less descriptor is rejected against a multi-document
/// workspace before any comparison runs).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpectedFinding {
    pub rule_id: String,
    pub message: Option<String>,
    pub path: Option<String>,
    pub position: Option<LineColumn>,
}

impl ExpectedFinding {
    pub fn new(rule_id: impl Into<String>) -> Self {
        Self {
            rule_id: rule_id.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    #[must_use]
    pub fn in_file(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Set the expected position. Line and column are 1-based; they are
    /// either both present or both absent, which this signature enforces.
    #[must_use]
    pub fn at(mut self, line: usize, column: usize) -> Self {
        let line = OneIndexed::new(line).expect("line is 1-based");
        let column = OneIndexed::new(column).expect("column is 1-based");
        self.position = Some(LineColumn::new(line, column));
        self
    }

    #[must_use]
    pub fn at_position(mut self, position: LineColumn) -> Self {
        self.position = Some(position);
        self
    }

    /// Whether `actual` satisfies this descriptor's pairing key.
    ///
    /// The key degrades with the fields that are set: (id, path, position),
    /// then (id, path), then bare id. Messages are compared separately so a
    /// message mismatch can be reported as its own, narrower failure.
    pub fn matches(&self, actual: &ActualFinding) -> bool {
        self.rule_id == actual.rule_id
            && self.path.as_deref().is_none_or(|path| path == actual.path)
            && self.position.is_none_or(|position| position == actual.position)
    }

    /// How many pairing-key fields this descriptor pins down. Used to pair
    /// more specific descriptors first.
    pub fn specificity(&self) -> usize {
        usize::from(self.path.is_some()) + usize::from(self.position.is_some())
    }
}

impl fmt::Display for ExpectedFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] ", self.rule_id)?;
        match &self.path {
            Some(path) => write!(f, "{path}")?,
            None => write!(f, "<any file>")?,
        }
        match self.position {
            Some(position) => write!(f, ":{position}")?,
            None => write!(f, ":<any position>")?,
        }
        if let Some(message) = &self.message {
            write!(f, ": {message}")?;
        }
        Ok(())
    }
}
