//! Line/column bookkeeping for verifier sources.
//!
//! Lines are 1-based. Columns are 1-based and counted in UTF-16 code units
//! from the start of the line, matching the positions analysis tooling
//! reports to editors.

use std::fmt;
use std::num::NonZeroUsize;

use memchr::memchr_iter;

/// A 1-based index, used for both lines and columns.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OneIndexed(NonZeroUsize);

impl OneIndexed {
    /// The smallest index, 1.
    pub const MIN: Self = Self(NonZeroUsize::MIN);

    pub fn new(value: usize) -> Option<Self> {
        NonZeroUsize::new(value).map(Self)
    }

    pub fn from_zero_indexed(value: usize) -> Self {
        Self(NonZeroUsize::MIN.saturating_add(value))
    }

    pub fn get(self) -> usize {
        self.0.get()
    }

    pub fn to_zero_indexed(self) -> usize {
        self.0.get() - 1
    }
}

impl fmt::Display for OneIndexed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.get().fmt(f)
    }
}

/// A 1-based line/column pair.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LineColumn {
    pub line: OneIndexed,
    pub column: OneIndexed,
}

impl LineColumn {
    pub fn new(line: OneIndexed, column: OneIndexed) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for LineColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Byte offsets of line starts, built once per document.
#[derive(Debug, Clone)]
pub struct LineIndex {
    line_starts: Vec<usize>,
}

impl LineIndex {
    pub fn from_source_text(text: &str) -> Self {
        let mut line_starts = Vec::with_capacity(text.len() / 32 + 1);
        line_starts.push(0);
        for newline in memchr_iter(b'\n', text.as_bytes()) {
            line_starts.push(newline + 1);
        }
        Self { line_starts }
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Byte offset at which `line` starts.
    pub fn line_start(&self, line: OneIndexed) -> Option<usize> {
        self.line_starts.get(line.to_zero_indexed()).copied()
    }

    /// Convert a byte offset in `text` to a line/column pair.
    ///
    /// `text` must be the same source this index was built from. The column
    /// counts UTF-16 code units between the line start and `offset`.
    pub fn line_column(&self, offset: usize, text: &str) -> LineColumn {
        let line = self.line_starts.partition_point(|&start| start <= offset) - 1;
        let start = self.line_starts[line];
        let column: usize = text[start..offset].chars().map(char::len_utf16).sum();
        LineColumn {
            line: OneIndexed::from_zero_indexed(line),
            column: OneIndexed::from_zero_indexed(column),
        }
    }
}
