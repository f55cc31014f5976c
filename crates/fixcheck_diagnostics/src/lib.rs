//! Finding types, failure reports, and the error taxonomy of the verifier.
//!
//! Failures split into two tiers with distinct shapes: [`ConfigError`] means
//! the test itself is malformed and is raised before any comparison runs;
//! [`AssertionError`] is the expected terminal outcome of a failing test and
//! always carries the full comparison context.

pub use error::{AssertionError, CompileErrorReport, ConfigError};
pub use finding::{ActualFinding, ExpectedFinding, Severity};
pub use report::{DiffReport, MismatchReport};

mod error;
mod finding;
mod report;
