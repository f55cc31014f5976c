//! Correctness oracle for static-analysis rules and their fixes.
//!
//! Given a rule that flags problems in source text and, optionally, a fix
//! that rewrites flagged source, this crate verifies that the rule fires
//! exactly where a test expects and that the fix produces exactly the
//! expected text, across single- or multi-document, single- or
//! multi-project workspaces.
//!
//! The engine is synchronous and pure: one invocation builds immutable
//! workspace snapshots, runs the rule, pairs findings, applies fixes, and
//! reports the first mismatch. Nothing is retried and nothing is swallowed;
//! malformed tests fail with a [`fixcheck_diagnostics::ConfigError`],
//! failing tests with a [`fixcheck_diagnostics::AssertionError`], and
//! collaborator errors propagate unchanged.

pub mod differ;
pub mod fix;
pub mod fix_all;
pub mod matcher;

mod verifier;

pub use fix::FixOptions;
pub use fix_all::FixAllPolicy;
pub use verifier::{FixVerifier, RuleVerifier};

use fixcheck_diagnostics::{AssertionError, ConfigError};
use fixcheck_workspace::BuildError;
use thiserror::Error;

/// Any verifier failure, split by tier so callers can triage at a glance.
#[derive(Debug, Error)]
pub enum VerifyError {
    /// The test itself is malformed.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The rule or fix under test did not behave as expected.
    #[error("assertion failed: {0}")]
    Assertion(#[from] AssertionError),

    /// A collaborator failed; propagated unchanged.
    #[error(transparent)]
    Build(#[from] BuildError),
}

pub type VerifyResult<T = ()> = Result<T, VerifyError>;
