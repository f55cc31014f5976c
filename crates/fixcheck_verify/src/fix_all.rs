//! Repeated fix application until the rule stops firing.
//!
//! The loop is `Scanning → (Applying → Scanning)*` and terminates in one of
//! three distinct states: converged (no fixable finding remains), diverged
//! (an application failed to strictly shrink the fixable-finding count), or
//! a configuration error (ambiguous title, findings with no fix at all).
//! Divergence is a bug in the fix under test, not in this harness, and is
//! reported as such together with the last attempted rewrite's diff.

use fixcheck_diagnostics::{ActualFinding, AssertionError, ConfigError};
use fixcheck_workspace::{FixProvider, Rule, Workspace, WorkspaceBuilder};

use crate::fix::{FixOptions, check_introduced_errors, select_action};
use crate::{VerifyResult, differ};

/// How the loop groups fix applications.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FixAllPolicy {
    /// Apply one fix at a time, re-running the rule between applications.
    OneByOne,
    /// Apply every fix within one document in a single rewrite against the
    /// original snapshot's positions. Falls back to [`FixAllPolicy::OneByOne`]
    /// when the provider cannot batch.
    BatchPerDocument,
}

/// Run the convergence loop; return the converged snapshot.
pub fn fix_all(
    builder: &dyn WorkspaceBuilder,
    workspace: &Workspace,
    rule: &dyn Rule,
    provider: &dyn FixProvider,
    options: &FixOptions,
    policy: FixAllPolicy,
) -> VerifyResult<Workspace> {
    let fixed = match policy {
        FixAllPolicy::OneByOne => one_by_one(workspace, rule, provider, options)?,
        FixAllPolicy::BatchPerDocument => batched(workspace, rule, provider, options)?,
    };

    // Compile errors are judged across the whole run, original vs final.
    check_introduced_errors(builder, workspace, &fixed, &options.allowed_compile_errors)?;
    Ok(fixed)
}

/// The rule's findings that have at least one candidate fix, in stable
/// source order.
fn fixable_findings(
    rule: &dyn Rule,
    provider: &dyn FixProvider,
    workspace: &Workspace,
) -> Vec<ActualFinding> {
    let mut findings = rule.check(workspace);
    findings.sort_by(|a, b| a.source_order_key().cmp(&b.source_order_key()));
    findings.retain(|finding| !provider.fixes(workspace, finding).is_empty());
    findings
}

/// A rule that fires without offering any fix cannot converge; that is a
/// malformed fix-all test, not a divergence.
fn ensure_something_fixable(
    rule: &dyn Rule,
    workspace: &Workspace,
    fixable: &[ActualFinding],
) -> Result<(), ConfigError> {
    if fixable.is_empty() && !rule.check(workspace).is_empty() {
        return Err(ConfigError::NothingToFix {
            rule: rule.name().to_string(),
        });
    }
    Ok(())
}

fn diverged(
    iteration: usize,
    previous: usize,
    remaining: usize,
    before: &Workspace,
    after: &Workspace,
) -> AssertionError {
    let before_docs: Vec<_> = before.documents().cloned().collect();
    let after_docs: Vec<_> = after.documents().cloned().collect();
    AssertionError::Diverged {
        iteration,
        previous,
        remaining,
        last_diff: differ::diff_documents(&before_docs, &after_docs),
    }
}

fn one_by_one(
    workspace: &Workspace,
    rule: &dyn Rule,
    provider: &dyn FixProvider,
    options: &FixOptions,
) -> VerifyResult<Workspace> {
    let mut current = workspace.clone();
    let mut remaining = fixable_findings(rule, provider, &current);
    ensure_something_fixable(rule, &current, &remaining)?;

    let mut iteration = 0;
    while let Some(finding) = remaining.first() {
        iteration += 1;

        let actions = provider.fixes(&current, finding);
        let action = select_action(actions, options.title.as_deref(), finding)?;
        let next = action.apply(&current);
        let next_remaining = fixable_findings(rule, provider, &next);

        // Every iteration must strictly shrink the fixable count, or the
        // fix is oscillating or stuck.
        if next_remaining.len() >= remaining.len() {
            return Err(diverged(
                iteration,
                remaining.len(),
                next_remaining.len(),
                &current,
                &next,
            )
            .into());
        }

        current = next;
        remaining = next_remaining;
    }

    Ok(current)
}

fn batched(
    workspace: &Workspace,
    rule: &dyn Rule,
    provider: &dyn FixProvider,
    options: &FixOptions,
) -> VerifyResult<Workspace> {
    let mut current = workspace.clone();
    let mut remaining = fixable_findings(rule, provider, &current);
    ensure_something_fixable(rule, &current, &remaining)?;

    let mut pass = 0;
    while !remaining.is_empty() {
        pass += 1;

        // One batch per document, findings already in source order.
        let first_path = remaining[0].path.clone();
        let batch: Vec<ActualFinding> = remaining
            .iter()
            .filter(|finding| finding.path == first_path)
            .cloned()
            .collect();

        // Batching must not dodge candidate selection: a finding with
        // several candidates and no title is as ambiguous here as in the
        // single-fix path, and an unknown title is as wrong.
        for finding in &batch {
            select_action(provider.fixes(&current, finding), options.title.as_deref(), finding)?;
        }

        let Some(next) = provider.fix_batch(&current, &batch) else {
            // Provider cannot batch; finish the run one fix at a time.
            return one_by_one(&current, rule, provider, options);
        };

        let next_remaining = fixable_findings(rule, provider, &next);
        if next_remaining.len() >= remaining.len() {
            return Err(diverged(
                pass,
                remaining.len(),
                next_remaining.len(),
                &current,
                &next,
            )
            .into());
        }

        current = next;
        remaining = next_remaining;
    }

    Ok(current)
}
