//! The rule and fix-provider seams the engine verifies through.

use std::fmt;

use fixcheck_diagnostics::ActualFinding;

use crate::Workspace;

/// A static-analysis rule under test.
pub trait Rule {
    /// The rule's name, used in failure messages.
    fn name(&self) -> &str;

    /// Finding ids this rule can produce.
    ///
    /// Must be non-empty and free of duplicates; the verifier rejects a
    /// rule that violates either as a configuration error at construction
    /// time.
    fn finding_ids(&self) -> Vec<String>;

    /// Run the rule over a workspace and report findings.
    fn check(&self, workspace: &Workspace) -> Vec<ActualFinding>;
}

/// One remediation a fix provider offers for one finding.
pub struct FixAction {
    title: String,
    apply: Box<dyn Fn(&Workspace) -> Workspace>,
}

impl FixAction {
    pub fn new(title: impl Into<String>, apply: impl Fn(&Workspace) -> Workspace + 'static) -> Self {
        Self {
            title: title.into(),
            apply: Box::new(apply),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Apply this action, producing a fresh snapshot. The input workspace
    /// is never mutated.
    pub fn apply(&self, workspace: &Workspace) -> Workspace {
        (self.apply)(workspace)
    }
}

impl fmt::Debug for FixAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FixAction").field("title", &self.title).finish()
    }
}

/// A fix provider under test.
pub trait FixProvider {
    /// Candidate actions registered against one finding. May be empty.
    fn fixes(&self, workspace: &Workspace, finding: &ActualFinding) -> Vec<FixAction>;

    /// Apply fixes for a whole batch of findings in one rewrite against the
    /// original snapshot's positions.
    ///
    /// Providers that cannot batch return `None`; the fix-all loop then
    /// falls back to one-by-one application.
    fn fix_batch(&self, _workspace: &Workspace, _findings: &[ActualFinding]) -> Option<Workspace> {
        None
    }
}
