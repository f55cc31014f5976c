//! Selection and application of a single candidate fix.

use fixcheck_diagnostics::{
    ActualFinding, AssertionError, CompileErrorReport, ConfigError, Severity,
};
use fixcheck_source::OneIndexed;
use fixcheck_workspace::{FixAction, FixProvider, Workspace, WorkspaceBuilder};

use crate::VerifyResult;

/// Options shared by single-fix and fix-all verification.
#[derive(Debug, Clone, Default)]
pub struct FixOptions {
    /// Title of the action to apply. Required when a finding has more than
    /// one candidate action; selection never guesses.
    pub title: Option<String>,
    /// Compiler finding ids the fix is allowed to introduce.
    pub allowed_compile_errors: Vec<String>,
}

impl FixOptions {
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn allow_compile_error(mut self, finding_id: impl Into<String>) -> Self {
        self.allowed_compile_errors.push(finding_id.into());
        self
    }
}

/// Pick one action out of the provider's candidates.
///
/// Zero candidates, several candidates without a title, and an unmatched
/// title are all configuration errors; the latter two list every available
/// title so the caller can disambiguate.
pub(crate) fn select_action(
    mut actions: Vec<FixAction>,
    title: Option<&str>,
    finding: &ActualFinding,
) -> Result<FixAction, ConfigError> {
    if actions.is_empty() {
        return Err(ConfigError::NoFix {
            rule_id: finding.rule_id.clone(),
            path: finding.path.clone(),
            position: finding.position,
        });
    }

    match title {
        None => {
            if actions.len() > 1 {
                return Err(ConfigError::AmbiguousFix {
                    titles: actions.iter().map(|a| a.title().to_string()).collect(),
                });
            }
            Ok(actions.remove(0))
        }
        Some(title) => {
            let index = actions.iter().position(|a| a.title() == title);
            match index {
                Some(index) => Ok(actions.remove(index)),
                None => Err(ConfigError::UnknownFixTitle {
                    title: title.to_string(),
                    available: actions.iter().map(|a| a.title().to_string()).collect(),
                }),
            }
        }
    }
}

/// Apply one fix for `finding`, returning the new snapshot.
///
/// The original workspace is never mutated. After applying, the compiler
/// is re-run over the new snapshot; errors that were not present before
/// and are not explicitly allowed fail the test, each reported with its
/// location and the offending source line.
pub fn apply_fix(
    builder: &dyn WorkspaceBuilder,
    workspace: &Workspace,
    finding: &ActualFinding,
    provider: &dyn FixProvider,
    options: &FixOptions,
) -> VerifyResult<Workspace> {
    let actions = provider.fixes(workspace, finding);
    let action = select_action(actions, options.title.as_deref(), finding)?;
    let fixed = action.apply(workspace);

    check_introduced_errors(builder, workspace, &fixed, &options.allowed_compile_errors)?;
    Ok(fixed)
}

/// Fail if `fixed` has compiler errors that `original` did not have,
/// ignoring allowed ids.
pub(crate) fn check_introduced_errors(
    builder: &dyn WorkspaceBuilder,
    original: &Workspace,
    fixed: &Workspace,
    allowed: &[String],
) -> VerifyResult {
    let baseline = builder.compile_findings(original);
    let introduced: Vec<ActualFinding> = builder
        .compile_findings(fixed)
        .into_iter()
        .filter(|finding| finding.severity == Severity::Error)
        .filter(|finding| !allowed.contains(&finding.rule_id))
        // Position-insensitive baseline: a pre-existing error that merely
        // moved is not an introduced error.
        .filter(|finding| {
            !baseline
                .iter()
                .any(|before| before.rule_id == finding.rule_id && before.path == finding.path)
        })
        .collect();

    if introduced.is_empty() {
        return Ok(());
    }

    let errors = introduced
        .into_iter()
        .map(|finding| {
            let excerpt = excerpt_line(fixed, &finding);
            CompileErrorReport { finding, excerpt }
        })
        .collect();
    Err(AssertionError::CompileErrors { errors }.into())
}

/// The text of the line a finding points at, for error reports.
fn excerpt_line(workspace: &Workspace, finding: &ActualFinding) -> String {
    let Some(document) = workspace.document(&finding.path) else {
        return String::new();
    };
    line_at(&document.text, finding.position.line)
}

fn line_at(text: &str, line: OneIndexed) -> String {
    text.split('\n')
        .nth(line.to_zero_indexed())
        .unwrap_or("")
        .to_string()
}
