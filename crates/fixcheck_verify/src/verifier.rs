//! The public assertion surface of the oracle.

use std::path::Path;

use fixcheck_diagnostics::{ActualFinding, AssertionError, ConfigError, ExpectedFinding};
use fixcheck_markers as markers;
use fixcheck_workspace::{
    DEFAULT_PATH, DEFAULT_PROJECT, Document, FixProvider, Project, ProjectDescriptor, Rule,
    Workspace, WorkspaceBuilder,
};

use crate::fix::FixOptions;
use crate::fix_all::FixAllPolicy;
use crate::{VerifyResult, differ, fix, fix_all, matcher};

/// Verifies that a rule fires exactly where a test expects.
///
/// Construction validates the rule's declared finding ids; a rule with zero
/// or duplicate ids is a malformed test and is rejected before anything
/// runs.
pub struct RuleVerifier<'a> {
    rule: &'a dyn Rule,
    builder: &'a dyn WorkspaceBuilder,
    include_compile_findings: bool,
}

impl<'a> RuleVerifier<'a> {
    pub fn new(rule: &'a dyn Rule, builder: &'a dyn WorkspaceBuilder) -> VerifyResult<Self> {
        let ids = rule.finding_ids();
        if ids.is_empty() {
            return Err(ConfigError::NoFindingIds {
                rule: rule.name().to_string(),
            }
            .into());
        }
        let mut seen = std::collections::HashSet::new();
        for id in &ids {
            if !seen.insert(id.as_str()) {
                return Err(ConfigError::DuplicateFindingId {
                    rule: rule.name().to_string(),
                    id: id.clone(),
                }
                .into());
            }
        }

        Ok(Self {
            rule,
            builder,
            include_compile_findings: false,
        })
    }

    /// Also compare compiler findings, not just the rule's own.
    #[must_use]
    pub fn include_compile_findings(mut self) -> Self {
        self.include_compile_findings = true;
        self
    }

    /// The finding id marker-based expectations assert: the rule's first
    /// declared id.
    fn primary_finding_id(&self) -> String {
        self.rule.finding_ids().remove(0)
    }

    /// Assert the rule fires exactly at the `↓` markers in `annotated`.
    ///
    /// At least one marker is required; delegating an unmarked source here
    /// is a precondition violation, not a test failure.
    pub fn assert_annotated(&self, annotated: &str) -> VerifyResult {
        let extraction = markers::extract(annotated);
        if extraction.positions.is_empty() {
            return Err(ConfigError::NoMarkers.into());
        }

        let id = self.primary_finding_id();
        let expected: Vec<ExpectedFinding> = extraction
            .positions
            .iter()
            .map(|&position| ExpectedFinding::new(&id).at_position(position))
            .collect();

        let workspace = self.build_documents(&[(DEFAULT_PATH, &extraction.text)])?;
        self.assert_findings_in(&workspace, &expected)
    }

    /// Assert the rule fires exactly at the markers across several
    /// annotated documents. Every expectation carries the path of the
    /// document its marker came from.
    pub fn assert_annotated_documents(&self, documents: &[(&str, &str)]) -> VerifyResult {
        let (stripped, marked) = markers::extract_documents(documents);
        if marked.is_empty() {
            return Err(ConfigError::NoMarkers.into());
        }

        let id = self.primary_finding_id();
        let expected: Vec<ExpectedFinding> = marked
            .iter()
            .map(|marked| {
                ExpectedFinding::new(&id)
                    .in_file(&marked.path)
                    .at_position(marked.position)
            })
            .collect();

        let borrowed: Vec<(&str, &str)> = stripped
            .iter()
            .map(|(path, text)| (path.as_str(), text.as_str()))
            .collect();
        let workspace = self.build_documents(&borrowed)?;
        self.assert_findings_in(&workspace, &expected)
    }

    /// Assert the rule's findings over `source` match `expected` exactly.
    pub fn assert_findings(&self, source: &str, expected: &[ExpectedFinding]) -> VerifyResult {
        let workspace = self.build_documents(&[(DEFAULT_PATH, source)])?;
        self.assert_findings_in(&workspace, expected)
    }

    /// Assert the rule's findings over several documents match `expected`.
    pub fn assert_findings_documents(
        &self,
        documents: &[(&str, &str)],
        expected: &[ExpectedFinding],
    ) -> VerifyResult {
        let workspace = self.build_documents(documents)?;
        self.assert_findings_in(&workspace, expected)
    }

    /// Assert against a pre-built workspace (multi-project tests).
    pub fn assert_findings_in(
        &self,
        workspace: &Workspace,
        expected: &[ExpectedFinding],
    ) -> VerifyResult {
        let mut actual = self.rule.check(workspace);
        if self.include_compile_findings {
            actual.extend(self.builder.compile_findings(workspace));
        }
        matcher::match_findings(expected, &actual, workspace.document_count())
    }

    /// Assert the rule fires nowhere in `source`.
    pub fn assert_clean(&self, source: &str) -> VerifyResult {
        self.assert_findings(source, &[])
    }

    /// Assert the rule fires nowhere across several documents.
    pub fn assert_clean_documents(&self, documents: &[(&str, &str)]) -> VerifyResult {
        self.assert_findings_documents(documents, &[])
    }

    /// Assert the rule fires nowhere in a pre-built workspace.
    pub fn assert_clean_workspace(&self, workspace: &Workspace) -> VerifyResult {
        self.assert_findings_in(workspace, &[])
    }

    /// Assert the rule fires nowhere in the project a descriptor file
    /// describes. Sources resolve relative to the descriptor's directory.
    pub fn assert_clean_project(&self, descriptor_path: &Path) -> VerifyResult {
        let descriptor = ProjectDescriptor::from_file(descriptor_path)?;
        let base = descriptor_path.parent().unwrap_or(Path::new("."));
        let project = descriptor.load(base)?;
        let workspace = self.builder.build(vec![project])?;
        self.assert_clean_workspace(&workspace)
    }

    fn build_documents(&self, documents: &[(&str, &str)]) -> VerifyResult<Workspace> {
        let project = Project {
            name: DEFAULT_PROJECT.to_string(),
            documents: documents
                .iter()
                .map(|(path, text)| Document::new(*path, *text))
                .collect(),
            references: Vec::new(),
        };
        Ok(self.builder.build(vec![project])?)
    }
}

/// Verifies that a fix rewrites flagged source into the expected text.
pub struct FixVerifier<'a> {
    rules: RuleVerifier<'a>,
    provider: &'a dyn FixProvider,
    options: FixOptions,
}

impl<'a> FixVerifier<'a> {
    pub fn new(
        rule: &'a dyn Rule,
        provider: &'a dyn FixProvider,
        builder: &'a dyn WorkspaceBuilder,
    ) -> VerifyResult<Self> {
        Ok(Self {
            rules: RuleVerifier::new(rule, builder)?,
            provider,
            options: FixOptions::default(),
        })
    }

    /// Select the candidate action with this exact title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.options = self.options.with_title(title);
        self
    }

    /// Allow the fix to introduce compiler errors with this finding id.
    #[must_use]
    pub fn allow_compile_error(mut self, finding_id: impl Into<String>) -> Self {
        self.options = self.options.allow_compile_error(finding_id);
        self
    }

    /// Assert that applying one fix converts `input` into `expected`.
    pub fn assert_fix(&self, input: &str, expected: &str) -> VerifyResult {
        self.assert_fix_documents(&[(DEFAULT_PATH, input)], &[(DEFAULT_PATH, expected)])
    }

    /// Multi-document form of [`FixVerifier::assert_fix`]. The expected set
    /// may be supplied in any order and may include documents the fix adds.
    pub fn assert_fix_documents(
        &self,
        input: &[(&str, &str)],
        expected: &[(&str, &str)],
    ) -> VerifyResult {
        let workspace = self.rules.build_documents(input)?;
        let finding = self.first_finding(&workspace)?;
        let fixed = fix::apply_fix(
            self.rules.builder,
            &workspace,
            &finding,
            self.provider,
            &self.options,
        )?;
        compare(expected, &fixed)
    }

    /// Assert that repeated fix application converts `input` into
    /// `expected` under the given policy.
    pub fn assert_fix_all(&self, input: &str, expected: &str, policy: FixAllPolicy) -> VerifyResult {
        self.assert_fix_all_documents(&[(DEFAULT_PATH, input)], &[(DEFAULT_PATH, expected)], policy)
    }

    /// Multi-document form of [`FixVerifier::assert_fix_all`].
    pub fn assert_fix_all_documents(
        &self,
        input: &[(&str, &str)],
        expected: &[(&str, &str)],
        policy: FixAllPolicy,
    ) -> VerifyResult {
        let workspace = self.rules.build_documents(input)?;
        let fixed = fix_all::fix_all(
            self.rules.builder,
            &workspace,
            self.rules.rule,
            self.provider,
            &self.options,
            policy,
        )?;
        compare(expected, &fixed)
    }

    /// Assert both fix-all policies reach `expected`. A well-behaved fix
    /// converges to the same text either way; disagreement is a bug in the
    /// fix under test and fails here.
    pub fn assert_fix_all_policies(&self, input: &str, expected: &str) -> VerifyResult {
        self.assert_fix_all(input, expected, FixAllPolicy::OneByOne)?;
        self.assert_fix_all(input, expected, FixAllPolicy::BatchPerDocument)
    }

    /// The first finding in stable source order, the one a single-fix test
    /// applies its fix to.
    fn first_finding(&self, workspace: &Workspace) -> VerifyResult<ActualFinding> {
        let mut findings = self.rules.rule.check(workspace);
        findings.sort_by(|a, b| a.source_order_key().cmp(&b.source_order_key()));
        if findings.is_empty() {
            return Err(ConfigError::NoFindings {
                rule: self.rules.rule.name().to_string(),
            }
            .into());
        }
        Ok(findings.remove(0))
    }
}

fn compare(expected: &[(&str, &str)], fixed: &Workspace) -> VerifyResult {
    let expected_docs: Vec<Document> = expected
        .iter()
        .map(|(path, text)| Document::new(*path, *text))
        .collect();
    let actual_docs: Vec<Document> = fixed.documents().cloned().collect();

    match differ::diff_documents(&expected_docs, &actual_docs) {
        None => Ok(()),
        Some(report) => Err(AssertionError::TextMismatch(report).into()),
    }
}
