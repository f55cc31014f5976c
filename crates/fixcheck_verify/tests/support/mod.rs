//! Sample rules and fix providers the oracle's own tests run against.
#![allow(dead_code)]

use fixcheck_diagnostics::ActualFinding;
use fixcheck_source::{LineColumn, OneIndexed};
use fixcheck_workspace::{Document, FixAction, FixProvider, Rule, Workspace};

pub const RULE_ID: &str = "underscore-name";

/// Flags every identifier that starts with an underscore.
pub struct UnderscoreRule;

impl Rule for UnderscoreRule {
    fn name(&self) -> &str {
        "UnderscoreName"
    }

    fn finding_ids(&self) -> Vec<String> {
        vec![RULE_ID.to_string()]
    }

    fn check(&self, workspace: &Workspace) -> Vec<ActualFinding> {
        let mut findings = Vec::new();
        for document in workspace.documents() {
            for (line_index, line) in document.text.split('\n').enumerate() {
                for (column_units, word) in identifiers(line) {
                    if word.starts_with('_') {
                        findings.push(ActualFinding::new(
                            RULE_ID,
                            format!("name '{word}' starts with an underscore"),
                            &document.path,
                            LineColumn::new(
                                OneIndexed::from_zero_indexed(line_index),
                                OneIndexed::from_zero_indexed(column_units),
                            ),
                        ));
                    }
                }
            }
        }
        findings
    }
}

/// A rule that mis-declares its finding ids, for construction-time checks.
pub struct BadIdsRule(pub Vec<String>);

impl Rule for BadIdsRule {
    fn name(&self) -> &str {
        "BadIds"
    }

    fn finding_ids(&self) -> Vec<String> {
        self.0.clone()
    }

    fn check(&self, _workspace: &Workspace) -> Vec<ActualFinding> {
        Vec::new()
    }
}

/// Identifier-ish tokens of one line with their UTF-16 start columns.
fn identifiers(line: &str) -> Vec<(usize, &str)> {
    let mut tokens = Vec::new();
    let mut units = 0usize;
    let mut start: Option<(usize, usize)> = None;

    for (byte, ch) in line.char_indices() {
        let is_word = ch.is_ascii_alphanumeric() || ch == '_';
        if is_word {
            if start.is_none() {
                start = Some((byte, units));
            }
        } else if let Some((byte_start, unit_start)) = start.take() {
            tokens.push((unit_start, &line[byte_start..byte]));
        }
        units += ch.len_utf16();
    }
    if let Some((byte_start, unit_start)) = start {
        tokens.push((unit_start, &line[byte_start..]));
    }
    tokens
}

/// The name quoted in an underscore-name message.
fn quoted_name(message: &str) -> String {
    message
        .split('\'')
        .nth(1)
        .unwrap_or_default()
        .to_string()
}

fn rename_action(title: impl Into<String>, path: String, from: String, to: String) -> FixAction {
    FixAction::new(title, move |workspace: &Workspace| {
        let Some(document) = workspace.document(&path) else {
            return workspace.clone();
        };
        let text = document.text.replace(&from, &to);
        workspace.with_document_text(&path, text)
    })
}

/// Offers exactly one fix: strip the leading underscores.
pub struct RenameProvider;

impl FixProvider for RenameProvider {
    fn fixes(&self, _workspace: &Workspace, finding: &ActualFinding) -> Vec<FixAction> {
        let name = quoted_name(&finding.message);
        let renamed = name.trim_start_matches('_').to_string();
        vec![rename_action(
            format!("Rename to: {renamed}"),
            finding.path.clone(),
            name,
            renamed,
        )]
    }
}

/// Like [`RenameProvider`] but also able to rewrite a whole batch at once.
pub struct BatchRenameProvider;

impl FixProvider for BatchRenameProvider {
    fn fixes(&self, workspace: &Workspace, finding: &ActualFinding) -> Vec<FixAction> {
        RenameProvider.fixes(workspace, finding)
    }

    fn fix_batch(&self, workspace: &Workspace, findings: &[ActualFinding]) -> Option<Workspace> {
        let mut next = workspace.clone();
        for finding in findings {
            let name = quoted_name(&finding.message);
            let renamed = name.trim_start_matches('_');
            let Some(document) = next.document(&finding.path) else {
                continue;
            };
            let text = document.text.replace(&name, renamed);
            next = next.with_document_text(&finding.path, text);
        }
        Some(next)
    }
}

/// Offers two competing renames, forcing title disambiguation.
pub struct MultiRenameProvider;

impl FixProvider for MultiRenameProvider {
    fn fixes(&self, _workspace: &Workspace, finding: &ActualFinding) -> Vec<FixAction> {
        let name = quoted_name(&finding.message);
        let base = name.trim_start_matches('_').to_string();
        [1, 2]
            .into_iter()
            .map(|n| {
                rename_action(
                    format!("Rename to: {base}{n}"),
                    finding.path.clone(),
                    name.clone(),
                    format!("{base}{n}"),
                )
            })
            .collect()
    }
}

/// Two titled candidates per finding, plus a batch rewrite to a third
/// spelling neither candidate produces.
pub struct AmbiguousBatchProvider;

impl FixProvider for AmbiguousBatchProvider {
    fn fixes(&self, workspace: &Workspace, finding: &ActualFinding) -> Vec<FixAction> {
        MultiRenameProvider.fixes(workspace, finding)
    }

    fn fix_batch(&self, workspace: &Workspace, findings: &[ActualFinding]) -> Option<Workspace> {
        let mut next = workspace.clone();
        for finding in findings {
            let name = quoted_name(&finding.message);
            let renamed = format!("{}X", name.trim_start_matches('_'));
            let Some(document) = next.document(&finding.path) else {
                continue;
            };
            let text = document.text.replace(&name, &renamed);
            next = next.with_document_text(&finding.path, text);
        }
        Some(next)
    }
}

/// Batches by returning the workspace unchanged, so no pass ever shrinks
/// the finding count.
pub struct StuckBatchProvider;

impl FixProvider for StuckBatchProvider {
    fn fixes(&self, workspace: &Workspace, finding: &ActualFinding) -> Vec<FixAction> {
        RenameProvider.fixes(workspace, finding)
    }

    fn fix_batch(&self, workspace: &Workspace, _findings: &[ActualFinding]) -> Option<Workspace> {
        Some(workspace.clone())
    }
}

/// Offers no fix for anything.
pub struct NoFixProvider;

impl FixProvider for NoFixProvider {
    fn fixes(&self, _workspace: &Workspace, _finding: &ActualFinding) -> Vec<FixAction> {
        Vec::new()
    }
}

/// Renames to another underscore-prefixed name, so the finding it claims
/// to remove always comes back.
pub struct OscillatingProvider;

impl FixProvider for OscillatingProvider {
    fn fixes(&self, _workspace: &Workspace, finding: &ActualFinding) -> Vec<FixAction> {
        let name = quoted_name(&finding.message);
        let renamed = format!("{name}_");
        vec![rename_action(
            "Rename (unstable)",
            finding.path.clone(),
            name,
            renamed,
        )]
    }
}

/// Removes the flagged name by rewriting the document into invalid Java.
pub struct BreakingProvider;

impl FixProvider for BreakingProvider {
    fn fixes(&self, _workspace: &Workspace, finding: &ActualFinding) -> Vec<FixAction> {
        let path = finding.path.clone();
        vec![FixAction::new("Break the build", move |workspace: &Workspace| {
            workspace.with_document_text(&path, "class A { int x = ; }")
        })]
    }
}

/// Deletes the flagged document and re-creates it, renamed, under a new
/// path. Document count stays the same.
pub struct SwapDocumentProvider;

impl FixProvider for SwapDocumentProvider {
    fn fixes(&self, _workspace: &Workspace, finding: &ActualFinding) -> Vec<FixAction> {
        let path = finding.path.clone();
        let name = quoted_name(&finding.message);
        vec![FixAction::new("Move to renamed file", move |workspace: &Workspace| {
            let Some(document) = workspace.document(&path) else {
                return workspace.clone();
            };
            let text = document.text.replace(&name, name.trim_start_matches('_'));
            workspace
                .without_document(&path)
                .with_added_document(Document::new("Renamed.java", text))
        })]
    }
}

/// Strips the underscore and also adds a second document.
pub struct AddDocumentProvider;

impl FixProvider for AddDocumentProvider {
    fn fixes(&self, workspace: &Workspace, finding: &ActualFinding) -> Vec<FixAction> {
        let rename = RenameProvider.fixes(workspace, finding).remove(0);
        vec![FixAction::new("Rename and extract helper", move |workspace: &Workspace| {
            rename
                .apply(workspace)
                .with_added_document(Document::new("Helper.java", "class Helper {}\n"))
        })]
    }
}
