//! Reference workspace builder backed by the tree-sitter Java grammar.
//!
//! Stands in for a real compiler: `compile_findings` parses every document
//! and reports the syntax errors the grammar could not recover from. That
//! is enough for the engine's contract, which only needs to know whether a
//! fix introduced new compiler errors.

use std::collections::HashSet;

use fixcheck_diagnostics::{ActualFinding, Severity};
use fixcheck_source::LineIndex;
use tree_sitter::Node;

use crate::{BuildError, Document, HarnessConfig, Project, Workspace, WorkspaceBuilder};

/// Finding id used for syntax errors.
pub const SYNTAX_FINDING_ID: &str = "syntax-error";

/// Return the tree-sitter Java language.
fn java_language() -> tree_sitter::Language {
    tree_sitter_java_orchard::LANGUAGE.into()
}

/// Workspace builder that parses documents as Java.
#[derive(Debug, Default)]
pub struct JavaWorkspaceBuilder {
    config: HarnessConfig,
}

impl JavaWorkspaceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: HarnessConfig) -> Self {
        Self { config }
    }

    fn document_findings(&self, document: &Document) -> Vec<ActualFinding> {
        let mut parser = tree_sitter::Parser::new();
        if parser.set_language(&java_language()).is_err() {
            return Vec::new();
        }

        let Some(tree) = parser.parse(&document.text, None) else {
            return Vec::new();
        };

        let index = LineIndex::from_source_text(&document.text);
        let mut findings = Vec::new();
        collect_error_nodes(tree.root_node(), &mut |node| {
            findings.push(
                ActualFinding::new(
                    SYNTAX_FINDING_ID,
                    syntax_message(&node, &document.text),
                    &document.path,
                    index.line_column(node.start_byte(), &document.text),
                )
                .with_severity(Severity::Error),
            );
        });

        findings
            .into_iter()
            .filter(|finding| !self.config.is_suppressed(&finding.rule_id))
            .collect()
    }
}

fn syntax_message(node: &Node, source: &str) -> String {
    if node.is_missing() {
        return format!("missing {}", node.kind());
    }
    let text = node.utf8_text(source.as_bytes()).unwrap_or("");
    let mut head: String = text.chars().take(20).collect();
    if head.len() < text.len() {
        head.push('…');
    }
    if head.is_empty() {
        "syntax error".to_string()
    } else {
        format!("syntax error near '{head}'")
    }
}

/// Visit every unrecovered error node, pre-order. Children of an error node
/// are not visited; one finding per error region is enough.
fn collect_error_nodes(node: Node, visit: &mut impl FnMut(Node)) {
    if node.is_error() || node.is_missing() {
        visit(node);
        return;
    }
    if !node.has_error() {
        return;
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_error_nodes(child, visit);
    }
}

impl WorkspaceBuilder for JavaWorkspaceBuilder {
    fn build(&self, projects: Vec<Project>) -> Result<Workspace, BuildError> {
        let known: HashSet<&str> = projects.iter().map(|project| project.name.as_str()).collect();

        for project in &projects {
            let mut seen = HashSet::new();
            for document in &project.documents {
                if !seen.insert(document.path.as_str()) {
                    return Err(BuildError::DuplicatePath {
                        project: project.name.clone(),
                        path: document.path.clone(),
                    });
                }
            }
            for reference in &project.references {
                if !known.contains(reference.as_str()) && !self.config.is_default_reference(reference)
                {
                    return Err(BuildError::UnknownReference {
                        project: project.name.clone(),
                        reference: reference.clone(),
                    });
                }
            }
        }

        Ok(Workspace { projects })
    }

    fn compile_findings(&self, workspace: &Workspace) -> Vec<ActualFinding> {
        workspace
            .documents()
            .flat_map(|document| self.document_findings(document))
            .collect()
    }
}
