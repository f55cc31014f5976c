//! The workspace-builder collaborator seam.

use fixcheck_diagnostics::ActualFinding;
use thiserror::Error;

use crate::{Project, Workspace};

/// Error constructing a workspace. These are collaborator failures, not
/// assertion failures; the engine propagates them unchanged.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("failed to read {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse project descriptor {path}: {message}")]
    Descriptor { path: String, message: String },

    #[error("duplicate document path '{path}' in project '{project}'")]
    DuplicatePath { project: String, path: String },

    #[error("project '{project}' references unknown project '{reference}'")]
    UnknownReference { project: String, reference: String },
}

/// Builds compiled workspace snapshots and reports compiler-level findings.
///
/// Process-wide configuration (default references, suppressed compiler
/// findings) is read once at builder construction; the engine treats the
/// builder as an opaque collaborator and never mutates it.
pub trait WorkspaceBuilder {
    /// Validate and seal a workspace from its projects.
    ///
    /// Implementations must reject duplicate document paths within a
    /// project and references to unknown projects.
    fn build(&self, projects: Vec<Project>) -> Result<Workspace, BuildError>;

    /// Compiler findings for a snapshot.
    ///
    /// Re-run after every fix application to detect errors the fix
    /// introduced.
    fn compile_findings(&self, workspace: &Workspace) -> Vec<ActualFinding>;
}
