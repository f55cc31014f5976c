//! Workspace snapshots and the collaborator seams of the verifier.
//!
//! The engine never builds or compiles anything itself: it consumes a
//! [`WorkspaceBuilder`], a [`Rule`] and a [`FixProvider`] through the traits
//! defined here. [`JavaWorkspaceBuilder`] is the reference builder, backed
//! by the tree-sitter Java grammar standing in for a real compiler.

pub use builder::{BuildError, WorkspaceBuilder};
pub use config::{HarnessConfig, HarnessConfigError};
pub use descriptor::ProjectDescriptor;
pub use document::{DEFAULT_PATH, DEFAULT_PROJECT, Document, Project, Workspace};
pub use java::{JavaWorkspaceBuilder, SYNTAX_FINDING_ID};
pub use rule::{FixAction, FixProvider, Rule};

mod builder;
mod config;
mod descriptor;
mod document;
mod java;
mod rule;
