//! Parser for on-disk project descriptors.
//!
//! A descriptor is a small XML file naming a project's sources and
//! references, for tests that verify a rule over a folder of files instead
//! of inline snippets:
//!
//! ```xml
//! <Project name="app">
//!     <Reference name="lib"/>
//!     <Source include="src"/>
//!     <Source include="Extra.java"/>
//! </Project>
//! ```
//!
//! `Source` entries may name files or folders; folders are walked for
//! `.java` files in sorted order so workspaces build deterministically.

use std::path::Path;

use serde::Deserialize;
use walkdir::WalkDir;

use crate::{BuildError, Document, Project};

#[derive(Debug, Deserialize)]
struct RawReference {
    #[serde(rename = "@name")]
    name: String,
}

#[derive(Debug, Deserialize)]
struct RawSource {
    #[serde(rename = "@include")]
    include: String,
}

#[derive(Debug, Deserialize)]
struct RawProject {
    #[serde(rename = "@name")]
    name: String,
    #[serde(rename = "Reference", default)]
    references: Vec<RawReference>,
    #[serde(rename = "Source", default)]
    sources: Vec<RawSource>,
}

/// A parsed project descriptor, not yet loaded from disk.
#[derive(Debug, Clone)]
pub struct ProjectDescriptor {
    pub name: String,
    pub references: Vec<String>,
    pub sources: Vec<String>,
}

impl ProjectDescriptor {
    /// Parse a descriptor file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, BuildError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| BuildError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&content).map_err(|message| BuildError::Descriptor {
            path: path.display().to_string(),
            message,
        })
    }

    /// Parse descriptor content.
    pub fn parse(content: &str) -> Result<Self, String> {
        let raw: RawProject = quick_xml::de::from_str(content).map_err(|e| e.to_string())?;
        Ok(Self {
            name: raw.name,
            references: raw.references.into_iter().map(|r| r.name).collect(),
            sources: raw.sources.into_iter().map(|s| s.include).collect(),
        })
    }

    /// Load every listed source relative to `base`, producing a project.
    pub fn load(&self, base: &Path) -> Result<Project, BuildError> {
        let mut documents = Vec::new();

        for include in &self.sources {
            let full = base.join(include);
            if full.is_dir() {
                let mut files: Vec<_> = WalkDir::new(&full)
                    .into_iter()
                    .filter_map(Result::ok)
                    .filter(|entry| entry.path().extension().is_some_and(|ext| ext == "java"))
                    .map(|entry| entry.path().to_path_buf())
                    .collect();
                files.sort();
                for file in files {
                    documents.push(read_document(base, &file)?);
                }
            } else {
                documents.push(read_document(base, &full)?);
            }
        }

        Ok(Project {
            name: self.name.clone(),
            documents,
            references: self.references.clone(),
        })
    }
}

fn read_document(base: &Path, file: &Path) -> Result<Document, BuildError> {
    let text = std::fs::read_to_string(file).map_err(|source| BuildError::Io {
        path: file.display().to_string(),
        source,
    })?;
    let relative = file.strip_prefix(base).unwrap_or(file);
    Ok(Document::new(relative.display().to_string(), text))
}
