//! Immutable workspace snapshots.

/// Path used by the single-document convenience constructors.
pub const DEFAULT_PATH: &str = "Main.java";

/// Project name used by the convenience constructors.
pub const DEFAULT_PROJECT: &str = "TestProject";

/// One source document in a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub path: String,
    pub text: String,
}

impl Document {
    pub fn new(path: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
        }
    }
}

/// A named project: an ordered set of documents plus project references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub name: String,
    pub documents: Vec<Document>,
    /// Names of other projects (or configured default references) this
    /// project depends on.
    pub references: Vec<String>,
}

impl Project {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            documents: Vec::new(),
            references: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_document(mut self, path: impl Into<String>, text: impl Into<String>) -> Self {
        self.documents.push(Document::new(path, text));
        self
    }

    #[must_use]
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.references.push(reference.into());
        self
    }
}

/// An ordered collection of projects and their documents.
///
/// Snapshots are immutable values: a fix produces a fresh snapshot, never an
/// in-place mutation. Documents may legitimately be added or removed between
/// snapshots; detecting that is the differ's job, not an error here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Workspace {
    pub projects: Vec<Project>,
}

impl Workspace {
    /// A single-project, single-document workspace.
    pub fn single(text: impl Into<String>) -> Self {
        Self::from_documents(vec![Document::new(DEFAULT_PATH, text)])
    }

    /// A single-project workspace from an ordered document list.
    pub fn from_documents(documents: Vec<Document>) -> Self {
        Self {
            projects: vec![Project {
                name: DEFAULT_PROJECT.to_string(),
                documents,
                references: Vec::new(),
            }],
        }
    }

    /// All documents across all projects, in workspace order.
    pub fn documents(&self) -> impl Iterator<Item = &Document> {
        self.projects.iter().flat_map(|project| project.documents.iter())
    }

    pub fn document(&self, path: &str) -> Option<&Document> {
        self.documents().find(|document| document.path == path)
    }

    pub fn document_count(&self) -> usize {
        self.projects.iter().map(|project| project.documents.len()).sum()
    }

    /// A new snapshot with the text of `path` replaced.
    #[must_use]
    pub fn with_document_text(&self, path: &str, text: impl Into<String>) -> Self {
        let text = text.into();
        let mut next = self.clone();
        for project in &mut next.projects {
            for document in &mut project.documents {
                if document.path == path {
                    document.text = text;
                    return next;
                }
            }
        }
        next
    }

    /// A new snapshot with `document` appended to the first project.
    #[must_use]
    pub fn with_added_document(&self, document: Document) -> Self {
        let mut next = self.clone();
        if let Some(project) = next.projects.first_mut() {
            project.documents.push(document);
        }
        next
    }

    /// A new snapshot without the document at `path`.
    #[must_use]
    pub fn without_document(&self, path: &str) -> Self {
        let mut next = self.clone();
        for project in &mut next.projects {
            project.documents.retain(|document| document.path != path);
        }
        next
    }
}
