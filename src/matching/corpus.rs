//! Builds the per-project text documents the similarity index is fitted on.

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::project::{Project, ProjectTable};

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// The corpus: one document per project, in project table row order.
///
/// The order is fixed once built. Score vectors index into it, so projects
/// with entirely empty text fields still contribute an empty document rather
/// than being dropped.
#[derive(Debug, Default)]
pub struct Corpus {
    ids: Vec<String>,
    documents: Vec<String>,
}

impl Corpus {
    pub fn build(projects: &ProjectTable) -> Self {
        let mut ids = Vec::with_capacity(projects.len());
        let mut documents = Vec::with_capacity(projects.len());
        for project in projects.rows() {
            ids.push(project.id.clone());
            documents.push(project_document(project));
        }
        Self { ids, documents }
    }

    /// Project identifiers aligned with [`Corpus::documents`].
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn documents(&self) -> &[String] {
        &self.documents
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

/// Concatenates title, objective and topics with runs of whitespace collapsed.
fn project_document(project: &Project) -> String {
    let combined = format!("{} {} {}", project.title, project.objective, project.topics);
    WHITESPACE.replace_all(combined.trim(), " ").to_string()
}
