use std::collections::HashMap;

/// One funded project from the CORDIS projects table. Immutable once loaded.
///
/// Only `title`, `objective` and `topics` feed the similarity corpus; the
/// remaining fields are carried through for reporting.
#[derive(Debug, Clone)]
pub struct Project {
    pub id: String,
    pub acronym: String,
    pub title: String,
    pub objective: String,
    pub topics: String,
    pub start_date: String,
    pub end_date: String,
}

/// Projects in source row order with a lookup index by project identifier.
#[derive(Debug, Default)]
pub struct ProjectTable {
    rows: Vec<Project>,
    by_id: HashMap<String, usize>,
}

impl ProjectTable {
    pub fn new(rows: Vec<Project>) -> Self {
        let by_id = rows
            .iter()
            .enumerate()
            .map(|(idx, project)| (project.id.clone(), idx))
            .collect();
        Self { rows, by_id }
    }

    pub fn get(&self, id: &str) -> Option<&Project> {
        self.by_id.get(id).map(|idx| &self.rows[*idx])
    }

    /// Rows in their original source order. The corpus builder relies on this
    /// order to keep score vectors aligned with projects.
    pub fn rows(&self) -> &[Project] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(id: &str) -> Project {
        Project {
            id: id.to_string(),
            acronym: String::new(),
            title: format!("Project {id}"),
            objective: String::new(),
            topics: String::new(),
            start_date: String::new(),
            end_date: String::new(),
        }
    }

    #[test]
    fn lookup_by_identifier() {
        let table = ProjectTable::new(vec![project("1"), project("2")]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("2").unwrap().title, "Project 2");
        assert!(table.get("3").is_none());
    }
}
