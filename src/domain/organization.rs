use std::collections::HashMap;

/// One participation record from the CORDIS organizations table.
///
/// `role` distinguishes coordinators from ordinary participants; the address
/// fields are passthrough and never influence matching.
#[derive(Debug, Clone)]
pub struct Organization {
    pub project_id: String,
    pub name: String,
    pub role: String,
    pub country: String,
    pub city: String,
    pub short_name: String,
}

/// Organizations grouped by the project they participate in.
#[derive(Debug, Default)]
pub struct OrganizationTable {
    rows: Vec<Organization>,
    by_project: HashMap<String, Vec<usize>>,
}

impl OrganizationTable {
    pub fn new(rows: Vec<Organization>) -> Self {
        let mut by_project: HashMap<String, Vec<usize>> = HashMap::new();
        for (idx, org) in rows.iter().enumerate() {
            by_project
                .entry(org.project_id.clone())
                .or_default()
                .push(idx);
        }
        Self { rows, by_project }
    }

    /// All participation records for `project_id`, in source row order.
    pub fn for_project(&self, project_id: &str) -> Vec<&Organization> {
        self.by_project
            .get(project_id)
            .map(|indices| indices.iter().map(|idx| &self.rows[*idx]).collect())
            .unwrap_or_default()
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

    fn org(project_id: &str, name: &str, role: &str) -> Organization {
        Organization {
            project_id: project_id.to_string(),
            name: name.to_string(),
            role: role.to_string(),
            country: String::new(),
            city: String::new(),
            short_name: String::new(),
        }
    }

    #[test]
    fn groups_rows_by_project() {
        let table = OrganizationTable::new(vec![
            org("1", "Uni A", "coordinator"),
            org("2", "Uni B", "participant"),
            org("1", "Uni C", "participant"),
        ]);
        let members = table.for_project("1");
        assert_eq!(members.len(), 2);
        assert_eq!(members[0].name, "Uni A");
        assert!(table.for_project("3").is_empty());
    }
}
