//! Looks up the coordinating organization(s) for a ranked project.

use crate::domain::organization::{Organization, OrganizationTable};

/// Role value marking the lead organization of a project.
pub const COORDINATOR_ROLE: &str = "coordinator";

/// Returns every organization coordinating `project_id`, in source row order.
///
/// An empty result means "coordinator unknown"; the caller renders the marker
/// instead of dropping the project from the report.
pub fn coordinators_for<'a>(
    organizations: &'a OrganizationTable,
    project_id: &str,
) -> Vec<&'a Organization> {
    organizations
        .for_project(project_id)
        .into_iter()
        .filter(|org| org.role.eq_ignore_ascii_case(COORDINATOR_ROLE))
        .collect()
}
