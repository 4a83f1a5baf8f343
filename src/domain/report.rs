use serde::Serialize;

use crate::domain::organization::Organization;
use crate::domain::project::Project;

/// Placeholder rendered when a ranked project has no coordinator record.
pub const UNKNOWN_COORDINATOR: &str = "unknown";

/// One printed/exported result row.
///
/// A project with several coordinators produces one row per coordinator; a
/// project with none still produces a single row with the unknown marker, so
/// the report never drops a ranked project.
#[derive(Debug, Clone, Serialize)]
pub struct ReportRow {
    pub rank: usize,
    pub score: f32,
    pub project_id: String,
    pub acronym: String,
    pub title: String,
    pub start_date: String,
    pub end_date: String,
    pub topics: String,
    pub coordinator_name: String,
    pub coordinator_country: String,
    pub coordinator_city: String,
}

impl ReportRow {
    pub fn new(rank: usize, score: f32, project: &Project, coordinator: Option<&Organization>) -> Self {
        Self {
            rank,
            // Scores are reported to four decimal places.
            score: (score * 10_000.0).round() / 10_000.0,
            project_id: project.id.clone(),
            acronym: project.acronym.clone(),
            title: project.title.clone(),
            start_date: project.start_date.clone(),
            end_date: project.end_date.clone(),
            topics: project.topics.clone(),
            coordinator_name: coordinator
                .map(|org| org.name.clone())
                .unwrap_or_else(|| UNKNOWN_COORDINATOR.to_string()),
            coordinator_country: coordinator.map(|org| org.country.clone()).unwrap_or_default(),
            coordinator_city: coordinator.map(|org| org.city.clone()).unwrap_or_default(),
        }
    }

    pub fn has_coordinator(&self) -> bool {
        self.coordinator_name != UNKNOWN_COORDINATOR
    }
}
