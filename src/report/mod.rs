//! Console rendering and CSV export of the final report.

use std::path::Path;

use crate::domain::report::ReportRow;
use crate::errors::{MatchError, MatchResult};

/// Prints the report to stdout, one block per ranked project.
///
/// Rows sharing a rank belong to the same project (one per coordinator), so
/// the project header is printed once per rank.
pub fn print_results(rows: &[ReportRow], query: &str) {
    println!();
    println!("Top matching projects for query: \"{query}\"");
    println!("{}", "=".repeat(72));

    let mut last_rank = 0;
    for row in rows {
        if row.rank != last_rank {
            last_rank = row.rank;
            println!();
            println!("[{}] score {:.4} | {}", row.rank, row.score, row.title);
            let acronym = if row.acronym.is_empty() {
                "-"
            } else {
                row.acronym.as_str()
            };
            println!("    id {} | acronym {acronym}", row.project_id);
            if !row.start_date.is_empty() || !row.end_date.is_empty() {
                println!("    duration {} to {}", row.start_date, row.end_date);
            }
            if !row.topics.is_empty() {
                println!("    topics {}", row.topics);
            }
        }
        if row.has_coordinator() {
            let mut location = row.coordinator_country.clone();
            if !row.coordinator_city.is_empty() {
                if !location.is_empty() {
                    location.push_str(", ");
                }
                location.push_str(&row.coordinator_city);
            }
            if location.is_empty() {
                println!("    coordinator: {}", row.coordinator_name);
            } else {
                println!("    coordinator: {} ({location})", row.coordinator_name);
            }
        } else {
            println!("    coordinator: unknown");
        }
    }
    println!();
}

/// Writes the rows as a delimited table, one row per project–coordinator
/// pair, headers taken from the row field names.
pub fn export_csv(rows: &[ReportRow], path: &Path) -> MatchResult<()> {
    let display = path.display().to_string();
    let mut writer = csv::Writer::from_path(path).map_err(|err| MatchError::Export {
        path: display.clone(),
        reason: err.to_string(),
    })?;
    for row in rows {
        writer.serialize(row).map_err(|err| MatchError::Export {
            path: display.clone(),
            reason: err.to_string(),
        })?;
    }
    writer.flush().map_err(|err| MatchError::Export {
        path: display,
        reason: err.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::organization::Organization;
    use crate::domain::project::Project;

    fn sample_rows() -> Vec<ReportRow> {
        let project = Project {
            id: "101".to_string(),
            acronym: "AIDX".to_string(),
            title: "AI diagnosis".to_string(),
            objective: String::new(),
            topics: String::new(),
            start_date: "2023-01-01".to_string(),
            end_date: "2026-12-31".to_string(),
        };
        let coordinator = Organization {
            project_id: "101".to_string(),
            name: "Uni Hospital".to_string(),
            role: "coordinator".to_string(),
            country: "DE".to_string(),
            city: "Heidelberg".to_string(),
            short_name: "UH".to_string(),
        };
        vec![
            ReportRow::new(1, 0.8123, &project, Some(&coordinator)),
            ReportRow::new(2, 0.1, &project, None),
        ]
    }

    #[test]
    fn export_writes_header_and_one_line_per_row() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.csv");
        export_csv(&sample_rows(), &path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("rank,score,project_id"));
        assert!(lines[1].contains("Uni Hospital"));
        assert!(lines[2].contains("unknown"));
    }

    #[test]
    fn export_to_unwritable_path_reports_the_path() {
        let rows = sample_rows();
        let err = export_csv(&rows, Path::new("/nonexistent-dir/results.csv")).unwrap_err();
        match err {
            MatchError::Export { path, .. } => assert!(path.contains("results.csv")),
            other => panic!("expected Export error, got {other:?}"),
        }
    }
}
