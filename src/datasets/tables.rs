//! CSV parsing into domain records with required-column validation.
//!
//! Header columns are resolved by name up front so a table missing a
//! required column fails fast, before any scoring work. Rows whose field
//! count does not match the header are skipped with a warning, matching the
//! tolerant behavior of the upstream CORDIS dumps, which occasionally carry
//! malformed lines.

use std::path::Path;

use csv::{ReaderBuilder, StringRecord};

use crate::domain::organization::{Organization, OrganizationTable};
use crate::domain::project::{Project, ProjectTable};
use crate::errors::{MatchError, MatchResult};

fn column(headers: &StringRecord, names: &[&str]) -> Option<usize> {
    names
        .iter()
        .find_map(|name| headers.iter().position(|header| header == *name))
}

fn required_column(headers: &StringRecord, names: &[&str], source: &str) -> MatchResult<usize> {
    column(headers, names).ok_or_else(|| {
        MatchError::unavailable(source, format!("missing required column '{}'", names[0]))
    })
}

fn field(record: &StringRecord, index: Option<usize>) -> String {
    index
        .and_then(|idx| record.get(idx))
        .unwrap_or_default()
        .trim()
        .to_string()
}

struct TableReader {
    reader: csv::Reader<std::fs::File>,
    headers: StringRecord,
    source: String,
}

impl TableReader {
    fn open(path: &Path, delimiter: u8) -> MatchResult<Self> {
        let source = path.display().to_string();
        let mut reader = ReaderBuilder::new()
            .delimiter(delimiter)
            .flexible(true)
            .from_path(path)
            .map_err(|err| MatchError::unavailable(&source, err))?;
        let headers = reader
            .headers()
            .map_err(|err| MatchError::unavailable(&source, err))?
            .clone();
        Ok(Self {
            reader,
            headers,
            source,
        })
    }

    /// Yields well-formed rows, logging and counting the rest.
    fn rows(&mut self, mut on_row: impl FnMut(&StringRecord)) {
        let mut skipped = 0usize;
        for (row, result) in self.reader.records().enumerate() {
            let record = match result {
                Ok(record) => record,
                Err(err) => {
                    log::warn!("{}: skipping unreadable row {}: {err}", self.source, row + 2);
                    skipped += 1;
                    continue;
                }
            };
            if record.len() != self.headers.len() {
                skipped += 1;
                continue;
            }
            on_row(&record);
        }
        if skipped > 0 {
            log::warn!("{}: skipped {skipped} malformed rows", self.source);
        }
    }
}

/// Parses the projects table. Requires the project identifier (`id` or
/// `projectID`), `title` and `objective` columns.
pub fn load_projects(path: &Path, delimiter: u8) -> MatchResult<ProjectTable> {
    let mut table = TableReader::open(path, delimiter)?;

    let id = required_column(&table.headers, &["id", "projectID"], &table.source)?;
    let title = required_column(&table.headers, &["title"], &table.source)?;
    let objective = required_column(&table.headers, &["objective"], &table.source)?;
    let acronym = column(&table.headers, &["acronym"]);
    let topics = column(&table.headers, &["topics"]);
    let start_date = column(&table.headers, &["startDate"]);
    let end_date = column(&table.headers, &["endDate"]);

    let mut rows = Vec::new();
    table.rows(|record| {
        let project_id = field(record, Some(id));
        if project_id.is_empty() {
            return;
        }
        rows.push(Project {
            id: project_id,
            acronym: field(record, acronym),
            title: field(record, Some(title)),
            objective: field(record, Some(objective)),
            topics: field(record, topics),
            start_date: field(record, start_date),
            end_date: field(record, end_date),
        });
    });

    Ok(ProjectTable::new(rows))
}

/// Parses the organizations table. Requires the `projectID` join key plus
/// `name` and `role` columns.
pub fn load_organizations(path: &Path, delimiter: u8) -> MatchResult<OrganizationTable> {
    let mut table = TableReader::open(path, delimiter)?;

    let project_id = required_column(&table.headers, &["projectID"], &table.source)?;
    let name = required_column(&table.headers, &["name"], &table.source)?;
    let role = required_column(&table.headers, &["role"], &table.source)?;
    let country = column(&table.headers, &["country"]);
    let city = column(&table.headers, &["city"]);
    let short_name = column(&table.headers, &["shortName"]);

    let mut rows = Vec::new();
    table.rows(|record| {
        let key = field(record, Some(project_id));
        if key.is_empty() {
            return;
        }
        rows.push(Organization {
            project_id: key,
            name: field(record, Some(name)),
            role: field(record, Some(role)),
            country: field(record, country),
            city: field(record, city),
            short_name: field(record, short_name),
        });
    });

    Ok(OrganizationTable::new(rows))
}
