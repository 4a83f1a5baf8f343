//! End-to-end runs over a local dataset directory: load, query, export.

mod common;

use common::TestDataset;

use cordis_match::datasets::archive::DatasetCache;
use cordis_match::datasets::direct::DirectCsvSource;
use cordis_match::datasets::{self, TableLocation};
use cordis_match::errors::MatchError;
use cordis_match::processing;
use cordis_match::report;

const PROJECTS_CSV: &str = "\
id;acronym;title;objective;topics;startDate;endDate
101;AIDX;AI for cancer diagnosis;Deep learning models for early tumor detection in medical imaging;HORIZON-HLTH;2023-01-01;2026-12-31
102;QBIT;Quantum computing hardware;Scalable superconducting qubit platforms;HORIZON-CL4;2022-06-01;2025-05-31
103;AGRI;Precision agriculture sensors;Low power soil moisture sensing networks;HORIZON-CL6;2023-03-01;2027-02-28
";

const ORGANIZATIONS_CSV: &str = "\
projectID;name;role;country;city;shortName
101;University Hospital Heidelberg;coordinator;DE;Heidelberg;UHH
101;Imaging Partner SAS;participant;FR;Lyon;IPS
102;Quantum Foundry BV;participant;NL;Delft;QF
103;AgroSense OY;coordinator;FI;Helsinki;AS
103;FieldData GmbH;coordinator;DE;Munich;FD
";

async fn load_fixture(
    dataset: &TestDataset,
) -> (
    cordis_match::domain::project::ProjectTable,
    cordis_match::domain::organization::OrganizationTable,
) {
    let source = DirectCsvSource::new(
        TableLocation::Local(dataset.projects_path()),
        TableLocation::Local(dataset.organizations_path()),
        DatasetCache::new(dataset.scratch_path("cache"), 30),
    );
    datasets::load(&source, b';').await.unwrap()
}

#[tokio::test]
async fn load_parses_both_tables_from_local_paths() {
    let dataset = TestDataset::new(PROJECTS_CSV, ORGANIZATIONS_CSV);
    let source = DirectCsvSource::new(
        TableLocation::Local(dataset.projects_path()),
        TableLocation::Local(dataset.organizations_path()),
        DatasetCache::new(dataset.scratch_path("cache"), 30),
    );
    let (projects, organizations) = datasets::load(&source, b';').await.unwrap();
    assert_eq!(projects.len(), 3);
    assert_eq!(organizations.len(), 5);
    assert_eq!(projects.get("101").unwrap().acronym, "AIDX");
}

#[tokio::test]
async fn query_ranks_relevant_project_with_its_coordinator() {
    let dataset = TestDataset::new(PROJECTS_CSV, ORGANIZATIONS_CSV);
    let (projects, organizations) = load_fixture(&dataset).await;

    let rows = processing::run_query(
        &projects,
        &organizations,
        "AI models for cancer diagnosis",
        1,
    )
    .unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].project_id, "101");
    assert!(rows[0].score > 0.0);
    assert_eq!(rows[0].coordinator_name, "University Hospital Heidelberg");
    assert_eq!(rows[0].coordinator_country, "DE");
}

#[tokio::test]
async fn missing_coordinator_and_multi_coordinator_projects_are_all_reported() {
    let dataset = TestDataset::new(PROJECTS_CSV, ORGANIZATIONS_CSV);
    let (projects, organizations) = load_fixture(&dataset).await;

    let rows = processing::run_query(&projects, &organizations, "qubit soil sensing", 3).unwrap();

    // 3 ranked projects: one with a single coordinator, one with none
    // (reported as unknown), one with two coordinators (two rows).
    let ranks: Vec<usize> = rows.iter().map(|row| row.rank).collect();
    assert_eq!(rows.len(), 4);
    assert_eq!(ranks.iter().collect::<std::collections::HashSet<_>>().len(), 3);
    assert!(rows.iter().any(|row| !row.has_coordinator()));
    assert_eq!(
        rows.iter().filter(|row| row.project_id == "103").count(),
        2
    );
}

#[tokio::test]
async fn exported_csv_has_one_line_per_coordinator_pair() {
    let dataset = TestDataset::new(PROJECTS_CSV, ORGANIZATIONS_CSV);
    let (projects, organizations) = load_fixture(&dataset).await;

    let rows = processing::run_query(&projects, &organizations, "sensors agriculture", 2).unwrap();
    let output = dataset.scratch_path("results.csv");
    report::export_csv(&rows, &output).unwrap();

    let contents = std::fs::read_to_string(&output).unwrap();
    assert_eq!(contents.lines().count(), rows.len() + 1);
    assert!(contents.lines().next().unwrap().starts_with("rank,score"));
}

#[tokio::test]
async fn missing_required_column_aborts_the_load() {
    let dataset = TestDataset::new(
        "id;title\n101;AI for cancer diagnosis\n",
        ORGANIZATIONS_CSV,
    );
    let source = DirectCsvSource::new(
        TableLocation::Local(dataset.projects_path()),
        TableLocation::Local(dataset.organizations_path()),
        DatasetCache::new(dataset.scratch_path("cache"), 30),
    );
    let err = datasets::load(&source, b';').await.unwrap_err();
    assert!(matches!(err, MatchError::DataUnavailable { .. }));
}
