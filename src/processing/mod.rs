//! The batch query pipeline: corpus → fit → score → rank → resolve.

use crate::domain::organization::OrganizationTable;
use crate::domain::project::ProjectTable;
use crate::domain::report::ReportRow;
use crate::errors::MatchResult;
use crate::matching::SimilarityIndex;
use crate::matching::corpus::Corpus;
use crate::matching::ranker::rank_top_k;
use crate::matching::resolver::coordinators_for;
use crate::matching::tfidf::TfIdfIndex;

/// Runs one query end to end: builds the corpus, fits a TF-IDF index over it
/// and delegates to [`search_index`].
pub fn run_query(
    projects: &ProjectTable,
    organizations: &OrganizationTable,
    query: &str,
    top_k: usize,
) -> MatchResult<Vec<ReportRow>> {
    let corpus = Corpus::build(projects);
    log::info!("Fitting similarity index over {} documents", corpus.len());
    let index = TfIdfIndex::fit(&corpus)?;
    search_index(&index, &corpus, projects, organizations, query, top_k)
}

/// Scores `query` against an already-fitted index, ranks the results and
/// joins in each project's coordinators.
///
/// Every ranked project produces at least one row: projects without a
/// coordinator record are reported with the unknown marker, never dropped.
pub fn search_index(
    index: &dyn SimilarityIndex,
    corpus: &Corpus,
    projects: &ProjectTable,
    organizations: &OrganizationTable,
    query: &str,
    top_k: usize,
) -> MatchResult<Vec<ReportRow>> {
    let scores = index.score(query);
    let ranked = rank_top_k(corpus.ids(), &scores, top_k)?;
    log::info!("Ranked top {} of {} projects", ranked.len(), corpus.len());

    let mut rows = Vec::with_capacity(ranked.len());
    for entry in &ranked {
        // Corpus identifiers come straight from the project table, so a miss
        // here means the inputs were mixed up between runs.
        let Some(project) = projects.get(&entry.project_id) else {
            log::warn!("Ranked project {} is missing from the table", entry.project_id);
            continue;
        };
        let coordinators = coordinators_for(organizations, &entry.project_id);
        if coordinators.is_empty() {
            log::warn!("No coordinator found for project {}", entry.project_id);
            rows.push(ReportRow::new(entry.rank, entry.score, project, None));
        } else {
            for coordinator in coordinators {
                rows.push(ReportRow::new(
                    entry.rank,
                    entry.score,
                    project,
                    Some(coordinator),
                ));
            }
        }
    }
    Ok(rows)
}
