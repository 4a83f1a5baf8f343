pub mod corpus;
pub mod ranker;
pub mod resolver;
pub mod tfidf;

/// An abstraction over fitted similarity models that score a query against
/// every corpus document.
///
/// Keeping the scoring seam behind a trait lets an alternative weighting
/// scheme replace [`tfidf::TfIdfIndex`] without touching the ranker or the
/// coordinator resolver.
pub trait SimilarityIndex {
    /// Scores `query` against each corpus document.
    ///
    /// Returns one value per document, aligned with corpus order, each in
    /// [0, 1]. A query sharing no vocabulary with the corpus yields all
    /// zeros, not an error.
    fn score(&self, query: &str) -> Vec<f32>;
}
