//! Error taxonomy shared across the pipeline.

use thiserror::Error;

/// Fatal errors that abort a run before any results are emitted.
///
/// Missing coordinators are not represented here: the resolver reports them
/// inline as an empty collection and the run continues.
#[derive(Debug, Error)]
pub enum MatchError {
    /// A dataset could not be fetched or parsed. The message names the
    /// failing source so the operator can tell the two tables apart.
    #[error("dataset '{dataset}' unavailable: {reason}")]
    DataUnavailable { dataset: String, reason: String },

    /// The similarity index was asked to fit zero documents.
    #[error("cannot fit a similarity index over an empty corpus")]
    EmptyCorpus,

    /// A caller-supplied parameter is unusable (empty query, non-positive top-K).
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Writing the exported results failed.
    #[error("failed to write results to '{path}': {reason}")]
    Export { path: String, reason: String },

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl MatchError {
    /// Wraps an arbitrary failure as an unavailable-dataset error for `source`.
    pub fn unavailable(source: impl Into<String>, reason: impl ToString) -> Self {
        Self::DataUnavailable {
            dataset: source.into(),
            reason: reason.to_string(),
        }
    }
}

/// Convenience alias used by every fallible function in the crate.
pub type MatchResult<T> = Result<T, MatchError>;
