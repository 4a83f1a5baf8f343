pub mod catalogue;
pub mod datasets;
pub mod domain;
pub mod errors;
pub mod matching;
pub mod models;
pub mod processing;
pub mod report;

/// Default number of top-ranked projects reported per query.
pub const DEFAULT_TOP_K: usize = 10;
