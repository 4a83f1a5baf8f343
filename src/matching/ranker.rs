//! Deterministic top-K selection over scored projects.

use std::cmp::Ordering;

use crate::errors::{MatchError, MatchResult};

/// A project's position in the final ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedProject {
    pub project_id: String,
    pub score: f32,
    /// 1-based rank, assigned after sorting.
    pub rank: usize,
}

/// Selects the top `k` projects by descending score.
///
/// Ties are broken by ascending project identifier (compared as an opaque
/// string), so identical inputs always produce identical output order. If
/// `k` exceeds the number of scored projects, all of them are returned.
/// The parallel inputs are left untouched.
pub fn rank_top_k(ids: &[String], scores: &[f32], k: usize) -> MatchResult<Vec<RankedProject>> {
    if k == 0 {
        return Err(MatchError::InvalidParameter(
            "top-K must be a positive integer".to_string(),
        ));
    }

    let mut ranked: Vec<(&str, f32)> = ids
        .iter()
        .map(String::as_str)
        .zip(scores.iter().copied())
        .collect();
    ranked.sort_unstable_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.0.cmp(b.0))
    });
    ranked.truncate(k);

    Ok(ranked
        .into_iter()
        .enumerate()
        .map(|(idx, (project_id, score))| RankedProject {
            project_id: project_id.to_string(),
            score,
            rank: idx + 1,
        })
        .collect())
}
