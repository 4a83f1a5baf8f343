//! TF-IDF term weighting with cosine scoring.
//!
//! Terms are lowercased, split on non-alphanumeric characters and filtered
//! against a fixed English stop-word list; single-character tokens are
//! discarded. IDF uses the smoothed form `ln((1 + N) / (1 + df)) + 1` with
//! raw term counts as TF and L2-normalized document vectors, so a query is
//! scored by plain dot products against the fitted weights.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use crate::errors::{MatchError, MatchResult};
use crate::matching::SimilarityIndex;
use crate::matching::corpus::Corpus;

static STOP_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "a", "an", "and", "are", "as", "at", "be", "but", "by", "for", "if", "in", "into", "is",
        "it", "no", "not", "of", "on", "or", "such", "that", "the", "their", "then", "there",
        "these", "they", "this", "to", "was", "will", "with",
    ]
    .into_iter()
    .collect()
});

/// Lowercases, splits on non-alphanumeric characters and drops stop words
/// and single-character tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|token| token.len() > 1 && !STOP_WORDS.contains(token))
        .map(str::to_string)
        .collect()
}

/// A TF-IDF model fitted once over the corpus. Read-only after fitting.
///
/// Document weights are stored as per-term postings lists, so scoring a
/// query only touches the documents that share at least one term with it.
#[derive(Debug)]
pub struct TfIdfIndex {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f32>,
    /// term id -> (document id, L2-normalized tf-idf weight)
    postings: Vec<Vec<(u32, f32)>>,
    doc_count: usize,
}

impl TfIdfIndex {
    /// Fits vocabulary, IDF values and normalized document weights.
    pub fn fit(corpus: &Corpus) -> MatchResult<Self> {
        if corpus.is_empty() {
            return Err(MatchError::EmptyCorpus);
        }

        let mut vocabulary: HashMap<String, usize> = HashMap::new();
        let mut document_frequency: Vec<u32> = Vec::new();
        let mut term_counts_per_doc: Vec<Vec<(usize, u32)>> = Vec::with_capacity(corpus.len());

        for document in corpus.documents() {
            let mut counts: HashMap<usize, u32> = HashMap::new();
            for token in tokenize(document) {
                let next_id = vocabulary.len();
                let term_id = *vocabulary.entry(token).or_insert(next_id);
                if term_id == document_frequency.len() {
                    document_frequency.push(0);
                }
                *counts.entry(term_id).or_insert(0) += 1;
            }
            for term_id in counts.keys() {
                document_frequency[*term_id] += 1;
            }
            term_counts_per_doc.push(counts.into_iter().collect());
        }

        let total_docs = corpus.len() as f32;
        let idf: Vec<f32> = document_frequency
            .iter()
            .map(|df| ((1.0 + total_docs) / (1.0 + *df as f32)).ln() + 1.0)
            .collect();

        let mut postings: Vec<Vec<(u32, f32)>> = vec![Vec::new(); vocabulary.len()];
        for (doc_id, counts) in term_counts_per_doc.into_iter().enumerate() {
            let weights: Vec<(usize, f32)> = counts
                .into_iter()
                .map(|(term_id, tf)| (term_id, tf as f32 * idf[term_id]))
                .collect();
            let norm = weights.iter().map(|(_, w)| w * w).sum::<f32>().sqrt();
            // An all-stop-word document has no weights and simply scores zero.
            if norm > 0.0 {
                for (term_id, weight) in weights {
                    postings[term_id].push((doc_id as u32, weight / norm));
                }
            }
        }

        Ok(Self {
            vocabulary,
            idf,
            postings,
            doc_count: corpus.len(),
        })
    }

    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn doc_count(&self) -> usize {
        self.doc_count
    }
}

impl SimilarityIndex for TfIdfIndex {
    fn score(&self, query: &str) -> Vec<f32> {
        let mut scores = vec![0.0_f32; self.doc_count];

        // Query terms outside the fitted vocabulary contribute nothing.
        let mut query_counts: HashMap<usize, u32> = HashMap::new();
        for token in tokenize(query) {
            if let Some(term_id) = self.vocabulary.get(&token) {
                *query_counts.entry(*term_id).or_insert(0) += 1;
            }
        }
        if query_counts.is_empty() {
            return scores;
        }

        let query_weights: Vec<(usize, f32)> = query_counts
            .into_iter()
            .map(|(term_id, tf)| (term_id, tf as f32 * self.idf[term_id]))
            .collect();
        let norm = query_weights.iter().map(|(_, w)| w * w).sum::<f32>().sqrt();
        if norm == 0.0 {
            return scores;
        }

        for (term_id, weight) in query_weights {
            for (doc_id, doc_weight) in &self.postings[term_id] {
                scores[*doc_id as usize] += (weight / norm) * doc_weight;
            }
        }

        // Both sides are unit vectors; rounding can still push an exact
        // self-match a hair past 1.0.
        for score in &mut scores {
            *score = score.clamp(0.0, 1.0);
        }
        scores
    }
}
