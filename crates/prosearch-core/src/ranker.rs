//! Query ranking
//!
//! A query is compared against the title, the content and every tag of each
//! document. The best of those scores is the document's relevance; documents
//! at or above the threshold are returned best first.
//!
//! Ranking is brute force: every field of every document is scored on every
//! query. The `Ranker` trait keeps that choice behind one seam.

use crate::models::{Document, FieldScores, QueryResult};
use crate::similarity::similarity;

/// Relevance a document needs to appear in results unless told otherwise
pub const DEFAULT_THRESHOLD: f64 = 0.6;

/// Orders documents by relevance to a query
pub trait Ranker {
    /// Results with `relevance >= threshold`, highest relevance first
    ///
    /// Documents with equal relevance keep their order in `documents`.
    fn rank(&self, query: &str, documents: &[Document], threshold: f64) -> Vec<QueryResult>;
}

/// Ranks by gestalt similarity across title, content and tags
#[derive(Debug, Clone, Copy, Default)]
pub struct GestaltRanker;

impl GestaltRanker {
    /// Score every field of one document against an already lowercased query
    pub fn score(&self, query: &str, document: &Document) -> FieldScores {
        FieldScores {
            title: similarity(query, &document.title),
            content: similarity(query, &document.content),
            tags: document
                .tags
                .iter()
                .map(|tag| similarity(query, tag))
                .fold(0.0, f64::max),
        }
    }
}

impl Ranker for GestaltRanker {
    fn rank(&self, query: &str, documents: &[Document], threshold: f64) -> Vec<QueryResult> {
        let query = query.to_lowercase();

        let mut results: Vec<QueryResult> = documents
            .iter()
            .filter_map(|document| {
                let relevance = self.score(&query, document).relevance();
                (relevance >= threshold).then(|| QueryResult {
                    id: document.id.clone(),
                    title: document.title.clone(),
                    preview: document.preview(),
                    relevance,
                })
            })
            .collect();

        // sort_by is stable
        results.sort_by(|a, b| b.relevance.total_cmp(&a.relevance));
        results
    }
}
