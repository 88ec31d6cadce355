//! Property tests for similarity and ranking.
//!
//! - Similarity is bounded, reflexive, symmetric and case-insensitive
//! - Raising the threshold never grows the result set
//! - Equal relevance keeps insertion order

use proptest::prelude::*;

use prosearch_core::models::{Document, NewDocument};
use prosearch_core::ranker::{GestaltRanker, Ranker};
use prosearch_core::similarity::similarity;

// ============================================================================
// STRATEGIES
// ============================================================================

/// Short strings over a small alphabet so runs and ties are common.
fn small_text() -> impl Strategy<Value = String> {
    prop::string::string_regex("[abcAB ]{0,12}").unwrap()
}

fn word() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z]{1,8}").unwrap()
}

fn document_strategy() -> impl Strategy<Value = (String, String, Vec<String>)> {
    (
        word(),
        prop::collection::vec(word(), 0..6).prop_map(|words| words.join(" ")),
        prop::collection::vec(word(), 0..3),
    )
}

fn corpus_strategy() -> impl Strategy<Value = Vec<Document>> {
    prop::collection::vec(document_strategy(), 0..8).prop_map(|docs| {
        docs.into_iter()
            .enumerate()
            .map(|(i, (title, content, tags))| {
                Document::from_new(
                    (i + 1).to_string(),
                    NewDocument::new(title, content).with_tags(tags),
                )
            })
            .collect()
    })
}

// ============================================================================
// SIMILARITY
// ============================================================================

proptest! {
    #[test]
    fn prop_similarity_in_unit_range(a in small_text(), b in small_text()) {
        let score = similarity(&a, &b);
        prop_assert!((0.0..=1.0).contains(&score));
    }

    #[test]
    fn prop_similarity_reflexive(a in small_text()) {
        let expected = if a.is_empty() { 0.0 } else { 1.0 };
        prop_assert_eq!(similarity(&a, &a), expected);
    }

    #[test]
    fn prop_similarity_symmetric(a in small_text(), b in small_text()) {
        prop_assert_eq!(similarity(&a, &b), similarity(&b, &a));
    }

    #[test]
    fn prop_similarity_case_insensitive(a in small_text(), b in small_text()) {
        prop_assert_eq!(
            similarity(&a.to_uppercase(), &b),
            similarity(&a.to_lowercase(), &b)
        );
    }
}

// ============================================================================
// RANKING
// ============================================================================

proptest! {
    #[test]
    fn prop_threshold_monotonic(
        docs in corpus_strategy(),
        query in word(),
        low in 0.0f64..=1.0,
        high in 0.0f64..=1.0,
    ) {
        let (low, high) = if low <= high { (low, high) } else { (high, low) };
        let at_low = GestaltRanker.rank(&query, &docs, low);
        let at_high = GestaltRanker.rank(&query, &docs, high);

        prop_assert!(at_high.len() <= at_low.len());
        for hit in &at_high {
            prop_assert!(at_low.iter().any(|r| r.id == hit.id));
        }
    }

    #[test]
    fn prop_results_sorted_with_stable_ties(docs in corpus_strategy(), query in word()) {
        let results = GestaltRanker.rank(&query, &docs, 0.0);
        prop_assert_eq!(results.len(), docs.len());

        for pair in results.windows(2) {
            prop_assert!(pair[0].relevance >= pair[1].relevance);
            if pair[0].relevance == pair[1].relevance {
                let first: usize = pair[0].id.parse().unwrap();
                let second: usize = pair[1].id.parse().unwrap();
                prop_assert!(first < second);
            }
        }
    }

    #[test]
    fn prop_results_meet_threshold(
        docs in corpus_strategy(),
        query in word(),
        threshold in 0.0f64..=1.0,
    ) {
        for hit in GestaltRanker.rank(&query, &docs, threshold) {
            prop_assert!(hit.relevance >= threshold);
            prop_assert!(hit.preview.ends_with("..."));
        }
    }
}
