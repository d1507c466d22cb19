//! Fuzzy ranking of entry names for the search filter.
//!
//! The navigator only depends on the [Ranker] trait. [SkimRanker] is the default
//! implementation, scoring candidates with the fuzzy_matcher crate's skim algorithm.

use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

/// Ranks candidate names against a query.
///
/// Returns indices into `candidates` for every match, best first. Must be
/// deterministic: the same query and candidates always yield the same order.
pub trait Ranker {
    fn rank(&self, query: &str, candidates: &[&str]) -> Vec<usize>;
}

/// Skim-style fuzzy ranker. Ties keep the candidates' original order.
#[derive(Default)]
pub struct SkimRanker {
    matcher: SkimMatcherV2,
}

impl Ranker for SkimRanker {
    fn rank(&self, query: &str, candidates: &[&str]) -> Vec<usize> {
        let mut scored: Vec<(usize, i64)> = candidates
            .iter()
            .enumerate()
            .filter_map(|(idx, name)| {
                self.matcher
                    .fuzzy_match(name, query)
                    .map(|score| (idx, score))
            })
            .collect();

        scored.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        scored.into_iter().map(|(idx, _)| idx).collect()
    }
}
