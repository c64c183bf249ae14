//! Bounded edit-distance lookup over the index vocabulary.

use parking_lot::RwLock;
use std::collections::HashMap;

/// Upper bound on tolerated edits, whatever the query length.
pub const MAX_FUZZY_DISTANCE: usize = 1;
/// Query tokens shorter than this never fuzzy-match.
pub const MIN_FUZZY_TOKEN_CHARS: usize = 3;

/// Finds vocabulary tokens close to a query token.
///
/// Pairwise distances are memoized for the matcher's lifetime, keyed by the
/// unordered pair, so each pair is computed at most once. The table is
/// nested by the smaller then the larger token so hits need no allocation.
#[derive(Debug, Default)]
pub struct FuzzyMatcher {
    distances: RwLock<HashMap<String, HashMap<String, usize>>>,
}

impl FuzzyMatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Effective edit budget for a query token of `len` characters.
    pub fn max_distance(len: usize) -> usize {
        MAX_FUZZY_DISTANCE.min(len / 3)
    }

    /// Prefix (or exact) hits in vocabulary order when there are any;
    /// otherwise tokens within the edit budget, closest first.
    pub fn find_matches<'v>(&self, query: &str, vocabulary: &'v [String]) -> Vec<&'v str> {
        let query_len = query.chars().count();
        if query_len < MIN_FUZZY_TOKEN_CHARS {
            return Vec::new();
        }

        let prefixed: Vec<&str> = vocabulary
            .iter()
            .filter(|t| t.starts_with(query))
            .map(String::as_str)
            .collect();
        if !prefixed.is_empty() {
            return prefixed;
        }

        let max_distance = Self::max_distance(query_len);
        let mut scored: Vec<(usize, &str)> = vocabulary
            .iter()
            .filter(|t| t.chars().count().abs_diff(query_len) <= max_distance)
            .filter_map(|t| {
                let d = self.distance(query, t);
                (d <= max_distance).then_some((d, t.as_str()))
            })
            .collect();
        scored.sort_by_key(|(d, _)| *d);
        scored.into_iter().map(|(_, t)| t).collect()
    }

    /// Memoized, symmetric edit distance.
    pub fn distance(&self, a: &str, b: &str) -> usize {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        if let Some(d) = self.distances.read().get(lo).and_then(|row| row.get(hi)) {
            return *d;
        }
        let d = levenshtein(lo, hi);
        *self
            .distances
            .write()
            .entry(lo.to_string())
            .or_default()
            .entry(hi.to_string())
            .or_insert(d)
    }

    pub fn cached_pairs(&self) -> usize {
        self.distances.read().values().map(HashMap::len).sum()
    }
}

/// Levenshtein distance over chars. Pairs whose lengths differ by more than
/// [`MAX_FUZZY_DISTANCE`] report `MAX_FUZZY_DISTANCE + 1` without filling the matrix.
pub fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }
    if a.len().abs_diff(b.len()) > MAX_FUZZY_DISTANCE {
        return MAX_FUZZY_DISTANCE + 1;
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];
    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}
