use crate::document::{DocId, Document};
use crate::fuzzy::FuzzyMatcher;
use crate::tokenizer::{collation_key, Tokenizer};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::Arc;

/// Below this many exact hits the fuzzy phase also runs.
pub const FUZZY_FALLBACK_THRESHOLD: usize = 10;

/// Inverted index over title, category and instructor text.
pub struct TextIndex {
    documents: Arc<[Document]>,
    postings: HashMap<String, BTreeSet<DocId>>,
    /// Every indexed token, sorted, for fuzzy lookups.
    vocabulary: Vec<String>,
    tokenizer: Tokenizer,
    fuzzy: FuzzyMatcher,
}

impl TextIndex {
    pub fn new(documents: Arc<[Document]>) -> Self {
        let tokenizer = Tokenizer::new();
        let mut postings: HashMap<String, BTreeSet<DocId>> = HashMap::new();
        for (doc_id, doc) in (0..).zip(documents.iter()) {
            for field in [&doc.title, &doc.category, &doc.instructor] {
                for token in tokenizer.tokens(field).iter() {
                    postings.entry(token.clone()).or_default().insert(doc_id);
                }
            }
        }
        let mut vocabulary: Vec<String> = postings.keys().cloned().collect();
        vocabulary.sort();

        Self { documents, postings, vocabulary, tokenizer, fuzzy: FuzzyMatcher::new() }
    }

    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    pub fn postings(&self, token: &str) -> Option<&BTreeSet<DocId>> {
        self.postings.get(token)
    }

    /// Documents in `scope` matching `query`, sorted by title.
    pub fn search(&self, query: &str, scope: &HashSet<DocId>) -> Vec<&Document> {
        let ids: HashSet<DocId> = if query.is_empty() {
            scope.clone()
        } else {
            let tokens = self.tokenizer.tokens(query);
            let mut ids = self.exact_matches(&tokens);
            let exact_hits = ids.len();
            let fuzzy_ran = exact_hits < FUZZY_FALLBACK_THRESHOLD;
            if fuzzy_ran {
                ids.extend(self.fuzzy_matches(&tokens));
            }
            ids.retain(|id| scope.contains(id));
            tracing::debug!(query, exact_hits, fuzzy_ran, hits = ids.len(), "text search");
            ids
        };

        let mut docs: Vec<&Document> = ids
            .into_iter()
            .filter_map(|id| self.documents.get(id as usize))
            .collect();
        docs.sort_by_cached_key(|d| collation_key(&d.title));
        docs
    }

    /// Up to `limit` distinct titles: title-prefix matches on the first query
    /// token in corpus order, then titles of fuzzy matches.
    pub fn suggest(&self, query: &str, limit: usize) -> Vec<String> {
        let tokens = self.tokenizer.tokens(query);
        let Some(first) = tokens.first() else {
            return Vec::new();
        };

        let mut seen: HashSet<&str> = HashSet::new();
        let mut suggestions: Vec<String> = Vec::new();
        for doc in self.documents.iter() {
            if suggestions.len() >= limit {
                break;
            }
            let title_tokens = self.tokenizer.tokens(&doc.title);
            if title_tokens.iter().any(|t| t.starts_with(first.as_str())) && seen.insert(&doc.title) {
                suggestions.push(doc.title.clone());
            }
        }
        let prefix_hits = suggestions.len();

        if suggestions.len() < limit {
            for id in self.fuzzy_matches(&tokens) {
                if suggestions.len() >= limit {
                    break;
                }
                let Some(doc) = self.documents.get(id as usize) else { continue };
                if seen.insert(&doc.title) {
                    suggestions.push(doc.title.clone());
                }
            }
        }
        tracing::debug!(query, limit, prefix_hits, total = suggestions.len(), "suggest");
        suggestions
    }

    /// Memoized tokenizer inputs and distance pairs.
    pub(crate) fn cache_sizes(&self) -> (usize, usize) {
        (self.tokenizer.cached_inputs(), self.fuzzy.cached_pairs())
    }

    /// Ids whose postings contain every query token.
    fn exact_matches(&self, tokens: &[String]) -> HashSet<DocId> {
        let mut tokens = tokens.iter();
        let Some(first) = tokens.next() else {
            return HashSet::new();
        };
        let mut ids: HashSet<DocId> = self
            .postings
            .get(first)
            .map(|p| p.iter().copied().collect())
            .unwrap_or_default();
        for token in tokens {
            match self.postings.get(token) {
                Some(p) => ids.retain(|id| p.contains(id)),
                None => ids.clear(),
            }
            if ids.is_empty() {
                break;
            }
        }
        ids
    }

    /// Union of postings of every vocabulary token that fuzzily matches any
    /// query token, in discovery order.
    fn fuzzy_matches(&self, tokens: &[String]) -> Vec<DocId> {
        let mut seen: HashSet<DocId> = HashSet::new();
        let mut ids = Vec::new();
        for token in tokens {
            for matched in self.fuzzy.find_matches(token, &self.vocabulary) {
                let Some(p) = self.postings.get(matched) else { continue };
                ids.extend(p.iter().copied().filter(|id| seen.insert(*id)));
            }
        }
        ids
    }
}
