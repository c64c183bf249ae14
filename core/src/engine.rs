use crate::document::{DocId, Document, FacetOption, FilterSelection};
use crate::filter::FilterEngine;
use crate::index::TextIndex;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

pub const DEFAULT_SUGGESTION_LIMIT: usize = 5;

/// Facade over the filter layer and the text index.
///
/// Built once from a corpus snapshot; replacing the corpus means building a
/// new engine. Memo caches are internal and synchronized, so an engine can be
/// shared across threads behind an `Arc`. They only grow: one entry per
/// distinct query string and per measured token pair.
pub struct SearchEngine {
    documents: Arc<[Document]>,
    by_id: HashMap<String, DocId>,
    filters: FilterEngine,
    text: TextIndex,
}

impl SearchEngine {
    pub fn new(documents: Vec<Document>) -> Self {
        let documents: Arc<[Document]> = documents.into();
        let by_id = (0..).zip(documents.iter()).map(|(i, d)| (d.id.clone(), i)).collect();
        let filters = FilterEngine::new(Arc::clone(&documents));
        let text = TextIndex::new(Arc::clone(&documents));
        tracing::info!(
            documents = documents.len(),
            vocabulary = text.vocabulary().len(),
            categories = filters.categories().len(),
            "search engine built"
        );
        Self { documents, by_id, filters, text }
    }

    /// Empty query and no active filter returns the corpus in ingestion order;
    /// every other call is filtered, text-narrowed and sorted by title.
    pub fn search(&self, query: &str, selection: &FilterSelection) -> Vec<&Document> {
        let filtering = self.filters.is_active(selection);
        if query.is_empty() && !filtering {
            return self.documents.iter().collect();
        }
        let scope: HashSet<DocId> = if filtering {
            self.filters.filter_documents(selection)
        } else {
            (0..).zip(self.documents.iter()).map(|(i, _)| i).collect()
        };
        tracing::debug!(query, filtering, scope = scope.len(), "search");
        self.text.search(query, &scope)
    }

    pub fn suggestions(&self, query: &str, limit: usize) -> Vec<String> {
        self.text.suggest(query, limit)
    }

    pub fn categories(&self) -> &[FacetOption] {
        self.filters.categories()
    }

    pub fn durations(&self) -> &[FacetOption] {
        self.filters.durations()
    }

    pub fn levels(&self) -> &[FacetOption] {
        self.filters.levels()
    }

    pub fn document(&self, id: &str) -> Option<&Document> {
        self.by_id.get(id).and_then(|i| self.documents.get(*i as usize))
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}
