//! Faceted filtering over the corpus: category, duration and level.

pub mod category;
pub mod duration;
pub mod level;

use crate::document::{Dimension, DocId, Document, FacetOption, FilterSelection};
use category::CategoryFacets;
use duration::DurationFacets;
use level::LevelFacets;
use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

/// One facet dimension. The set of dimensions is closed.
#[derive(Debug, Clone)]
pub enum FilterStrategy {
    Category(CategoryFacets),
    Duration(DurationFacets),
    Level(LevelFacets),
}

impl FilterStrategy {
    /// Classify the whole corpus once and snapshot per-bucket counts.
    pub fn build(dimension: Dimension, corpus: &[Document]) -> Self {
        match dimension {
            Dimension::Category => FilterStrategy::Category(CategoryFacets::build(corpus)),
            Dimension::Duration => FilterStrategy::Duration(DurationFacets::build(corpus)),
            Dimension::Level => FilterStrategy::Level(LevelFacets::build(corpus)),
        }
    }

    pub fn dimension(&self) -> Dimension {
        match self {
            FilterStrategy::Category(_) => Dimension::Category,
            FilterStrategy::Duration(_) => Dimension::Duration,
            FilterStrategy::Level(_) => Dimension::Level,
        }
    }

    /// An empty selection always matches; unknown ids match nothing.
    pub fn matches(&self, doc: &Document, selected: &BTreeSet<String>) -> bool {
        if !self.is_active(selected) {
            return true;
        }
        match self {
            FilterStrategy::Category(f) => f.matches(doc, selected),
            FilterStrategy::Duration(f) => f.matches(doc, selected),
            FilterStrategy::Level(f) => f.matches(doc, selected),
        }
    }

    pub fn facets(&self) -> &[FacetOption] {
        match self {
            FilterStrategy::Category(f) => f.options(),
            FilterStrategy::Duration(f) => f.options(),
            FilterStrategy::Level(f) => f.options(),
        }
    }

    pub fn is_active(&self, selected: &BTreeSet<String>) -> bool {
        !selected.is_empty()
    }
}

/// Combines the three strategies with AND semantics.
pub struct FilterEngine {
    documents: Arc<[Document]>,
    strategies: [FilterStrategy; 3],
}

impl FilterEngine {
    pub fn new(documents: Arc<[Document]>) -> Self {
        let strategies = Dimension::ALL.map(|d| FilterStrategy::build(d, &documents));
        Self { documents, strategies }
    }

    /// Ids of documents passing every active dimension.
    pub fn filter_documents(&self, selection: &FilterSelection) -> HashSet<DocId> {
        (0..)
            .zip(self.documents.iter())
            .filter(|(_, doc)| {
                self.strategies
                    .iter()
                    .all(|s| s.matches(doc, selection.get(s.dimension())))
            })
            .map(|(id, _)| id)
            .collect()
    }

    pub fn is_active(&self, selection: &FilterSelection) -> bool {
        self.strategies
            .iter()
            .any(|s| s.is_active(selection.get(s.dimension())))
    }

    pub fn facets(&self, dimension: Dimension) -> &[FacetOption] {
        self.strategies
            .iter()
            .find(|s| s.dimension() == dimension)
            .map(FilterStrategy::facets)
            .unwrap_or_default()
    }

    pub fn categories(&self) -> &[FacetOption] {
        self.facets(Dimension::Category)
    }

    pub fn durations(&self) -> &[FacetOption] {
        self.facets(Dimension::Duration)
    }

    pub fn levels(&self) -> &[FacetOption] {
        self.facets(Dimension::Level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> FilterEngine {
        let docs = vec![
            Document::new("1", "Introducción al Derecho", "Justicia", "Ana", "01:00"),
            Document::new("2", "Derecho Penal Avanzado", "Justicia", "Luis", "04:00"),
            Document::new("3", "Didáctica General", "Educación", "Eva", "07:30"),
        ];
        FilterEngine::new(docs.into())
    }

    fn sorted(ids: HashSet<DocId>) -> Vec<DocId> {
        let mut ids: Vec<DocId> = ids.into_iter().collect();
        ids.sort();
        ids
    }

    #[test]
    fn empty_selection_keeps_everything() {
        let e = engine();
        assert!(!e.is_active(&FilterSelection::new()));
        assert_eq!(sorted(e.filter_documents(&FilterSelection::new())), vec![0, 1, 2]);
    }

    #[test]
    fn or_within_and_across_dimensions() {
        let e = engine();
        let sel = FilterSelection::new().with_durations(["short", "long"]);
        assert_eq!(sorted(e.filter_documents(&sel)), vec![0, 2]);
        let sel = sel.with_categories(["justicia"]);
        assert!(e.is_active(&sel));
        assert_eq!(sorted(e.filter_documents(&sel)), vec![0]);
        let sel = sel.with_levels(["advanced"]);
        assert!(e.filter_documents(&sel).is_empty());
    }

    #[test]
    fn unknown_ids_match_nothing() {
        let e = engine();
        let sel = FilterSelection::new().with_levels(["expert"]);
        assert!(e.is_active(&sel));
        assert!(e.filter_documents(&sel).is_empty());
    }

    #[test]
    fn facet_listings_per_dimension() {
        let e = engine();
        assert_eq!(e.categories().len(), 2);
        assert_eq!(e.categories()[0].count, 2);
        let levels: Vec<(&str, usize)> = e.levels().iter().map(|o| (o.id.as_str(), o.count)).collect();
        assert_eq!(levels, vec![("beginner", 1), ("intermediate", 1), ("advanced", 1)]);
        let durations: Vec<usize> = e.durations().iter().map(|o| o.count).collect();
        assert_eq!(durations, vec![1, 1, 1]);
    }

    #[test]
    fn empty_corpus_has_no_facets() {
        let e = FilterEngine::new(Vec::<Document>::new().into());
        assert!(e.categories().is_empty());
        assert!(e.durations().is_empty());
        assert!(e.levels().is_empty());
        assert!(e.filter_documents(&FilterSelection::new().with_durations(["short"])).is_empty());
    }
}
