use crate::document::{Document, FacetOption};
use std::collections::BTreeSet;

const BEGINNER_KEYWORDS: [&str; 2] = ["básico", "introducción"];
const ADVANCED_KEYWORDS: [&str; 2] = ["avanzado", "superior"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Beginner,
    Intermediate,
    Advanced,
}

impl Level {
    pub const ALL: [Level; 3] = [Level::Beginner, Level::Intermediate, Level::Advanced];

    pub fn id(self) -> &'static str {
        match self {
            Level::Beginner => "beginner",
            Level::Intermediate => "intermediate",
            Level::Advanced => "advanced",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Level::Beginner => "Principiante",
            Level::Intermediate => "Intermedio",
            Level::Advanced => "Avanzado",
        }
    }

    /// Inferred from title keywords; beginner keywords take precedence.
    pub fn of(title: &str) -> Self {
        let title = title.to_lowercase();
        if BEGINNER_KEYWORDS.iter().any(|k| title.contains(k)) {
            Level::Beginner
        } else if ADVANCED_KEYWORDS.iter().any(|k| title.contains(k)) {
            Level::Advanced
        } else {
            Level::Intermediate
        }
    }
}

#[derive(Debug, Clone)]
pub struct LevelFacets {
    options: Vec<FacetOption>,
}

impl LevelFacets {
    /// Fixed buckets with corpus-wide counts; no buckets at all for an empty corpus.
    pub fn build(corpus: &[Document]) -> Self {
        if corpus.is_empty() {
            return Self { options: Vec::new() };
        }
        let mut counts = [0usize; 3];
        for doc in corpus {
            counts[Level::of(&doc.title) as usize] += 1;
        }
        let options = Level::ALL
            .into_iter()
            .map(|l| FacetOption { id: l.id().to_string(), label: l.label().to_string(), count: counts[l as usize] })
            .collect();
        Self { options }
    }

    pub fn matches(&self, doc: &Document, selected: &BTreeSet<String>) -> bool {
        selected.contains(Level::of(&doc.title).id())
    }

    pub fn options(&self) -> &[FacetOption] {
        &self.options
    }
}
