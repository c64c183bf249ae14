use crate::document::{Document, FacetOption};
use std::collections::BTreeSet;
use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationBucket {
    Short,
    Medium,
    Long,
}

impl DurationBucket {
    pub const ALL: [DurationBucket; 3] = [DurationBucket::Short, DurationBucket::Medium, DurationBucket::Long];

    pub fn id(self) -> &'static str {
        match self {
            DurationBucket::Short => "short",
            DurationBucket::Medium => "medium",
            DurationBucket::Long => "long",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DurationBucket::Short => "Corta (< 3h)",
            DurationBucket::Medium => "Media (3-6h)",
            DurationBucket::Long => "Larga (> 6h)",
        }
    }

    /// Half-open range of minutes.
    pub fn minutes(self) -> Range<u32> {
        match self {
            DurationBucket::Short => 0..180,
            DurationBucket::Medium => 180..360,
            DurationBucket::Long => 360..u32::MAX,
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.id() == id)
    }

    pub fn of(minutes: u32) -> Self {
        Self::ALL
            .into_iter()
            .find(|b| b.minutes().contains(&minutes))
            .unwrap_or(DurationBucket::Long)
    }
}

#[derive(Debug, Clone)]
pub struct DurationFacets {
    options: Vec<FacetOption>,
}

impl DurationFacets {
    /// Fixed buckets with corpus-wide counts; no buckets at all for an empty corpus.
    pub fn build(corpus: &[Document]) -> Self {
        if corpus.is_empty() {
            return Self { options: Vec::new() };
        }
        let mut counts = [0usize; 3];
        for doc in corpus {
            counts[DurationBucket::of(doc.duration_minutes()) as usize] += 1;
        }
        let options = DurationBucket::ALL
            .into_iter()
            .map(|b| FacetOption { id: b.id().to_string(), label: b.label().to_string(), count: counts[b as usize] })
            .collect();
        Self { options }
    }

    pub fn matches(&self, doc: &Document, selected: &BTreeSet<String>) -> bool {
        let bucket = DurationBucket::of(doc.duration_minutes());
        selected.iter().filter_map(|id| DurationBucket::from_id(id)).any(|b| b == bucket)
    }

    pub fn options(&self) -> &[FacetOption] {
        &self.options
    }
}
