use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Position of a document in the corpus, assigned in ingestion order.
pub type DocId = u32;

/// A single course listing.
///
/// `duration_minutes` is derived from `duration` exactly once, when the
/// document is created, and never recomputed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "DocumentRecord", rename_all = "camelCase")]
pub struct Document {
    pub id: String,
    pub title: String,
    pub category: String,
    pub instructor: String,
    /// Original `"HH:MM"` text.
    pub duration: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view_count: Option<String>,
    #[serde(skip_serializing)]
    duration_minutes: u32,
}

/// Wire shape of a catalog record.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DocumentRecord {
    id: String,
    title: String,
    category: String,
    instructor: String,
    duration: String,
    #[serde(default)]
    thumbnail: Option<String>,
    #[serde(default)]
    view_count: Option<String>,
}

impl From<DocumentRecord> for Document {
    fn from(r: DocumentRecord) -> Self {
        let mut doc = Document::new(r.id, r.title, r.category, r.instructor, r.duration);
        doc.thumbnail = r.thumbnail;
        doc.view_count = r.view_count;
        doc
    }
}

impl Document {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        category: impl Into<String>,
        instructor: impl Into<String>,
        duration: impl Into<String>,
    ) -> Self {
        let id = id.into();
        let duration = duration.into();
        let duration_minutes = parse_duration_minutes(&duration).unwrap_or_else(|| {
            tracing::warn!(%id, %duration, "unparseable duration, treating as 0 minutes");
            0
        });
        Self {
            id,
            title: title.into(),
            category: category.into(),
            instructor: instructor.into(),
            duration,
            thumbnail: None,
            view_count: None,
            duration_minutes,
        }
    }

    pub fn with_thumbnail(mut self, thumbnail: impl Into<String>) -> Self {
        self.thumbnail = Some(thumbnail.into());
        self
    }

    pub fn with_view_count(mut self, view_count: impl Into<String>) -> Self {
        self.view_count = Some(view_count.into());
        self
    }

    pub fn duration_minutes(&self) -> u32 {
        self.duration_minutes
    }
}

/// Parse `"HH:MM"` into minutes. Both parts must be plain non-negative integers.
pub fn parse_duration_minutes(text: &str) -> Option<u32> {
    let (hours, minutes) = text.trim().split_once(':')?;
    let hours: u32 = hours.trim().parse().ok()?;
    let minutes: u32 = minutes.trim().parse().ok()?;
    hours.checked_mul(60)?.checked_add(minutes)
}

/// A selectable bucket of one facet dimension, with its corpus-wide count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetOption {
    pub id: String,
    pub label: String,
    pub count: usize,
}

/// The closed set of filter dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Category,
    Duration,
    Level,
}

impl Dimension {
    pub const ALL: [Dimension; 3] = [Dimension::Category, Dimension::Duration, Dimension::Level];
}

/// Selected facet ids per dimension. OR within a dimension, AND across them;
/// an empty set leaves its dimension unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSelection {
    pub categories: BTreeSet<String>,
    pub durations: BTreeSet<String>,
    pub levels: BTreeSet<String>,
}

impl FilterSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_categories<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories.extend(ids.into_iter().map(Into::into));
        self
    }

    pub fn with_durations<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.durations.extend(ids.into_iter().map(Into::into));
        self
    }

    pub fn with_levels<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.levels.extend(ids.into_iter().map(Into::into));
        self
    }

    pub fn get(&self, dimension: Dimension) -> &BTreeSet<String> {
        match dimension {
            Dimension::Category => &self.categories,
            Dimension::Duration => &self.durations,
            Dimension::Level => &self.levels,
        }
    }

    pub fn is_empty(&self) -> bool {
        Dimension::ALL.iter().all(|d| self.get(*d).is_empty())
    }
}
