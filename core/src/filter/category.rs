use crate::document::{Document, FacetOption};
use std::collections::{BTreeSet, HashMap};

/// Facet id for a raw category: lowercased, every non-ASCII-word char
/// replaced by `_` ("Educación" -> "educaci_n").
pub fn category_id(category: &str) -> String {
    category
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}

#[derive(Debug, Clone, Default)]
pub struct CategoryFacets {
    options: Vec<FacetOption>,
}

impl CategoryFacets {
    /// One option per distinct id, slotted where the id first appears.
    /// Counts are per raw value; when raw values normalize to the same id the
    /// last distinct raw value seen owns the slot, label and count together.
    pub fn build(corpus: &[Document]) -> Self {
        let mut raw: Vec<(&str, usize)> = Vec::new();
        let mut raw_slots: HashMap<&str, usize> = HashMap::new();
        for doc in corpus {
            match raw_slots.get(doc.category.as_str()) {
                Some(&slot) => raw[slot].1 += 1,
                None => {
                    raw_slots.insert(doc.category.as_str(), raw.len());
                    raw.push((doc.category.as_str(), 1));
                }
            }
        }

        let mut options: Vec<FacetOption> = Vec::new();
        let mut slots: HashMap<String, usize> = HashMap::new();
        for (label, count) in raw {
            let option = FacetOption { id: category_id(label), label: label.to_string(), count };
            match slots.get(&option.id) {
                Some(&slot) => options[slot] = option,
                None => {
                    slots.insert(option.id.clone(), options.len());
                    options.push(option);
                }
            }
        }
        Self { options }
    }

    pub fn matches(&self, doc: &Document, selected: &BTreeSet<String>) -> bool {
        selected.contains(&category_id(&doc.category))
    }

    pub fn options(&self) -> &[FacetOption] {
        &self.options
    }
}
